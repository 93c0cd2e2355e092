//! Deep-link and push-notification routing for the Crepaway app.
//!
//! This crate turns raw links into canonical intents and drives the
//! navigation container through flow switches and stack dispatches.

pub mod deferred;
pub mod navigators;
pub mod parser;
pub mod resolver;
pub mod subscriber;
pub mod switcher;

pub use deferred::DeferredSlot;
pub use navigators::{DeliveryTakeawayNavigator, DineInNavigator, StackNavigator};
pub use parser::LinkParser;
pub use resolver::{LinkResolver, LinkResolverBuilder, PendingIntent};
pub use subscriber::LinkSubscriber;
