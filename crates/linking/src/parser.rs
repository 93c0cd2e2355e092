//! Deep-link parser.
//!
//! Maps a raw URL such as `crepaway://delivery/orders/track/123` to a
//! canonical [`Intent`]. Parsing never fails loudly: anything that cannot be
//! turned into a complete intent yields `None` and the link is ignored.

use url::Url;

use crepaway_core::{
    types::{Intent, OrderFlow, Screen},
    Error, Result,
};

/// A recognized scheme/host combination, e.g. `crepaway://` or
/// `https://app.crepaway.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkPrefix {
    scheme: String,
    /// `None` for custom schemes where the first path segment sits in the
    /// host position.
    host: Option<String>,
}

impl LinkPrefix {
    fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim())
            .map_err(|e| Error::invalid_link(format!("bad prefix '{}': {}", raw, e)))?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .map(str::to_ascii_lowercase);

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
        })
    }

    fn matches(&self, url: &Url) -> bool {
        if url.scheme() != self.scheme {
            return false;
        }
        match &self.host {
            Some(host) => url
                .host_str()
                .is_some_and(|h| h.eq_ignore_ascii_case(host)),
            None => true,
        }
    }
}

/// Parser for the app's deep links.
#[derive(Debug, Clone)]
pub struct LinkParser {
    prefixes: Vec<LinkPrefix>,
}

impl LinkParser {
    /// Create a parser accepting the given prefixes.
    ///
    /// Prefixes that are not valid URLs are skipped with a warning; at least
    /// one must survive.
    pub fn new<S: AsRef<str>>(prefixes: &[S]) -> Result<Self> {
        let prefixes: Vec<LinkPrefix> = prefixes
            .iter()
            .filter_map(|raw| match LinkPrefix::parse(raw.as_ref()) {
                Ok(prefix) => Some(prefix),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping link prefix");
                    None
                }
            })
            .collect();

        if prefixes.is_empty() {
            return Err(Error::invalid_link("no usable link prefixes configured"));
        }

        Ok(Self { prefixes })
    }

    /// Parse a raw link. `None` means "ignore this link".
    pub fn parse(&self, raw: &str) -> Option<Intent> {
        match self.try_parse(raw) {
            Ok(intent) => {
                tracing::debug!(
                    link = raw,
                    screen = %intent.screen,
                    flow = ?intent.order_flow,
                    target_id = ?intent.target_id,
                    "Parsed deep link"
                );
                Some(intent)
            }
            Err(e) => {
                tracing::debug!(link = raw, error = %e, "Discarding deep link");
                None
            }
        }
    }

    /// Parse a raw link, keeping the reason it was rejected.
    pub fn try_parse(&self, raw: &str) -> Result<Intent> {
        let url = Url::parse(raw.trim())
            .map_err(|e| Error::invalid_link(format!("not a URL: {}", e)))?;

        let prefix = self
            .prefixes
            .iter()
            .find(|p| p.matches(&url))
            .ok_or_else(|| Error::invalid_link(format!("unrecognized prefix in '{}'", raw)))?;

        let segments = path_segments(&url, prefix);
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.split_first() {
            None => Ok(Intent::default_home()),
            Some((&"delivery", rest)) => parse_ordering_path(OrderFlow::Delivery, rest),
            Some((&"takeaway", rest)) => parse_ordering_path(OrderFlow::Takeaway, rest),
            Some((&"dine-in", rest)) => parse_dine_in_path(rest),
            Some((other, _)) => {
                tracing::debug!(segment = *other, "Unknown top-level segment, using default intent");
                Ok(Intent::default_home())
            }
        }
    }
}

/// Empty-filtered path segments after the prefix. Query and fragment are
/// never part of the route.
fn path_segments(url: &Url, prefix: &LinkPrefix) -> Vec<String> {
    let mut segments = Vec::new();

    if prefix.host.is_none() {
        if let Some(host) = url.host_str().filter(|h| !h.is_empty()) {
            segments.push(host.to_string());
        }
    }

    match url.path_segments() {
        Some(path) => segments.extend(path.filter(|s| !s.is_empty()).map(str::to_string)),
        // `crepaway:delivery/orders` has no authority and an opaque path.
        None => segments.extend(
            url.path()
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        ),
    }

    segments
}

/// Routing shared by delivery and takeaway.
fn parse_ordering_path(flow: OrderFlow, rest: &[&str]) -> Result<Intent> {
    let at = |screen: Screen| Intent::new(screen).in_flow(flow);

    let intent = match rest {
        [] | ["home"] => at(Screen::Home),
        ["home", "offers"] => at(Screen::Offers),
        ["home", "offers", id, ..] => at(Screen::OfferDetails).with_target_id(parse_id(id)?),
        ["home", "cart", ..] => at(Screen::Cart),
        ["home", "checkout", ..] => at(Screen::Checkout),
        ["home", "notifications", ..] => at(Screen::Notifications),
        ["home", ..] => at(Screen::Home),
        ["orders"] => at(Screen::Orders),
        ["orders", "track"] => {
            return Err(Error::invalid_link("order tracking link without an order id"))
        }
        ["orders", "track", id, ..] => at(Screen::TrackOrder).with_target_id(parse_id(id)?),
        ["orders", id, ..] => at(Screen::OrderDetails).with_target_id(parse_id(id)?),
        ["profile", "wallet", ..] => at(Screen::Wallet),
        ["profile", "notifications", ..] => at(Screen::Notifications),
        ["profile", ..] => at(Screen::Profile),
        ["favorites", ..] => at(Screen::Favorites),
        ["search", ..] => at(Screen::Search),
        [other, ..] => {
            tracing::debug!(segment = *other, flow = %flow, "Unknown sub-resource, using flow home");
            at(Screen::Home)
        }
    };

    Ok(intent)
}

fn parse_dine_in_path(rest: &[&str]) -> Result<Intent> {
    let at = |screen: Screen| Intent::new(screen).in_flow(OrderFlow::DineIn);

    let intent = match rest {
        [] | ["table", ..] => at(Screen::DineInTable),
        ["checkout", ..] => at(Screen::DineInCheckout),
        ["pending", ..] => at(Screen::DineInPending),
        ["order", "offers"] => at(Screen::Offers),
        ["order", "offers", id, ..] => at(Screen::OfferDetails).with_target_id(parse_id(id)?),
        ["order", ..] => at(Screen::DineInOrder),
        _ => at(Screen::DineInTable),
    };

    Ok(intent)
}

/// Base-10 id segment. Anything else invalidates the whole link.
fn parse_id(raw: &str) -> Result<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_link(format!("'{}' is not a numeric id", raw)));
    }
    raw.parse::<u64>()
        .map_err(|e| Error::invalid_link(format!("id '{}' out of range: {}", raw, e)))
}
