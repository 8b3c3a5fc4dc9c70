//! Order message construction.
//!
//! Ordering is a WhatsApp hand-off: the builder fills a fixed template and
//! wraps it in a `https://wa.me/<number>?text=...` deep link. Opening the
//! link is left to the caller.

use serde::{Deserialize, Serialize};

use crate::config::OrderConfig;
use crate::error::DelivreError;

/// Shown instead of a price that cannot be formatted.
pub const PRICE_PLACEHOLDER: &str = "N/A";

/// Format a price with two decimals, or the placeholder when not finite.
pub fn format_price(price: f64) -> String {
    if price.is_finite() {
        format!("{price:.2}")
    } else {
        PRICE_PLACEHOLDER.to_string()
    }
}

/// One phone-number-like destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    /// As written in configuration, e.g. `+213 658-59-23-03`.
    pub raw: String,
    /// Digits only, as used in the link path.
    pub digits: String,
}

impl Destination {
    fn parse(raw: &str) -> Result<Self, DelivreError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(DelivreError::Config(format!(
                "order destination {raw:?} contains no digits"
            )));
        }
        Ok(Self {
            raw: raw.to_string(),
            digits,
        })
    }
}

/// Ordered, immutable list of at least two destinations.
///
/// Only the first entry is used for links today; the rest are kept so a
/// fallback can pick the next one without touching message construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationList {
    entries: Vec<Destination>,
}

impl DestinationList {
    pub const MIN_LEN: usize = 2;

    pub fn new<S: AsRef<str>>(raw: &[S]) -> Result<Self, DelivreError> {
        if raw.len() < Self::MIN_LEN {
            return Err(DelivreError::Config(format!(
                "order.destinations needs at least {} entries, got {}",
                Self::MIN_LEN,
                raw.len()
            )));
        }
        let entries = raw
            .iter()
            .map(|r| Destination::parse(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// The destination used for every order link.
    pub fn primary(&self) -> &Destination {
        // Constructor guarantees MIN_LEN entries.
        &self.entries[0]
    }

    pub fn get(&self, index: usize) -> Option<&Destination> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the customer wants to order. Lives only while one message is built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderIntent {
    pub dish_name: String,
    pub restaurant_name: String,
    pub price: f64,
    #[serde(default)]
    pub customer_name: Option<String>,
}

impl OrderIntent {
    pub fn new(dish_name: impl Into<String>, restaurant_name: impl Into<String>, price: f64) -> Self {
        Self {
            dish_name: dish_name.into(),
            restaurant_name: restaurant_name.into(),
            price,
            customer_name: None,
        }
    }

    pub fn with_customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }
}

/// Message text plus the deep link carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderMessage {
    pub text: String,
    pub uri: String,
}

/// Builds order messages for one brand and destination list.
#[derive(Debug, Clone)]
pub struct OrderMessageBuilder {
    brand: String,
    host: String,
    currency: String,
    destinations: DestinationList,
}

impl OrderMessageBuilder {
    pub fn new(
        brand: impl Into<String>,
        host: impl Into<String>,
        currency: impl Into<String>,
        destinations: DestinationList,
    ) -> Self {
        Self {
            brand: brand.into(),
            host: host.into(),
            currency: currency.into(),
            destinations,
        }
    }

    pub fn from_config(brand: &str, config: &OrderConfig) -> Result<Self, DelivreError> {
        let destinations = DestinationList::new(config.destinations.as_slice())?;
        Ok(Self::new(
            brand,
            config.host.trim_end_matches('/'),
            config.currency.clone(),
            destinations,
        ))
    }

    pub fn destinations(&self) -> &DestinationList {
        &self.destinations
    }

    /// Fill the message template.
    pub fn text(&self, intent: &OrderIntent) -> String {
        let mut text = format!(
            "🍽️ *New order from {}*\n\n📋 Dish: {}\n🏪 Restaurant: {}\n💰 Price: {} {}",
            self.brand,
            intent.dish_name,
            intent.restaurant_name,
            format_price(intent.price),
            self.currency,
        );
        if let Some(name) = intent
            .customer_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            text.push_str(&format!("\n👤 Name: {name}"));
        }
        text.push_str("\n\nPlease contact me to confirm the order");
        text
    }

    /// Link carrying `text` to the destination at `index`.
    pub fn uri_for(&self, index: usize, text: &str) -> Option<String> {
        self.destinations.get(index).map(|d| self.link(d, text))
    }

    /// Build the message and its link to the primary destination.
    pub fn build(&self, intent: &OrderIntent) -> OrderMessage {
        let text = self.text(intent);
        let uri = self.link(self.destinations.primary(), &text);
        OrderMessage { text, uri }
    }

    fn link(&self, destination: &Destination, text: &str) -> String {
        format!(
            "https://{}/{}?text={}",
            self.host,
            destination.digits,
            urlencoding::encode(text)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> OrderMessageBuilder {
        let destinations = DestinationList::new(&["+213658592303", "+213 658-16-02-60"]).unwrap();
        OrderMessageBuilder::new("3omda Delivre", "wa.me", "DA", destinations)
    }

    fn text_param(uri: &str) -> String {
        let (_, encoded) = uri.split_once("?text=").unwrap();
        urlencoding::decode(encoded).unwrap().into_owned()
    }

    #[test]
    fn test_build_without_customer() {
        let msg = builder().build(&OrderIntent::new("Couscous", "Chez Amar", 450.0));
        assert!(msg.text.contains("Couscous"));
        assert!(msg.text.contains("Chez Amar"));
        assert!(msg.text.contains("450.00 DA"));
        assert!(!msg.text.contains("Name:"));
        assert!(!msg.text.contains("👤"));
    }

    #[test]
    fn test_build_with_customer() {
        let intent = OrderIntent::new("Couscous", "Chez Amar", 450.0).with_customer("Karim");
        let msg = builder().build(&intent);
        assert!(msg.text.lines().any(|l| l.contains("Karim")));
        assert!(msg.text.contains("👤 Name: Karim"));
    }

    #[test]
    fn test_blank_customer_line_is_omitted() {
        let intent = OrderIntent::new("Couscous", "Chez Amar", 450.0).with_customer("   ");
        let msg = builder().build(&intent);
        assert!(!msg.text.contains("Name:"));
    }

    #[test]
    fn test_exact_template() {
        let intent = OrderIntent::new("Chorba", "Dar El Bahdja", 250.5).with_customer("Amina");
        let text = builder().text(&intent);
        assert_eq!(
            text,
            "🍽️ *New order from 3omda Delivre*\n\n\
             📋 Dish: Chorba\n\
             🏪 Restaurant: Dar El Bahdja\n\
             💰 Price: 250.50 DA\n\
             👤 Name: Amina\n\n\
             Please contact me to confirm the order"
        );
    }

    #[test]
    fn test_uri_round_trips_text() {
        let intent = OrderIntent::new("Tajine & pain", "Chez \"Amar\" ?", 1200.0)
            .with_customer("Karim #1");
        let msg = builder().build(&intent);
        assert!(msg.uri.starts_with("https://wa.me/213658592303?text="));
        assert_eq!(text_param(&msg.uri), msg.text);
        assert!(!msg.uri.contains(' '));
        assert!(!msg.uri.contains('\n'));
    }

    #[test]
    fn test_non_finite_price_uses_placeholder() {
        let msg = builder().build(&OrderIntent::new("Couscous", "Chez Amar", f64::NAN));
        assert!(msg.text.contains("💰 Price: N/A DA"));
        let msg = builder().build(&OrderIntent::new("Couscous", "Chez Amar", f64::INFINITY));
        assert!(msg.text.contains("N/A DA"));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(450.0), "450.00");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(12.345), "12.35");
        assert_eq!(format_price(f64::NEG_INFINITY), PRICE_PLACEHOLDER);
    }

    #[test]
    fn test_destinations_keep_order_and_strip_separators() {
        let b = builder();
        let list = b.destinations();
        assert_eq!(list.len(), 2);
        assert_eq!(list.primary().digits, "213658592303");
        assert_eq!(list.get(1).unwrap().digits, "213658160260");
        assert_eq!(list.get(1).unwrap().raw, "+213 658-16-02-60");
    }

    #[test]
    fn test_uri_for_secondary_destination() {
        let b = builder();
        let uri = b.uri_for(1, "hi there").unwrap();
        assert_eq!(uri, "https://wa.me/213658160260?text=hi%20there");
        assert!(b.uri_for(2, "hi").is_none());
    }

    #[test]
    fn test_destination_list_rejects_short_or_empty() {
        assert!(DestinationList::new(&["+213658592303"]).is_err());
        assert!(DestinationList::new::<&str>(&[]).is_err());
        assert!(DestinationList::new(&["+213658592303", "call me"]).is_err());
    }

    #[test]
    fn test_from_config_trims_host_slash() {
        let config = OrderConfig {
            host: "wa.me/".to_string(),
            ..OrderConfig::default()
        };
        let b = OrderMessageBuilder::from_config("Brand", &config).unwrap();
        let msg = b.build(&OrderIntent::new("A", "B", 1.0));
        assert!(msg.uri.starts_with("https://wa.me/213"));
    }
}
