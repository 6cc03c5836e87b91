//! Event feed model.
//!
//! Mirrors the GeoJSON-style event detail document:
//! `{ "id": ..., "properties": { "products": { <type>: [Product, ...] } }, "geometry": ... }`.
//! Only the fields the core reads are typed; everything else is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding an event feed document.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("event JSON deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// A full event detail document as delivered by the event feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: EventProperties,
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
}

impl EventDetails {
    /// Parse an event detail document from raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Deserialize`] if the text is not valid JSON or
    /// `properties` / `properties.products` are present but not objects.
    /// Malformed product lists inside the mapping are dropped, not reported.
    pub fn from_json(raw: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn products(&self) -> &ProductCollection {
        &self.properties.products
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventProperties {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub mag: Option<f64>,
    /// Event origin time in epoch milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub products: ProductCollection,
}

/// A named attachment of a [`Product`], e.g. `"download/intensity.jpg"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductContent {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "contentType", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub length: Option<u64>,
}

/// A unit of hazard data contributed by a network.
///
/// `source` + `code` identify a report regardless of product type, which is
/// what lets an `origin` and a `phase-data` product describe the same
/// solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub product_type: Option<String>,
    pub source: String,
    pub code: String,
    /// Epoch milliseconds.
    #[serde(rename = "updateTime")]
    pub update_time: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "preferredWeight", default)]
    pub preferred_weight: Option<i64>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub contents: HashMap<String, ProductContent>,
}

impl Product {
    /// Composite `source_code` identity key.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!("{}_{}", self.source, self.code)
    }

    /// Returns a property rendered as text. Numbers are rendered as-is.
    #[must_use]
    pub fn property_str(&self, name: &str) -> Option<String> {
        match self.properties.get(name)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Returns a numeric property. The feed delivers most numbers as strings,
    /// so string values are parsed too.
    #[must_use]
    pub fn property_f64(&self, name: &str) -> Option<f64> {
        match self.properties.get(name)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn content_url(&self, name: &str) -> Option<&str> {
        self.contents.get(name).and_then(|c| c.url.as_deref())
    }
}

/// Products of an event keyed by product type, each list ordered most
/// preferred first.
///
/// Lists are decoded per type: a malformed list is dropped on its own and
/// never takes the rest of the collection down with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProductCollection(HashMap<String, Vec<Product>>);

impl<'de> Deserialize<'de> for ProductCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut products = HashMap::with_capacity(raw.len());
        for (product_type, list) in raw {
            match Vec::<Product>::deserialize(&list) {
                Ok(list) => {
                    products.insert(product_type, list);
                }
                Err(error) => {
                    tracing::debug!(%product_type, %error, "dropping malformed product list");
                }
            }
        }
        Ok(Self(products))
    }
}

impl ProductCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, product_type: &str) -> Option<&[Product]> {
        self.0.get(product_type).map(Vec::as_slice)
    }

    /// The most preferred product of a type.
    #[must_use]
    pub fn preferred(&self, product_type: &str) -> Option<&Product> {
        self.get(product_type).and_then(<[Product]>::first)
    }

    pub fn insert(&mut self, product_type: impl Into<String>, products: Vec<Product>) {
        self.0.insert(product_type.into(), products);
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Vec<Product>)> for ProductCollection {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Product>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "us7000abcd",
            "properties": {
                "title": "M 6.1 - 10 km S of Somewhere",
                "mag": 6.1,
                "time": 1700000000000,
                "products": {
                    "origin": [{
                        "id": "urn:usgs-product:us:origin:us7000abcd:1700000100000",
                        "type": "origin",
                        "source": "us",
                        "code": "us7000abcd",
                        "updateTime": 1700000100000,
                        "status": "UPDATE",
                        "preferredWeight": 156,
                        "properties": {
                            "depth": "10.5",
                            "magnitude": "6.1",
                            "magnitude-type": "mww",
                            "num-stations-used": 57
                        },
                        "contents": {
                            "quakeml.xml": { "url": "https://example.org/quakeml.xml", "contentType": "application/xml", "length": 1024 }
                        }
                    }]
                }
            },
            "geometry": { "type": "Point", "coordinates": [-120.1, 38.2, 10.5] }
        }"#
    }

    #[test]
    fn parses_event_document() {
        let event = EventDetails::from_json(sample_json()).expect("should parse");
        assert_eq!(event.id.as_deref(), Some("us7000abcd"));
        let origin = event.products().preferred("origin").expect("origin");
        assert_eq!(origin.source, "us");
        assert_eq!(origin.update_time, 1_700_000_100_000);
        assert_eq!(origin.preferred_weight, Some(156));
        assert_eq!(
            origin.content_url("quakeml.xml"),
            Some("https://example.org/quakeml.xml")
        );
    }

    #[test]
    fn identity_key_joins_source_and_code() {
        let event = EventDetails::from_json(sample_json()).unwrap();
        let origin = event.products().preferred("origin").unwrap();
        assert_eq!(origin.identity_key(), "us_us7000abcd");
    }

    #[test]
    fn numeric_properties_parse_from_strings_and_numbers() {
        let event = EventDetails::from_json(sample_json()).unwrap();
        let origin = event.products().preferred("origin").unwrap();
        assert_eq!(origin.property_f64("depth"), Some(10.5));
        assert_eq!(origin.property_f64("num-stations-used"), Some(57.0));
        assert_eq!(origin.property_str("num-stations-used").as_deref(), Some("57"));
        assert_eq!(origin.property_f64("magnitude-type"), None);
        assert_eq!(origin.property_str("missing"), None);
    }

    #[test]
    fn missing_products_default_to_empty_collection() {
        let event = EventDetails::from_json(r#"{"properties": {}}"#).unwrap();
        assert!(event.products().get("origin").is_none());
        assert!(event.products().preferred("dyfi").is_none());
    }

    #[test]
    fn malformed_product_list_is_dropped_alone() {
        let raw = r#"{
            "properties": {
                "products": {
                    "origin": [{ "source": "us", "code": "a", "updateTime": 10 }],
                    "dyfi": [{ "source": "us", "code": "a" }],
                    "shakemap": "not-a-list"
                }
            }
        }"#;
        let event = EventDetails::from_json(raw).expect("bad lists should not fail the event");
        assert_eq!(event.products().get("origin").map(<[Product]>::len), Some(1));
        assert!(event.products().get("dyfi").is_none());
        assert!(event.products().get("shakemap").is_none());
    }

    #[test]
    fn missing_properties_default_to_empty() {
        let event = EventDetails::from_json(r#"{"id": "x"}"#).unwrap();
        assert!(event.products().get("origin").is_none());
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = EventDetails::from_json("{\"properties\": 12}").unwrap_err();
        assert!(matches!(err, EventError::Deserialize(_)));
    }
}
