//! Raw, unvalidated product rows as they appear in a source file.

use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;

/// One row from a catalog source, before cleaning.
///
/// Every field is an optional string so that CSV and JSON sources share one
/// shape. Column names from the Amazon product export are accepted as
/// aliases of the generic names.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawProduct {
    #[serde(default, alias = "product_id", deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, alias = "product_name", deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, alias = "about_product", deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, alias = "discounted_price", deserialize_with = "lenient_string")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub actual_price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub discount_percentage: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating_count: Option<String>,
    #[serde(default, alias = "img_link", deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    #[serde(default, alias = "product_link", deserialize_with = "lenient_string")]
    pub product_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub embedding: Option<String>,
}

impl RawProduct {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }
}

/// Accept strings, numbers, booleans, nulls, and arrays of numbers.
///
/// JSON catalogs carry ratings as numbers and embeddings as arrays; CSV
/// carries everything as text. Arrays are re-encoded as a JSON array string
/// and parsed later by the cleaner.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientStringVisitor)
}

struct LenientStringVisitor;

impl<'de> Visitor<'de> for LenientStringVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean, null, or array of numbers")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values: Vec<f64> = Vec::new();
        while let Some(v) = seq.next_element::<f64>()? {
            values.push(v);
        }
        // serde_json cannot encode NaN; the cleaner rejects the row's vector instead.
        Ok(serde_json::to_string(&values).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_numbers_and_arrays_become_strings() {
        let raw: RawProduct = serde_json::from_str(
            r#"{"product_id": 17, "product_name": "Lamp", "rating": 4.5,
                "embedding": [0.5, 0.25], "unknown_column": true}"#,
        )
        .unwrap();
        assert_eq!(raw.id.as_deref(), Some("17"));
        assert_eq!(raw.title.as_deref(), Some("Lamp"));
        assert_eq!(raw.rating.as_deref(), Some("4.5"));
        assert_eq!(raw.embedding.as_deref(), Some("[0.5,0.25]"));
    }

    #[test]
    fn json_null_is_none() {
        let raw: RawProduct = serde_json::from_str(r#"{"id": "a", "price": null}"#).unwrap();
        assert_eq!(raw.price, None);
    }
}
