//! Serde utilities for catalog manifests.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserializer, Serializer};
use std::fmt;

/// Module to (de)serialize a string map as an ordered list of pairs.
///
/// Manifest writers emit formats in preference order, and `serde_json` maps
/// would otherwise sort the keys.
pub mod ordered_pairs {
    use super::{MapAccess, SerializeMap, Visitor, de, fmt, Deserializer, Serializer};

    /// Serializes the pairs as a map, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    /// Deserializes a map into pairs in document order.
    /// A repeated key replaces the earlier value in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a map of strings.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of format names to srcset strings")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Vec::new())
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs: Vec<(String, String)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    if let Some(existing) = pairs.iter_mut().find(|(k, _)| *k == key) {
                        existing.1 = value;
                    } else {
                        pairs.push((key, value));
                    }
                }
                Ok(pairs)
            }
        }

        deserializer.deserialize_any(PairsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "super::ordered_pairs", default)]
        formats: Vec<(String, String)>,
    }

    #[test]
    fn test_preserves_document_order() {
        let holder: Holder =
            serde_json::from_str(r#"{"formats": {"webp": "a", "avif": "b", "jpeg": "c"}}"#)
                .expect("valid json");
        let keys: Vec<&str> = holder.formats.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["webp", "avif", "jpeg"]);
    }

    #[test]
    fn test_null_and_missing_are_empty() {
        let holder: Holder = serde_json::from_str(r#"{"formats": null}"#).expect("valid json");
        assert!(holder.formats.is_empty());
        let holder: Holder = serde_json::from_str("{}").expect("valid json");
        assert!(holder.formats.is_empty());
    }

    #[test]
    fn test_serializes_in_order() {
        let holder = Holder {
            formats: vec![
                ("webp".to_string(), "a".to_string()),
                ("jpeg".to_string(), "b".to_string()),
            ],
        };
        let json = serde_json::to_string(&holder).expect("serializable");
        assert_eq!(json, r#"{"formats":{"webp":"a","jpeg":"b"}}"#);
    }
}
