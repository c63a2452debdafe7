//! Wire-key translation and typed decoding.
//!
//! Discogs names fields with underscores, but bodies that passed through
//! other tooling (caches, mirrors, re-serializers) show up in camelCase.
//! Rather than scattering per-field aliases across the record types, the
//! body is parsed into a `serde_json::Value` and every object key is
//! normalized to snake_case before the typed decode. Keys that are already
//! snake_case, digit-suffixed keys like `uri150`, and the literal `type_`
//! tracklist key all pass through unchanged. The only renames on the records
//! themselves are the `type`/`type_` keys that collide with the Rust keyword.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::DiscogsError;

/// Decode a response body, normalizing the key convention first.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DiscogsError> {
    let mut value: Value =
        serde_json::from_slice(bytes).map_err(|e| DiscogsError::Decode(e.to_string()))?;
    normalize_keys(&mut value);
    serde_json::from_value(value).map_err(|e| DiscogsError::Decode(e.to_string()))
}

/// Recursively rewrite every object key to snake_case.
pub fn normalize_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            for (key, mut nested) in entries {
                normalize_keys(&mut nested);
                map.insert(snake_case(&key), nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_keys(item);
            }
        }
        _ => {}
    }
}

/// camelCase -> snake_case. Keys without uppercase letters pass through
/// unchanged, which makes the rule a no-op on native Discogs bodies.
fn snake_case(key: &str) -> String {
    if !key.chars().any(|c| c.is_ascii_uppercase()) {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discogs::dto::{MasterRelease, MasterSearchResult};
    use proptest::prelude::*;

    #[test]
    fn test_snake_case_conversion() {
        assert_eq!(snake_case("resourceUrl"), "resource_url");
        assert_eq!(snake_case("masterId"), "master_id");
        assert_eq!(snake_case("basicInformation"), "basic_information");
        assert_eq!(snake_case("coverImage"), "cover_image");
    }

    #[test]
    fn test_snake_case_leaves_wire_keys_alone() {
        assert_eq!(snake_case("master_id"), "master_id");
        assert_eq!(snake_case("per_page"), "per_page");
        assert_eq!(snake_case("uri150"), "uri150");
        assert_eq!(snake_case("type_"), "type_");
        assert_eq!(snake_case("type"), "type");
    }

    #[test]
    fn test_snake_case_leading_uppercase() {
        // No leading underscore for an initial capital
        assert_eq!(snake_case("Title"), "title");
    }

    /// Both naming conventions decode to an equal in-memory record
    #[test]
    fn test_both_conventions_decode_equal() {
        let underscored = br#"{
            "id": 66631,
            "master_id": 66631,
            "master_url": "https://api.discogs.com/masters/66631",
            "cover_image": "https://i.discogs.com/cover.jpg",
            "title": "Jalamanta",
            "year": "1999"
        }"#;
        let camel = br#"{
            "id": 66631,
            "masterId": 66631,
            "masterUrl": "https://api.discogs.com/masters/66631",
            "coverImage": "https://i.discogs.com/cover.jpg",
            "title": "Jalamanta",
            "year": "1999"
        }"#;

        let a: MasterSearchResult = from_slice(underscored).expect("snake_case body");
        let b: MasterSearchResult = from_slice(camel).expect("camelCase body");

        assert_eq!(a.master_id, b.master_id);
        assert_eq!(a.master_url, b.master_url);
        assert_eq!(a.cover_image, b.cover_image);
        assert_eq!(a.title, b.title);
        assert_eq!(a.year, b.year);
    }

    /// Normalization recurses into arrays and nested objects
    #[test]
    fn test_nested_normalization() {
        let body = br#"{
            "dataQuality": "Correct",
            "images": [{"type": "primary", "width": 600, "height": 600, "resourceUrl": "https://i.discogs.com/x.jpg"}],
            "tracklist": [{"position": "A1", "title": "Lazy Bones", "type_": "track"}]
        }"#;

        let master: MasterRelease = from_slice(body).expect("nested camelCase body");

        assert_eq!(master.data_quality, Some("Correct".to_string()));
        assert_eq!(
            master.images[0].resource_url,
            Some("https://i.discogs.com/x.jpg".to_string())
        );
        assert_eq!(master.tracklist[0].kind, "track");
    }

    #[test]
    fn test_from_slice_rejects_malformed_json() {
        let result: Result<MasterRelease, _> = from_slice(b"{not json");
        assert!(matches!(result, Err(DiscogsError::Decode(_))));
    }

    /// The decode error names the offending field
    #[test]
    fn test_decode_error_names_missing_field() {
        let body = br#"{"artists": [{"id": 1}]}"#;
        let err = from_slice::<MasterRelease>(body).unwrap_err();
        assert!(err.to_string().contains("name"), "got: {err}");
    }

    proptest! {
        /// Normalization is idempotent: a second pass never changes a key
        #[test]
        fn prop_snake_case_idempotent(key in "[A-Za-z][A-Za-z0-9_]{0,15}") {
            let once = snake_case(&key);
            prop_assert_eq!(snake_case(&once), once);
        }

        /// Already-snake_case keys are a fixpoint
        #[test]
        fn prop_snake_case_fixpoint(key in "[a-z][a-z0-9_]{0,15}") {
            prop_assert_eq!(snake_case(&key), key);
        }
    }
}
