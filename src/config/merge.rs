//! Field-by-field merging of configuration tiers.
//!
//! Each tier is parsed into a `serde_json::Value` and folded over the
//! lower tiers, so a user file that only sets `auth.callbackURL` keeps
//! every other field from the project and embedded profiles.

use serde_json::{Map, Value};

/// Merge `overlay` onto `base`; `overlay` wins on conflicts.
///
/// - Objects merge key by key, recursively
/// - Scalars and arrays in `overlay` replace `base`
/// - A null in `overlay` means "not set" and keeps `base`
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut merged), Value::Object(upper)) => {
            for (key, upper_value) in upper {
                let value = match merged.remove(&key) {
                    Some(lower_value) => deep_merge(lower_value, upper_value),
                    None => upper_value,
                };
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Fold tiers from lowest to highest priority.
pub fn deep_merge_all(tiers: impl IntoIterator<Item = Value>) -> Value {
    tiers.into_iter().fold(Value::Null, deep_merge)
}

/// Build a sparse overlay from `(dotted.path, value)` pairs.
///
/// `[("auth.domain", "x")]` becomes `{"auth": {"domain": "x"}}`.
pub fn overlay_from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, String)>) -> Value {
    let mut root = Map::new();
    for (path, value) in pairs {
        let mut node = &mut root;
        let mut keys = path.split('.').peekable();
        while let Some(key) = keys.next() {
            if keys.peek().is_none() {
                node.insert(key.to_string(), Value::String(value));
                break;
            }
            let child = node
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            let Value::Object(map) = child else {
                break;
            };
            node = map;
        }
    }
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_auth_override_keeps_siblings() {
        let embedded = json!({
            "apiServerUrl": "http://127.0.0.1:5000",
            "auth": {"domain": "a.auth0.com", "callbackURL": "http://localhost:8100"}
        });
        let user = json!({"auth": {"callbackURL": "http://localhost:4200"}});
        let result = deep_merge(embedded, user);
        assert_eq!(
            result,
            json!({
                "apiServerUrl": "http://127.0.0.1:5000",
                "auth": {"domain": "a.auth0.com", "callbackURL": "http://localhost:4200"}
            })
        );
    }

    #[test]
    fn test_null_does_not_erase_lower_tier() {
        let base = json!({"apiServerUrl": "http://127.0.0.1:5000", "auth": {"audience": "api"}});
        let overlay = json!({"apiServerUrl": null, "auth": {"audience": null}});
        assert_eq!(deep_merge(base.clone(), overlay), base);
    }

    #[test]
    fn test_later_tiers_win() {
        let tiers = vec![
            json!({"apiServerUrl": "http://embedded"}),
            json!({"apiServerUrl": "http://project"}),
            json!({"apiServerUrl": "http://user"}),
        ];
        assert_eq!(deep_merge_all(tiers), json!({"apiServerUrl": "http://user"}));
    }

    #[test]
    fn test_scalar_replaces_object() {
        let base = json!({"auth": {"domain": "a"}});
        let overlay = json!({"auth": "flat"});
        assert_eq!(deep_merge(base, overlay), json!({"auth": "flat"}));
    }

    #[test]
    fn test_overlay_from_pairs_nests_paths() {
        let overlay = overlay_from_pairs([
            ("apiServerUrl", "http://api".to_string()),
            ("auth.domain", "tenant.auth0.com".to_string()),
            ("auth.clientId", "abc".to_string()),
        ]);
        assert_eq!(
            overlay,
            json!({
                "apiServerUrl": "http://api",
                "auth": {"domain": "tenant.auth0.com", "clientId": "abc"}
            })
        );
    }

    #[test]
    fn test_overlay_from_no_pairs_is_empty_object() {
        assert_eq!(overlay_from_pairs(std::iter::empty()), json!({}));
    }
}
