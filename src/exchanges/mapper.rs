use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    error::{NormalizeError, Result},
    schema::CanonicalFilter,
};

use super::Exchange;

/// SubscriptionMapper is the seam between:
/// - The caller that received a subscription acknowledgement
/// - One exchange's textual channel/symbol convention
///
/// Each exchange implementation must:
/// - Recognize its own confirmation messages by shape
/// - Recover `(channel, symbols)` pairs from them
///
/// THREAD SAFETY:
/// - Must be Send + Sync
/// - Implementations are stateless and shared process-wide
///
pub trait SubscriptionMapper: Send + Sync {

    /// Exchange this mapper is registered for.
    fn exchange(&self) -> Exchange;

    /// Returns true if `message` is a subscription confirmation
    /// for this exchange.
    ///
    /// IMPORTANT:
    /// - This function must NEVER fail or panic
    /// - Only the discriminator field is inspected
    /// - Wrong shape or missing field means `false`
    ///
    fn can_handle(&self, message: &Value) -> bool;

    /// Extracts canonical filters from a confirmation message.
    ///
    /// PRECONDITION:
    /// - `can_handle(message)` returned true
    ///
    /// OUTPUT:
    /// - Filters in the order the message lists them
    /// - `MalformedMessage` if an expected field is missing or a
    ///   channel is absent from the exchange's expansion table
    ///
    /// MUST NOT:
    /// - Keep state between calls
    ///
    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>>;
}

/// Compares a string discriminator at `path` against `expected`.
///
/// Non-object input, a missing path or a non-string value all
/// yield `false`.
pub(crate) fn discriminator_is(message: &Value, path: &[&str], expected: &str) -> bool {
    let mut current = message;
    for key in path {
        match current.get(key) {
            Some(v) => current = v,
            None => return false,
        }
    }
    current.as_str() == Some(expected)
}

/// Decodes the exchange's typed confirmation shape.
///
/// serde's description of what was missing or mistyped becomes the
/// `MalformedMessage` detail.
pub(crate) fn decode<T: DeserializeOwned>(exchange: Exchange, message: &Value) -> Result<T> {
    T::deserialize(message).map_err(|e| NormalizeError::malformed(exchange, e.to_string()))
}

/// A JSON field that is either one string or a list of strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub(crate) fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discriminator_is() {
        let msg = json!({ "op": "subscribe", "data": { "event": "x" } });
        assert!(discriminator_is(&msg, &["op"], "subscribe"));
        assert!(discriminator_is(&msg, &["data", "event"], "x"));
        assert!(!discriminator_is(&msg, &["op"], "unsubscribe"));
        assert!(!discriminator_is(&msg, &["missing"], "subscribe"));

        assert!(!discriminator_is(&json!({ "op": 1 }), &["op"], "subscribe"));
        assert!(!discriminator_is(&json!(["op", "subscribe"]), &["op"], "subscribe"));
        assert!(!discriminator_is(&json!("subscribe"), &["op"], "subscribe"));
        assert!(!discriminator_is(&Value::Null, &["op"], "subscribe"));
    }

    #[test]
    fn test_one_or_many() {
        let one: OneOrMany = serde_json::from_value(json!("trade")).unwrap();
        assert_eq!(one.into_vec(), vec!["trade"]);

        let many: OneOrMany = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(many.into_vec(), vec!["a", "b"]);

        assert!(serde_json::from_value::<OneOrMany>(json!(5)).is_err());
    }
}
