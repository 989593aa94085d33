use serde::Deserialize;
use serde_json::Value;

use crate::{error::Result, schema::CanonicalFilter};

use super::{
    Exchange,
    mapper::{SubscriptionMapper, OneOrMany, decode, discriminator_is},
};

/// BitMEX subscription mapper
///
/// https://www.bitmex.com/app/wsAPI
///
/// Topics:
/// - "trade"          → channel-wide
/// - "trade:XBTUSD"   → channel + one symbol
///
/// `args` may be a single topic or a list of topics.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmexMapper;

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    args: OneOrMany,
}

impl SubscriptionMapper for BitmexMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Bitmex
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["op"], "subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;

        let filters = msg.args
            .into_vec()
            .into_iter()
            .map(|topic| match topic.split_once(':') {
                Some((channel, symbol)) => CanonicalFilter::with_symbol(channel, symbol),
                None => CanonicalFilter::channel(topic),
            })
            .collect();

        Ok(filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_channel_has_no_symbols() {
        let msg = json!({ "op": "subscribe", "args": "trade" });
        assert!(BitmexMapper.can_handle(&msg));
        assert_eq!(BitmexMapper.map(&msg).unwrap(), vec![CanonicalFilter::channel("trade")]);
    }

    #[test]
    fn test_channel_with_symbol() {
        let msg = json!({ "op": "subscribe", "args": "trade:XBTUSD" });
        assert_eq!(
            BitmexMapper.map(&msg).unwrap(),
            vec![CanonicalFilter::with_symbol("trade", "XBTUSD")]
        );
    }

    #[test]
    fn test_list_of_topics_keeps_order() {
        let msg = json!({
            "op": "subscribe",
            "args": ["orderBookL2:XBTUSD", "instrument", "trade:ETHUSD"]
        });

        assert_eq!(
            BitmexMapper.map(&msg).unwrap(),
            vec![
                CanonicalFilter::with_symbol("orderBookL2", "XBTUSD"),
                CanonicalFilter::channel("instrument"),
                CanonicalFilter::with_symbol("trade", "ETHUSD"),
            ]
        );
    }

    #[test]
    fn test_symbol_runs_past_first_colon() {
        let msg = json!({ "op": "subscribe", "args": ["trade:XBTUSD:extra"] });
        assert_eq!(
            BitmexMapper.map(&msg).unwrap(),
            vec![CanonicalFilter::with_symbol("trade", "XBTUSD:extra")]
        );
    }

    #[test]
    fn test_rejects_data_and_foreign_messages() {
        let data = json!({ "table": "trade", "action": "insert", "data": [] });
        assert!(!BitmexMapper.can_handle(&data));

        let coinbase = json!({ "type": "subscribe", "channels": ["full"] });
        assert!(!BitmexMapper.can_handle(&coinbase));
    }

    #[test]
    fn test_missing_args_is_malformed() {
        let msg = json!({ "op": "subscribe" });
        let err = BitmexMapper.map(&msg).unwrap_err();
        assert_eq!(err.exchange(), Exchange::Bitmex);
    }
}
