use serde::Deserialize;
use serde_json::Value;

use crate::{error::Result, schema::CanonicalFilter};

use super::{
    Exchange,
    mapper::{SubscriptionMapper, decode, discriminator_is},
};

/// Crypto Facilities subscription mapper
///
/// https://www.cryptofacilities.com/resources/hc/en-us/sections/360000120914-Websocket-API-Public
///
/// `feed` and `product_ids` are already structured; one filter out.
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptofacilitiesMapper;

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    feed: String,
    #[serde(default)]
    product_ids: Option<Vec<String>>,
}

impl SubscriptionMapper for CryptofacilitiesMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Cryptofacilities
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["event"], "subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;

        Ok(vec![CanonicalFilter {
            channel: msg.feed,
            symbols: msg.product_ids,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_filter_passthrough() {
        let msg = json!({
            "event": "subscribe",
            "feed": "book",
            "product_ids": ["PI_XBTUSD", "FI_ETHUSD_190329"]
        });

        assert!(CryptofacilitiesMapper.can_handle(&msg));
        assert_eq!(
            CryptofacilitiesMapper.map(&msg).unwrap(),
            vec![CanonicalFilter::with_symbols(
                "book",
                vec!["PI_XBTUSD".to_string(), "FI_ETHUSD_190329".to_string()]
            )]
        );
    }

    #[test]
    fn test_absent_product_ids_covers_all_symbols() {
        let msg = json!({ "event": "subscribe", "feed": "heartbeat" });
        assert_eq!(
            CryptofacilitiesMapper.map(&msg).unwrap(),
            vec![CanonicalFilter::channel("heartbeat")]
        );
    }

    #[test]
    fn test_missing_feed_is_malformed() {
        let msg = json!({ "event": "subscribe", "product_ids": ["PI_XBTUSD"] });
        assert!(CryptofacilitiesMapper.map(&msg).is_err());
    }

    #[test]
    fn test_rejects_data_message() {
        let msg = json!({ "feed": "trade", "product_id": "PI_XBTUSD", "price": 3500.0 });
        assert!(!CryptofacilitiesMapper.can_handle(&msg));

        let bitstamp = json!({ "event": "bts:subscribe", "data": { "channel": "live_trades_btcusd" } });
        assert!(!CryptofacilitiesMapper.can_handle(&bitstamp));
    }
}
