use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{NormalizeError, Result},
    schema::CanonicalFilter,
};

use super::{
    Exchange,
    mapper::{SubscriptionMapper, decode, discriminator_is},
};

/// Bitstamp subscription mapper
///
/// https://www.bitstamp.net/websocket/v2/
///
/// Channel = underscore-delimited name with the pair as the trailing
/// segment, e.g. "live_trades_btcusd". Split on the LAST underscore.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitstampMapper;

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    data: Data,
}

#[derive(Debug, Deserialize)]
struct Data {
    channel: String,
}

impl SubscriptionMapper for BitstampMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Bitstamp
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["event"], "bts:subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;
        let raw = msg.data.channel;

        let Some((channel, symbol)) = raw.rsplit_once('_').filter(|(_, s)| !s.is_empty()) else {
            return Err(NormalizeError::malformed(
                self.exchange(),
                format!("channel '{raw}' has no symbol segment"),
            ));
        };

        Ok(vec![CanonicalFilter::with_symbol(channel, symbol)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_splits_on_last_underscore() {
        let msg = json!({ "event": "bts:subscribe", "data": { "channel": "live_orders_BTC_USD" } });
        assert!(BitstampMapper.can_handle(&msg));
        assert_eq!(
            BitstampMapper.map(&msg).unwrap(),
            vec![CanonicalFilter::with_symbol("live_orders_BTC", "USD")]
        );
    }

    #[test]
    fn test_diff_order_book() {
        let msg = json!({ "event": "bts:subscribe", "data": { "channel": "diff_order_book_btcusd" } });
        assert_eq!(
            BitstampMapper.map(&msg).unwrap(),
            vec![CanonicalFilter::with_symbol("diff_order_book", "btcusd")]
        );
    }

    #[test]
    fn test_channel_without_underscore_is_malformed() {
        let msg = json!({ "event": "bts:subscribe", "data": { "channel": "heartbeat" } });
        assert!(BitstampMapper.map(&msg).is_err());
    }

    #[test]
    fn test_trailing_underscore_is_malformed() {
        let msg = json!({ "event": "bts:subscribe", "data": { "channel": "live_trades_" } });
        assert_eq!(
            BitstampMapper.map(&msg).unwrap_err(),
            NormalizeError::malformed(Exchange::Bitstamp, "channel 'live_trades_' has no symbol segment")
        );
    }

    #[test]
    fn test_rejects_data_and_ack() {
        let trade = json!({ "event": "trade", "channel": "live_trades_btcusd", "data": {} });
        assert!(!BitstampMapper.can_handle(&trade));

        let succeeded = json!({ "event": "bts:subscription_succeeded", "channel": "live_trades_btcusd", "data": {} });
        assert!(!BitstampMapper.can_handle(&succeeded));
    }
}
