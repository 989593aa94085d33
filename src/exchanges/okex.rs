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

/// OKEx subscription mapper (v3 API)
///
/// https://www.okex.com/docs/en/#spot_ws-sub
///
/// `args` is a flat list of "channel:instrument" strings, e.g.
/// "spot/depth:BTC-USDT". Split on the first colon.
#[derive(Debug, Clone, Copy, Default)]
pub struct OkexMapper;

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    args: Vec<String>,
}

impl SubscriptionMapper for OkexMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Okex
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["op"], "subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;

        msg.args
            .iter()
            .map(|arg| match arg.split_once(':') {
                Some((channel, symbol)) if !symbol.is_empty() => {
                    Ok(CanonicalFilter::with_symbol(channel, symbol))
                }
                Some(_) => Err(NormalizeError::malformed(
                    self.exchange(),
                    format!("channel '{arg}' has no symbol segment"),
                )),
                None => Err(NormalizeError::malformed(
                    self.exchange(),
                    format!("argument '{arg}' has no instrument"),
                )),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_list() {
        let msg = json!({
            "op": "subscribe",
            "args": ["spot/ticker:ETH-USDT", "spot/candle60s:ETH-USDT", "swap/depth_l2_tbt:BTC-USD-SWAP"]
        });

        assert!(OkexMapper.can_handle(&msg));
        assert_eq!(
            OkexMapper.map(&msg).unwrap(),
            vec![
                CanonicalFilter::with_symbol("spot/ticker", "ETH-USDT"),
                CanonicalFilter::with_symbol("spot/candle60s", "ETH-USDT"),
                CanonicalFilter::with_symbol("swap/depth_l2_tbt", "BTC-USD-SWAP"),
            ]
        );
    }

    #[test]
    fn test_argument_without_colon_is_malformed() {
        let msg = json!({ "op": "subscribe", "args": ["spot/ticker"] });
        let err = OkexMapper.map(&msg).unwrap_err();
        assert_eq!(err.exchange(), Exchange::Okex);
    }

    #[test]
    fn test_trailing_colon_is_malformed() {
        let msg = json!({ "op": "subscribe", "args": ["spot/depth:BTC-USDT", "spot/ticker:"] });
        assert_eq!(
            OkexMapper.map(&msg).unwrap_err(),
            NormalizeError::malformed(Exchange::Okex, "channel 'spot/ticker:' has no symbol segment")
        );
    }

    #[test]
    fn test_single_string_args_is_malformed() {
        let msg = json!({ "op": "subscribe", "args": "spot/ticker:ETH-USDT" });
        assert!(OkexMapper.map(&msg).is_err());
    }

    #[test]
    fn test_rejects_data_message() {
        let msg = json!({ "table": "spot/ticker", "data": [{ "instrument_id": "ETH-USDT" }] });
        assert!(!OkexMapper.can_handle(&msg));
    }
}
