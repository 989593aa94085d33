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

/// bitFlyer subscription mapper (JSON-RPC 2.0 over WebSocket)
///
/// https://lightning.bitflyer.com/docs?lang=en#json-rpc-2.0-over-websocket
///
/// Channel = "<base>_<product_code>", where both parts contain
/// underscores ("lightning_board_snapshot_BTC_JPY"). The base is
/// recovered by prefix match against `BASE_CHANNELS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitflyerMapper;

/// Known base channels. First match wins, so a base that is a prefix
/// of another must come after it.
pub const BASE_CHANNELS: [&str; 4] = [
    "lightning_board_snapshot",
    "lightning_board",
    "lightning_ticker",
    "lightning_executions",
];

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    params: Params,
}

#[derive(Debug, Deserialize)]
struct Params {
    channel: String,
}

fn split_channel(raw: &str) -> Option<(&'static str, &str)> {
    BASE_CHANNELS.iter().find_map(|&base| {
        raw.strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|symbol| !symbol.is_empty())
            .map(|symbol| (base, symbol))
    })
}

impl SubscriptionMapper for BitflyerMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Bitflyer
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["method"], "subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;
        let raw = msg.params.channel;

        let (channel, symbol) = split_channel(&raw)
            .ok_or_else(|| NormalizeError::unknown_channel(self.exchange(), &raw))?;

        Ok(vec![CanonicalFilter::with_symbol(channel, symbol)])
    }
}
