use serde::Deserialize;
use serde_json::Value;

use crate::{error::Result, schema::CanonicalFilter};

use super::{
    Exchange,
    mapper::{SubscriptionMapper, decode, discriminator_is},
};

/// Kraken subscription mapper (v1 public WS)
///
/// https://www.kraken.com/features/websocket-api#message-subscribe
///
/// Channel name is nested under `subscription.name`,
/// pairs are a top-level list.
#[derive(Debug, Clone, Copy, Default)]
pub struct KrakenMapper;

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    subscription: Subscription,
    #[serde(default)]
    pair: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Subscription {
    name: String,
}

impl SubscriptionMapper for KrakenMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Kraken
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["event"], "subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;

        Ok(vec![CanonicalFilter {
            channel: msg.subscription.name,
            symbols: msg.pair,
        }])
    }
}
