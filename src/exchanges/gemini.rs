use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{NormalizeError, Result},
    schema::CanonicalFilter,
};

use super::{
    Exchange,
    expansion::ExpansionTable,
    mapper::{SubscriptionMapper, decode, discriminator_is},
};

/// Gemini subscription mapper (market data v2)
///
/// https://docs.gemini.com/websocket-api/#market-data-version-2
///
/// The only subscription type, "l2", delivers trades, level 2
/// updates and auction events.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiMapper;

pub const CHANNELS: ExpansionTable = ExpansionTable::new(&[
    ("l2", &["trade", "l2_updates", "auction_open", "auction_indicative", "auction_result"]),
]);

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    subscriptions: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
struct Subscription {
    name: String,
    #[serde(default)]
    symbols: Option<Vec<String>>,
}

impl SubscriptionMapper for GeminiMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Gemini
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["type"], "subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;
        let mut filters = Vec::new();

        for sub in msg.subscriptions {
            let physical = CHANNELS
                .expand(&sub.name)
                .ok_or_else(|| NormalizeError::unknown_channel(self.exchange(), &sub.name))?;

            filters.extend(physical.iter().map(|channel| CanonicalFilter {
                channel: channel.to_string(),
                symbols: sub.symbols.clone(),
            }));
        }

        Ok(filters)
    }
}
