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

/// Coinbase subscription mapper
///
/// https://docs.pro.coinbase.com/#protocol-overview
///
/// A subscribe message carries:
/// - top-level `product_ids`
/// - `channels`: bare names (apply to top-level products) or
///   `{ name, product_ids }` objects
///
/// Logical channels fan out to the message types Coinbase actually
/// emits data under (see `CHANNELS`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinbaseMapper;

pub const CHANNELS: ExpansionTable = ExpansionTable::new(&[
    ("full", &["received", "open", "done", "match", "change"]),
    ("level2", &["snapshot", "l2update"]),
    ("matches", &["match", "last_match"]),
    ("ticker", &["ticker"]),
]);

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    #[serde(default)]
    product_ids: Option<Vec<String>>,
    channels: Vec<ChannelDescriptor>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChannelDescriptor {
    Name(String),
    Scoped {
        name: String,
        #[serde(default)]
        product_ids: Option<Vec<String>>,
    },
}

impl SubscriptionMapper for CoinbaseMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Coinbase
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["type"], "subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;
        let mut filters = Vec::new();

        for descriptor in msg.channels {
            let (name, symbols) = match descriptor {
                ChannelDescriptor::Name(name) => (name, msg.product_ids.clone()),
                ChannelDescriptor::Scoped { name, product_ids } => (name, product_ids),
            };

            let physical = CHANNELS
                .expand(&name)
                .ok_or_else(|| NormalizeError::unknown_channel(self.exchange(), &name))?;

            filters.extend(physical.iter().map(|channel| CanonicalFilter {
                channel: channel.to_string(),
                symbols: symbols.clone(),
            }));
        }

        Ok(filters)
    }
}
