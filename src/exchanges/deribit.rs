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

/// Deribit subscription mapper
///
/// https://docs.deribit.com/v2/#subscription-management
///
/// Channels are dot-delimited with a variable segment count:
/// - "deribit_price_ranking.btc_usd"      → 2 segments
/// - "book.ETH-PERPETUAL.100.1.100ms"     → interval suffix after last dot
///
/// The symbol runs from the first dot to the last dot, or to the end
/// when those coincide.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeribitMapper;

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    params: Params,
}

#[derive(Debug, Deserialize)]
struct Params {
    channels: Vec<String>,
}

impl DeribitMapper {
    fn split_channel(&self, raw: &str) -> Result<CanonicalFilter> {
        let no_symbol = || {
            NormalizeError::malformed(
                self.exchange(),
                format!("channel '{raw}' has no symbol segment"),
            )
        };

        let (Some(first), Some(last)) = (raw.find('.'), raw.rfind('.')) else {
            return Err(no_symbol());
        };

        let symbol = if first == last {
            &raw[first + 1..]
        } else {
            &raw[first + 1..last]
        };

        if symbol.is_empty() {
            return Err(no_symbol());
        }

        Ok(CanonicalFilter::with_symbol(&raw[..first], symbol))
    }
}

impl SubscriptionMapper for DeribitMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Deribit
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["method"], "public/subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;

        msg.params
            .channels
            .iter()
            .map(|c| self.split_channel(c))
            .collect()
    }
}
