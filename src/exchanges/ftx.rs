use serde::Deserialize;
use serde_json::Value;

use crate::{error::Result, schema::CanonicalFilter};

use super::{
    Exchange,
    mapper::{SubscriptionMapper, decode, discriminator_is},
};

/// FTX subscription mapper
///
/// https://docs.ftx.com/#request-format
#[derive(Debug, Clone, Copy, Default)]
pub struct FtxMapper;

#[derive(Debug, Deserialize)]
struct SubscribeMessage {
    channel: String,
    market: String,
}

impl SubscriptionMapper for FtxMapper {

    fn exchange(&self) -> Exchange {
        Exchange::Ftx
    }

    fn can_handle(&self, message: &Value) -> bool {
        discriminator_is(message, &["op"], "subscribe")
    }

    fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        let msg: SubscribeMessage = decode(self.exchange(), message)?;
        Ok(vec![CanonicalFilter::with_symbol(msg.channel, msg.market)])
    }
}
