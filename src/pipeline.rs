//! Caller-side control flow: registry lookup → confirmation check → map.

use log::{debug, trace, warn};
use serde_json::Value;

use crate::{
    error::Result,
    exchanges::{self, Exchange},
    schema::CanonicalFilter,
};

/// Result of running one raw message through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// Subscription confirmation, mapped to canonical filters
    Filters(Vec<CanonicalFilter>),

    /// Not a confirmation (data, heartbeat, status, …)
    Passthrough,

    /// No normalizer is registered for the exchange
    Unsupported,
}

/// Normalizes a single message received from `exchange`.
///
/// Malformed confirmations are returned as errors; the caller decides
/// whether to drop, log or disconnect.
pub fn normalize(exchange: Exchange, message: &Value) -> Result<NormalizeOutcome> {
    let Some(normalizer) = exchanges::lookup(exchange) else {
        trace!("[{}] no subscription normalizer registered", exchange);
        return Ok(NormalizeOutcome::Unsupported);
    };

    if !normalizer.can_handle(message) {
        trace!("[{}] not a subscription confirmation", exchange);
        return Ok(NormalizeOutcome::Passthrough);
    }

    match normalizer.map(message) {
        Ok(filters) => {
            debug!("[{}] subscription confirmed: {} filter(s)", exchange, filters.len());
            Ok(NormalizeOutcome::Filters(filters))
        }
        Err(e) => {
            warn!("[{}] {}", exchange, e);
            Err(e)
        }
    }
}
