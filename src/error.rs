//! Error type for subscription normalization.

use thiserror::Error;

use crate::exchanges::Exchange;

/// The only failure a normalizer reports.
///
/// Raised when a message accepted by `can_handle` lacks a field `map`
/// needs, or names a channel missing from a static expansion table.
/// Usually means the exchange changed its wire format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("malformed {exchange} subscription message: {detail}")]
    MalformedMessage { exchange: Exchange, detail: String },
}

impl NormalizeError {
    pub fn malformed(exchange: Exchange, detail: impl Into<String>) -> Self {
        Self::MalformedMessage {
            exchange,
            detail: detail.into(),
        }
    }

    pub fn unknown_channel(exchange: Exchange, channel: &str) -> Self {
        Self::malformed(exchange, format!("unknown channel '{channel}'"))
    }

    /// Exchange the offending message came from.
    pub fn exchange(&self) -> Exchange {
        match self {
            Self::MalformedMessage { exchange, .. } => *exchange,
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
