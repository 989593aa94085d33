use serde::{Serialize, Deserialize};

/// Canonical subscription filter shared by every exchange normalizer.
///
/// This is the only shape handed to downstream consumers:
/// - Connection managers (what is actually subscribed)
/// - Replay / recording pipelines
/// - Filter-matching engines
///
/// DESIGN NOTES:
/// - `channel` stays exchange-native ("trade", "l2update", "book", …)
///   but never carries embedded symbol information.
/// - `symbols == None` means "all symbols" on that channel.
/// - Symbol order is the order the exchange sent it in.
///
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalFilter {
    /// Exchange-native channel name
    pub channel: String,

    /// Subscribed symbols, absent for channel-wide subscriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
}

impl CanonicalFilter {
    /// Filter covering every symbol of `channel`.
    pub fn channel(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            symbols: None,
        }
    }

    /// Filter restricted to the given symbols, order preserved.
    pub fn with_symbols(channel: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            channel: channel.into(),
            symbols: Some(symbols),
        }
    }

    /// Filter restricted to a single symbol.
    pub fn with_symbol(channel: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::with_symbols(channel, vec![symbol.into()])
    }
}
