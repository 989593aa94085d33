//! Exchange normalizer registry
//!
//! This module provides:
//! - The closed set of exchange identifiers (`Exchange`)
//! - One `Normalizer` variant per supported exchange
//! - A process-wide registry resolving identifiers to normalizers
//!
//! All exchange-specific parsing lives in the dedicated mapper modules.
//! The rest of the crate interacts exclusively through `Normalizer`.

pub mod mapper;
pub mod expansion;
pub mod bitmex;
pub mod coinbase;
pub mod deribit;
pub mod cryptofacilities;
pub mod bitstamp;
pub mod okex;
pub mod ftx;
pub mod kraken;
pub mod bitflyer;
pub mod gemini;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::{error::Result, schema::CanonicalFilter};
use mapper::SubscriptionMapper;

/// Exchange identifiers known to the surrounding system.
///
/// Not every identifier has a normalizer: `lookup` returns `None` for
/// exchanges whose acknowledgements are passed through unnormalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Bitmex,
    Coinbase,
    Deribit,
    Cryptofacilities,
    Bitstamp,
    Okex,
    Ftx,
    Kraken,
    Bitflyer,
    Gemini,
    Binance,
    Bitfinex,
    Bybit,
    Huobi,
}

impl Exchange {
    pub const ALL: [Exchange; 14] = [
        Exchange::Bitmex,
        Exchange::Coinbase,
        Exchange::Deribit,
        Exchange::Cryptofacilities,
        Exchange::Bitstamp,
        Exchange::Okex,
        Exchange::Ftx,
        Exchange::Kraken,
        Exchange::Bitflyer,
        Exchange::Gemini,
        Exchange::Binance,
        Exchange::Bitfinex,
        Exchange::Bybit,
        Exchange::Huobi,
    ];

    /// Lowercase wire / config name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Bitmex => "bitmex",
            Exchange::Coinbase => "coinbase",
            Exchange::Deribit => "deribit",
            Exchange::Cryptofacilities => "cryptofacilities",
            Exchange::Bitstamp => "bitstamp",
            Exchange::Okex => "okex",
            Exchange::Ftx => "ftx",
            Exchange::Kraken => "kraken",
            Exchange::Bitflyer => "bitflyer",
            Exchange::Gemini => "gemini",
            Exchange::Binance => "binance",
            Exchange::Bitfinex => "bitfinex",
            Exchange::Bybit => "bybit",
            Exchange::Huobi => "huobi",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown exchange '{0}'")]
pub struct UnknownExchange(pub String);

impl FromStr for Exchange {
    type Err = UnknownExchange;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Exchange::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownExchange(s.to_string()))
    }
}

/// One normalizer per supported exchange.
///
/// Dispatch is a match over this closed set; each variant carries a
/// mapper with its own typed confirmation shape.
#[derive(Debug, Clone, Copy)]
pub enum Normalizer {
    Bitmex(bitmex::BitmexMapper),
    Coinbase(coinbase::CoinbaseMapper),
    Deribit(deribit::DeribitMapper),
    Cryptofacilities(cryptofacilities::CryptofacilitiesMapper),
    Bitstamp(bitstamp::BitstampMapper),
    Okex(okex::OkexMapper),
    Ftx(ftx::FtxMapper),
    Kraken(kraken::KrakenMapper),
    Bitflyer(bitflyer::BitflyerMapper),
    Gemini(gemini::GeminiMapper),
}

impl Normalizer {
    /// Normalizer for `exchange`, or `None` if it is unsupported.
    pub fn for_exchange(exchange: Exchange) -> Option<Self> {
        match exchange {
            Exchange::Bitmex => Some(Normalizer::Bitmex(bitmex::BitmexMapper)),
            Exchange::Coinbase => Some(Normalizer::Coinbase(coinbase::CoinbaseMapper)),
            Exchange::Deribit => Some(Normalizer::Deribit(deribit::DeribitMapper)),
            Exchange::Cryptofacilities => {
                Some(Normalizer::Cryptofacilities(cryptofacilities::CryptofacilitiesMapper))
            }
            Exchange::Bitstamp => Some(Normalizer::Bitstamp(bitstamp::BitstampMapper)),
            Exchange::Okex => Some(Normalizer::Okex(okex::OkexMapper)),
            Exchange::Ftx => Some(Normalizer::Ftx(ftx::FtxMapper)),
            Exchange::Kraken => Some(Normalizer::Kraken(kraken::KrakenMapper)),
            Exchange::Bitflyer => Some(Normalizer::Bitflyer(bitflyer::BitflyerMapper)),
            Exchange::Gemini => Some(Normalizer::Gemini(gemini::GeminiMapper)),
            Exchange::Binance | Exchange::Bitfinex | Exchange::Bybit | Exchange::Huobi => None,
        }
    }

    fn mapper(&self) -> &dyn SubscriptionMapper {
        match self {
            Normalizer::Bitmex(m) => m,
            Normalizer::Coinbase(m) => m,
            Normalizer::Deribit(m) => m,
            Normalizer::Cryptofacilities(m) => m,
            Normalizer::Bitstamp(m) => m,
            Normalizer::Okex(m) => m,
            Normalizer::Ftx(m) => m,
            Normalizer::Kraken(m) => m,
            Normalizer::Bitflyer(m) => m,
            Normalizer::Gemini(m) => m,
        }
    }

    pub fn exchange(&self) -> Exchange {
        self.mapper().exchange()
    }

    pub fn can_handle(&self, message: &Value) -> bool {
        self.mapper().can_handle(message)
    }

    pub fn map(&self, message: &Value) -> Result<Vec<CanonicalFilter>> {
        self.mapper().map(message)
    }
}

/// Immutable exchange → normalizer mapping.
///
/// Built once, never mutated. Holds at most one normalizer per
/// exchange since each is derived from `Normalizer::for_exchange`.
#[derive(Debug)]
pub struct Registry {
    normalizers: HashMap<Exchange, Normalizer>,
}

impl Registry {
    fn build() -> Self {
        let normalizers = Exchange::ALL
            .iter()
            .filter_map(|&e| Normalizer::for_exchange(e).map(|n| (e, n)))
            .collect();

        Self { normalizers }
    }

    pub fn lookup(&self, exchange: Exchange) -> Option<&Normalizer> {
        self.normalizers.get(&exchange)
    }

    /// Supported exchanges in declaration order.
    pub fn supported(&self) -> impl Iterator<Item = Exchange> + '_ {
        Exchange::ALL
            .iter()
            .copied()
            .filter(|e| self.normalizers.contains_key(e))
    }
}

/// Global registry (singleton)
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::build);

/// Returns the normalizer registered for `exchange`.
pub fn lookup(exchange: Exchange) -> Option<&'static Normalizer> {
    REGISTRY.lookup(exchange)
}

/// Returns a normalizer by configuration name.
///
/// CONTRACT:
/// - `name` must be the lowercase exchange identifier
/// - unknown and unsupported names both yield `None`
///
pub fn get_normalizer(name: &str) -> Option<&'static Normalizer> {
    name.parse().ok().and_then(lookup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_supported_exchanges() {
        let supported: Vec<Exchange> = REGISTRY.supported().collect();
        assert_eq!(supported.len(), 10);

        for exchange in supported {
            let normalizer = lookup(exchange).unwrap();
            assert_eq!(normalizer.exchange(), exchange);
        }
    }

    #[test]
    fn test_unsupported_exchange_is_absent() {
        assert!(lookup(Exchange::Binance).is_none());
        assert!(lookup(Exchange::Huobi).is_none());
        assert!(get_normalizer("bybit").is_none());
        assert!(get_normalizer("nope").is_none());
    }

    #[test]
    fn test_exchange_names_round_trip() {
        for exchange in Exchange::ALL {
            assert_eq!(exchange.as_str().parse::<Exchange>(), Ok(exchange));
            assert_eq!(
                serde_json::to_value(exchange).unwrap(),
                serde_json::Value::String(exchange.to_string())
            );
        }
        assert_eq!(
            "BITMEX".parse::<Exchange>(),
            Err(UnknownExchange("BITMEX".to_string()))
        );
    }

    #[test]
    fn test_get_normalizer_by_name() {
        let n = get_normalizer("deribit").unwrap();
        assert_eq!(n.exchange(), Exchange::Deribit);
    }
}
