//! Subscription acknowledgement normalizer.
//!
//! Exchange WebSocket feeds confirm subscriptions in their own textual
//! conventions (colon, dot or underscore delimited topics, channel
//! families, one-to-many channel tables). This crate recovers a single
//! canonical shape from all of them: a list of `(channel, symbols)`
//! filters.
//!
//! ```ignore
//! use subscription_normalizer::{lookup, Exchange};
//!
//! let normalizer = lookup(Exchange::Bitmex).unwrap();
//! if normalizer.can_handle(&message) {
//!     let filters = normalizer.map(&message)?;
//! }
//! ```
//
// - schema:    Canonical filter type
// - error:     MalformedMessage error
// - exchanges: Exchange ids, per-exchange mappers and the registry
// - pipeline:  lookup → can_handle → map in one call
// - metrics:   Process-wide counters
// - config:    JSON configuration for the replay binary
// - replay:    Normalizes recorded message files
//
pub mod schema;
pub mod error;
pub mod exchanges;
pub mod pipeline;
pub mod metrics;
pub mod config;
pub mod replay;

pub use error::{NormalizeError, Result};
pub use exchanges::{Exchange, Normalizer, Registry, REGISTRY, get_normalizer, lookup};
pub use pipeline::{NormalizeOutcome, normalize};
pub use schema::CanonicalFilter;
