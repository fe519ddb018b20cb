//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that all providers implement
//! - Provider selection (`ProviderKind`, `build_provider`)
//! - Concrete provider implementations (Yahoo, Twelve Data)
//!
//! The rest of the system only sees `Arc<dyn QuoteProvider>`; no code
//! outside this module branches on which provider is active.

mod kind;
mod traits;

pub mod twelvedata;
pub mod yahoo;

// Re-exports
pub use kind::{build_provider, ProviderKind, UnknownProvider};
pub use traits::QuoteProvider;
