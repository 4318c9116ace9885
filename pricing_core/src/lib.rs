//! # pricing_core - Glass and Frame Pricing Engine
//!
//! `pricing_core` is the computational heart of Vitral: it turns a shop's
//! glass, mirror and frame selections into rounded, described, cart-ready
//! lines. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Pure rules**: cascades, conversions and rounding are plain functions
//! - **Pluggable pricing**: glass rates come from a [`PricingService`], local or remote
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use pricing_core::catalog::{GlassFamily, GlassFinish};
//! use pricing_core::selection::{reduce, GlassSelection, SelectionChange};
//!
//! // Picking Templado resets the rest of the selection to valid defaults
//! let plano = GlassSelection::new(GlassFamily::Plano);
//! let selection = reduce(&plano, SelectionChange::Family(GlassFamily::Templado));
//! assert_eq!(selection.thickness_mm, 6.0);
//! assert_eq!(selection.finish, GlassFinish::Incoloro);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Families, finishes, colors, moldings and the local price catalog
//! - [`rules`] - Which thickness/finish/color combinations are sold
//! - [`selection`] - Cascading glass selection state
//! - [`dimensions`] / [`units`] - cm to ft² and m conversions
//! - [`services`] - Extra processes (cuts, drilling, edging) and crossbeams
//! - [`pricing`] - Pricing service trait with local and HTTP implementations
//! - [`calculations`] - Glass and frame calculators
//! - [`rounding`] - Half-sol rounding strategies
//! - [`description`] - Human-readable line descriptions
//! - [`recompute`] - Debounced re-pricing that drops stale results
//! - [`cart`] / [`file_io`] - Quote cart and its persistence
//! - [`config`] - TOML configuration
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod description;
pub mod dimensions;
pub mod errors;
pub mod file_io;
pub mod pricing;
pub mod recompute;
pub mod rounding;
pub mod rules;
pub mod selection;
pub mod services;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use cart::{Cart, CartLineItem, QuoteDraft};
pub use config::{load_config, PricingConfig};
pub use errors::{QuoteError, QuoteResult};
pub use file_io::{load_cart, save_cart};
pub use pricing::{HttpPricingService, PricingService};
pub use recompute::{Preview, Recalculator, Recompute};
