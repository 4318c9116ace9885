//! # Calculators
//!
//! Each calculator follows the same pattern:
//!
//! - `*Input` - what the user picked (JSON-serializable)
//! - `*Quote` / `*Result` - the priced line (JSON-serializable)
//! - `calculate(input, ..)` - validate, price, round
//!
//! ## Available Calculators
//!
//! - [`glass`] - cut glass priced through a [`PricingService`](crate::pricing::PricingService)
//! - [`frame`] - picture frames priced from molding, glass, crossbeams and background

pub mod frame;
pub mod glass;

use serde::{Deserialize, Serialize};

pub use frame::{FrameGlass, FrameInput, FrameResult, PriceBreakdown};
pub use glass::{GlassQuote, GlassQuoteInput};

/// Snapshot of the selections behind a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuoteItem {
    /// Cut glass
    Glass(GlassQuoteInput),
    /// Picture frame
    Frame(FrameInput),
}

impl QuoteItem {
    /// Get the calculator type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            QuoteItem::Glass(_) => "Glass",
            QuoteItem::Frame(_) => "Frame",
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            QuoteItem::Glass(g) => g.quantity,
            QuoteItem::Frame(f) => f.quantity,
        }
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        match self {
            QuoteItem::Glass(g) => g.quantity = quantity,
            QuoteItem::Frame(f) => f.quantity = quantity,
        }
    }
}
