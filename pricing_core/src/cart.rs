//! # Quote Cart
//!
//! Priced lines collected during a session before a quote is created.
//!
//! ```text
//! Cart
//! ├── version   (schema version for saved carts)
//! ├── items     Vec<CartLineItem>, in the order they were added
//! └── created / modified
//! ```
//!
//! Each line keeps the selections it was priced from ([`QuoteItem`]) and its
//! raw unit price, so quantity changes re-round without asking the pricing
//! service again.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::cart::{Cart, CartLineItem};
//! use pricing_core::calculations::frame::{calculate, FrameInput};
//! use pricing_core::catalog::{MoldingQuality, MoldingSelection};
//! use pricing_core::dimensions::Dimensions;
//! use pricing_core::rounding::RoundingStrategy;
//!
//! let input = FrameInput {
//!     molding: MoldingSelection {
//!         name: "Simple 2cm".to_string(),
//!         quality: MoldingQuality::Estandar,
//!         thickness_id: "2cm".to_string(),
//!         price_per_meter: 10.0,
//!     },
//!     dimensions: Dimensions::new(60.0, 40.0).unwrap(),
//!     glass: None,
//!     background: None,
//!     crossbeams: 0,
//!     texture: None,
//!     color: None,
//!     quantity: 2,
//! };
//! let result = calculate(&input, RoundingStrategy::RoundUnitAndTotal).unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_frame(input, &result);
//! assert_eq!(cart.total(), 40.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{FrameInput, FrameResult, GlassQuote, GlassQuoteInput, QuoteItem};
use crate::errors::{QuoteError, QuoteResult};
use crate::rounding::RoundingStrategy;

/// Current schema version for saved carts
pub const CART_SCHEMA_VERSION: &str = "0.1.0";

/// One priced line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: Uuid,
    pub description: String,
    pub quantity: u32,
    /// Unit price before rounding
    pub raw_unit_price: f64,
    pub unit_price: f64,
    pub subtotal: f64,
    pub rounding: RoundingStrategy,
    /// Selections the line was priced from
    pub specifications: QuoteItem,
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    pub fn from_glass(input: GlassQuoteInput, quote: &GlassQuote) -> Self {
        CartLineItem {
            id: Uuid::new_v4(),
            description: quote.description.clone(),
            quantity: quote.quantity,
            raw_unit_price: quote.raw_unit_price,
            unit_price: quote.unit_price,
            subtotal: quote.total_price,
            rounding: quote.rounding,
            specifications: QuoteItem::Glass(input),
            added_at: Utc::now(),
        }
    }

    pub fn from_frame(input: FrameInput, result: &FrameResult) -> Self {
        CartLineItem {
            id: Uuid::new_v4(),
            description: result.description.clone(),
            quantity: result.quantity,
            raw_unit_price: result.breakdown.raw_unit_price(),
            unit_price: result.breakdown.unit_price,
            subtotal: result.breakdown.total_price,
            rounding: result.rounding,
            specifications: QuoteItem::Frame(input),
            added_at: Utc::now(),
        }
    }

    /// Change the quantity and re-derive prices with the line's own rounding.
    fn set_quantity(&mut self, quantity: u32) {
        let totals = self.rounding.finalize(self.raw_unit_price, quantity);
        self.quantity = quantity;
        self.unit_price = totals.unit_price;
        self.subtotal = totals.total_price;
        self.specifications.set_quantity(quantity);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub version: String,
    pub items: Vec<CartLineItem>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Cart {
            version: CART_SCHEMA_VERSION.to_string(),
            items: Vec::new(),
            created: now,
            modified: now,
        }
    }

    /// Append a line. Returns its id.
    pub fn add_line(&mut self, line: CartLineItem) -> Uuid {
        let id = line.id;
        tracing::debug!(
            %id,
            description = %line.description,
            subtotal = line.subtotal,
            "cart line added"
        );
        self.items.push(line);
        self.touch();
        id
    }

    pub fn add_glass(&mut self, input: GlassQuoteInput, quote: &GlassQuote) -> Uuid {
        self.add_line(CartLineItem::from_glass(input, quote))
    }

    pub fn add_frame(&mut self, input: FrameInput, result: &FrameResult) -> Uuid {
        self.add_line(CartLineItem::from_frame(input, result))
    }

    /// Remove a line by id, returning it if it existed.
    pub fn remove_line(&mut self, id: &Uuid) -> Option<CartLineItem> {
        let index = self.items.iter().position(|line| line.id == *id)?;
        let line = self.items.remove(index);
        self.touch();
        Some(line)
    }

    /// Set a line's quantity; the subtotal is recomputed from the stored raw price.
    pub fn update_quantity(&mut self, id: &Uuid, quantity: u32) -> QuoteResult<&CartLineItem> {
        if quantity == 0 {
            return Err(QuoteError::invalid_input(
                "quantity",
                "0",
                "Quantity must be at least 1",
            ));
        }
        let index = self
            .items
            .iter()
            .position(|line| line.id == *id)
            .ok_or_else(|| {
                QuoteError::invalid_input("line_id", id.to_string(), "No such line in cart")
            })?;

        self.items[index].set_quantity(quantity);
        self.touch();
        Ok(&self.items[index])
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Sum of line subtotals
    pub fn total(&self) -> f64 {
        self.items.iter().map(|line| line.subtotal).sum()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Payload for creating a quote from the current lines.
    pub fn to_quote_draft(
        &self,
        company_id: &str,
        client: impl Into<String>,
    ) -> QuoteResult<QuoteDraft> {
        if company_id.trim().is_empty() {
            return Err(QuoteError::missing_field("company_id"));
        }
        if self.items.is_empty() {
            return Err(QuoteError::invalid_input("items", "[]", "Cart is empty"));
        }
        Ok(QuoteDraft {
            company_id: company_id.to_string(),
            client: client.into(),
            items: self.items.clone(),
            total: self.total(),
            created: Utc::now(),
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

/// What the quote-creation flow receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub company_id: String,
    pub client: String,
    pub items: Vec<CartLineItem>,
    pub total: f64,
    pub created: DateTime<Utc>,
}
