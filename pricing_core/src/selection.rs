//! # Glass Selection
//!
//! The glass a customer has picked, as an immutable value. Every change goes
//! through [`reduce`], which applies the change and then re-validates in a
//! fixed order: thickness for the family, finish for the family/thickness,
//! color for the family/finish/thickness. Anything that became invalid falls
//! back to the first valid option, so a selection is always sellable.
//!
//! ```rust
//! use pricing_core::catalog::{GlassColor, GlassFamily, GlassFinish};
//! use pricing_core::selection::{reduce, GlassSelection, SelectionChange};
//!
//! let tinted = GlassSelection::new(GlassFamily::Plano)
//!     .apply(SelectionChange::Thickness(6.0))
//!     .apply(SelectionChange::Finish(GlassFinish::Polarizado));
//! assert_eq!(tinted.color, GlassColor::Bronce);
//!
//! // 2mm can't be tinted, so the finish and color fall back
//! let thin = reduce(&tinted, SelectionChange::Thickness(2.0));
//! assert_eq!(thin.finish, GlassFinish::Incoloro);
//! assert_eq!(thin.color, GlassColor::NoColor);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{GlassColor, GlassFamily, GlassFinish, PriceColor};
use crate::errors::QuoteResult;
use crate::rules::{allowed_thicknesses, available_colors, available_finishes, validate_combination};

/// A single user edit to the glass selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value")]
pub enum SelectionChange {
    Family(GlassFamily),
    Thickness(f64),
    Finish(GlassFinish),
    Color(GlassColor),
    /// Free-text color for cathedral glass with the COLOR finish
    CustomColor(String),
}

/// Glass family, thickness, finish and color chosen for a piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlassSelection {
    pub family: GlassFamily,
    pub thickness_mm: f64,
    pub finish: GlassFinish,
    pub color: GlassColor,
    /// Only meaningful for CATEDRAL with the COLOR finish; never priced
    #[serde(default)]
    pub custom_color: String,
}

impl GlassSelection {
    /// First valid thickness, finish and color for a family.
    pub fn new(family: GlassFamily) -> Self {
        let thickness_mm = allowed_thicknesses(family)[0];
        let finish = available_finishes(family, thickness_mm)[0];
        let color = available_colors(family, finish, thickness_mm)[0];
        GlassSelection {
            family,
            thickness_mm,
            finish,
            color,
            custom_color: String::new(),
        }
    }

    /// Chainable form of [`reduce`].
    pub fn apply(&self, change: SelectionChange) -> Self {
        reduce(self, change)
    }

    pub fn price_color(&self) -> PriceColor {
        self.color.price_color()
    }

    /// Free-text color when it applies to this selection.
    pub fn custom_color_label(&self) -> Option<&str> {
        let text = self.custom_color.trim();
        let free_text_color =
            self.family == GlassFamily::Catedral && self.finish == GlassFinish::Color;
        if free_text_color && !text.is_empty() {
            Some(text)
        } else {
            None
        }
    }

    pub fn validate(&self) -> QuoteResult<()> {
        validate_combination(self.family, self.thickness_mm, self.finish, self.color)
    }

    /// Re-validate thickness, then finish, then color.
    fn normalized(mut self) -> Self {
        let thicknesses = allowed_thicknesses(self.family);
        if !thicknesses.contains(&self.thickness_mm) {
            self.thickness_mm = thicknesses[0];
        }

        let finishes = available_finishes(self.family, self.thickness_mm);
        if !finishes.contains(&self.finish) {
            self.finish = finishes[0];
        }

        let colors = available_colors(self.family, self.finish, self.thickness_mm);
        if !colors.contains(&self.color) {
            self.color = colors[0];
        }
        self
    }
}

impl Default for GlassSelection {
    fn default() -> Self {
        GlassSelection::new(GlassFamily::default())
    }
}

/// Apply one change and cascade: family/thickness → finish → color.
pub fn reduce(state: &GlassSelection, change: SelectionChange) -> GlassSelection {
    let mut next = state.clone();
    match change {
        SelectionChange::Family(family) => next.family = family,
        SelectionChange::Thickness(thickness_mm) => next.thickness_mm = thickness_mm,
        SelectionChange::Finish(finish) => next.finish = finish,
        SelectionChange::Color(color) => next.color = color,
        SelectionChange::CustomColor(text) => next.custom_color = text,
    }
    next.normalized()
}
