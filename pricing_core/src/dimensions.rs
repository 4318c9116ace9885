//! # Dimensions and Unit Conversion
//!
//! Converts the width/height a customer gives (in centimeters) into the two
//! quantities every price is based on: perimeter in meters (molding,
//! crossbeams) and area in square feet (glass, backgrounds).
//!
//! ## Background Padding
//!
//! When a backing is added to a frame, the frame opening grows by 5 cm on
//! each side. Molding and glass are priced on the padded size; the background
//! itself is priced on the original size.
//!
//! ```rust
//! use pricing_core::dimensions::Dimensions;
//!
//! let dims = Dimensions::new(30.0, 40.0).unwrap();
//! let padded = dims.with_background_padding(true);
//! assert_eq!((padded.width_cm, padded.height_cm), (40.0, 50.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};
use crate::units::{Centimeters, Meters, SqCm, SqFt};

/// Added to each dimension when a background is selected (5 cm per side).
pub const BACKGROUND_PADDING_CM: f64 = 10.0;

/// Area in square feet for a width/height in centimeters.
///
/// Returns 0.0 when either side is not positive; callers validate first.
pub fn to_area_sq_ft(width_cm: f64, height_cm: f64) -> f64 {
    if width_cm <= 0.0 || height_cm <= 0.0 {
        return 0.0;
    }
    SqFt::from(SqCm(width_cm * height_cm)).value()
}

/// Perimeter in meters for a width/height in centimeters.
pub fn to_perimeter_m(width_cm: f64, height_cm: f64) -> f64 {
    Meters::from(Centimeters((width_cm + height_cm) * 2.0)).value()
}

/// Dimensions used for molding and glass once a background is (or isn't) selected.
pub fn apply_background_padding(width_cm: f64, height_cm: f64, has_background: bool) -> Dimensions {
    if has_background {
        Dimensions {
            width_cm: width_cm + BACKGROUND_PADDING_CM,
            height_cm: height_cm + BACKGROUND_PADDING_CM,
        }
    } else {
        Dimensions { width_cm, height_cm }
    }
}

/// A rectangular piece in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    /// Create validated dimensions.
    pub fn new(width_cm: f64, height_cm: f64) -> QuoteResult<Self> {
        let dims = Dimensions { width_cm, height_cm };
        dims.validate()?;
        Ok(dims)
    }

    /// Both sides must be finite and positive before anything is priced.
    pub fn validate(&self) -> QuoteResult<()> {
        if !self.width_cm.is_finite() || self.width_cm <= 0.0 {
            return Err(QuoteError::invalid_input(
                "width_cm",
                self.width_cm.to_string(),
                "Width must be positive",
            ));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(QuoteError::invalid_input(
                "height_cm",
                self.height_cm.to_string(),
                "Height must be positive",
            ));
        }
        Ok(())
    }

    pub fn area_sq_ft(&self) -> f64 {
        to_area_sq_ft(self.width_cm, self.height_cm)
    }

    pub fn perimeter_m(&self) -> f64 {
        to_perimeter_m(self.width_cm, self.height_cm)
    }

    /// Shorter of the two sides, in centimeters
    pub fn shorter_side_cm(&self) -> f64 {
        self.width_cm.min(self.height_cm)
    }

    pub fn with_background_padding(&self, has_background: bool) -> Dimensions {
        apply_background_padding(self.width_cm, self.height_cm, has_background)
    }

    /// Label used in descriptions, e.g. `100x150 cm`
    pub fn label(&self) -> String {
        format!("{}x{} cm", format_cm(self.width_cm), format_cm(self.height_cm))
    }
}

/// Whole centimeters print without a decimal part.
fn format_cm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
