//! # Unit Types
//!
//! Type-safe wrappers for the units the shop floor works in. Dimensions are
//! taken in centimeters, molding is sold by the linear meter and glass by the
//! square foot.
//!
//! ## Design Philosophy
//!
//! Simple newtype wrappers rather than a full units library:
//! - Only a handful of units ever appear in a quote
//! - JSON serialization stays clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::units::{Centimeters, Meters, SqCm, SqFt};
//!
//! let side = Centimeters(150.0);
//! let side_m: Meters = side.into();
//! assert_eq!(side_m.0, 1.5);
//!
//! let area: SqFt = SqCm(929.0304).into();
//! assert!((area.0 - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// Square centimeters in one square foot (30.48 cm squared).
pub const SQ_CM_PER_SQ_FT: f64 = 929.0304;

/// Centimeters in one meter.
pub const CM_PER_M: f64 = 100.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / CM_PER_M)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * CM_PER_M)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqCm(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl From<SqCm> for SqFt {
    fn from(sqcm: SqCm) -> Self {
        SqFt(sqcm.0 / SQ_CM_PER_SQ_FT)
    }
}

impl From<SqFt> for SqCm {
    fn from(sqft: SqFt) -> Self {
        SqCm(sqft.0 * SQ_CM_PER_SQ_FT)
    }
}

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(Centimeters, Meters, SqCm, SqFt);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_to_m() {
        let m: Meters = Centimeters(250.0).into();
        assert_eq!(m.0, 2.5);
        let back: Centimeters = m.into();
        assert_eq!(back.0, 250.0);
    }

    #[test]
    fn test_sqcm_to_sqft() {
        let sqft: SqFt = SqCm(100.0 * 150.0).into();
        assert!((sqft.0 - 16.1459).abs() < 1e-4);
    }

    #[test]
    fn test_serialization() {
        let side = Meters(0.56);
        let json = serde_json::to_string(&side).unwrap();
        assert_eq!(json, "0.56");
        let back: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value(), 0.56);
    }
}
