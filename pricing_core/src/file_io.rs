//! # File I/O Module
//!
//! Keeps the cart across sessions:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Refuse carts written by an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use pricing_core::cart::Cart;
//! use pricing_core::file_io::{load_cart, save_cart};
//! use std::path::Path;
//!
//! let path = Path::new("vitral-cart.json");
//! save_cart(&Cart::new(), path)?;
//! let cart = load_cart(path)?;
//! # Ok::<(), pricing_core::errors::QuoteError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::cart::{Cart, CART_SCHEMA_VERSION};
use crate::errors::{QuoteError, QuoteResult};

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Save a cart with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_cart(cart: &Cart, path: &Path) -> QuoteResult<()> {
    let json = serde_json::to_string_pretty(cart)?;
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        QuoteError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        QuoteError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        QuoteError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        QuoteError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), lines = cart.line_count(), "cart saved");
    Ok(())
}

/// Load a cart.
///
/// # Returns
///
/// * `Err(QuoteError::VersionMismatch)` - Written by an incompatible schema
/// * `Err(QuoteError::SerializationError)` - Invalid JSON
/// * `Err(QuoteError::FileError)` - I/O error
pub fn load_cart(path: &Path) -> QuoteResult<Cart> {
    let mut file = File::open(path)
        .map_err(|e| QuoteError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| QuoteError::file_error("read", path.display().to_string(), e.to_string()))?;

    let cart: Cart = serde_json::from_str(&contents).map_err(|e| QuoteError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&cart.version)?;

    tracing::info!(path = %path.display(), lines = cart.line_count(), "cart loaded");
    Ok(cart)
}

/// Load the saved cart, or start a new one if none was saved yet.
pub fn load_or_new_cart(path: &Path) -> QuoteResult<Cart> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no saved cart, starting empty");
        return Ok(Cart::new());
    }
    load_cart(path)
}

/// Major must match; on 0.x the file's minor may not be newer than ours.
fn validate_version(file_version: &str) -> QuoteResult<()> {
    let mismatch = || QuoteError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: CART_SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = CART_SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    use crate::calculations::glass::{finalize, GlassQuoteInput};
    use crate::catalog::GlassFamily;
    use crate::dimensions::Dimensions;
    use crate::pricing::PriceQuote;
    use crate::rounding::RoundingStrategy;
    use crate::selection::GlassSelection;
    use crate::services::{ServiceSelection, ServiceUnit};

    fn temp_cart_path(name: &str) -> PathBuf {
        temp_dir().join(format!("vitral_test_{}.json", name))
    }

    fn cart_with_line() -> Cart {
        let input = GlassQuoteInput {
            selection: GlassSelection::new(GlassFamily::Plano),
            dimensions: Dimensions::new(40.0, 40.0).unwrap(),
            services: ServiceSelection::default(),
            quantity: 2,
        };
        let quote = PriceQuote {
            total: 7.25,
            unit: ServiceUnit::Unidad,
            description: "Vidrio".to_string(),
        };
        let priced = finalize(&input, &quote, RoundingStrategy::RoundUnitOnly);
        let mut cart = Cart::new();
        cart.add_glass(input, &priced);
        cart
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(tmp_path_for(Path::new("/a/cart.json")), Path::new("/a/cart.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_cart_path("roundtrip");
        let cart = cart_with_line();
        save_cart(&cart, &path).unwrap();

        let loaded = load_cart(&path).unwrap();
        assert_eq!(loaded.line_count(), 1);
        assert_eq!(loaded.total(), 15.0);
        assert_eq!(loaded.items[0].id, cart.items[0].id);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_cart_path("atomic");
        save_cart(&Cart::new(), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let missing = temp_cart_path("does_not_exist");
        let err = load_cart(&missing).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(load_or_new_cart(&missing).unwrap().is_empty());

        let path = temp_cart_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_cart(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let path = temp_cart_path("newer");
        let mut cart = Cart::new();
        cart.version = "0.9.0".to_string();
        save_cart(&cart, &path).unwrap();

        let err = load_cart(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_version() {
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
