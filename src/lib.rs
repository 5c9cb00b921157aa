//! CSS Property Validation Engine
//!
//! Validates CSS declarations for a print layout pipeline: every value is
//! checked against its property grammar and converted to a typed value, and
//! shorthands are expanded into the full set of longhands they control.
//!
//! # Features
//!
//! - Typed values for every supported longhand, with initial values
//! - Shorthand expansion honoring `initial`, `inherit` and deferred `var()`
//! - `@font-face` and `@counter-style` descriptor validation
//! - Invalid declarations are logged and dropped, never fatal
//!
//! # Basic Usage
//!
//! ```rust
//! use csspv::{validate_stylesheet, ValidationOptions};
//!
//! let (declarations, stats) =
//!     validate_stylesheet("margin: 1em; color: red", &ValidationOptions::default());
//! assert_eq!(declarations.len(), 5);
//! assert_eq!(stats.dropped_count, 0);
//! ```
//!
//! # Validation Pipeline
//!
//! 1. **Tokens**: the block is tokenized and split into raw declarations
//! 2. **Names**: names are normalized and filtered (print media, prefixes)
//! 3. **Values**: longhands are validated, shorthands expanded
//! 4. **Output**: typed declarations, or raw tokens pending `var()` substitution

pub mod cli;
pub mod colors;
pub mod core;
pub mod error;
pub mod tokens;
pub mod validation;

use serde::Serialize;

pub use crate::core::{
    build_registry, CascadedProperty, CssProperty, Declaration, DefaultKind, KnownProp,
    Properties, PropKey, Registry, Shorthand, ValidatedProperty,
};
pub use cli::EnhancedCli;
pub use error::{Result, ValidationError};
pub use tokens::{parse_declaration_list, tokenize, RawDeclaration, Token};
pub use validation::{
    expand, expand_validate_pending, preprocess_declarations, preprocess_descriptors,
    CounterStyleDescriptors, FontFaceDescriptors, NamedProperty,
};

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Engine build information
pub const BUILD_INFO: EngineInfo = EngineInfo {
    version: VERSION,
    name: NAME,
    description: DESCRIPTION,
    supported_features: &[
        "longhands",
        "shorthands",
        "css-wide-keywords",
        "custom-properties",
        "font-face",
        "counter-style",
    ],
};

#[derive(Debug, Clone, Serialize)]
pub struct EngineInfo {
    pub version: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub supported_features: &'static [&'static str],
}

/// Validation options and settings
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Base url used to resolve relative `url()` references
    pub base_url: String,

    /// Drop declarations still waiting for `var()` substitution
    pub skip_pending: bool,
}

/// Validation statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationStats {
    /// Raw declarations found in the input
    pub declaration_count: usize,

    /// Declarations dropped as invalid or unsupported
    pub dropped_count: usize,

    /// Longhand declarations produced, shorthands expanded
    pub longhand_count: usize,

    /// Longhands waiting for `var()` substitution
    pub pending_count: usize,

    /// Source size in bytes
    pub source_size: usize,

    /// Validation time in milliseconds
    pub validation_time_ms: u64,
}

/// Validates a declaration block (the content between braces).
pub fn validate_stylesheet(
    css: &str,
    options: &ValidationOptions,
) -> (Vec<Declaration>, ValidationStats) {
    let start = std::time::Instant::now();
    let raw = parse_declaration_list(css);

    let mut declarations = Vec::new();
    let mut dropped_count = 0;
    for declaration in &raw {
        let validated = preprocess_declarations(&options.base_url, std::slice::from_ref(declaration));
        if validated.is_empty() {
            dropped_count += 1;
        }
        declarations.extend(validated);
    }

    let pending_count = declarations.iter().filter(|d| d.value.is_pending()).count();
    if options.skip_pending {
        declarations.retain(|d| !d.value.is_pending());
    }

    let stats = ValidationStats {
        declaration_count: raw.len(),
        dropped_count,
        longhand_count: declarations.len(),
        pending_count,
        source_size: css.len(),
        validation_time_ms: start.elapsed().as_millis() as u64,
    };
    log::info!(
        "Validated {} declarations ({} dropped) in {}ms",
        stats.declaration_count,
        stats.dropped_count,
        stats.validation_time_ms
    );
    (declarations, stats)
}

/// Validates the declaration block stored in a file.
pub fn validate_file(path: &str) -> Result<(Vec<Declaration>, ValidationStats)> {
    validate_file_with_options(path, &ValidationOptions::default())
}

pub fn validate_file_with_options(
    path: &str,
    options: &ValidationOptions,
) -> Result<(Vec<Declaration>, ValidationStats)> {
    let css = std::fs::read_to_string(path).map_err(|e| ValidationError::FileNotFound {
        path: format!("{}: {}", path, e),
    })?;
    Ok(validate_stylesheet(&css, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_stylesheet_stats() {
        let css = "margin: 1em 2em; width: red; -moz-box-sizing: border-box; \
                   border-top: var(--line); color: blue";
        let (declarations, stats) = validate_stylesheet(css, &ValidationOptions::default());
        assert_eq!(stats.declaration_count, 5);
        assert_eq!(stats.dropped_count, 2);
        assert_eq!(stats.pending_count, 3);
        assert_eq!(stats.longhand_count, 4 + 3 + 1);
        assert_eq!(declarations.len(), stats.longhand_count);
    }

    #[test]
    fn test_skip_pending() {
        let options = ValidationOptions {
            skip_pending: true,
            ..Default::default()
        };
        let (declarations, stats) = validate_stylesheet("width: var(--w); height: 1px", &options);
        assert_eq!(stats.pending_count, 1);
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, PropKey::Known(KnownProp::Height));
    }

    #[test]
    fn test_validate_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("block.css");
        fs::write(&path, "list-style: square inside;\nbackground: url(a.png) no-repeat").unwrap();

        let options = ValidationOptions {
            base_url: "https://example.org/css/".to_string(),
            ..Default::default()
        };
        let (declarations, stats) =
            validate_file_with_options(path.to_str().unwrap(), &options).unwrap();
        assert_eq!(stats.dropped_count, 0);
        assert_eq!(declarations.len(), 3 + 8);
        let image = declarations
            .iter()
            .find(|d| d.name == PropKey::Known(KnownProp::BackgroundImage))
            .unwrap();
        assert_eq!(
            image.value,
            ValidatedProperty::Resolved(CssProperty::Images(vec![
                crate::core::values::Image::Url {
                    url: "https://example.org/css/a.png".to_string()
                }
            ]))
        );
    }

    #[test]
    fn test_missing_file() {
        let error = validate_file("/nonexistent/block.css").unwrap_err();
        assert!(matches!(error, ValidationError::FileNotFound { .. }));
    }
}
