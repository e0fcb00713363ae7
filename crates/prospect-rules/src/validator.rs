use std::collections::HashSet;

use thiserror::Error;

use crate::colors::parse_color_entry;
use crate::settings::ScanSettings;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Radius multiplier '{name}' must be finite and positive, got {value}")]
    InvalidMultiplier { name: &'static str, value: f32 },
    #[error("Alpha '{name}' must be within 0.0..=1.0, got {value}")]
    AlphaOutOfRange { name: &'static str, value: f32 },
    #[error("Default color {0:#x} exceeds 0xFFFFFF")]
    DefaultColorOutOfRange(u32),
    #[error("Ore name '{0}' is blacklisted and also listed as an ore category")]
    BlacklistedCategoryName(String),
    #[error("Color entry rejected: {0}")]
    BadColorEntry(String),
}

/// Validate settings for consistency. Problems are reported, never fixed;
/// the compiler skips bad color entries on its own.
pub fn validate_settings(settings: &ScanSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (name, value) in [
        ("ore", settings.radius.ore),
        ("block", settings.radius.block),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(ValidationError::InvalidMultiplier { name, value });
        }
    }

    for (name, value) in [
        ("base", settings.alpha.base),
        ("state_scanned", settings.alpha.state_scanned),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::AlphaOutOfRange { name, value });
        }
    }

    if settings.default_color > 0xFFFFFF {
        errors.push(ValidationError::DefaultColorOutOfRange(
            settings.default_color,
        ));
    }

    let blacklist: HashSet<&str> = settings.ore_blacklist.iter().map(String::as_str).collect();
    let mut reported = HashSet::new();
    for name in settings.common_ores.iter().chain(&settings.rare_ores) {
        if blacklist.contains(name.as_str()) && reported.insert(name.as_str()) {
            errors.push(ValidationError::BlacklistedCategoryName(name.clone()));
        }
    }

    for line in &settings.ore_colors {
        if let Err(err) = parse_color_entry(line) {
            errors.push(ValidationError::BadColorEntry(err.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
