use ron::extensions::Extensions;
use serde::Deserialize;
use thiserror::Error;

use crate::settings::{AlphaConstants, EnergyCosts, RadiusMultipliers, ScanSettings};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse settings RON: {0}")]
    SettingsParseError(String),
}

/// One settings source as written on disk. Every field is optional so a
/// source can override only what it cares about. Scalar sections are read
/// with implicit `Some`, so files write `energy: (...)` rather than
/// `energy: Some((...))`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsSource {
    block_blacklist: Vec<String>,
    ore_blacklist: Vec<String>,
    common_ores: Vec<String>,
    rare_ores: Vec<String>,
    ore_colors: Vec<String>,
    energy: Option<EnergyCosts>,
    radius: Option<RadiusMultipliers>,
    alpha: Option<AlphaConstants>,
    default_color: Option<u32>,
}

impl SettingsSource {
    fn parse(ron_str: &str) -> Result<Self, LoadError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        options
            .from_str(ron_str)
            .map_err(|e| LoadError::SettingsParseError(e.to_string()))
    }

    /// Layer this source on top of `settings`: lists extend, scalars replace.
    fn apply(self, settings: &mut ScanSettings) {
        settings.block_blacklist.extend(self.block_blacklist);
        settings.ore_blacklist.extend(self.ore_blacklist);
        settings.common_ores.extend(self.common_ores);
        settings.rare_ores.extend(self.rare_ores);
        settings.ore_colors.extend(self.ore_colors);
        if let Some(energy) = self.energy {
            settings.energy = energy;
        }
        if let Some(radius) = self.radius {
            settings.radius = radius;
        }
        if let Some(alpha) = self.alpha {
            settings.alpha = alpha;
        }
        if let Some(color) = self.default_color {
            settings.default_color = color;
        }
    }
}

/// Parse a single settings RON string. Omitted fields take their defaults.
pub fn load_settings_from_str(ron_str: &str) -> Result<ScanSettings, LoadError> {
    load_all_settings(&[ron_str])
}

/// Load and layer multiple settings sources in order.
pub fn load_all_settings(sources: &[&str]) -> Result<ScanSettings, LoadError> {
    let mut settings = ScanSettings::default();
    for source in sources {
        SettingsSource::parse(source)?.apply(&mut settings);
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_settings() {
        let ron = r#"(
            common_ores: ["oreIron"],
        )"#;
        let settings = load_settings_from_str(ron).expect("should parse");
        assert_eq!(settings.common_ores, vec!["oreIron".to_string()]);
        assert!(settings.rare_ores.is_empty());
        assert_eq!(settings.energy, EnergyCosts::default());
    }

    #[test]
    fn test_empty_struct_is_default() {
        let settings = load_settings_from_str("()").expect("should parse");
        assert_eq!(settings, ScanSettings::default());
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let ron = r#"(common_ores: [this is not valid RON"#;
        let result = load_settings_from_str(ron);
        match result {
            Err(LoadError::SettingsParseError(_)) => {}
            other => panic!("expected SettingsParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_sections_without_some() {
        let ron = r#"(
            energy: (module_block: 10, module_ore_common: 2, module_ore_rare: 7),
            alpha: (base: 0.3, state_scanned: 0.9),
            default_color: 0x123456,
        )"#;
        let settings = load_settings_from_str(ron).expect("should parse");
        assert_eq!(settings.energy.module_block, 10);
        assert_eq!(settings.energy.module_ore_rare, 7);
        assert_eq!(settings.alpha.state_scanned, 0.9);
        assert_eq!(settings.default_color, 0x123456);
        assert_eq!(settings.radius, RadiusMultipliers::default());
    }

    #[test]
    fn test_bundled_settings_file_parses() {
        let settings = load_settings_from_str(include_str!("../../../data/settings.ron"))
            .expect("bundled settings should parse");
        assert_eq!(settings.energy.module_ore_common, 25);
        assert_eq!(settings.radius.block, 0.5);
        assert!(settings.common_ores.iter().any(|n| n == "oreIron"));
    }

    #[test]
    fn test_layering_extends_lists_and_replaces_scalars() {
        let base = r#"(
            common_ores: ["oreIron"],
            radius: (ore: 0.25, block: 0.5),
            default_color: 0x111111,
        )"#;
        let overlay = r#"(
            common_ores: ["oreTin"],
            radius: (ore: 0.5, block: 1.0),
        )"#;
        let settings = load_all_settings(&[base, overlay]).expect("should merge");
        assert_eq!(settings.common_ores, vec!["oreIron", "oreTin"]);
        assert_eq!(settings.radius.ore, 0.5);
        assert_eq!(settings.radius.block, 1.0);
        // Not overridden by the overlay
        assert_eq!(settings.default_color, 0x111111);
    }
}
