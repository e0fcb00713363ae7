use std::collections::{HashMap, HashSet};
use std::time::Instant;

use prospect_core::constants::RARE_TAG_PREFIX;
use prospect_core::{MaterialClass, MaterialClassifier, MaterialRegistry};

use crate::colors::{build_color_table, ColorParseError};
use crate::settings::ScanSettings;

/// Diagnostics from a classifier build.
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Color-table entries that were skipped.
    pub rejected_colors: Vec<ColorParseError>,
    /// Block blacklist names that matched no registered material.
    pub unknown_blacklist: Vec<String>,
    /// Number of states inspected.
    pub states_scanned: usize,
    pub elapsed_ms: f64,
}

/// Category name sets used during classification.
pub struct NameSets<'a> {
    pub blacklist: HashSet<&'a str>,
    pub common: HashSet<&'a str>,
    pub rare: HashSet<&'a str>,
}

impl<'a> NameSets<'a> {
    pub fn from_settings(settings: &'a ScanSettings) -> Self {
        Self {
            blacklist: settings.ore_blacklist.iter().map(String::as_str).collect(),
            common: settings.common_ores.iter().map(String::as_str).collect(),
            rare: settings.rare_ores.iter().map(String::as_str).collect(),
        }
    }
}

/// Whether a tag follows the auto-detected ore convention: `ore` followed
/// by an uppercase letter (`oreIron`, but not `ore` or `oregano`).
pub fn is_ore_tag(name: &str) -> bool {
    name.strip_prefix(RARE_TAG_PREFIX)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Classify a state from its associated names, processed in order.
///
/// A blacklisted name clears both categories and stops processing. A name
/// in the common set marks the state common; otherwise a name in the rare
/// set or matching the ore-tag pattern marks it rare. Flags from different
/// names accumulate independently. The first category name with a table
/// color sets the color.
pub fn classify_names(
    names: &[&str],
    sets: &NameSets<'_>,
    colors: &HashMap<String, u32>,
) -> MaterialClass {
    let mut class = MaterialClass::default();
    for &name in names {
        if sets.blacklist.contains(name) {
            class.common = false;
            class.rare = false;
            break;
        }

        if sets.common.contains(name) {
            class.common = true;
        } else if sets.rare.contains(name) || is_ore_tag(name) {
            class.rare = true;
        } else {
            continue;
        }

        if class.color.is_none() {
            class.color = colors.get(name).copied();
        }
    }
    class
}

/// Build the state lookup table for every state the registry knows.
pub fn compile_classifier<R: MaterialRegistry + ?Sized>(
    registry: &R,
    settings: &ScanSettings,
) -> (MaterialClassifier, CompileReport) {
    log::info!("Building block state lookup table...");
    let start = Instant::now();

    let (colors, rejected_colors) = build_color_table(&settings.ore_colors);
    let sets = NameSets::from_settings(settings);
    let blocked_names: HashSet<&str> = settings.block_blacklist.iter().map(String::as_str).collect();
    let mut matched_blocked: HashSet<&str> = HashSet::new();

    let mut table = MaterialClassifier::new(settings.default_color);
    let states = registry.known_states();
    for &state in &states {
        let material = registry.base_material(state);
        if let Some(name) = registry.material_name(material) {
            if let Some(&blocked) = blocked_names.get(name) {
                table.block_material(material);
                matched_blocked.insert(blocked);
            }
        }

        let names = registry.names_for(state);
        table.insert(state, classify_names(&names, &sets, &colors));
    }

    let mut unknown_blacklist: Vec<String> = blocked_names
        .difference(&matched_blocked)
        .map(|name| name.to_string())
        .collect();
    unknown_blacklist.sort();
    for name in &unknown_blacklist {
        log::warn!("Block blacklist entry '{}' matches no known material", name);
    }

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let (common, rare, colored) = table.counts();
    log::info!(
        "Built block state lookup table in {:.1} ms ({} common, {} rare, {} colored, {} blocked)",
        elapsed_ms,
        common,
        rare,
        colored,
        table.blocked_count()
    );

    let report = CompileReport {
        rejected_colors,
        unknown_blacklist,
        states_scanned: states.len(),
        elapsed_ms,
    };
    (table, report)
}
