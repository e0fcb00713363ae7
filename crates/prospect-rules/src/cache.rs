use std::sync::Arc;

use prospect_core::{MaterialClassifier, MaterialRegistry};

use crate::compiler::{compile_classifier, CompileReport};
use crate::settings::ScanSettings;

/// Owner of the current classifier snapshot.
///
/// Rebuilding swaps in a new table; snapshots already handed to running
/// scans keep pointing at the table they started with.
#[derive(Debug, Default)]
pub struct ClassifierCache {
    current: Arc<MaterialClassifier>,
    generation: u64,
}

impl ClassifierCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already built table (e.g. a synthetic table in tests).
    pub fn with_table(table: MaterialClassifier) -> Self {
        Self {
            current: Arc::new(table),
            generation: 1,
        }
    }

    /// Recompute the table from the registry and settings.
    pub fn rebuild<R: MaterialRegistry + ?Sized>(
        &mut self,
        registry: &R,
        settings: &ScanSettings,
    ) -> CompileReport {
        let (table, report) = compile_classifier(registry, settings);
        self.current = Arc::new(table);
        self.generation += 1;
        report
    }

    /// Shared handle to the current table.
    pub fn snapshot(&self) -> Arc<MaterialClassifier> {
        Arc::clone(&self.current)
    }

    /// Number of tables installed so far; 0 means never built.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
