pub mod cache;
pub mod colors;
pub mod compiler;
pub mod loader;
pub mod settings;
pub mod validator;

pub use cache::ClassifierCache;
pub use compiler::{compile_classifier, CompileReport};
pub use loader::{load_all_settings, load_settings_from_str, LoadError};
pub use settings::{AlphaConstants, EnergyCosts, RadiusMultipliers, ScanSettings};
