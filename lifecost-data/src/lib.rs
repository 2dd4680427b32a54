pub mod loader;

pub use loader::{LocationPresetLoader, LocationPresetRecord, PresetLoaderError};
