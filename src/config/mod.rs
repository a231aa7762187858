//! Configuration module for Avskrift.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{EmbeddingSettings, GeneralSettings, Settings, YoutubeSettings};
