pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};
pub use crate::config::TomlConfig;

pub use crate::adapters::vision::VisionExtractor;
pub use crate::core::{engine::IngestEngine, pipeline::RosterPipeline};
pub use crate::utils::error::{IngestError, Result};
