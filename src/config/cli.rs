use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "roster-etl")]
#[command(about = "Ingest a class roster file and stage normalized student records")]
pub struct CliConfig {
    /// Roster file: a spreadsheet, delimited text, or a photo of a paper list
    pub input: String,

    #[arg(long)]
    pub class_id: Option<String>,

    #[arg(long, default_value = "local")]
    pub user_id: String,

    /// JSON snapshot of the class's current records, for roll continuation
    #[arg(long)]
    pub existing: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Extraction service endpoint, required only for photo inputs
    #[arg(long)]
    pub vision_endpoint: Option<String>,

    #[arg(long, env = "VISION_API_KEY")]
    pub vision_api_key: Option<String>,

    #[arg(long, value_name = "SECONDS")]
    pub request_timeout: Option<u64>,

    /// Load all settings from a TOML file instead of the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn class_id(&self) -> &str {
        self.class_id.as_deref().unwrap_or("")
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn existing_roster(&self) -> Option<&str> {
        self.existing.as_deref()
    }

    fn vision_endpoint(&self) -> Option<&str> {
        self.vision_endpoint.as_deref()
    }

    fn vision_api_key(&self) -> Option<&str> {
        self.vision_api_key.as_deref()
    }

    fn request_timeout_secs(&self) -> Option<u64> {
        self.request_timeout
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.config.is_some() {
            // The TOML file is validated after loading instead.
            return Ok(());
        }
        validate_non_empty_string("input", &self.input)?;
        validate_non_empty_string("class_id", self.class_id.as_deref().unwrap_or(""))?;
        validate_path("output_path", &self.output_path)?;
        if let Some(endpoint) = &self.vision_endpoint {
            validate_url("vision_endpoint", endpoint)?;
        }
        if let Some(existing) = &self.existing {
            validate_file_extensions("existing", std::slice::from_ref(existing), &["json"])?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
