use crate::domain::ports::ConfigProvider;
use crate::utils::error::{IngestError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub roster: RosterConfig,
    pub source: SourceConfig,
    pub vision: Option<VisionConfig>,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub name: String,
    pub description: Option<String>,
    pub user_id: String,
    pub class_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input: String,
    pub existing: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IngestError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| IngestError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute `${VAR_NAME}` placeholders from the environment. Unknown
    /// variables are left in place so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("roster.name", &self.roster.name)?;
        validation::validate_non_empty_string("roster.user_id", &self.roster.user_id)?;
        validation::validate_non_empty_string("roster.class_id", &self.roster.class_id)?;
        validation::validate_non_empty_string("source.input", &self.source.input)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;

        if let Some(vision) = &self.vision {
            validation::validate_url("vision.endpoint", &vision.endpoint)?;
        }
        if let Some(existing) = &self.source.existing {
            validation::validate_file_extensions(
                "source.existing",
                std::slice::from_ref(existing),
                &["json"],
            )?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn class_id(&self) -> &str {
        &self.roster.class_id
    }

    fn user_id(&self) -> &str {
        &self.roster.user_id
    }

    fn existing_roster(&self) -> Option<&str> {
        self.source.existing.as_deref()
    }

    fn vision_endpoint(&self) -> Option<&str> {
        self.vision.as_ref().map(|vision| vision.endpoint.as_str())
    }

    fn vision_api_key(&self) -> Option<&str> {
        self.vision.as_ref().and_then(|vision| vision.api_key.as_deref())
    }

    fn request_timeout_secs(&self) -> Option<u64> {
        self.vision.as_ref().and_then(|vision| vision.timeout_seconds)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[roster]
name = "class-five-import"
user_id = "teacher-01"
class_id = "five-a"

[source]
input = "roster.xlsx"

[load]
output_path = "./staged"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.roster.name, "class-five-import");
        assert_eq!(config.input_path(), "roster.xlsx");
        assert_eq!(config.class_id(), "five-a");
        assert_eq!(config.vision_endpoint(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROSTER_TEST_VISION_KEY", "secret-key");

        let toml_content = r#"
[roster]
name = "photo-import"
user_id = "teacher-01"
class_id = "five-a"

[source]
input = "roster.jpg"

[vision]
endpoint = "https://vision.example.com/extract"
api_key = "${ROSTER_TEST_VISION_KEY}"

[load]
output_path = "./staged"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.vision_api_key(), Some("secret-key"));

        std::env::remove_var("ROSTER_TEST_VISION_KEY");
    }

    #[test]
    fn test_invalid_vision_endpoint_fails_validation() {
        let toml_content = r#"
[roster]
name = "photo-import"
user_id = "teacher-01"
class_id = "five-a"

[source]
input = "roster.jpg"

[vision]
endpoint = "not-a-url"

[load]
output_path = "./staged"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[roster]
name = "file-test"
user_id = "teacher-01"
class_id = "five-a"

[source]
input = "roster.csv"
existing = "existing.json"

[load]
output_path = "./staged"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.roster.name, "file-test");
        assert_eq!(config.existing_roster(), Some("existing.json"));
    }
}
