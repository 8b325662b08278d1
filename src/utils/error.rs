use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Spreadsheet decode failed: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Delimited text parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input is not valid UTF-8 text")]
    NotText,

    #[error("Could not decode {path}: not a spreadsheet ({workbook}); not delimited text ({text})")]
    Undecodable {
        path: String,
        workbook: String,
        text: String,
    },

    #[error("No student rows found in the input")]
    EmptyInput,

    #[error("Extraction service failed: {message}")]
    VisionService { message: String },

    #[error("Extraction request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },
}

impl IngestError {
    /// Recovery suggestion the CLI prints next to the failure.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            IngestError::Workbook(_)
            | IngestError::Csv(_)
            | IngestError::NotText
            | IngestError::Undecodable { .. } => {
                Some("Export the roster as .xlsx or .csv and try again")
            }
            IngestError::EmptyInput => {
                Some("Check that the file has a student name column with at least one filled row")
            }
            IngestError::VisionService { .. } | IngestError::Http(_) => {
                Some("Retake the photo in good light, or check the extraction service endpoint")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
