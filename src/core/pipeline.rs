use crate::adapters::workbook;
use crate::core::builder::{build_record, restage_record};
use crate::core::columns::classify_header;
use crate::core::rolls::RollAllocator;
use crate::core::tabular;
use crate::domain::model::{RawRow, RosterInput, RosterTarget, StagedRoster, StudentRecord};
use crate::domain::ports::{ConfigProvider, Pipeline, RecordExtractor, Storage};
use crate::utils::error::{IngestError, Result};

/// File format implied by an input's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Workbook,
    Delimited,
    Image,
    Unknown,
}

fn source_kind(path: &str) -> SourceKind {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("xlsx") | Some("xls") | Some("xlsm") | Some("ods") => SourceKind::Workbook,
        Some("csv") | Some("tsv") | Some("txt") => SourceKind::Delimited,
        Some("jpg") | Some("jpeg") | Some("png") | Some("webp") => SourceKind::Image,
        _ => SourceKind::Unknown,
    }
}

pub struct RosterPipeline<S: Storage, C: ConfigProvider, X: RecordExtractor> {
    storage: S,
    config: C,
    extractor: X,
}

impl<S: Storage, C: ConfigProvider, X: RecordExtractor> RosterPipeline<S, C, X> {
    pub fn new(storage: S, config: C, extractor: X) -> Self {
        Self {
            storage,
            config,
            extractor,
        }
    }

    async fn load_existing(&self) -> Result<Vec<StudentRecord>> {
        let Some(path) = self.config.existing_roster() else {
            return Ok(Vec::new());
        };
        let bytes = self.storage.read_file(path).await?;
        let records: Vec<StudentRecord> = serde_json::from_slice(&bytes)?;
        tracing::debug!("Loaded {} existing records from {}", records.len(), path);
        Ok(records)
    }

    fn stage_rows(
        &self,
        rows: Vec<RawRow>,
        rolls: &mut RollAllocator,
    ) -> (Vec<StudentRecord>, usize) {
        let Some(first) = rows.first() else {
            return (Vec::new(), 0);
        };
        let map = classify_header(first);
        tracing::debug!(?map, "Classified columns");
        let data = if map.header_row { &rows[1..] } else { &rows[..] };

        let mut records = Vec::new();
        let mut skipped = 0;
        for row in data {
            match build_record(row, &map, rolls) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }
        (records, skipped)
    }

    fn stage_extracted(
        &self,
        extracted: Vec<StudentRecord>,
        rolls: &mut RollAllocator,
    ) -> (Vec<StudentRecord>, usize) {
        let total = extracted.len();
        let records: Vec<StudentRecord> = extracted
            .into_iter()
            .filter_map(|record| restage_record(record, rolls))
            .collect();
        let skipped = total - records.len();
        (records, skipped)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, X: RecordExtractor> Pipeline for RosterPipeline<S, C, X> {
    async fn extract(&self) -> Result<RosterInput> {
        let path = self.config.input_path();
        let bytes = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path);

        match source_kind(path) {
            SourceKind::Workbook => Ok(RosterInput::Rows(tabular::rows_from_grid(
                workbook::decode_grid(&bytes)?,
            ))),
            SourceKind::Delimited => Ok(RosterInput::Rows(tabular::parse_delimited(&bytes)?)),
            SourceKind::Image => Ok(RosterInput::Records(
                self.extractor.extract_records(&bytes).await?,
            )),
            SourceKind::Unknown => {
                // Sniff unknown extensions: workbook first, then delimited text.
                let workbook_err = match workbook::decode_grid(&bytes) {
                    Ok(grid) => return Ok(RosterInput::Rows(tabular::rows_from_grid(grid))),
                    Err(e) => e,
                };
                tracing::debug!("Workbook decode failed for {}: {}", path, workbook_err);
                match tabular::parse_delimited(&bytes) {
                    Ok(rows) => Ok(RosterInput::Rows(rows)),
                    Err(text_err) => Err(IngestError::Undecodable {
                        path: path.to_string(),
                        workbook: workbook_err.to_string(),
                        text: text_err.to_string(),
                    }),
                }
            }
        }
    }

    async fn transform(&self, input: RosterInput) -> Result<StagedRoster> {
        let existing = self.load_existing().await?;
        let mut rolls = RollAllocator::from_existing(&existing);

        let (records, skipped) = match input {
            RosterInput::Rows(rows) => self.stage_rows(rows, &mut rolls),
            RosterInput::Records(extracted) => self.stage_extracted(extracted, &mut rolls),
        };

        if records.is_empty() {
            return Err(IngestError::EmptyInput);
        }
        if skipped > 0 {
            tracing::warn!("Skipped {} rows with blank names", skipped);
        }

        Ok(StagedRoster {
            target: RosterTarget {
                user_id: self.config.user_id().to_string(),
                class_id: self.config.class_id().to_string(),
            },
            staged_at: chrono::Utc::now(),
            records,
            skipped,
        })
    }

    async fn load(&self, staged: StagedRoster) -> Result<String> {
        let output_path = format!("{}/staged_roster.json", self.config.output_path());
        let json = serde_json::to_vec_pretty(&staged)?;
        self.storage.write_file(&output_path, &json).await?;
        tracing::debug!(
            "Wrote {} staged records to {}",
            staged.records.len(),
            output_path
        );
        Ok(output_path)
    }
}
