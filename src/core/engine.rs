use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Drives a pipeline through its three stages in order. One ingestion runs to
/// completion or failure; there is no cancellation mid-flight.
pub struct IngestEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> IngestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Extracting roster data...");
        let input = self.pipeline.extract().await?;

        tracing::info!("Normalizing records...");
        let staged = self.pipeline.transform(input).await?;
        tracing::info!(
            "Staged {} records for class {} ({} rows skipped)",
            staged.records.len(),
            staged.target.class_id,
            staged.skipped
        );

        let output_path = self.pipeline.load(staged).await?;
        tracing::info!("Staged roster saved to: {}", output_path);
        Ok(output_path)
    }
}
