use crate::domain::model::{RosterInput, StagedRoster, StudentRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn class_id(&self) -> &str;
    fn user_id(&self) -> &str;
    fn existing_roster(&self) -> Option<&str>;
    fn vision_endpoint(&self) -> Option<&str>;
    fn vision_api_key(&self) -> Option<&str>;
    fn request_timeout_secs(&self) -> Option<u64>;
}

/// Boundary to the external image-extraction service. Concrete adapters are
/// swappable so tests can stand in for the network call.
#[async_trait]
pub trait RecordExtractor: Send + Sync {
    async fn extract_records(&self, image: &[u8]) -> Result<Vec<StudentRecord>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RosterInput>;
    async fn transform(&self, input: RosterInput) -> Result<StagedRoster>;
    async fn load(&self, staged: StagedRoster) -> Result<String>;
}
