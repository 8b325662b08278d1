pub mod builder;
pub mod columns;
pub mod engine;
pub mod pipeline;
pub mod rolls;
pub mod tabular;

pub use crate::domain::model::{
    CellValue, RawRow, RosterInput, RosterTarget, StagedRoster, StudentRecord,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordExtractor, Storage};
pub use crate::utils::error::Result;
