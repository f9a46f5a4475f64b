pub mod export;
pub mod ingest;
pub mod manager;
pub mod normalizer;
pub mod removal;
pub mod validator;

pub use crate::domain::model::{ExportDocument, ExportFormat, IngestResult, RemovalResult};
pub use crate::domain::ports::DomainStore;
pub use crate::utils::error::Result;
