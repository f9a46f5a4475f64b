pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;

pub use adapters::{memory_store::InMemoryStore, redis_store::RedisStore};
pub use config::AppConfig;
pub use core::{
    ingest::{IngestOptions, IngestPipeline},
    manager::ProjectManager,
    normalizer::normalize,
    removal::RemovalPipeline,
    validator::{is_valid_domain, DomainValidator},
};
pub use domain::{
    model::{ExportFormat, IngestResult, RemovalResult},
    ports::DomainStore,
};
pub use utils::error::{ReconError, Result};
