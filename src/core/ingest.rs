use crate::core::normalizer::normalize;
use crate::core::validator::is_valid_domain;
use crate::domain::model::IngestResult;
use crate::domain::ports::DomainStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_project_name;

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Validate the trimmed line and store its normalized form. When off,
    /// the trimmed line is stored verbatim.
    pub validate: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// Reads domains line by line and adds them to a project.
///
/// Lines are processed strictly in order. Invalid lines and lines the store
/// rejects individually are counted and skipped; an unreachable store or an
/// unreadable source aborts the run.
pub struct IngestPipeline<'a, S: DomainStore + ?Sized> {
    store: &'a S,
    options: IngestOptions,
}

impl<'a, S: DomainStore + ?Sized> IngestPipeline<'a, S> {
    pub fn new(store: &'a S, options: IngestOptions) -> Self {
        Self { store, options }
    }

    pub async fn ingest<I>(&self, project: &str, lines: I) -> Result<IngestResult>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        validate_project_name(project)?;

        let mut result = IngestResult::default();

        for (index, line) in lines.into_iter().enumerate() {
            let line_num = index + 1;
            let line = line?;
            let domain = line.trim();
            if domain.is_empty() {
                continue;
            }

            // 驗證原始字串，儲存正規化後的結果
            let stored = if self.options.validate {
                if !is_valid_domain(domain) {
                    tracing::warn!("Invalid domain '{}' on line {}, skipping", domain, line_num);
                    result.invalid += 1;
                    continue;
                }
                normalize(domain)
            } else {
                domain.to_string()
            };

            if stored != domain {
                tracing::debug!("Normalized domain '{}' as '{}'", domain, stored);
            }

            match self.store.add_domain(project, &stored).await {
                Ok(added) => {
                    if added == 0 {
                        tracing::debug!("Duplicate domain '{}' on line {}", stored, line_num);
                    }
                    result.new += added;
                    result.total += 1;
                }
                Err(e) if e.is_recoverable() => {
                    tracing::error!("Failed to add domain '{}': {}", stored, e);
                    result.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!("{}", result.summary());
        if result.invalid > 0 {
            tracing::warn!("Skipped {} invalid domains", result.invalid);
        }
        if result.failed > 0 {
            tracing::warn!("{} domains could not be stored", result.failed);
        }

        Ok(result)
    }
}
