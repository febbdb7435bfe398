//! Generate artifacts use case.

use std::path::PathBuf;

use aritygen_domain::{ArtifactTarget, Family, FamilySelection, GeneratedArtifact, GeneratorConfig};
use tracing::{error, info, warn};

use crate::codegen::generate_family;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::ArtifactStore;

/// What to do with each freshly generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerateMode {
    /// Replace the destination file.
    #[default]
    Write,
    /// Compare with the destination file without touching it.
    Check,
}

/// Outcome for one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    /// The destination now holds the generated text.
    Written,
    /// The destination already matches the generated text.
    UpToDate,
    /// The destination differs from the generated text.
    Stale,
    /// Nothing exists at the destination.
    Missing,
}

/// Report for one processed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    /// Family of the artifact.
    pub family: Family,
    /// Resolved destination.
    pub destination: PathBuf,
    /// Number of generated variants.
    pub variant_count: usize,
    /// Size of the generated text in bytes.
    pub bytes: usize,
    /// What happened to the destination.
    pub status: ArtifactStatus,
}

/// Result of a whole run.
#[derive(Debug, Default)]
pub struct GenerationSummary {
    /// Artifacts that were processed.
    pub reports: Vec<ArtifactReport>,
    /// Families that failed.
    pub failures: Vec<ApplicationError>,
}

impl GenerationSummary {
    /// True when no family failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when a check run found a stale or missing artifact.
    #[must_use]
    pub fn has_outdated(&self) -> bool {
        self.reports
            .iter()
            .any(|r| matches!(r.status, ArtifactStatus::Stale | ArtifactStatus::Missing))
    }
}

/// Use case for generating family artifacts and storing or checking them.
pub struct GenerateArtifacts<S: ArtifactStore> {
    store: S,
}

impl<S: ArtifactStore> GenerateArtifacts<S> {
    /// Creates a new `GenerateArtifacts` use case.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Renders the artifact of a target entirely in memory.
    #[must_use]
    pub fn render(target: &ArtifactTarget) -> GeneratedArtifact {
        generate_family(target.family, target.max_arity.get())
    }

    /// Validates the selected families of `config`, then processes them.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Domain`] if any selected family is
    /// misconfigured; nothing is generated in that case.
    pub async fn execute_config(
        &self,
        config: &GeneratorConfig,
        selection: &FamilySelection,
        mode: GenerateMode,
    ) -> ApplicationResult<GenerationSummary> {
        let targets = config.targets(selection)?;
        Ok(self.execute(&targets, mode).await)
    }

    /// Processes every target in order.
    ///
    /// A failing family is recorded in the summary and does not stop the
    /// remaining ones.
    pub async fn execute(&self, targets: &[ArtifactTarget], mode: GenerateMode) -> GenerationSummary {
        let mut summary = GenerationSummary::default();
        for target in targets {
            match self.execute_one(target, mode).await {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    error!(family = %target.family, error = %e, "artifact generation failed");
                    summary.failures.push(e);
                }
            }
        }
        summary
    }

    /// Generates one artifact and writes or checks it.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Store`] if the destination cannot be read
    /// (check mode) or replaced (write mode).
    pub async fn execute_one(
        &self,
        target: &ArtifactTarget,
        mode: GenerateMode,
    ) -> ApplicationResult<ArtifactReport> {
        let artifact = Self::render(target);
        let store_error = |source| ApplicationError::Store {
            family: target.family,
            path: target.destination.clone(),
            source,
        };

        let status = match mode {
            GenerateMode::Write => {
                self.store
                    .replace_artifact(&target.destination, artifact.text())
                    .await
                    .map_err(store_error)?;
                ArtifactStatus::Written
            }
            GenerateMode::Check => {
                match self
                    .store
                    .read_artifact(&target.destination)
                    .await
                    .map_err(store_error)?
                {
                    None => ArtifactStatus::Missing,
                    Some(existing) if existing == artifact.text().as_bytes() => {
                        ArtifactStatus::UpToDate
                    }
                    Some(_) => ArtifactStatus::Stale,
                }
            }
        };

        let report = ArtifactReport {
            family: artifact.family(),
            destination: target.destination.clone(),
            variant_count: artifact.variant_count(),
            bytes: artifact.text().len(),
            status,
        };
        match status {
            ArtifactStatus::Written | ArtifactStatus::UpToDate => info!(
                family = %report.family,
                path = %report.destination.display(),
                max_arity = artifact.max_arity(),
                variants = report.variant_count,
                bytes = report.bytes,
                status = ?report.status,
                "artifact processed"
            ),
            ArtifactStatus::Stale | ArtifactStatus::Missing => warn!(
                family = %report.family,
                path = %report.destination.display(),
                status = ?report.status,
                "artifact is out of date"
            ),
        }
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::StoreError;
    use aritygen_domain::MaxArity;
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::sync::Mutex;

    /// In-memory store; paths listed in `read_only` refuse writes.
    #[derive(Default)]
    struct MemoryStore {
        files: Mutex<BTreeMap<PathBuf, String>>,
        read_only: Vec<PathBuf>,
    }

    impl MemoryStore {
        fn get(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }

        fn put(&self, path: &str, contents: &str) {
            self.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), contents.to_string());
        }
    }

    impl ArtifactStore for MemoryStore {
        async fn read_artifact(&self, path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
            Ok(self
                .files
                .lock()
                .unwrap()
                .get(path)
                .map(|text| text.clone().into_bytes()))
        }

        async fn replace_artifact(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
            if self.read_only.iter().any(|p| p == path) {
                return Err(StoreError::PermissionDenied(path.to_path_buf()));
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    fn target(family: Family, max: i64, path: &str) -> ArtifactTarget {
        ArtifactTarget {
            family,
            max_arity: MaxArity::new(max).unwrap(),
            destination: PathBuf::from(path),
        }
    }

    #[tokio::test]
    async fn write_mode_stores_rendered_text() {
        let use_case = GenerateArtifacts::new(MemoryStore::default());
        let t = target(Family::EquationHolder, 3, "EquationHolder.hpp");
        let summary = use_case.execute(std::slice::from_ref(&t), GenerateMode::Write).await;

        assert!(summary.is_success());
        assert_eq!(summary.reports[0].status, ArtifactStatus::Written);
        assert_eq!(summary.reports[0].variant_count, 3);
        let stored = use_case.store.get("EquationHolder.hpp").unwrap();
        assert_eq!(stored, GenerateArtifacts::<MemoryStore>::render(&t).text());
    }

    #[tokio::test]
    async fn check_mode_detects_missing_stale_and_current() {
        let store = MemoryStore::default();
        let current = target(Family::StencilHolder, 2, "StencilHolder.hpp");
        store.put(
            "StencilHolder.hpp",
            GenerateArtifacts::<MemoryStore>::render(&current).text(),
        );
        store.put("Expression.hpp", "// hand edited\n");
        let use_case = GenerateArtifacts::new(store);

        let targets = [
            current,
            target(Family::Expression, 4, "Expression.hpp"),
            target(Family::UnifiedSolve, 2, "UnifiedSolve.hpp"),
        ];
        let summary = use_case.execute(&targets, GenerateMode::Check).await;

        let statuses: Vec<_> = summary.reports.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![ArtifactStatus::UpToDate, ArtifactStatus::Stale, ArtifactStatus::Missing]
        );
        assert!(summary.has_outdated());
        assert_eq!(use_case.store.get("Expression.hpp").unwrap(), "// hand edited\n");
        assert!(use_case.store.get("UnifiedSolve.hpp").is_none());
    }

    #[tokio::test]
    async fn failing_family_does_not_stop_the_others() {
        let store = MemoryStore {
            read_only: vec![PathBuf::from("locked/Expression.hpp")],
            ..MemoryStore::default()
        };
        let use_case = GenerateArtifacts::new(store);
        let targets = [
            target(Family::Expression, 4, "locked/Expression.hpp"),
            target(Family::UnifiedSolve, 2, "UnifiedSolve.hpp"),
        ];
        let summary = use_case.execute(&targets, GenerateMode::Write).await;

        assert!(!summary.is_success());
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].family(), Some(Family::Expression));
        assert!(summary.failures[0].to_string().contains("locked/Expression.hpp"));
        assert_eq!(summary.reports.len(), 1);
        assert!(use_case.store.get("UnifiedSolve.hpp").is_some());
        assert!(use_case.store.get("locked/Expression.hpp").is_none());
    }

    #[tokio::test]
    async fn invalid_configuration_generates_nothing() {
        let use_case = GenerateArtifacts::new(MemoryStore::default());
        let mut config = GeneratorConfig::default();
        config.expression.max_arity = -1;

        let err = use_case
            .execute_config(&config, &FamilySelection::All, GenerateMode::Write)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Domain(_)));
        assert_eq!(err.family(), Some(Family::Expression));
        assert!(use_case.store.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn regenerating_is_byte_identical() {
        let use_case = GenerateArtifacts::new(MemoryStore::default());
        let config = GeneratorConfig::default();
        let selection = FamilySelection::Only(vec![Family::UnifiedSolve]);

        use_case
            .execute_config(&config, &selection, GenerateMode::Write)
            .await
            .unwrap();
        let first = use_case.store.get("./UnifiedSolve.hpp").unwrap();
        use_case
            .execute_config(&config, &selection, GenerateMode::Write)
            .await
            .unwrap();
        assert_eq!(use_case.store.get("./UnifiedSolve.hpp").unwrap(), first);

        let summary = use_case
            .execute_config(&config, &selection, GenerateMode::Check)
            .await
            .unwrap();
        assert_eq!(summary.reports[0].status, ArtifactStatus::UpToDate);
    }
}
