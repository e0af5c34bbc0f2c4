//! Report ingestion service.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::{ReportError, StoreError};
use super::store::ReportStore;
use super::types::{NewReport, SubmissionOutcome, SubmissionStatus};
use super::validation::{ReportSubmission, validate_submission};

/// Validates submissions and upserts one report per organization and month.
pub struct IngestionService<S: ReportStore> {
    store: Arc<S>,
}

impl<S: ReportStore> IngestionService<S> {
    /// Create a new ingestion service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validates and stores a raw submission.
    ///
    /// Nothing is read or written when validation fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any field violates its constraints
    /// - A concurrent submission created the same key first
    /// - The store fails
    pub async fn submit(
        &self,
        submission: &ReportSubmission,
    ) -> Result<SubmissionOutcome, ReportError> {
        let report = validate_submission(submission)?;
        self.upsert(report).await
    }

    /// Stores an already validated report.
    ///
    /// An existing report for the key has its three metrics replaced; otherwise
    /// a new report is created. There is no lock across the lookup and the
    /// write: the store's uniqueness constraint decides a create race, and the
    /// loser gets [`ReportError::DuplicateKey`]. Retrying then takes the update
    /// path.
    ///
    /// # Errors
    ///
    /// Returns an error if the create race is lost or the store fails.
    pub async fn upsert(&self, report: NewReport) -> Result<SubmissionOutcome, ReportError> {
        if let Some(existing) = self.store.find_by_key(&report.key).await? {
            let updated = self
                .store
                .update_metrics(existing.id, report.metrics)
                .await?;

            info!(
                report_id = %updated.id,
                organization_id = %updated.organization_id,
                month = %updated.month,
                "Report updated"
            );

            return Ok(SubmissionOutcome {
                report: updated,
                status: SubmissionStatus::Updated,
            });
        }

        let key = report.key.clone();
        match self.store.insert(report).await {
            Ok(created) => {
                info!(
                    report_id = %created.id,
                    organization_id = %created.organization_id,
                    month = %created.month,
                    "Report created"
                );

                Ok(SubmissionOutcome {
                    report: created,
                    status: SubmissionStatus::Created,
                })
            }
            Err(StoreError::DuplicateKey) => {
                warn!(
                    organization_id = %key.organization_id,
                    month = %key.month,
                    "Lost create race for report key"
                );

                Err(ReportError::DuplicateKey {
                    organization_id: key.organization_id,
                    month: key.month,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{
        InMemoryReportStore, Month, Report, ReportKey, ReportMetrics, ReportScope,
    };
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Barrier;
    use uuid::Uuid;

    fn submission(value: serde_json::Value) -> ReportSubmission {
        serde_json::from_value(value).unwrap()
    }

    fn service() -> (Arc<InMemoryReportStore>, IngestionService<InMemoryReportStore>) {
        let store = Arc::new(InMemoryReportStore::new());
        (store.clone(), IngestionService::new(store))
    }

    #[tokio::test]
    async fn test_first_submission_creates() {
        let (store, service) = service();
        let outcome = service
            .submit(&submission(json!({
                "ngoId": "A",
                "month": "2024-01",
                "peopleHelped": 100,
                "eventsConducted": 2,
                "fundsUtilized": 5000
            })))
            .await
            .unwrap();

        assert_eq!(outcome.status, SubmissionStatus::Created);
        assert_eq!(outcome.report.people_helped, 100);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_second_submission_overwrites() {
        let (store, service) = service();
        let first = service
            .submit(&submission(json!({
                "ngoId": "A", "month": "2024-01",
                "peopleHelped": 100, "eventsConducted": 2, "fundsUtilized": 5000
            })))
            .await
            .unwrap();
        let second = service
            .submit(&submission(json!({
                "ngoId": "A", "month": "2024-01",
                "peopleHelped": 120, "eventsConducted": 1, "fundsUtilized": 10.25
            })))
            .await
            .unwrap();

        assert_eq!(second.status, SubmissionStatus::Updated);
        assert_eq!(second.report.id, first.report.id);
        assert_eq!(
            second.report.metrics(),
            ReportMetrics {
                people_helped: 120,
                events_conducted: 1,
                funds_utilized: dec!(10.25),
            }
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submission_writes_nothing() {
        let (store, service) = service();
        let err = service
            .submit(&submission(json!({
                "ngoId": "A", "month": "2024-1",
                "peopleHelped": -5, "eventsConducted": 2, "fundsUtilized": 5000
            })))
            .await
            .unwrap_err();

        let ReportError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.fields(), ["month", "peopleHelped"]);
        assert!(store.is_empty());
    }

    /// Store whose lookup always misses, so every submission takes the
    /// create path the way two racing first-time submissions do.
    #[derive(Default)]
    struct RacingStore {
        inner: InMemoryReportStore,
        lookups: AtomicUsize,
    }

    impl ReportStore for RacingStore {
        async fn find_by_key(&self, _key: &ReportKey) -> Result<Option<Report>, StoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn insert(&self, report: NewReport) -> Result<Report, StoreError> {
            self.inner.insert(report).await
        }

        async fn update_metrics(
            &self,
            id: Uuid,
            metrics: ReportMetrics,
        ) -> Result<Report, StoreError> {
            self.inner.update_metrics(id, metrics).await
        }

        async fn list(&self, scope: &ReportScope) -> Result<Vec<Report>, StoreError> {
            self.inner.list(scope).await
        }
    }

    #[tokio::test]
    async fn test_lost_create_race_is_duplicate_key() {
        let store = Arc::new(RacingStore::default());
        let service = IngestionService::new(store.clone());
        let report = NewReport {
            key: ReportKey::new("A", Month::parse("2024-01").unwrap()),
            metrics: ReportMetrics {
                people_helped: 1,
                events_conducted: 1,
                funds_utilized: dec!(1),
            },
        };

        let winner = service.upsert(report.clone()).await.unwrap();
        assert_eq!(winner.status, SubmissionStatus::Created);

        let err = service.upsert(report).await.unwrap_err();
        assert!(matches!(
            err,
            ReportError::DuplicateKey { ref organization_id, ref month }
                if organization_id == "A" && month.as_str() == "2024-01"
        ));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 2);
        assert_eq!(store.inner.len(), 1);
    }

    #[tokio::test]
    async fn test_retry_after_lost_race_updates() {
        let store = Arc::new(InMemoryReportStore::new());
        let service = IngestionService::new(store.clone());
        let key = ReportKey::new("A", Month::parse("2024-01").unwrap());

        // The racing writer got there first.
        store
            .insert(NewReport {
                key: key.clone(),
                metrics: ReportMetrics {
                    people_helped: 1,
                    events_conducted: 1,
                    funds_utilized: dec!(1),
                },
            })
            .await
            .unwrap();

        let retried = service
            .upsert(NewReport {
                key,
                metrics: ReportMetrics {
                    people_helped: 7,
                    events_conducted: 3,
                    funds_utilized: dec!(70),
                },
            })
            .await
            .unwrap();
        assert_eq!(retried.status, SubmissionStatus::Updated);
        assert_eq!(retried.report.people_helped, 7);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_submissions_leave_one_record() {
        const WRITERS: usize = 16;

        let store = Arc::new(InMemoryReportStore::new());
        let service = Arc::new(IngestionService::new(store.clone()));
        let barrier = Arc::new(Barrier::new(WRITERS));

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let service = service.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    let body = submission(json!({
                        "ngoId": "A", "month": "2024-01",
                        "peopleHelped": i, "eventsConducted": 1, "fundsUtilized": 1
                    }));
                    barrier.wait().await;
                    service.submit(&body).await
                })
            })
            .collect();

        let mut created = 0;
        let mut settled = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(outcome) if outcome.status == SubmissionStatus::Created => created += 1,
                Ok(_) | Err(ReportError::DuplicateKey { .. }) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
            settled += 1;
        }

        assert_eq!(settled, WRITERS);
        assert_eq!(created, 1);
        assert_eq!(store.len(), 1);
    }
}
