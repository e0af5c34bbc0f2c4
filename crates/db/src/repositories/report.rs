//! Report repository for database operations.
//!
//! Implements the core `ReportStore` trait using SeaORM.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::error;
use uuid::Uuid;

use crate::entities::reports;
use impact_core::reports::{
    Month, NewReport, Report, ReportKey, ReportMetrics, ReportScope, ReportStore, StoreError,
};

/// Report repository implementation.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReportStore for ReportRepository {
    async fn find_by_key(&self, key: &ReportKey) -> Result<Option<Report>, StoreError> {
        let model = reports::Entity::find()
            .filter(reports::Column::OrganizationId.eq(key.organization_id.as_str()))
            .filter(reports::Column::Month.eq(key.month.as_str()))
            .one(&self.db)
            .await
            .map_err(store_error)?;

        model.map(to_domain).transpose()
    }

    async fn insert(&self, report: NewReport) -> Result<Report, StoreError> {
        let now = Utc::now().into();
        let model = reports::ActiveModel {
            id: Set(Uuid::now_v7()),
            organization_id: Set(report.key.organization_id),
            month: Set(report.key.month.into()),
            people_helped: Set(report.metrics.people_helped),
            events_conducted: Set(report.metrics.events_conducted),
            funds_utilized: Set(report.metrics.funds_utilized),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(store_error)?;

        to_domain(model)
    }

    async fn update_metrics(&self, id: Uuid, metrics: ReportMetrics) -> Result<Report, StoreError> {
        let model = reports::ActiveModel {
            id: Set(id),
            people_helped: Set(metrics.people_helped),
            events_conducted: Set(metrics.events_conducted),
            funds_utilized: Set(metrics.funds_utilized),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => StoreError::NotFound(id),
            other => store_error(other),
        })?;

        to_domain(model)
    }

    async fn list(&self, scope: &ReportScope) -> Result<Vec<Report>, StoreError> {
        let mut query = reports::Entity::find();
        if let ReportScope::Month(month) = scope {
            query = query.filter(reports::Column::Month.eq(month.as_str()));
        }

        let models = query
            .order_by_asc(reports::Column::OrganizationId)
            .order_by_asc(reports::Column::Month)
            .all(&self.db)
            .await
            .map_err(store_error)?;

        models.into_iter().map(to_domain).collect()
    }
}

/// Maps a database error to a store error.
///
/// Only the `(organization_id, month)` unique constraint can be violated by
/// these statements, so any unique violation is a duplicate report key.
fn store_error(err: DbErr) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return StoreError::DuplicateKey;
    }
    error!(error = %err, "Report store query failed");
    StoreError::unavailable(err.to_string())
}

/// Convert database model to domain report.
fn to_domain(model: reports::Model) -> Result<Report, StoreError> {
    let month = Month::parse(&model.month)
        .map_err(|e| StoreError::InvalidRecord(format!("report {}: {e}", model.id)))?;

    Ok(Report {
        id: model.id,
        organization_id: model.organization_id,
        month,
        people_helped: model.people_helped,
        events_conducted: model.events_conducted,
        funds_utilized: model.funds_utilized,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
