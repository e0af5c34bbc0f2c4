//! Reports migration.
//!
//! Creates the reports table. The `(organization_id, month)` unique
//! constraint is what resolves concurrent first-time submissions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(REPORTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS reports CASCADE;")
            .await?;
        Ok(())
    }
}

const REPORTS_SQL: &str = r"
-- One report per organization per month
CREATE TABLE reports (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id TEXT NOT NULL,
    month VARCHAR(7) NOT NULL,
    people_helped BIGINT NOT NULL,
    events_conducted BIGINT NOT NULL,
    funds_utilized NUMERIC(20, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_reports_organization_month UNIQUE (organization_id, month),
    CONSTRAINT chk_reports_organization CHECK (length(btrim(organization_id)) > 0),
    CONSTRAINT chk_reports_month CHECK (month ~ '^[0-9]{4}-[0-9]{2}$'),
    CONSTRAINT chk_reports_people_helped CHECK (people_helped >= 0),
    CONSTRAINT chk_reports_events_conducted CHECK (events_conducted >= 0),
    CONSTRAINT chk_reports_funds_utilized CHECK (funds_utilized >= 0)
);

-- Month-scoped dashboard reads
CREATE INDEX idx_reports_month ON reports(month);
";
