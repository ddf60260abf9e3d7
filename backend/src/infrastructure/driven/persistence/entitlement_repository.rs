use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;
use crate::application::ports::{EntitlementFilter, EntitlementRepository};
use crate::domain::entities::{CourseEnrollment, Entitlement};
use crate::domain::value_objects::{CourseMode, CourseRunId, OrderNumber, UserId};
use crate::infrastructure::driven::persistence::db_types::DbEntitlement;

const SELECT_COLUMNS: &str = "SELECT uuid, user_id, course_uuid, mode, order_number, created_at, \
     expired_at, enrollment_id, enrollment_course_run FROM course_entitlements";

pub struct SqliteEntitlementRepository {
    pool: SqlitePool,
}

impl SqliteEntitlementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn parse_timestamp(field: &str, raw: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid {field}: {raw}"))
}

fn db_to_entitlement(row: DbEntitlement) -> anyhow::Result<Entitlement> {
    let uuid = Uuid::parse_str(&row.uuid).with_context(|| format!("Invalid uuid: {}", row.uuid))?;
    let owner: UserId = row
        .user_id
        .parse()
        .with_context(|| format!("Invalid user_id: {}", row.user_id))?;
    let course_uuid = Uuid::parse_str(&row.course_uuid)
        .with_context(|| format!("Invalid course_uuid: {}", row.course_uuid))?;
    let mode = CourseMode::new(row.mode).map_err(|e| anyhow!(e))?;
    let order_number = OrderNumber::new(row.order_number).map_err(|e| anyhow!(e))?;
    let created_at = parse_timestamp("created_at", &row.created_at)?;
    let expired_at = row
        .expired_at
        .as_deref()
        .map(|s| parse_timestamp("expired_at", s))
        .transpose()?;
    let enrollment = match (row.enrollment_id, row.enrollment_course_run) {
        (Some(id), Some(run)) => Some(CourseEnrollment::new(
            Uuid::parse_str(&id).with_context(|| format!("Invalid enrollment_id: {id}"))?,
            CourseRunId::new(run).map_err(|e| anyhow!(e))?,
        )),
        (None, None) => None,
        _ => return Err(anyhow!("Entitlement {uuid} has a partial enrollment reference")),
    };

    Ok(Entitlement::from_persistence(
        uuid,
        owner,
        course_uuid,
        mode,
        order_number,
        created_at,
        expired_at,
        enrollment,
    ))
}

#[async_trait]
impl EntitlementRepository for SqliteEntitlementRepository {
    async fn save(&self, entitlement: &Entitlement) -> anyhow::Result<()> {
        let enrollment = entitlement.enrollment();
        // Identity columns are never rewritten on conflict, and a stored
        // expired_at is never replaced or cleared.
        sqlx::query(
            "INSERT INTO course_entitlements \
             (uuid, user_id, course_uuid, mode, order_number, created_at, expired_at, enrollment_id, enrollment_course_run) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
             ON CONFLICT(uuid) DO UPDATE SET \
             expired_at = COALESCE(course_entitlements.expired_at, excluded.expired_at), \
             enrollment_id = excluded.enrollment_id, \
             enrollment_course_run = excluded.enrollment_course_run",
        )
        .bind(entitlement.uuid().to_string())
        .bind(entitlement.owner().to_string())
        .bind(entitlement.course_uuid().to_string())
        .bind(entitlement.mode().as_str())
        .bind(entitlement.order_number().as_str())
        .bind(entitlement.created_at().to_rfc3339())
        .bind(entitlement.expired_at().map(|dt| dt.to_rfc3339()))
        .bind(enrollment.map(|e| e.id.to_string()))
        .bind(enrollment.map(|e| e.course_run_id.to_string()))
        .execute(&self.pool)
        .await
        .context("Failed to save course entitlement")?;
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<Entitlement>> {
        let row: Option<DbEntitlement> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE uuid = ?1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Database error")?;

        row.map(db_to_entitlement).transpose()
    }

    async fn list(&self, filter: &EntitlementFilter) -> anyhow::Result<Vec<Entitlement>> {
        let rows: Vec<DbEntitlement> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} \
             WHERE (?1 IS NULL OR user_id = ?1) AND (?2 IS NULL OR course_uuid = ?2) \
             ORDER BY id"
        ))
        .bind(filter.owner.map(|o| o.to_string()))
        .bind(filter.course_uuid.map(|c| c.to_string()))
        .fetch_all(&self.pool)
        .await
        .context("Database error")?;

        rows.into_iter().map(db_to_entitlement).collect()
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database unreachable")?;
        Ok(())
    }
}
