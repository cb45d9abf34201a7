use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::store::StoreError;

pub const TABLE: &str = "status_records";

pub const SORT_KEYS: &[(&str, &str)] =
    &[("statusType", "status_type"), ("recordedAt", "recorded_at")];
pub const DEFAULT_SORT: &str = "recorded_at";

/// Operational status reported for a motorcycle by an employee.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub id: i32,
    pub status_type: String,
    pub description: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub motorcycle_id: i32,
    pub employee_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecordInput {
    pub status_type: String,
    pub description: Option<String>,
    /// Defaults to the server clock when omitted.
    pub recorded_at: Option<DateTime<Utc>>,
    pub motorcycle_id: i32,
    pub employee_id: i32,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<StatusRecord>, StoreError> {
    let row = sqlx::query_as::<_, StatusRecord>(
        "SELECT id, status_type, description, recorded_at, motorcycle_id, employee_id \
         FROM status_records WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert(pool: &PgPool, input: &StatusRecordInput) -> Result<StatusRecord, StoreError> {
    let recorded_at = input.recorded_at.unwrap_or_else(Utc::now);

    let row = sqlx::query_as::<_, StatusRecord>(
        "INSERT INTO status_records (status_type, description, recorded_at, motorcycle_id, employee_id) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, status_type, description, recorded_at, motorcycle_id, employee_id",
    )
    .bind(&input.status_type)
    .bind(&input.description)
    .bind(recorded_at)
    .bind(input.motorcycle_id)
    .bind(input.employee_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    input: &StatusRecordInput,
) -> Result<Option<StatusRecord>, StoreError> {
    let recorded_at = input.recorded_at.unwrap_or_else(Utc::now);

    let row = sqlx::query_as::<_, StatusRecord>(
        "UPDATE status_records \
         SET status_type = $1, description = $2, recorded_at = $3, motorcycle_id = $4, employee_id = $5 \
         WHERE id = $6 \
         RETURNING id, status_type, description, recorded_at, motorcycle_id, employee_id",
    )
    .bind(&input.status_type)
    .bind(&input.description)
    .bind(recorded_at)
    .bind(input.motorcycle_id)
    .bind(input.employee_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM status_records WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
