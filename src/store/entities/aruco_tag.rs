use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::store::StoreError;

pub const TABLE: &str = "aruco_tags";

pub const SORT_KEYS: &[(&str, &str)] = &[("code", "code"), ("status", "status")];
pub const DEFAULT_SORT: &str = "code";

/// Printed ArUco marker fixed to a motorcycle; cameras track fleet position
/// by reading these.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ArucoTag {
    pub id: i32,
    pub code: String,
    pub status: String,
    pub motorcycle_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArucoTagInput {
    pub code: String,
    pub status: String,
    pub motorcycle_id: i32,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<ArucoTag>, StoreError> {
    let row = sqlx::query_as::<_, ArucoTag>(
        "SELECT id, code, status, motorcycle_id FROM aruco_tags WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert(pool: &PgPool, input: &ArucoTagInput) -> Result<ArucoTag, StoreError> {
    let row = sqlx::query_as::<_, ArucoTag>(
        "INSERT INTO aruco_tags (code, status, motorcycle_id) VALUES ($1, $2, $3) \
         RETURNING id, code, status, motorcycle_id",
    )
    .bind(&input.code)
    .bind(&input.status)
    .bind(input.motorcycle_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    input: &ArucoTagInput,
) -> Result<Option<ArucoTag>, StoreError> {
    let row = sqlx::query_as::<_, ArucoTag>(
        "UPDATE aruco_tags SET code = $1, status = $2, motorcycle_id = $3 WHERE id = $4 \
         RETURNING id, code, status, motorcycle_id",
    )
    .bind(&input.code)
    .bind(&input.status)
    .bind(input.motorcycle_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM aruco_tags WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
