use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::auth::verifier::{Identity, IdentityStore};
use crate::store::{Db, StoreError};

pub const TABLE: &str = "employees";

pub const SORT_KEYS: &[(&str, &str)] = &[("name", "name"), ("role", "role"), ("email", "email")];
pub const DEFAULT_SORT: &str = "name";

/// Public representation; the stored credential hash never leaves the
/// store layer.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub national_id: String,
    pub role: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub national_id: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub secret: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub name: String,
    pub national_id: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    /// When present, the stored credential is replaced.
    pub secret: Option<String>,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Employee>, StoreError> {
    let row = sqlx::query_as::<_, Employee>(
        "SELECT id, name, national_id, role, phone, email FROM employees WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert(
    pool: &PgPool,
    input: &NewEmployee,
    secret_hash: &str,
) -> Result<Employee, StoreError> {
    let row = sqlx::query_as::<_, Employee>(
        "INSERT INTO employees (name, national_id, role, phone, email, secret_hash) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, name, national_id, role, phone, email",
    )
    .bind(&input.name)
    .bind(&input.national_id)
    .bind(&input.role)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(secret_hash)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    input: &EmployeeUpdate,
    secret_hash: Option<&str>,
) -> Result<Option<Employee>, StoreError> {
    let row = match secret_hash {
        Some(secret_hash) => {
            sqlx::query_as::<_, Employee>(
                "UPDATE employees \
                 SET name = $1, national_id = $2, role = $3, phone = $4, email = $5, secret_hash = $6 \
                 WHERE id = $7 \
                 RETURNING id, name, national_id, role, phone, email",
            )
            .bind(&input.name)
            .bind(&input.national_id)
            .bind(&input.role)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(secret_hash)
            .bind(id)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Employee>(
                "UPDATE employees \
                 SET name = $1, national_id = $2, role = $3, phone = $4, email = $5 \
                 WHERE id = $6 \
                 RETURNING id, name, national_id, role, phone, email",
            )
            .bind(&input.name)
            .bind(&input.national_id)
            .bind(&input.role)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(id)
            .fetch_optional(pool)
            .await?
        }
    };

    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[derive(Debug, FromRow)]
struct IdentityRow {
    name: String,
    email: String,
    role: String,
    secret_hash: String,
}

/// Employees double as the identity store for login.
pub struct PgIdentityStore {
    db: Db,
}

impl PgIdentityStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_login_key(&self, login_key: &str) -> Result<Option<Identity>, StoreError> {
        let pool = self.db.pool().await?;

        let row = sqlx::query_as::<_, IdentityRow>(
            "SELECT name, email, role, secret_hash FROM employees WHERE email = $1",
        )
        .bind(login_key)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|row| Identity {
            name: row.name,
            email: row.email,
            role: row.role,
            secret_hash: row.secret_hash,
        }))
    }
}
