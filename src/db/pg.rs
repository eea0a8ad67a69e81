// src/db/pg.rs

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, PgPool, Postgres,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::{Record, Table, UserTable},
    models::user::User,
};

pub type PgQueryAs<'q, T> = QueryAs<'q, Postgres, T, PgArguments>;

/// Mapeamento de uma entidade para a sua tabela no Postgres.
///
/// `COLUMNS` começa sempre por `id`, e `bind_columns` faz o bind na mesma
/// ordem: `$1` é o id, `$2..` são as demais colunas.
pub trait PgRecord: Record + for<'r> FromRow<'r, PgRow> + Unpin {
    const COLUMNS: &'static [&'static str];
    const ORDER_BY: &'static str;

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self>;
}

// Violação de unicidade vira erro de domínio, nunca sobrescrita silenciosa.
fn map_db_error(table: &str, e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or(table).to_string();
            tracing::warn!(table, constraint = %constraint, "Violação de unicidade");
            return AppError::UniqueConstraintViolation(constraint);
        }
    }
    AppError::DatabaseError(e)
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct PgTable<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: PgRecord> PgTable<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    fn columns() -> String {
        T::COLUMNS.join(", ")
    }

    fn insert_sql() -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            T::TABLE,
            Self::columns(),
            placeholders(T::COLUMNS.len()),
            Self::columns()
        )
    }

    fn update_assignments(prefix: &str) -> String {
        T::COLUMNS
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, col)| {
                if prefix.is_empty() {
                    format!("{} = ${}", col, i + 1)
                } else {
                    format!("{} = {}.{}", col, prefix, col)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
impl<T: PgRecord> Table<T> for PgTable<T> {
    async fn select_all(&self) -> Result<Vec<T>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            Self::columns(),
            T::TABLE,
            T::ORDER_BY
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, row: &T) -> Result<T, AppError> {
        let sql = Self::insert_sql();
        row.bind_columns(sqlx::query_as::<_, T>(&sql))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error(T::TABLE, e))
    }

    async fn update(&self, row: &T) -> Result<T, AppError> {
        let sql = format!(
            "UPDATE {} SET {} WHERE id = $1 RETURNING {}",
            T::TABLE,
            Self::update_assignments(""),
            Self::columns()
        );
        row.bind_columns(sqlx::query_as::<_, T>(&sql))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(T::TABLE, e))?
            .ok_or_else(|| AppError::ResourceNotFound(T::TABLE.to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound(T::TABLE.to_string()));
        }
        Ok(())
    }

    async fn upsert(&self, row: &T) -> Result<T, AppError> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT (id) DO UPDATE SET {} RETURNING {}",
            T::TABLE,
            Self::columns(),
            placeholders(T::COLUMNS.len()),
            Self::update_assignments("EXCLUDED"),
            Self::columns()
        );
        row.bind_columns(sqlx::query_as::<_, T>(&sql))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error(T::TABLE, e))
    }
}

#[async_trait]
impl UserTable for PgTable<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE lower(email) = lower($1)",
            Self::columns()
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
