// src/db/memory.rs

// Adaptador em processo, com as mesmas regras de unicidade do Postgres.
// Usado nos testes e em execuções locais com STORAGE=memory.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::{Record, Table, UserTable},
    models::user::User,
};

pub struct MemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T: Record> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> MemoryTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    fn check_unique_key(rows: &[T], row: &T) -> Result<(), AppError> {
        let Some(key) = row.unique_key() else {
            return Ok(());
        };

        let taken = rows
            .iter()
            .any(|other| other.id() != row.id() && other.unique_key().as_deref() == Some(key.as_str()));
        if taken {
            return Err(AppError::UniqueConstraintViolation(format!(
                "{}_unique_key",
                T::TABLE
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Record> Table<T> for MemoryTable<T> {
    async fn select_all(&self) -> Result<Vec<T>, AppError> {
        Ok(self.rows.read().await.clone())
    }

    async fn insert(&self, row: &T) -> Result<T, AppError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|other| other.id() == row.id()) {
            return Err(AppError::UniqueConstraintViolation(format!("{}_pkey", T::TABLE)));
        }
        Self::check_unique_key(&rows, row)?;

        rows.push(row.clone());
        Ok(row.clone())
    }

    async fn update(&self, row: &T) -> Result<T, AppError> {
        let mut rows = self.rows.write().await;
        Self::check_unique_key(&rows, row)?;

        let slot = rows
            .iter_mut()
            .find(|other| other.id() == row.id())
            .ok_or_else(|| AppError::ResourceNotFound(T::TABLE.to_string()))?;
        *slot = row.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);

        if rows.len() == before {
            return Err(AppError::ResourceNotFound(T::TABLE.to_string()));
        }
        Ok(())
    }

    async fn upsert(&self, row: &T) -> Result<T, AppError> {
        let mut rows = self.rows.write().await;
        Self::check_unique_key(&rows, row)?;

        match rows.iter_mut().find(|other| other.id() == row.id()) {
            Some(slot) => *slot = row.clone(),
            None => rows.push(row.clone()),
        }
        Ok(row.clone())
    }
}

#[async_trait]
impl UserTable for MemoryTable<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|user| user.email.to_lowercase() == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tatame::{Booking, BookingStatus};
    use crate::services::booking::slot_key;
    use chrono::{NaiveDate, Utc};

    fn booking(area_id: Uuid, slot: &str) -> Booking {
        let date = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        Booking {
            id: Uuid::new_v4(),
            area_id,
            date,
            time_slot: slot.into(),
            slot_key: slot_key(area_id, date, slot),
            user_id: Uuid::new_v4(),
            user_name: "Aluno".into(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn unique_key_rejects_second_insert_without_touching_first() {
        let table = MemoryTable::<Booking>::new();
        let area = Uuid::new_v4();
        let first = booking(area, "07:00 - 08:00");
        table.insert(&first).await.unwrap();

        let second = booking(area, "07:00 - 08:00");
        let err = table.insert(&second).await.unwrap_err();
        assert!(matches!(err, AppError::UniqueConstraintViolation(_)));

        let rows = table.select_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, first.id);
        assert_eq!(rows[0].user_id, first.user_id);
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows_are_not_found() {
        let table = MemoryTable::<Booking>::new();
        let ghost = booking(Uuid::new_v4(), "07:00 - 08:00");

        assert!(matches!(
            table.update(&ghost).await,
            Err(AppError::ResourceNotFound(_))
        ));
        assert!(matches!(
            table.delete(ghost.id).await,
            Err(AppError::ResourceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn upsert_replaces_by_id() {
        let table = MemoryTable::<Booking>::new();
        let mut row = booking(Uuid::new_v4(), "07:00 - 08:00");
        table.upsert(&row).await.unwrap();

        row.status = BookingStatus::Confirmed;
        table.upsert(&row).await.unwrap();

        let rows = table.select_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, BookingStatus::Confirmed);
    }
}
