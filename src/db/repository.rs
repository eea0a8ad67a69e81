// src/db/repository.rs

// Fronteira com o armazenamento: uma tabela por entidade, com o mesmo
// contrato para o Postgres e para o adaptador em memória.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{common::error::AppError, models::user::User};

/// Linha persistível de uma tabela.
pub trait Record: Clone + Send + Sync + 'static {
    const TABLE: &'static str;

    fn id(&self) -> Uuid;

    /// Chave única além do id (e-mail do usuário, horário do agendamento).
    fn unique_key(&self) -> Option<String> {
        None
    }
}

#[async_trait]
pub trait Table<T: Record>: Send + Sync {
    async fn select_all(&self) -> Result<Vec<T>, AppError>;

    /// Falha com `UniqueConstraintViolation` se o id ou a chave única já existem.
    async fn insert(&self, row: &T) -> Result<T, AppError>;

    /// Atualiza pelo id; `ResourceNotFound` se não existe.
    async fn update(&self, row: &T) -> Result<T, AppError>;

    /// Apaga pelo id; `ResourceNotFound` se não existe.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    async fn upsert(&self, row: &T) -> Result<T, AppError>;
}

#[async_trait]
pub trait UserTable: Table<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}
