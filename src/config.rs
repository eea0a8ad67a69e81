// src/config.rs

use crate::{
    common::clock::{Clock, SystemClock},
    db::Tables,
    services::auth::AuthService,
    store::AcademyStore,
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

/// Variáveis de ambiente (com `.env` carregado pelo dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: Storage,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub bootstrap_admin_email: Option<String>,
    pub ai_api_key: Option<String>,
    pub bcrypt_cost: u32,
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let storage = match optional("STORAGE").as_deref() {
            None | Some("postgres") => Storage::Postgres,
            Some("memory") => Storage::Memory,
            Some(other) => anyhow::bail!("STORAGE inválido: {} (use postgres ou memory)", other),
        };

        let database_url = optional("DATABASE_URL");
        if storage == Storage::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL deve ser definida");
        }

        let bcrypt_cost = match optional("BCRYPT_COST") {
            Some(cost) => cost.parse().context("BCRYPT_COST deve ser um número")?,
            None => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            storage,
            database_url,
            jwt_secret: optional("JWT_SECRET").context("JWT_SECRET deve ser definido")?,
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            bootstrap_admin_email: optional("BOOTSTRAP_ADMIN_EMAIL"),
            ai_api_key: optional("AI_API_KEY"),
            bcrypt_cost,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AcademyStore>,
    pub auth_service: AuthService,
    pub ai_assistant_enabled: bool,
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let (tables, db_pool) = match (config.storage, &config.database_url) {
            (Storage::Postgres, Some(database_url)) => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                (Tables::postgres(pool.clone()), Some(pool))
            }
            _ => {
                tracing::warn!("Usando armazenamento em memória; nada será persistido.");
                (Tables::in_memory(), None)
            }
        };

        Ok(Self::with_tables(config, tables, Arc::new(SystemClock), db_pool))
    }

    /// Monta o gráfico de dependências sobre tabelas já prontas.
    pub fn with_tables(
        config: &Config,
        tables: Tables,
        clock: Arc<dyn Clock>,
        db_pool: Option<PgPool>,
    ) -> Self {
        let store = Arc::new(AcademyStore::new(tables, clock));
        let auth_service = AuthService::new(
            store.clone(),
            config.jwt_secret.clone(),
            config.bootstrap_admin_email.clone(),
            config.bcrypt_cost,
        );

        Self {
            store,
            auth_service,
            ai_assistant_enabled: config.ai_api_key.is_some(),
            db_pool,
        }
    }
}
