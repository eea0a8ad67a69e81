// src/common/clock.rs

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// Fonte do "agora" local. Datas de vencimento e a agenda comparam apenas
/// a data local (meia-noite), nunca o instante UTC.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Instante absoluto para `created_at`, `updated_at` e DTSTAMP.
    fn timestamp(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Relógio parado, usado nos testes.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }

    // O relógio parado trata a hora local como UTC.
    fn timestamp(&self) -> DateTime<Utc> {
        self.0.and_utc()
    }
}
