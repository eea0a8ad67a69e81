// src/services/payment_status.rs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// Semáforo da mensalidade. Painel, lista de alunos e detalhe usam a mesma função.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum PaymentStatus {
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "overdue")]
    Overdue,
    #[serde(rename = "due today")]
    DueToday,
    #[serde(rename = "current")]
    Current,
}

/// Compara só a data local; a hora do dia nunca entra na conta.
pub fn payment_status(due_date: Option<NaiveDate>, today: NaiveDate) -> PaymentStatus {
    match due_date {
        None => PaymentStatus::NotApplicable,
        Some(due) if due < today => PaymentStatus::Overdue,
        Some(due) if due == today => PaymentStatus::DueToday,
        Some(_) => PaymentStatus::Current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_today_is_neither_overdue_nor_current() {
        let today = date(2024, 3, 15);
        assert_eq!(payment_status(Some(today), today), PaymentStatus::DueToday);
    }

    #[test]
    fn day_boundaries() {
        let today = date(2024, 3, 15);
        assert_eq!(
            payment_status(Some(date(2024, 3, 14)), today),
            PaymentStatus::Overdue
        );
        assert_eq!(
            payment_status(Some(date(2024, 3, 16)), today),
            PaymentStatus::Current
        );
    }

    #[test]
    fn missing_due_date_is_not_applicable() {
        assert_eq!(
            payment_status(None, date(2024, 3, 15)),
            PaymentStatus::NotApplicable
        );
    }

    #[test]
    fn serializes_with_display_labels() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::DueToday).unwrap(),
            "\"due today\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::NotApplicable).unwrap(),
            "\"N/A\""
        );
    }
}
