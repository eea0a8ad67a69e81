// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::{classes::ClassSession, tatame::Booking},
    services::payment_status::PaymentStatus,
};

// 1. Semáforo das mensalidades (só equipe)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusCounts {
    pub overdue: usize,
    pub due_today: usize,
    pub current: usize,
    pub not_applicable: usize,
}

// 2. Caixa do mês corrente (só quem vê o financeiro)
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthFinance {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

// 3. Próximas aulas
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingClass {
    #[serde(flatten)]
    pub class: ClassSession,

    #[schema(value_type = String, format = Date, example = "2024-03-18")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub payment_status_counts: Option<PaymentStatusCounts>,
    pub pending_bookings: Option<usize>,
    pub month_finance: Option<MonthFinance>,

    pub my_payment_status: PaymentStatus,
    pub my_bookings: Vec<Booking>,
    pub upcoming_classes: Vec<UpcomingClass>,
}
