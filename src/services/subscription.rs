// src/services/subscription.rs

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::{common::error::AppError, models::promotions::PromotionPlan};

/// Duração do plano em meses.
///
/// Usa `duration_months` quando o plano tem; senão deduz pelo nome
/// ("trimestral" = 3, "semestral" = 6, "anual" = 12, qualquer outro = 1).
/// A dedução pelo nome é frágil e só existe para planos antigos sem duração.
pub fn plan_duration_months(plan: &PromotionPlan) -> u32 {
    if let Some(months) = plan.duration_months.filter(|m| *m > 0) {
        return months as u32;
    }

    let name = plan.name.to_lowercase();
    if name.contains("trimestral") {
        3
    } else if name.contains("semestral") {
        6
    } else if name.contains("anual") {
        12
    } else {
        1
    }
}

/// Novo vencimento: `months` meses a partir da data da compra (não do
/// vencimento anterior). Dias inexistentes no mês de destino caem no último
/// dia do mês (31/01 + 3 meses = 30/04).
pub fn extend_due_date(purchase_date: NaiveDate, months: u32) -> Result<NaiveDate, AppError> {
    purchase_date
        .checked_add_months(Months::new(months))
        .ok_or_else(|| anyhow::anyhow!("Data de vencimento fora do intervalo suportado").into())
}

/// Valor cobrado: o total fechado quando existe, senão o preço do plano.
pub fn plan_charge(plan: &PromotionPlan) -> Decimal {
    plan.total.unwrap_or(plan.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn plan(name: &str, duration_months: Option<i32>) -> PromotionPlan {
        PromotionPlan {
            id: Uuid::new_v4(),
            name: name.into(),
            price: Decimal::from(180),
            total: None,
            features: vec![],
            best_value: false,
            duration_months,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn duration_inferred_from_name() {
        assert_eq!(plan_duration_months(&plan("Plano Trimestral", None)), 3);
        assert_eq!(plan_duration_months(&plan("SEMESTRAL promo", None)), 6);
        assert_eq!(plan_duration_months(&plan("Plano Anual", None)), 12);
        assert_eq!(plan_duration_months(&plan("Mensal", None)), 1);
    }

    #[test]
    fn explicit_duration_wins_over_name() {
        assert_eq!(plan_duration_months(&plan("Plano Anual", Some(2))), 2);
        assert_eq!(plan_duration_months(&plan("Plano Anual", Some(0))), 12);
    }

    #[test]
    fn trimestral_from_end_of_january_clamps_to_end_of_april() {
        let months = plan_duration_months(&plan("Trimestral", None));
        assert_eq!(extend_due_date(date(2024, 1, 31), months).unwrap(), date(2024, 4, 30));
    }

    #[test]
    fn month_arithmetic_clamps_leap_february() {
        assert_eq!(extend_due_date(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(extend_due_date(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
        assert_eq!(extend_due_date(date(2024, 3, 15), 12).unwrap(), date(2025, 3, 15));
    }

    #[test]
    fn charge_prefers_fixed_total() {
        let mut trimestral = plan("Trimestral", None);
        assert_eq!(plan_charge(&trimestral), Decimal::from(180));
        trimestral.total = Some(Decimal::from(510));
        assert_eq!(plan_charge(&trimestral), Decimal::from(510));
    }
}
