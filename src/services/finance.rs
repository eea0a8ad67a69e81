// src/services/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{FinancialTransaction, TransactionCategory, TransactionKind},
};

/// Para onde vai um lançamento automático (loja ou planos).
#[derive(Debug, Clone, Copy)]
pub struct CategoryMapping {
    pub label: &'static str,
    pub configured: Option<Uuid>,
    pub fallback_names: &'static [&'static str],
}

impl CategoryMapping {
    pub fn store(configured: Option<Uuid>) -> Self {
        Self {
            label: "loja",
            configured,
            fallback_names: &["loja", "vendas"],
        }
    }

    pub fn membership(configured: Option<Uuid>) -> Self {
        Self {
            label: "mensalidades",
            configured,
            fallback_names: &["mensalidade", "mensalidades", "planos"],
        }
    }
}

/// Categoria configurada, senão uma categoria de entrada com nome conhecido.
pub fn resolve_category(
    categories: &[TransactionCategory],
    mapping: CategoryMapping,
) -> Result<Uuid, AppError> {
    if let Some(id) = mapping.configured {
        return categories
            .iter()
            .find(|c| c.id == id && c.kind == TransactionKind::Income)
            .map(|c| c.id)
            .ok_or(AppError::MissingCategoryMapping(mapping.label));
    }

    categories
        .iter()
        .filter(|c| c.kind == TransactionKind::Income)
        .find(|c| {
            let name = c.name.trim().to_lowercase();
            mapping.fallback_names.iter().any(|n| name == *n)
        })
        .map(|c| c.id)
        .ok_or(AppError::MissingCategoryMapping(mapping.label))
}

/// Lançamento de entrada gerado pelo sistema (checkout ou plano).
pub fn income_entry(
    description: String,
    amount: Decimal,
    date: NaiveDate,
    category_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
) -> FinancialTransaction {
    FinancialTransaction {
        id: Uuid::new_v4(),
        date,
        description,
        amount,
        kind: TransactionKind::Income,
        category_id: Some(category_id),
        user_id: Some(user_id),
        created_at,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Soma entradas e saídas do mês de `reference`.
pub fn month_totals(transactions: &[FinancialTransaction], reference: NaiveDate) -> Totals {
    use chrono::Datelike;

    transactions
        .iter()
        .filter(|t| t.date.year() == reference.year() && t.date.month() == reference.month())
        .fold(Totals::default(), |mut acc, t| {
            match t.kind {
                TransactionKind::Income => acc.income += t.amount,
                TransactionKind::Expense => acc.expense += t.amount,
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, kind: TransactionKind) -> TransactionCategory {
        TransactionCategory {
            id: Uuid::new_v4(),
            name: name.into(),
            emoji: "💰".into(),
            kind,
        }
    }

    #[test]
    fn configured_category_wins() {
        let vendas = category("Vendas", TransactionKind::Income);
        let outra = category("Eventos", TransactionKind::Income);
        let categories = vec![vendas.clone(), outra.clone()];

        let id = resolve_category(&categories, CategoryMapping::store(Some(outra.id))).unwrap();
        assert_eq!(id, outra.id);
    }

    #[test]
    fn falls_back_to_known_income_name() {
        let aluguel = category("Loja", TransactionKind::Expense);
        let loja = category("  LOJA ", TransactionKind::Income);
        let id = resolve_category(&[aluguel, loja.clone()], CategoryMapping::store(None)).unwrap();
        assert_eq!(id, loja.id);
    }

    #[test]
    fn missing_mapping_is_a_domain_error() {
        let categories = vec![category("Aluguel", TransactionKind::Expense)];
        assert!(matches!(
            resolve_category(&categories, CategoryMapping::membership(None)),
            Err(AppError::MissingCategoryMapping("mensalidades"))
        ));

        // id configurado que não existe mais
        assert!(matches!(
            resolve_category(&categories, CategoryMapping::store(Some(Uuid::new_v4()))),
            Err(AppError::MissingCategoryMapping("loja"))
        ));
    }

    #[test]
    fn month_totals_only_count_reference_month() {
        let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        let entry = |kind, amount: i64, date| FinancialTransaction {
            id: Uuid::new_v4(),
            date,
            description: "x".into(),
            amount: Decimal::from(amount),
            kind,
            category_id: None,
            user_id: None,
            created_at: Utc::now(),
        };

        let transactions = vec![
            entry(TransactionKind::Income, 500, date(3, 1)),
            entry(TransactionKind::Income, 200, date(3, 31)),
            entry(TransactionKind::Expense, 150, date(3, 10)),
            entry(TransactionKind::Income, 999, date(2, 29)),
        ];

        let totals = month_totals(&transactions, date(3, 15));
        assert_eq!(totals.income, Decimal::from(700));
        assert_eq!(totals.expense, Decimal::from(150));
        assert_eq!(totals.balance(), Decimal::from(550));
    }
}
