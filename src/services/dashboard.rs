// src/services/dashboard.rs

use chrono::NaiveDateTime;

use crate::{
    common::capabilities::{Actor, Capability},
    models::{
        dashboard::{DashboardSummary, MonthFinance, PaymentStatusCounts, UpcomingClass},
        tatame::BookingStatus,
    },
    services::{
        calendar::next_occurrence,
        finance::month_totals,
        payment_status::{payment_status, PaymentStatus},
    },
    store::snapshot::Snapshot,
};

const UPCOMING_CLASSES: usize = 3;

/// Painel do ator. Blocos da equipe só aparecem para quem tem a permissão.
pub fn summary(snapshot: &Snapshot, actor: &Actor, now: NaiveDateTime) -> DashboardSummary {
    let today = now.date();

    let payment_status_counts = actor.can(Capability::ManageUsers).then(|| {
        snapshot
            .users
            .iter()
            .fold(PaymentStatusCounts::default(), |mut acc, user| {
                match payment_status(user.payment_due_date, today) {
                    PaymentStatus::Overdue => acc.overdue += 1,
                    PaymentStatus::DueToday => acc.due_today += 1,
                    PaymentStatus::Current => acc.current += 1,
                    PaymentStatus::NotApplicable => acc.not_applicable += 1,
                }
                acc
            })
    });

    let pending_bookings = actor.can(Capability::ReviewBookings).then(|| {
        snapshot
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .count()
    });

    let month_finance = actor.can(Capability::ViewFinance).then(|| {
        let totals = month_totals(&snapshot.transactions, today);
        MonthFinance {
            income: totals.income,
            expense: totals.expense,
            balance: totals.balance(),
        }
    });

    let my_payment_status = snapshot
        .users
        .iter()
        .find(|u| u.id == actor.id)
        .map(|u| payment_status(u.payment_due_date, today))
        .unwrap_or(PaymentStatus::NotApplicable);

    let mut my_bookings: Vec<_> = snapshot
        .bookings
        .iter()
        .filter(|b| b.user_id == actor.id && b.date >= today)
        .cloned()
        .collect();
    my_bookings.sort_by(|a, b| (a.date, &a.time_slot).cmp(&(b.date, &b.time_slot)));

    let mut upcoming_classes: Vec<_> = snapshot
        .classes
        .iter()
        .map(|class| UpcomingClass {
            date: next_occurrence(class, now),
            class: class.clone(),
        })
        .collect();
    upcoming_classes.sort_by_key(|u| (u.date, u.class.start_time));
    upcoming_classes.truncate(UPCOMING_CLASSES);

    DashboardSummary {
        payment_status_counts,
        pending_bookings,
        month_finance,
        my_payment_status,
        my_bookings,
        upcoming_classes,
    }
}
