// src/store/tests.rs

use std::{str::FromStr, sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::*;
use crate::{
    common::clock::FixedClock,
    db::{memory::MemoryTable, Record},
    models::{
        announcements::AnnouncementPayload,
        finance::{CategoryPayload, TransactionKind},
        promotions::PromotionPayload,
        settings::UpdateSettingsRequest,
        store::ProductPayload,
        tatame::{BookingRequest, BookingStatus, TatameAreaPayload},
        user::{Role, UpdateUserPayload},
    },
    services::payment_status::PaymentStatus,
};

/// Tabela cujas escritas sempre falham.
struct FailingTable;

#[async_trait]
impl<T: Record> Table<T> for FailingTable {
    async fn select_all(&self) -> Result<Vec<T>, AppError> {
        Ok(vec![])
    }

    async fn insert(&self, _row: &T) -> Result<T, AppError> {
        Err(anyhow::anyhow!("falha simulada").into())
    }

    async fn update(&self, _row: &T) -> Result<T, AppError> {
        Err(anyhow::anyhow!("falha simulada").into())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), AppError> {
        Err(anyhow::anyhow!("falha simulada").into())
    }

    async fn upsert(&self, _row: &T) -> Result<T, AppError> {
        Err(anyhow::anyhow!("falha simulada").into())
    }
}

/// Tabela em memória com gravação lenta, para abrir janela entre requisições.
struct SlowTable<T: Record> {
    inner: MemoryTable<T>,
    fail_inserts: bool,
}

impl<T: Record> SlowTable<T> {
    fn new(fail_inserts: bool) -> Self {
        Self {
            inner: MemoryTable::new(),
            fail_inserts,
        }
    }
}

#[async_trait]
impl<T: Record> Table<T> for SlowTable<T> {
    async fn select_all(&self) -> Result<Vec<T>, AppError> {
        self.inner.select_all().await
    }

    async fn insert(&self, row: &T) -> Result<T, AppError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        if self.fail_inserts {
            return Err(anyhow::anyhow!("falha simulada").into());
        }
        self.inner.insert(row).await
    }

    async fn update(&self, row: &T) -> Result<T, AppError> {
        self.inner.update(row).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.inner.delete(id).await
    }

    async fn upsert(&self, row: &T) -> Result<T, AppError> {
        self.inner.upsert(row).await
    }
}

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(h, 0, 0).unwrap())
}

struct Academy {
    store: AcademyStore,
    admin: Actor,
    mestre: Actor,
    aluno: Actor,
    outro: Actor,
}

async fn register(store: &AcademyStore, name: &str, role: Role) -> Actor {
    let user = store
        .register_user(User {
            id: Uuid::new_v4(),
            email: format!("{}@academia.com", name.to_lowercase()),
            name: name.to_string(),
            role,
            belt: None,
            payment_due_date: None,
            password_hash: "hash".into(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    Actor {
        id: user.id,
        name: user.name,
        role: user.role,
    }
}

async fn academy_with(tables: Tables, now: NaiveDateTime) -> Academy {
    let store = AcademyStore::new(tables, Arc::new(FixedClock(now)));
    let admin = register(&store, "Admin", Role::Admin).await;
    let mestre = register(&store, "Carlos", Role::Mestre).await;
    let aluno = register(&store, "Joao", Role::User).await;
    let outro = register(&store, "Maria", Role::User).await;
    Academy {
        store,
        admin,
        mestre,
        aluno,
        outro,
    }
}

async fn academy() -> Academy {
    academy_with(Tables::in_memory(), at(2024, 3, 13, 12)).await
}

async fn tatame(a: &Academy) -> TatameArea {
    let event = a
        .store
        .execute(
            &a.admin,
            Command::CreateTatameArea(TatameAreaPayload {
                name: "Tatame Principal".into(),
                time_slots: vec!["07:00 - 08:00".into(), " 12:00 - 13:00 ".into()],
            }),
        )
        .await
        .unwrap();
    match event {
        Event::TatameAreaCreated(area) => area,
        other => panic!("evento inesperado: {:?}", other),
    }
}

fn request(area: &TatameArea, slot: &str) -> Command {
    Command::RequestBooking(BookingRequest {
        area_id: area.id,
        date: NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
        time_slot: slot.into(),
    })
}

async fn book(a: &Academy, actor: &Actor, area: &TatameArea) -> Booking {
    match a.store.execute(actor, request(area, "07:00 - 08:00")).await.unwrap() {
        Event::BookingRequested(b) => b,
        other => panic!("evento inesperado: {:?}", other),
    }
}

async fn product(a: &Academy, name: &str, price: &str) -> Product {
    let event = a
        .store
        .execute(
            &a.admin,
            Command::CreateProduct(ProductPayload {
                name: name.into(),
                price: Decimal::from_str(price).unwrap(),
                image: None,
                category: "Vestuário".into(),
            }),
        )
        .await
        .unwrap();
    match event {
        Event::ProductCreated(p) => p,
        other => panic!("evento inesperado: {:?}", other),
    }
}

async fn category(a: &Academy, name: &str) -> TransactionCategory {
    let event = a
        .store
        .execute(
            &a.admin,
            Command::CreateCategory(CategoryPayload {
                name: name.into(),
                emoji: "💰".into(),
                kind: TransactionKind::Income,
            }),
        )
        .await
        .unwrap();
    match event {
        Event::CategoryCreated(c) => c,
        other => panic!("evento inesperado: {:?}", other),
    }
}

// --- Agendamento do tatame ---

#[tokio::test]
async fn second_request_for_same_slot_is_rejected_and_first_is_kept() {
    let a = academy().await;
    let area = tatame(&a).await;
    let first = book(&a, &a.aluno, &area).await;

    let err = a
        .store
        .execute(&a.outro, request(&area, " 07:00 - 08:00 "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SlotAlreadyRequested));

    let state = a.store.read().await;
    assert_eq!(state.bookings.len(), 1);
    assert_eq!(state.bookings[0].id, first.id);
    assert_eq!(state.bookings[0].user_id, a.aluno.id);
    assert_eq!(state.bookings[0].status, BookingStatus::Pending);
}

#[tokio::test]
async fn storage_unique_key_is_reported_as_slot_taken() {
    let a = academy().await;
    let area = tatame(&a).await;
    let first = book(&a, &a.aluno, &area).await;

    // Outro cliente gravou o mesmo horário: o snapshot local não sabe.
    a.store.state.write().await.remove::<Booking>(first.id);

    let err = a
        .store
        .execute(&a.outro, request(&area, "07:00 - 08:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SlotAlreadyRequested));
}

#[tokio::test]
async fn unknown_slot_is_rejected() {
    let a = academy().await;
    let area = tatame(&a).await;
    let err = a
        .store
        .execute(&a.aluno, request(&area, "09:00 - 10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownTimeSlot(_)));
}

#[tokio::test]
async fn trimmed_slots_are_bookable() {
    let a = academy().await;
    let area = tatame(&a).await;
    assert!(area.time_slots.contains(&"12:00 - 13:00".to_string()));
    a.store
        .execute(&a.aluno, request(&area, "12:00 - 13:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn confirm_is_idempotent_and_deny_only_from_pending() {
    let a = academy().await;
    let area = tatame(&a).await;
    let booking = book(&a, &a.aluno, &area).await;

    // aluno não revisa agendamentos
    let err = a
        .store
        .execute(&a.aluno, Command::ConfirmBooking { id: booking.id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden("bookings:review")));

    for _ in 0..2 {
        match a
            .store
            .execute(&a.mestre, Command::ConfirmBooking { id: booking.id })
            .await
            .unwrap()
        {
            Event::BookingConfirmed(b) => assert_eq!(b.status, BookingStatus::Confirmed),
            other => panic!("evento inesperado: {:?}", other),
        }
    }

    let err = a
        .store
        .execute(&a.mestre, Command::DenyBooking { id: booking.id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidBookingTransition(_)));
    assert_eq!(a.store.read().await.bookings.len(), 1);
}

#[tokio::test]
async fn deny_removes_pending_booking_and_frees_the_slot() {
    let a = academy().await;
    let area = tatame(&a).await;
    let booking = book(&a, &a.aluno, &area).await;

    let event = a
        .store
        .execute(&a.mestre, Command::DenyBooking { id: booking.id })
        .await
        .unwrap();
    assert!(matches!(event, Event::BookingDenied { id } if id == booking.id));
    assert!(a.store.read().await.bookings.is_empty());

    // o horário pode ser pedido de novo
    book(&a, &a.outro, &area).await;
}

#[tokio::test]
async fn cancel_rules() {
    let a = academy().await;
    let area = tatame(&a).await;
    let booking = book(&a, &a.aluno, &area).await;

    // outro aluno não cancela
    let err = a
        .store
        .execute(&a.outro, Command::CancelBooking { id: booking.id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // equipe nega pendentes, não cancela
    let err = a
        .store
        .execute(&a.mestre, Command::CancelBooking { id: booking.id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidBookingTransition(_)));

    a.store
        .execute(&a.mestre, Command::ConfirmBooking { id: booking.id })
        .await
        .unwrap();

    // o próprio aluno cancela mesmo confirmado
    let event = a
        .store
        .execute(&a.aluno, Command::CancelBooking { id: booking.id })
        .await
        .unwrap();
    assert!(matches!(event, Event::BookingCancelled { .. }));
    assert!(a.store.read().await.bookings.is_empty());
}

#[tokio::test]
async fn deleting_an_area_removes_its_bookings() {
    let a = academy().await;
    let area = tatame(&a).await;
    book(&a, &a.aluno, &area).await;

    a.store
        .execute(&a.admin, Command::DeleteTatameArea { id: area.id })
        .await
        .unwrap();

    a.store.reload().await.unwrap();
    let state = a.store.read().await;
    assert!(state.tatame_areas.is_empty());
    assert!(state.bookings.is_empty());
}

// --- Carrinho e checkout ---

#[tokio::test]
async fn checkout_writes_one_transaction_and_clears_cart() {
    let a = academy().await;
    let kimono = product(&a, "Kimono", "300.00").await;
    let faixa = product(&a, "Faixa", "45.50").await;

    for id in [kimono.id, kimono.id, faixa.id] {
        a.store
            .execute(&a.aluno, Command::AddToCart { product_id: id })
            .await
            .unwrap();
    }

    // sem categoria da loja
    let err = a.store.execute(&a.aluno, Command::Checkout).await.unwrap_err();
    assert!(matches!(err, AppError::MissingCategoryMapping("loja")));
    assert_eq!(a.store.cart(&a.aluno).await.items.len(), 2);

    let loja = category(&a, "Loja").await;
    let event = a.store.execute(&a.aluno, Command::Checkout).await.unwrap();
    let transaction = match event {
        Event::CheckedOut { transaction } => transaction,
        other => panic!("evento inesperado: {:?}", other),
    };

    assert_eq!(transaction.amount, Decimal::from_str("645.50").unwrap());
    assert_eq!(transaction.category_id, Some(loja.id));
    assert_eq!(transaction.user_id, Some(a.aluno.id));
    assert_eq!(transaction.date, NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());
    assert!(a.store.cart(&a.aluno).await.is_empty());
    assert_eq!(a.store.read().await.transactions.len(), 1);

    let err = a.store.execute(&a.aluno, Command::Checkout).await.unwrap_err();
    assert!(matches!(err, AppError::EmptyCart));
    assert_eq!(a.store.read().await.transactions.len(), 1);
}

#[tokio::test]
async fn failed_ledger_write_keeps_cart_and_state() {
    let mut tables = Tables::in_memory();
    tables.transactions = Arc::new(FailingTable);
    let a = academy_with(tables, at(2024, 3, 13, 12)).await;

    let kimono = product(&a, "Kimono", "300.00").await;
    category(&a, "Vendas").await;
    a.store
        .execute(&a.aluno, Command::AddToCart { product_id: kimono.id })
        .await
        .unwrap();

    let err = a.store.execute(&a.aluno, Command::Checkout).await.unwrap_err();
    assert!(matches!(err, AppError::InternalServerError(_)));

    let cart = a.store.cart(&a.aluno).await;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total, Decimal::from(300));
    assert!(a.store.read().await.transactions.is_empty());
}

#[tokio::test]
async fn concurrent_checkouts_write_a_single_transaction() {
    let mut tables = Tables::in_memory();
    tables.transactions = Arc::new(SlowTable::<FinancialTransaction>::new(false));
    let a = academy_with(tables, at(2024, 3, 13, 12)).await;

    let kimono = product(&a, "Kimono", "300.00").await;
    category(&a, "Loja").await;
    a.store
        .execute(&a.aluno, Command::AddToCart { product_id: kimono.id })
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        a.store.execute(&a.aluno, Command::Checkout),
        a.store.execute(&a.aluno, Command::Checkout),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(AppError::EmptyCart))));

    let state = a.store.read().await;
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.transactions[0].amount, Decimal::from(300));
    drop(state);
    assert!(a.store.cart(&a.aluno).await.is_empty());
}

#[tokio::test]
async fn items_added_during_a_failed_checkout_are_kept() {
    let mut tables = Tables::in_memory();
    tables.transactions = Arc::new(SlowTable::<FinancialTransaction>::new(true));
    let a = academy_with(tables, at(2024, 3, 13, 12)).await;

    let kimono = product(&a, "Kimono", "300.00").await;
    let faixa = product(&a, "Faixa", "45.50").await;
    category(&a, "Loja").await;
    a.store
        .execute(&a.aluno, Command::AddToCart { product_id: kimono.id })
        .await
        .unwrap();

    let (checkout, _) = tokio::join!(
        a.store.execute(&a.aluno, Command::Checkout),
        a.store.execute(&a.aluno, Command::AddToCart { product_id: faixa.id }),
    );
    assert!(checkout.is_err());

    let cart = a.store.cart(&a.aluno).await;
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total, Decimal::from_str("345.50").unwrap());
}

#[tokio::test]
async fn cart_quantity_zero_removes_line() {
    let a = academy().await;
    let kimono = product(&a, "Kimono", "300.00").await;
    a.store
        .execute(&a.aluno, Command::AddToCart { product_id: kimono.id })
        .await
        .unwrap();

    let event = a
        .store
        .execute(
            &a.aluno,
            Command::SetCartQuantity {
                product_id: kimono.id,
                quantity: 0,
            },
        )
        .await
        .unwrap();
    match event {
        Event::CartUpdated(cart) => {
            assert!(cart.is_empty());
            assert_eq!(cart.total, Decimal::ZERO);
        }
        other => panic!("evento inesperado: {:?}", other),
    }
}

#[tokio::test]
async fn deleting_a_product_drops_it_from_carts() {
    let a = academy().await;
    let kimono = product(&a, "Kimono", "300.00").await;
    a.store
        .execute(&a.aluno, Command::AddToCart { product_id: kimono.id })
        .await
        .unwrap();

    a.store
        .execute(&a.admin, Command::DeleteProduct { id: kimono.id })
        .await
        .unwrap();
    assert!(a.store.cart(&a.aluno).await.is_empty());
}

// --- Planos ---

#[tokio::test]
async fn trimestral_subscription_extends_from_purchase_date() {
    let a = academy_with(Tables::in_memory(), at(2024, 1, 31, 10)).await;
    category(&a, "Mensalidades").await;

    let plan = match a
        .store
        .execute(
            &a.admin,
            Command::CreatePromotion(PromotionPayload {
                name: "Plano Trimestral".into(),
                price: Decimal::from(180),
                total: Some(Decimal::from(510)),
                features: vec!["Aulas ilimitadas".into()],
                best_value: true,
                duration_months: None,
            }),
        )
        .await
        .unwrap()
    {
        Event::PromotionCreated(p) => p,
        other => panic!("evento inesperado: {:?}", other),
    };

    let event = a
        .store
        .execute(
            &a.aluno,
            Command::SubscribePlan {
                plan_id: plan.id,
                user_id: a.aluno.id,
            },
        )
        .await
        .unwrap();

    let (user, transaction) = match event {
        Event::PlanSubscribed { user, transaction } => (user, transaction.unwrap()),
        other => panic!("evento inesperado: {:?}", other),
    };
    assert_eq!(
        user.user.payment_due_date,
        Some(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap())
    );
    assert_eq!(user.payment_status, PaymentStatus::Current);
    assert_eq!(transaction.amount, Decimal::from(510));
    assert_eq!(transaction.kind, TransactionKind::Income);
    assert_eq!(transaction.user_id, Some(a.aluno.id));
}

#[tokio::test]
async fn subscribing_someone_else_needs_finance_permission() {
    let a = academy().await;
    category(&a, "Planos").await;
    let plan = match a
        .store
        .execute(
            &a.admin,
            Command::CreatePromotion(PromotionPayload {
                name: "Mensal".into(),
                price: Decimal::from(180),
                total: None,
                features: vec![],
                best_value: false,
                duration_months: None,
            }),
        )
        .await
        .unwrap()
    {
        Event::PromotionCreated(p) => p,
        other => panic!("evento inesperado: {:?}", other),
    };

    let err = a
        .store
        .execute(
            &a.aluno,
            Command::SubscribePlan {
                plan_id: plan.id,
                user_id: a.outro.id,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden("finance:write")));

    a.store
        .execute(
            &a.mestre,
            Command::SubscribePlan {
                plan_id: plan.id,
                user_id: a.outro.id,
            },
        )
        .await
        .unwrap();
    let due = a.store.find_user(a.outro.id).await.unwrap().payment_due_date;
    assert_eq!(due, Some(NaiveDate::from_ymd_opt(2024, 4, 13).unwrap()));
}

// --- Usuários e configurações ---

#[tokio::test]
async fn role_changes_are_admin_only() {
    let a = academy().await;
    let promote = Command::UpdateUser {
        id: a.aluno.id,
        payload: UpdateUserPayload {
            role: Some(Role::Mestre),
            ..UpdateUserPayload::default()
        },
    };

    let err = a.store.execute(&a.mestre, promote.clone()).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden("users:roles")));

    a.store.execute(&a.admin, promote).await.unwrap();
    assert_eq!(
        a.store.find_user(a.aluno.id).await.unwrap().role,
        Role::Mestre
    );
}

#[tokio::test]
async fn students_edit_their_own_profile_but_not_due_date() {
    let a = academy().await;

    a.store
        .execute(
            &a.aluno,
            Command::UpdateUser {
                id: a.aluno.id,
                payload: UpdateUserPayload {
                    belt: Some("Faixa Azul".into()),
                    ..UpdateUserPayload::default()
                },
            },
        )
        .await
        .unwrap();

    let err = a
        .store
        .execute(
            &a.aluno,
            Command::UpdateUser {
                id: a.aluno.id,
                payload: UpdateUserPayload {
                    payment_due_date: NaiveDate::from_ymd_opt(2030, 1, 1),
                    ..UpdateUserPayload::default()
                },
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden("users:write")));

    let err = a
        .store
        .execute(
            &a.aluno,
            Command::UpdateUser {
                id: a.outro.id,
                payload: UpdateUserPayload::default(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let me = a.store.user(&a.aluno, a.aluno.id).await.unwrap();
    assert_eq!(me.user.belt.as_deref(), Some("Faixa Azul"));
    assert_eq!(me.payment_status, PaymentStatus::NotApplicable);
}

#[tokio::test]
async fn settings_are_admin_only() {
    let a = academy().await;
    let input = UpdateSettingsRequest {
        academy_name: Some("Academia Centro".into()),
        pix_key: Some("financeiro@academia.com".into()),
        ..UpdateSettingsRequest::default()
    };

    let err = a
        .store
        .execute(&a.mestre, Command::UpdateSettings(input.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden("settings:write")));

    a.store
        .execute(&a.admin, Command::UpdateSettings(input))
        .await
        .unwrap();

    a.store.reload().await.unwrap();
    let settings = a.store.settings().await;
    assert_eq!(settings.academy_name, "Academia Centro");
    assert_eq!(settings.pix_key.as_deref(), Some("financeiro@academia.com"));
}

#[tokio::test]
async fn accented_pix_key_is_rejected() {
    let a = academy().await;
    let input = UpdateSettingsRequest {
        pix_key: Some("ç".repeat(77)),
        ..UpdateSettingsRequest::default()
    };

    let err = a
        .store
        .execute(&a.admin, Command::UpdateSettings(input))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
    assert!(a.store.settings().await.pix_key.is_none());
}

#[tokio::test]
async fn finance_is_hidden_from_students() {
    let a = academy().await;
    category(&a, "Loja").await;

    let admin_view = a.store.view_for(&a.admin).await.unwrap();
    assert_eq!(admin_view.categories.map(|c| c.len()), Some(1));
    assert_eq!(admin_view.users.len(), 4);

    let student_view = a.store.view_for(&a.aluno).await.unwrap();
    assert!(student_view.categories.is_none());
    assert!(student_view.transactions.is_none());
    assert_eq!(student_view.users.len(), 1);
    assert_eq!(student_view.me.user.id, a.aluno.id);
}

#[tokio::test]
async fn announcements_newest_first_after_reload() {
    let announcement = |title: &str, day: u32| Announcement {
        id: Uuid::new_v4(),
        title: title.into(),
        content: "...".into(),
        created_at: at(2024, 3, day, 9).and_utc(),
    };
    let mut tables = Tables::in_memory();
    tables.announcements = Arc::new(MemoryTable::with_rows(vec![
        announcement("Primeiro", 1),
        announcement("Segundo", 2),
    ]));
    let a = academy_with(tables, at(2024, 3, 13, 12)).await;

    a.store.reload().await.unwrap();
    assert_eq!(a.store.read().await.announcements[0].title, "Segundo");

    a.store
        .execute(
            &a.mestre,
            Command::CreateAnnouncement(AnnouncementPayload {
                title: "Terceiro".into(),
                content: "...".into(),
            }),
        )
        .await
        .unwrap();

    let titles: Vec<String> = a
        .store
        .read()
        .await
        .announcements
        .iter()
        .map(|n| n.title.clone())
        .collect();
    assert_eq!(titles, ["Terceiro", "Segundo", "Primeiro"]);
}

#[tokio::test]
async fn timestamps_come_from_the_clock() {
    let a = academy().await;
    let pinned = at(2024, 3, 13, 12).and_utc();

    let created = match a
        .store
        .execute(
            &a.mestre,
            Command::CreateAnnouncement(AnnouncementPayload {
                title: "Aviso".into(),
                content: "...".into(),
            }),
        )
        .await
        .unwrap()
    {
        Event::AnnouncementCreated(n) => n,
        other => panic!("evento inesperado: {:?}", other),
    };
    assert_eq!(created.created_at, pinned);

    let area = tatame(&a).await;
    assert_eq!(book(&a, &a.aluno, &area).await.created_at, pinned);

    let ics = a.store.calendar_ics().await;
    assert!(ics.contains("DTSTAMP:20240313T120000Z"));
}

#[tokio::test]
async fn duplicate_email_is_reported() {
    let a = academy().await;
    let err = a
        .store
        .register_user(User {
            id: Uuid::new_v4(),
            email: "JOAO@academia.com".into(),
            name: "Outro João".into(),
            role: Role::User,
            belt: None,
            payment_due_date: None,
            password_hash: "hash".into(),
            created_at: Utc::now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmailAlreadyExists));
}
