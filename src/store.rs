// src/store.rs

pub mod command;
pub mod snapshot;

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::{RwLock, RwLockReadGuard};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        capabilities::{Actor, Capability},
        clock::Clock,
        error::AppError,
    },
    db::{Table, Tables},
    models::{
        announcements::Announcement,
        classes::ClassSession,
        dashboard::DashboardSummary,
        finance::{FinancialTransaction, TransactionCategory},
        promotions::PromotionPlan,
        settings::SiteSettings,
        store::Product,
        tatame::{Booking, TatameArea},
        user::{User, UserView},
    },
    services::{
        booking::{self, Confirmation},
        calendar,
        cart::Cart,
        checkout::{self, CheckoutReview},
        dashboard,
        finance::{income_entry, resolve_category, CategoryMapping},
        payment_status::payment_status,
        subscription::{extend_due_date, plan_charge, plan_duration_months},
    },
};

pub use command::{Command, Event};
use snapshot::Collection;
pub use snapshot::{Snapshot, StateView};

/// Estado da academia: snapshot das tabelas + carrinhos em memória.
pub struct AcademyStore {
    tables: Tables,
    clock: Arc<dyn Clock>,
    state: RwLock<Snapshot>,
    carts: RwLock<HashMap<Uuid, Cart>>,
}

impl AcademyStore {
    pub fn new(tables: Tables, clock: Arc<dyn Clock>) -> Self {
        Self {
            tables,
            clock,
            state: RwLock::new(Snapshot::default()),
            carts: RwLock::new(HashMap::new()),
        }
    }

    pub async fn reload(&self) -> Result<(), AppError> {
        let snapshot = Snapshot::load(&self.tables).await?;
        tracing::info!(
            users = snapshot.users.len(),
            classes = snapshot.classes.len(),
            bookings = snapshot.bookings.len(),
            "Estado recarregado"
        );
        *self.state.write().await = snapshot;
        Ok(())
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.state.read().await
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.clock.timestamp()
    }

    fn user_view(&self, user: &User) -> UserView {
        UserView {
            payment_status: payment_status(user.payment_due_date, self.today()),
            user: user.clone(),
        }
    }

    // --- Usuários / autenticação ---

    pub async fn find_user(&self, id: Uuid) -> Option<User> {
        self.state.read().await.find::<User>(id).cloned()
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.tables.users.find_by_email(email).await
    }

    pub async fn register_user(&self, user: User) -> Result<User, AppError> {
        let saved = self.tables.users.insert(&user).await.map_err(|e| match e {
            AppError::UniqueConstraintViolation(_) => AppError::EmailAlreadyExists,
            e => e,
        })?;
        self.state.write().await.replace(saved.clone());
        Ok(saved)
    }

    pub async fn users(&self, actor: &Actor) -> Result<Vec<UserView>, AppError> {
        actor.require(Capability::ManageUsers)?;
        let state = self.state.read().await;
        Ok(state.users.iter().map(|u| self.user_view(u)).collect())
    }

    /// O próprio usuário, ou qualquer um para quem gerencia usuários.
    pub async fn user(&self, actor: &Actor, id: Uuid) -> Result<UserView, AppError> {
        if id != actor.id {
            actor.require(Capability::ManageUsers)?;
        }
        let state = self.state.read().await;
        let user = state.find::<User>(id).ok_or(AppError::UserNotFound)?;
        Ok(self.user_view(user))
    }

    // --- Leituras compostas ---

    pub async fn view_for(&self, actor: &Actor) -> Result<StateView, AppError> {
        let cart = self.cart(actor).await;
        let state = self.state.read().await;

        let me = state
            .find::<User>(actor.id)
            .map(|u| self.user_view(u))
            .ok_or(AppError::UserNotFound)?;

        let users = if actor.can(Capability::ManageUsers) {
            state.users.iter().map(|u| self.user_view(u)).collect()
        } else {
            vec![me.clone()]
        };

        let finance = actor.can(Capability::ViewFinance);

        Ok(StateView {
            me,
            users,
            classes: state.classes.clone(),
            announcements: state.announcements.clone(),
            products: state.products.clone(),
            tatame_areas: state.tatame_areas.clone(),
            bookings: state.bookings.clone(),
            promotions: state.promotions.clone(),
            settings: state.settings.clone(),
            cart,
            categories: finance.then(|| state.categories.clone()),
            transactions: finance.then(|| state.transactions.clone()),
        })
    }

    pub async fn dashboard(&self, actor: &Actor) -> DashboardSummary {
        let state = self.state.read().await;
        dashboard::summary(&state, actor, self.clock.now())
    }

    pub async fn settings(&self) -> SiteSettings {
        self.state.read().await.settings.clone()
    }

    pub async fn calendar_ics(&self) -> String {
        let state = self.state.read().await;
        calendar::export_ics(
            &state.classes,
            &state.settings.academy_name,
            self.clock.now(),
            self.clock.timestamp(),
        )
    }

    pub async fn calendar_link(&self, class_id: Uuid) -> Result<String, AppError> {
        let state = self.state.read().await;
        let class = state.get::<ClassSession>(class_id)?;
        Ok(calendar::google_calendar_link(
            class,
            &state.settings.academy_name,
            self.clock.now(),
        ))
    }

    pub async fn cart(&self, actor: &Actor) -> Cart {
        self.carts
            .read()
            .await
            .get(&actor.id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn checkout_review(&self, actor: &Actor) -> Result<CheckoutReview, AppError> {
        let cart = self.cart(actor).await;
        let state = self.state.read().await;
        checkout::review(&cart, &state.settings)
    }

    // --- Escrita: remoto primeiro, snapshot depois ---

    async fn insert_row<T, D>(&self, table: &D, row: T) -> Result<T, AppError>
    where
        T: Collection,
        D: Table<T> + ?Sized,
    {
        let saved = table.insert(&row).await?;
        self.state.write().await.replace(saved.clone());
        Ok(saved)
    }

    async fn update_row<T, D>(&self, table: &D, row: T) -> Result<T, AppError>
    where
        T: Collection,
        D: Table<T> + ?Sized,
    {
        let saved = table.update(&row).await?;
        self.state.write().await.replace(saved.clone());
        Ok(saved)
    }

    async fn delete_row<T, D>(&self, table: &D, id: Uuid) -> Result<(), AppError>
    where
        T: Collection,
        D: Table<T> + ?Sized,
    {
        table.delete(id).await?;
        self.state.write().await.remove::<T>(id);
        Ok(())
    }

    async fn existing<T: Collection>(&self, id: Uuid) -> Result<T, AppError> {
        self.state.read().await.get::<T>(id).cloned()
    }

    async fn update_cart(&self, actor: &Actor, apply: impl FnOnce(&mut Cart)) -> Event {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(actor.id).or_default();
        apply(cart);
        Event::CartUpdated(cart.clone())
    }

    /// Executa um comando em nome do ator.
    pub async fn execute(&self, actor: &Actor, command: Command) -> Result<Event, AppError> {
        let name = command.name();
        match self.dispatch(actor, command).await {
            Ok(event) => {
                tracing::info!(actor = %actor.id, command = name, "Comando executado");
                Ok(event)
            }
            Err(e) => {
                tracing::warn!(actor = %actor.id, command = name, error = %e, "Comando recusado");
                Err(e)
            }
        }
    }

    async fn dispatch(&self, actor: &Actor, command: Command) -> Result<Event, AppError> {
        let t = &self.tables;

        match command {
            // --- Grade de aulas ---
            Command::CreateClass(payload) => {
                actor.require(Capability::ManageSchedule)?;
                payload.validate()?;
                let row = ClassSession::from_payload(Uuid::new_v4(), payload);
                Ok(Event::ClassCreated(self.insert_row(&*t.classes, row).await?))
            }
            Command::UpdateClass { id, payload } => {
                actor.require(Capability::ManageSchedule)?;
                payload.validate()?;
                self.existing::<ClassSession>(id).await?;
                let row = ClassSession::from_payload(id, payload);
                Ok(Event::ClassUpdated(self.update_row(&*t.classes, row).await?))
            }
            Command::DeleteClass { id } => {
                actor.require(Capability::ManageSchedule)?;
                self.delete_row::<ClassSession, _>(&*t.classes, id).await?;
                Ok(Event::ClassDeleted { id })
            }

            // --- Avisos ---
            Command::CreateAnnouncement(payload) => {
                actor.require(Capability::ManageAnnouncements)?;
                payload.validate()?;
                let row = Announcement {
                    id: Uuid::new_v4(),
                    title: payload.title,
                    content: payload.content,
                    created_at: self.clock.timestamp(),
                };
                Ok(Event::AnnouncementCreated(
                    self.insert_row(&*t.announcements, row).await?,
                ))
            }
            Command::DeleteAnnouncement { id } => {
                actor.require(Capability::ManageAnnouncements)?;
                self.delete_row::<Announcement, _>(&*t.announcements, id).await?;
                Ok(Event::AnnouncementDeleted { id })
            }

            // --- Loja ---
            Command::CreateProduct(payload) => {
                actor.require(Capability::ManageStore)?;
                payload.validate()?;
                let row = Product::from_payload(Uuid::new_v4(), payload);
                Ok(Event::ProductCreated(self.insert_row(&*t.products, row).await?))
            }
            Command::UpdateProduct { id, payload } => {
                actor.require(Capability::ManageStore)?;
                payload.validate()?;
                self.existing::<Product>(id).await?;
                let row = Product::from_payload(id, payload);
                Ok(Event::ProductUpdated(self.update_row(&*t.products, row).await?))
            }
            Command::DeleteProduct { id } => {
                actor.require(Capability::ManageStore)?;
                self.delete_row::<Product, _>(&*t.products, id).await?;
                for cart in self.carts.write().await.values_mut() {
                    cart.remove(id);
                }
                Ok(Event::ProductDeleted { id })
            }

            // --- Tatame ---
            Command::CreateTatameArea(payload) => {
                actor.require(Capability::ManageTatame)?;
                payload.validate()?;
                let row = TatameArea::from_payload(Uuid::new_v4(), payload);
                Ok(Event::TatameAreaCreated(
                    self.insert_row(&*t.tatame_areas, row).await?,
                ))
            }
            Command::UpdateTatameArea { id, payload } => {
                actor.require(Capability::ManageTatame)?;
                payload.validate()?;
                self.existing::<TatameArea>(id).await?;
                let row = TatameArea::from_payload(id, payload);
                Ok(Event::TatameAreaUpdated(
                    self.update_row(&*t.tatame_areas, row).await?,
                ))
            }
            Command::DeleteTatameArea { id } => {
                actor.require(Capability::ManageTatame)?;
                self.existing::<TatameArea>(id).await?;

                // Agendamentos da área saem antes da área.
                let orphans: Vec<Uuid> = {
                    let state = self.state.read().await;
                    state
                        .bookings
                        .iter()
                        .filter(|b| b.area_id == id)
                        .map(|b| b.id)
                        .collect()
                };
                for booking_id in orphans {
                    self.delete_row::<Booking, _>(&*t.bookings, booking_id).await?;
                }

                self.delete_row::<TatameArea, _>(&*t.tatame_areas, id).await?;
                Ok(Event::TatameAreaDeleted { id })
            }

            Command::RequestBooking(request) => {
                request.validate()?;
                let row = {
                    let state = self.state.read().await;
                    let area = state.get::<TatameArea>(request.area_id)?;
                    booking::new_booking(
                        area,
                        &request,
                        actor,
                        &state.bookings,
                        self.clock.timestamp(),
                    )?
                };

                let saved = self
                    .insert_row(&*t.bookings, row)
                    .await
                    .map_err(|e| match e {
                        AppError::UniqueConstraintViolation(_) => AppError::SlotAlreadyRequested,
                        e => e,
                    })?;
                Ok(Event::BookingRequested(saved))
            }
            Command::ConfirmBooking { id } => {
                actor.require(Capability::ReviewBookings)?;
                let current = self.existing::<Booking>(id).await?;
                match booking::confirm(&current) {
                    Confirmation::AlreadyConfirmed(b) => Ok(Event::BookingConfirmed(b)),
                    Confirmation::Update(b) => Ok(Event::BookingConfirmed(
                        self.update_row(&*t.bookings, b).await?,
                    )),
                }
            }
            Command::DenyBooking { id } => {
                actor.require(Capability::ReviewBookings)?;
                let current = self.existing::<Booking>(id).await?;
                booking::check_deny(&current)?;
                self.delete_row::<Booking, _>(&*t.bookings, id).await?;
                tracing::info!(
                    booking = %id,
                    requester = %current.user_id,
                    slot = %current.slot_key,
                    "Agendamento negado"
                );
                Ok(Event::BookingDenied { id })
            }
            Command::CancelBooking { id } => {
                let current = self.existing::<Booking>(id).await?;
                booking::check_cancel(&current, actor)?;
                self.delete_row::<Booking, _>(&*t.bookings, id).await?;
                tracing::info!(
                    booking = %id,
                    requester = %current.user_id,
                    slot = %current.slot_key,
                    "Agendamento cancelado"
                );
                Ok(Event::BookingCancelled { id })
            }

            // --- Planos ---
            Command::CreatePromotion(payload) => {
                actor.require(Capability::ManagePromotions)?;
                payload.validate()?;
                let row = PromotionPlan::from_payload(Uuid::new_v4(), payload);
                Ok(Event::PromotionCreated(self.insert_row(&*t.promotions, row).await?))
            }
            Command::UpdatePromotion { id, payload } => {
                actor.require(Capability::ManagePromotions)?;
                payload.validate()?;
                self.existing::<PromotionPlan>(id).await?;
                let row = PromotionPlan::from_payload(id, payload);
                Ok(Event::PromotionUpdated(self.update_row(&*t.promotions, row).await?))
            }
            Command::DeletePromotion { id } => {
                actor.require(Capability::ManagePromotions)?;
                self.delete_row::<PromotionPlan, _>(&*t.promotions, id).await?;
                Ok(Event::PromotionDeleted { id })
            }
            Command::SubscribePlan { plan_id, user_id } => {
                self.subscribe_plan(actor, plan_id, user_id).await
            }

            // --- Configurações ---
            Command::UpdateSettings(input) => {
                actor.require(Capability::ManageSettings)?;
                input.validate()?;

                let next = {
                    let state = self.state.read().await;
                    for category_id in [input.store_category_id, input.membership_category_id]
                        .into_iter()
                        .flatten()
                    {
                        state.get::<TransactionCategory>(category_id)?;
                    }
                    state.settings.clone().apply(input, self.clock.timestamp())
                };

                let saved = t.settings.upsert(&next).await?;
                self.state.write().await.settings = saved.clone();
                Ok(Event::SettingsUpdated(saved))
            }

            // --- Financeiro ---
            Command::CreateCategory(payload) => {
                actor.require(Capability::ManageFinance)?;
                payload.validate()?;
                let row = TransactionCategory {
                    id: Uuid::new_v4(),
                    name: payload.name.trim().to_string(),
                    emoji: payload.emoji,
                    kind: payload.kind,
                };
                Ok(Event::CategoryCreated(self.insert_row(&*t.categories, row).await?))
            }
            Command::DeleteCategory { id } => {
                actor.require(Capability::ManageFinance)?;
                self.delete_row::<TransactionCategory, _>(&*t.categories, id)
                    .await?;

                // Espelha o ON DELETE SET NULL do banco.
                let mut state = self.state.write().await;
                for tx in state.transactions.iter_mut() {
                    if tx.category_id == Some(id) {
                        tx.category_id = None;
                    }
                }
                if state.settings.store_category_id == Some(id) {
                    state.settings.store_category_id = None;
                }
                if state.settings.membership_category_id == Some(id) {
                    state.settings.membership_category_id = None;
                }
                Ok(Event::CategoryDeleted { id })
            }
            Command::CreateTransaction(payload) => {
                actor.require(Capability::ManageFinance)?;
                payload.validate()?;
                if let Some(category_id) = payload.category_id {
                    self.existing::<TransactionCategory>(category_id).await?;
                }
                let row = FinancialTransaction {
                    id: Uuid::new_v4(),
                    date: payload.date,
                    description: payload.description,
                    amount: payload.amount,
                    kind: payload.kind,
                    category_id: payload.category_id,
                    user_id: None,
                    created_at: self.clock.timestamp(),
                };
                Ok(Event::TransactionCreated(
                    self.insert_row(&*t.transactions, row).await?,
                ))
            }
            Command::DeleteTransaction { id } => {
                actor.require(Capability::ManageFinance)?;
                self.delete_row::<FinancialTransaction, _>(&*t.transactions, id)
                    .await?;
                Ok(Event::TransactionDeleted { id })
            }

            // --- Usuários ---
            Command::UpdateUser { id, payload } => {
                payload.validate()?;
                let mut user = self
                    .state
                    .read()
                    .await
                    .find::<User>(id)
                    .cloned()
                    .ok_or(AppError::UserNotFound)?;

                if id != actor.id {
                    actor.require(Capability::ManageUsers)?;
                }
                if payload.role.is_some_and(|role| role != user.role) {
                    actor.require(Capability::AssignRoles)?;
                }
                if payload.payment_due_date.is_some() || payload.clear_payment_due_date {
                    actor.require(Capability::ManageUsers)?;
                }

                if let Some(name) = payload.name {
                    user.name = name;
                }
                if payload.belt.is_some() {
                    user.belt = payload.belt;
                }
                if let Some(role) = payload.role {
                    user.role = role;
                }
                if payload.clear_payment_due_date {
                    user.payment_due_date = None;
                } else if payload.payment_due_date.is_some() {
                    user.payment_due_date = payload.payment_due_date;
                }

                let saved = self.update_row(&*t.users, user).await?;
                Ok(Event::UserUpdated(self.user_view(&saved)))
            }

            // --- Carrinho ---
            Command::AddToCart { product_id } => {
                let product = self.existing::<Product>(product_id).await?;
                Ok(self.update_cart(actor, |cart| cart.add(product)).await)
            }
            Command::SetCartQuantity {
                product_id,
                quantity,
            } => Ok(self
                .update_cart(actor, |cart| cart.set_quantity(product_id, quantity))
                .await),
            Command::RemoveFromCart { product_id } => Ok(self
                .update_cart(actor, |cart| cart.remove(product_id))
                .await),
            Command::ClearCart => Ok(self.update_cart(actor, Cart::clear).await),
            Command::Checkout => self.checkout(actor).await,
        }
    }

    async fn checkout(&self, actor: &Actor) -> Result<Event, AppError> {
        // O carrinho sai do mapa antes da gravação: um segundo checkout
        // simultâneo encontra o carrinho vazio.
        let cart = self
            .carts
            .write()
            .await
            .remove(&actor.id)
            .unwrap_or_default();

        let entry = {
            let state = self.state.read().await;
            checkout::sale_entry(
                &cart,
                &state.settings,
                &state.categories,
                actor.id,
                self.today(),
                self.clock.timestamp(),
            )
        };
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                self.restore_cart(actor, cart).await;
                return Err(e);
            }
        };

        // Se a gravação falhar o carrinho volta como estava.
        let transaction = match self.insert_row(&*self.tables.transactions, entry).await {
            Ok(transaction) => transaction,
            Err(e) => {
                self.restore_cart(actor, cart).await;
                return Err(e);
            }
        };

        tracing::info!(
            buyer = %actor.id,
            total = %transaction.amount,
            "Venda registrada"
        );
        Ok(Event::CheckedOut { transaction })
    }

    /// Devolve o carrinho retirado, somando o que foi adicionado nesse meio tempo.
    async fn restore_cart(&self, actor: &Actor, mut cart: Cart) {
        let mut carts = self.carts.write().await;
        if let Some(newer) = carts.remove(&actor.id) {
            cart.merge(newer);
        }
        if !cart.is_empty() {
            carts.insert(actor.id, cart);
        }
    }

    async fn subscribe_plan(
        &self,
        actor: &Actor,
        plan_id: Uuid,
        user_id: Uuid,
    ) -> Result<Event, AppError> {
        if user_id != actor.id {
            actor.require(Capability::ManageFinance)?;
        }

        let (plan, user, category_id) = {
            let state = self.state.read().await;
            let plan = state.get::<PromotionPlan>(plan_id)?.clone();
            let user = state
                .find::<User>(user_id)
                .cloned()
                .ok_or(AppError::UserNotFound)?;
            let category_id = resolve_category(
                &state.categories,
                CategoryMapping::membership(state.settings.membership_category_id),
            )?;
            (plan, user, category_id)
        };

        let today = self.today();
        let months = plan_duration_months(&plan);
        let due = extend_due_date(today, months)?;

        // Duas escritas independentes: vencimento e lançamento.
        let updated = User {
            payment_due_date: Some(due),
            ..user
        };
        let saved_user = self.update_row(&*self.tables.users, updated).await?;

        let charge = plan_charge(&plan);
        let transaction = if charge > rust_decimal::Decimal::ZERO {
            let entry = income_entry(
                format!("{} - {}", plan.name, saved_user.name),
                charge,
                today,
                category_id,
                saved_user.id,
                self.clock.timestamp(),
            );
            Some(self.insert_row(&*self.tables.transactions, entry).await?)
        } else {
            None
        };

        tracing::info!(
            user = %saved_user.id,
            plan = %plan.name,
            months,
            due_date = %due,
            "Plano assinado"
        );

        Ok(Event::PlanSubscribed {
            user: self.user_view(&saved_user),
            transaction,
        })
    }
}

#[cfg(test)]
mod tests;
