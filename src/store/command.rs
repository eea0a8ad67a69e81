// src/store/command.rs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{
        announcements::{Announcement, AnnouncementPayload},
        classes::{ClassPayload, ClassSession},
        finance::{CategoryPayload, FinancialTransaction, TransactionCategory, TransactionPayload},
        promotions::{PromotionPayload, PromotionPlan},
        settings::{SiteSettings, UpdateSettingsRequest},
        store::{Product, ProductPayload},
        tatame::{Booking, BookingRequest, TatameArea, TatameAreaPayload},
        user::{UpdateUserPayload, UserView},
    },
    services::cart::Cart,
};

/// Toda mutação do estado passa por aqui.
#[derive(Debug, Clone)]
pub enum Command {
    CreateClass(ClassPayload),
    UpdateClass { id: Uuid, payload: ClassPayload },
    DeleteClass { id: Uuid },

    CreateAnnouncement(AnnouncementPayload),
    DeleteAnnouncement { id: Uuid },

    CreateProduct(ProductPayload),
    UpdateProduct { id: Uuid, payload: ProductPayload },
    DeleteProduct { id: Uuid },

    CreateTatameArea(TatameAreaPayload),
    UpdateTatameArea { id: Uuid, payload: TatameAreaPayload },
    DeleteTatameArea { id: Uuid },

    RequestBooking(BookingRequest),
    ConfirmBooking { id: Uuid },
    DenyBooking { id: Uuid },
    CancelBooking { id: Uuid },

    CreatePromotion(PromotionPayload),
    UpdatePromotion { id: Uuid, payload: PromotionPayload },
    DeletePromotion { id: Uuid },
    SubscribePlan { plan_id: Uuid, user_id: Uuid },

    UpdateSettings(UpdateSettingsRequest),

    CreateCategory(CategoryPayload),
    DeleteCategory { id: Uuid },
    CreateTransaction(TransactionPayload),
    DeleteTransaction { id: Uuid },

    UpdateUser { id: Uuid, payload: UpdateUserPayload },

    AddToCart { product_id: Uuid },
    SetCartQuantity { product_id: Uuid, quantity: i64 },
    RemoveFromCart { product_id: Uuid },
    ClearCart,
    Checkout,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateClass(_) => "create_class",
            Command::UpdateClass { .. } => "update_class",
            Command::DeleteClass { .. } => "delete_class",
            Command::CreateAnnouncement(_) => "create_announcement",
            Command::DeleteAnnouncement { .. } => "delete_announcement",
            Command::CreateProduct(_) => "create_product",
            Command::UpdateProduct { .. } => "update_product",
            Command::DeleteProduct { .. } => "delete_product",
            Command::CreateTatameArea(_) => "create_tatame_area",
            Command::UpdateTatameArea { .. } => "update_tatame_area",
            Command::DeleteTatameArea { .. } => "delete_tatame_area",
            Command::RequestBooking(_) => "request_booking",
            Command::ConfirmBooking { .. } => "confirm_booking",
            Command::DenyBooking { .. } => "deny_booking",
            Command::CancelBooking { .. } => "cancel_booking",
            Command::CreatePromotion(_) => "create_promotion",
            Command::UpdatePromotion { .. } => "update_promotion",
            Command::DeletePromotion { .. } => "delete_promotion",
            Command::SubscribePlan { .. } => "subscribe_plan",
            Command::UpdateSettings(_) => "update_settings",
            Command::CreateCategory(_) => "create_category",
            Command::DeleteCategory { .. } => "delete_category",
            Command::CreateTransaction(_) => "create_transaction",
            Command::DeleteTransaction { .. } => "delete_transaction",
            Command::UpdateUser { .. } => "update_user",
            Command::AddToCart { .. } => "add_to_cart",
            Command::SetCartQuantity { .. } => "set_cart_quantity",
            Command::RemoveFromCart { .. } => "remove_from_cart",
            Command::ClearCart => "clear_cart",
            Command::Checkout => "checkout",
        }
    }
}

/// Resultado de um comando que deu certo.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Event {
    ClassCreated(ClassSession),
    ClassUpdated(ClassSession),
    ClassDeleted { id: Uuid },

    AnnouncementCreated(Announcement),
    AnnouncementDeleted { id: Uuid },

    ProductCreated(Product),
    ProductUpdated(Product),
    ProductDeleted { id: Uuid },

    TatameAreaCreated(TatameArea),
    TatameAreaUpdated(TatameArea),
    TatameAreaDeleted { id: Uuid },

    BookingRequested(Booking),
    BookingConfirmed(Booking),
    // Negado e cancelado apagam do mesmo jeito; só a mensagem muda.
    BookingDenied { id: Uuid },
    BookingCancelled { id: Uuid },

    PromotionCreated(PromotionPlan),
    PromotionUpdated(PromotionPlan),
    PromotionDeleted { id: Uuid },
    PlanSubscribed {
        user: UserView,
        transaction: Option<FinancialTransaction>,
    },

    SettingsUpdated(SiteSettings),

    CategoryCreated(TransactionCategory),
    CategoryDeleted { id: Uuid },
    TransactionCreated(FinancialTransaction),
    TransactionDeleted { id: Uuid },

    UserUpdated(UserView),

    CartUpdated(Cart),
    CheckedOut { transaction: FinancialTransaction },
}
