// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::services;
use crate::store;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::session,

        // --- State / Dashboard ---
        handlers::state::get_state,
        handlers::dashboard::get_summary,

        // --- Classes ---
        handlers::classes::list_classes,
        handlers::classes::create_class,
        handlers::classes::update_class,
        handlers::classes::delete_class,
        handlers::classes::export_calendar,
        handlers::classes::calendar_link,

        // --- Announcements ---
        handlers::announcements::list_announcements,
        handlers::announcements::create_announcement,
        handlers::announcements::delete_announcement,

        // --- Store ---
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Cart ---
        handlers::cart::get_cart,
        handlers::cart::add_to_cart,
        handlers::cart::clear_cart,
        handlers::cart::set_quantity,
        handlers::cart::remove_item,
        handlers::cart::checkout_review,
        handlers::cart::checkout,

        // --- Tatame ---
        handlers::tatame::list_areas,
        handlers::tatame::create_area,
        handlers::tatame::update_area,
        handlers::tatame::delete_area,
        handlers::tatame::list_bookings,
        handlers::tatame::request_booking,
        handlers::tatame::confirm_booking,
        handlers::tatame::deny_booking,
        handlers::tatame::cancel_booking,

        // --- Promotions ---
        handlers::promotions::list_promotions,
        handlers::promotions::create_promotion,
        handlers::promotions::update_promotion,
        handlers::promotions::delete_promotion,
        handlers::promotions::subscribe,

        // --- Finance ---
        handlers::finance::list_categories,
        handlers::finance::create_category,
        handlers::finance::delete_category,
        handlers::finance::list_transactions,
        handlers::finance::create_transaction,
        handlers::finance::delete_transaction,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::update_user,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,
    ),
    components(
        schemas(
            // --- Auth / Users ---
            models::user::Role,
            models::user::UserView,
            models::user::UpdateUserPayload,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            services::payment_status::PaymentStatus,

            // --- Classes ---
            models::classes::Weekday,
            models::classes::ClassSession,
            models::classes::ClassPayload,
            models::classes::CalendarLink,

            // --- Announcements ---
            models::announcements::Announcement,
            models::announcements::AnnouncementPayload,

            // --- Store ---
            models::store::Product,
            models::store::ProductPayload,
            models::store::CartItem,
            models::store::AddToCartPayload,
            models::store::CartQuantityPayload,
            services::cart::Cart,
            services::checkout::CheckoutReview,

            // --- Tatame ---
            models::tatame::TatameArea,
            models::tatame::TatameAreaPayload,
            models::tatame::BookingStatus,
            models::tatame::Booking,
            models::tatame::BookingRequest,

            // --- Promotions ---
            models::promotions::PromotionPlan,
            models::promotions::PromotionPayload,
            models::promotions::SubscribePayload,

            // --- Finance ---
            models::finance::TransactionKind,
            models::finance::TransactionCategory,
            models::finance::FinancialTransaction,
            models::finance::CategoryPayload,
            models::finance::TransactionPayload,

            // --- Settings ---
            models::settings::PaymentGateway,
            models::settings::SiteSettings,
            models::settings::UpdateSettingsRequest,
            models::settings::SettingsResponse,

            // --- Dashboard / State ---
            models::dashboard::PaymentStatusCounts,
            models::dashboard::MonthFinance,
            models::dashboard::UpcomingClass,
            models::dashboard::DashboardSummary,
            store::snapshot::StateView,
            store::command::Event,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Sessão"),
        (name = "State", description = "Estado completo visível ao usuário"),
        (name = "Dashboard", description = "Indicadores do painel"),
        (name = "Classes", description = "Grade de aulas e calendário"),
        (name = "Announcements", description = "Mural de avisos"),
        (name = "Store", description = "Produtos da loja"),
        (name = "Cart", description = "Carrinho e checkout"),
        (name = "Tatame", description = "Áreas e agendamentos do tatame"),
        (name = "Promotions", description = "Planos e adesões"),
        (name = "Finance", description = "Categorias e lançamentos financeiros"),
        (name = "Users", description = "Alunos, mestres e administradores"),
        (name = "Settings", description = "Configurações da academia")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented_with_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/classes/calendar.ics"));
        assert!(doc.paths.paths.contains_key("/api/tatame/bookings/{id}/confirm"));
        assert!(doc.paths.paths.contains_key("/api/promotions/{id}/subscribe"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
        assert!(components.schemas.contains_key("DashboardSummary"));
    }
}
