// src/app.rs

use axum::{
    handler::Handler,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Tudo abaixo exige Bearer token
    let protected_routes = Router::new()
        .route("/auth/session", get(handlers::auth::session))
        .route("/state", get(handlers::state::get_state))
        .route("/dashboard", get(handlers::dashboard::get_summary))
        // Aulas
        .route(
            "/classes",
            get(handlers::classes::list_classes).post(handlers::classes::create_class),
        )
        .route("/classes/calendar.ics", get(handlers::classes::export_calendar))
        .route(
            "/classes/{id}",
            put(handlers::classes::update_class).delete(handlers::classes::delete_class),
        )
        .route(
            "/classes/{id}/calendar-link",
            get(handlers::classes::calendar_link),
        )
        // Avisos
        .route(
            "/announcements",
            get(handlers::announcements::list_announcements)
                .post(handlers::announcements::create_announcement),
        )
        .route(
            "/announcements/{id}",
            delete(handlers::announcements::delete_announcement),
        )
        // Loja
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/{id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        )
        .route(
            "/cart",
            get(handlers::cart::get_cart)
                .post(handlers::cart::add_to_cart)
                .delete(handlers::cart::clear_cart),
        )
        .route(
            "/cart/checkout",
            get(handlers::cart::checkout_review).post(handlers::cart::checkout),
        )
        .route(
            "/cart/{product_id}",
            put(handlers::cart::set_quantity).delete(handlers::cart::remove_item),
        )
        // Tatame
        .route(
            "/tatame/areas",
            get(handlers::tatame::list_areas).post(handlers::tatame::create_area),
        )
        .route(
            "/tatame/areas/{id}",
            put(handlers::tatame::update_area).delete(handlers::tatame::delete_area),
        )
        .route(
            "/tatame/bookings",
            get(handlers::tatame::list_bookings).post(handlers::tatame::request_booking),
        )
        .route(
            "/tatame/bookings/{id}",
            delete(handlers::tatame::cancel_booking),
        )
        .route(
            "/tatame/bookings/{id}/confirm",
            post(handlers::tatame::confirm_booking),
        )
        .route(
            "/tatame/bookings/{id}/deny",
            post(handlers::tatame::deny_booking),
        )
        // Promoções
        .route(
            "/promotions",
            get(handlers::promotions::list_promotions)
                .post(handlers::promotions::create_promotion),
        )
        .route(
            "/promotions/{id}",
            put(handlers::promotions::update_promotion)
                .delete(handlers::promotions::delete_promotion),
        )
        .route(
            "/promotions/{id}/subscribe",
            post(handlers::promotions::subscribe),
        )
        // Financeiro
        .route(
            "/finance/categories",
            get(handlers::finance::list_categories).post(handlers::finance::create_category),
        )
        .route(
            "/finance/categories/{id}",
            delete(handlers::finance::delete_category),
        )
        .route(
            "/finance/transactions",
            get(handlers::finance::list_transactions)
                .post(handlers::finance::create_transaction),
        )
        .route(
            "/finance/transactions/{id}",
            delete(handlers::finance::delete_transaction),
        )
        // Usuários
        .route("/users", get(handlers::users::list_users))
        .route(
            "/users/{id}",
            get(handlers::users::get_user).put(handlers::users::update_user),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas públicas
    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        // Leitura pública; a alteração passa pelo mesmo guard
        .route(
            "/settings",
            get(handlers::settings::get_settings).put(
                handlers::settings::update_settings.layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
            ),
        )
        .merge(protected_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .with_state(app_state)
}
