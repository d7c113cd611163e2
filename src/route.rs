//! Route definitions for the cargo search API
//!
//! This module configures all HTTP routes and maps them to their respective handlers.
//! It creates the Axum router with the application state.

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::database::AppState;
use crate::handler::{account, admin, booking, catalog, search};
use crate::middleware::{require_admin, require_customer};

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// Public:
/// - `GET /api/`, `GET /api/ports`, `GET /api/container-types`,
///   `GET /api/cargo-types`, `GET /api/delivery-terms`
/// - `POST /api/search`
/// - `POST /api/register`, `POST /api/login`, `POST /api/admin/login`
///
/// Customer token:
/// - `POST /api/booking`
///
/// Admin token:
/// - `GET|POST /api/admin/container-types`, `PUT|DELETE /api/admin/container-types/{id}`
/// - `GET|POST /api/admin/routes`, `DELETE /api/admin/routes/{id}`
/// - `GET|POST /api/admin/webhook`
/// - `GET /api/admin/bookings`
///
/// # Example Usage
///
/// ```no_run
/// # use cargosearch::config::Config;
/// # use cargosearch::database::{init_db, AppState};
/// # use cargosearch::route::create_app;
/// # let db = init_db("data.db").unwrap();
/// let state = AppState::new(db, Config::default());
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/admin/container-types",
            get(admin::list_container_types).post(admin::create_container_type),
        )
        .route(
            "/api/admin/container-types/{id}",
            put(admin::update_container_type).delete(admin::delete_container_type),
        )
        .route(
            "/api/admin/routes",
            get(admin::list_routes).post(admin::create_route),
        )
        .route(
            "/api/admin/routes/{id}",
            delete(admin::delete_route),
        )
        .route(
            "/api/admin/webhook",
            get(admin::get_webhook).post(admin::update_webhook),
        )
        .route("/api/admin/bookings", get(admin::list_bookings))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let customer_routes = Router::new()
        .route("/api/booking", post(booking::create_booking))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_customer,
        ));

    Router::new()
        .route("/api", get(catalog::root))
        .route("/api/", get(catalog::root))
        .route("/api/ports", get(catalog::list_ports))
        .route("/api/container-types", get(catalog::list_container_types))
        .route("/api/cargo-types", get(catalog::list_cargo_types))
        .route("/api/delivery-terms", get(catalog::list_delivery_terms))
        .route("/api/search", post(search::search_routes))
        .route("/api/register", post(account::register))
        .route("/api/login", post(account::login))
        .route("/api/admin/login", post(account::admin_login))
        .merge(admin_routes)
        .merge(customer_routes)
        .layer(CorsLayer::permissive())
        // Inject the application state into all handlers
        .with_state(state)
}
