//! HTTP server setup

use crate::api;
use crate::config::Config;
use crate::middleware::{normalize_error_response, require_auth_middleware};
use crate::repository::address::AddressRepositoryImpl;
use crate::repository::contact::ContactRepositoryImpl;
use crate::repository::user::UserRepositoryImpl;
use crate::service::{AddressService, ContactService, UserService};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: MySqlPool,
    pub user_service:
        Arc<UserService<UserRepositoryImpl, ContactRepositoryImpl, AddressRepositoryImpl>>,
    pub contact_service: Arc<ContactService<ContactRepositoryImpl, AddressRepositoryImpl>>,
    pub address_service: Arc<AddressService<AddressRepositoryImpl, ContactRepositoryImpl>>,
}

impl AppState {
    /// Wire repositories and services over a connection pool
    pub fn new(db_pool: MySqlPool) -> Self {
        let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
        let contact_repo = Arc::new(ContactRepositoryImpl::new(db_pool.clone()));
        let address_repo = Arc::new(AddressRepositoryImpl::new(db_pool.clone()));

        let user_service = Arc::new(
            UserService::new(user_repo, contact_repo.clone(), address_repo.clone())
                .with_pool(db_pool.clone()),
        );
        let contact_service = Arc::new(
            ContactService::new(contact_repo.clone(), address_repo.clone())
                .with_pool(db_pool.clone()),
        );
        let address_service = Arc::new(AddressService::new(address_repo, contact_repo));

        Self {
            db_pool,
            user_service,
            contact_service,
            address_service,
        }
    }
}

impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type ContactRepo = ContactRepositoryImpl;
    type AddressRepo = AddressRepositoryImpl;

    fn user_service(
        &self,
    ) -> &UserService<Self::UserRepo, Self::ContactRepo, Self::AddressRepo> {
        &self.user_service
    }

    fn contact_service(&self) -> &ContactService<Self::ContactRepo, Self::AddressRepo> {
        &self.contact_service
    }

    fn address_service(&self) -> &AddressService<Self::AddressRepo, Self::ContactRepo> {
        &self.address_service
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.db_pool)
            .await
            .is_ok()
    }
}

/// Run the HTTP server until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    // Create database connection pool
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let http_addr = config.http_addr();
    let state = AppState::new(db_pool);
    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Build the HTTP router with generic state type
///
/// This function is generic over the state type, allowing it to work with
/// both production `AppState` and test implementations that implement `HasServices`.
pub fn build_router<S: HasServices>(state: S) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public_routes = Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Registration and login
        .route("/api/users", post(api::user::register::<S>))
        .route("/api/users/login", post(api::user::login::<S>));

    let protected_routes = Router::new()
        // Current user
        .route(
            "/api/users/current",
            get(api::user::current)
                .patch(api::user::update::<S>)
                .delete(api::user::logout::<S>),
        )
        .route(
            "/api/users/current/account",
            axum::routing::delete(api::user::delete_account::<S>),
        )
        // Contact endpoints
        .route(
            "/api/contacts",
            get(api::contact::search::<S>).post(api::contact::create::<S>),
        )
        .route(
            "/api/contacts/{id}",
            get(api::contact::get::<S>)
                .put(api::contact::update::<S>)
                .delete(api::contact::delete::<S>),
        )
        // Address endpoints
        .route(
            "/api/contacts/{id}/addresses",
            get(api::address::list::<S>).post(api::address::create::<S>),
        )
        .route(
            "/api/contacts/{id}/addresses/{address_id}",
            get(api::address::get::<S>)
                .put(api::address::update::<S>)
                .delete(api::address::delete::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth_middleware::<S>,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Add middleware
        .layer(middleware::from_fn(normalize_error_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
