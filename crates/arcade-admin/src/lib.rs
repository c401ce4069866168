pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod health;
pub mod state;
pub mod store;
pub mod writer;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use config::AdminConfig;
use state::AppState;
use store::CatalogStore;

/// Build the Axum router and application state from a config and a loaded
/// catalog.
pub fn build_app(config: AdminConfig, store: CatalogStore) -> (Router<()>, AppState) {
    let site_root = config.site_root.clone();
    let state = AppState::new(config, store);

    // API routes (behind bearer auth middleware)
    let api_routes = Router::new()
        .route("/catalog", get(api::get_catalog))
        .route("/catalog/base-url", put(api::put_base_url))
        .route("/catalog/download", get(api::download_catalog))
        .route("/catalog/save", post(api::save_catalog))
        .route("/games", get(api::list_games).put(api::put_game))
        .route("/games/new", get(api::new_game_form))
        .route(
            "/games/{slug}",
            get(api::get_game).delete(api::delete_game),
        )
        .route("/games/download", post(api::download_game))
        .route("/preview", post(api::preview))
        .route("/site/game", post(api::write_game_page))
        .route("/site/home", post(api::write_homepage))
        .route("/site/lists", post(api::write_list_pages))
        .route("/site/all", post(api::write_everything))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .fallback_service(ServeDir::new(&site_root))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    (app, state)
}

/// Middleware wrapper that injects AuthConfig into request extensions for the
/// bearer auth middleware.
async fn bearer_auth_layer(
    axum::extract::State(state): axum::extract::State<AppState>,
    mut request: axum::extract::Request,
    next: middleware::Next,
) -> Result<axum::response::Response, axum::http::StatusCode> {
    request.extensions_mut().insert(state.auth.clone());
    auth::bearer_auth_middleware(request, next).await
}
