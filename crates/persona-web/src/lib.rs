//! Persona Web Server
//!
//! Axum-based REST API over the user store and the Person graph.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Authentication
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/login-json", post(routes::auth::login_json))
        // Users
        .route("/users/me", get(routes::users::me))
        .route("/users", get(routes::users::list_users))
        // Persons
        .route(
            "/persons",
            post(routes::persons::create_person).get(routes::persons::list_persons),
        )
        .route("/persons/me", get(routes::persons::my_person))
        .route(
            "/persons/{id}",
            get(routes::persons::get_person).put(routes::persons::update_person),
        )
        // Graph
        .route("/graph/nodes", get(routes::graph::nodes))
        .route("/graph/edges", get(routes::graph::edges))
        .route("/graph/network", get(routes::graph::network))
        .route("/graph/network/optimized", get(routes::graph::network_optimized))
        .route("/graph/nodes/search", get(routes::graph::search))
        .route(
            "/graph/nodes/search/optimized",
            get(routes::graph::search_optimized),
        )
        .route(
            "/graph/nodes/{id}/connections",
            get(routes::graph::connections),
        )
        .with_state(state);

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Run the web server.
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
