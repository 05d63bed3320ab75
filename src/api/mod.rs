use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::infra::DbPool;

pub mod routes;

pub async fn start_server(port: u16, pool: DbPool) -> anyhow::Result<()> {
    let state = Arc::new(pool);

    // GET/PUT/DELETE share one path; the segment is a day string for GET
    // and a numeric id for PUT/DELETE, as each handler interprets it.
    let app = Router::new()
        .route(
            "/workouts",
            post(routes::create_workout).get(routes::list_workouts),
        )
        .route(
            "/workouts/{key}",
            get(routes::get_workout_by_day)
                .put(routes::update_workout)
                .delete(routes::delete_workout),
        )
        .route("/sync", post(routes::sync_workout))
        .route("/export", get(routes::export_data))
        .route("/import", post(routes::import_data))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
