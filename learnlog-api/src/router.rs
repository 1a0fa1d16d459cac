use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{
    adapters::inbound::http::ServiceFactory, app_state::AppState, config::Settings, routes,
};

pub fn create(factory: Arc<dyn ServiceFactory>, config: &Settings) -> Router<()> {
    let app = Router::new()
        .route("/", get(|| async { "Hello, learner!" }))
        .nest("/streak", routes::streak::router())
        .nest("/users", routes::users::router())
        .nest("/profiles", routes::profiles::router())
        .nest("/logs", routes::logs::router())
        .nest("/import", routes::import::router())
        .nest("/following", routes::following::router())
        .nest("/notifications", routes::notifications::router());

    let app_url = config.application.app_url.clone();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_url
        }));

    app.with_state(AppState::new(factory))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
