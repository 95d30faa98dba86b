// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, award, dashboard, quiz},
    state::AppState,
    utils::session::{auth_middleware, student_middleware, teacher_middleware},
};

/// Assembles the main application router.
///
/// * Public routes: login, register.
/// * Session-gated routes: logout, quiz workflow, award API.
/// * Role-gated routes: the two dashboards.
/// * Applies global middleware (Trace, CORS) and injects the app state.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Double middleware protection on dashboards: session gate first,
    // then the role check.
    let protected_routes = Router::new()
        .route("/logout", get(auth::logout))
        .route("/quiz/{subject_id}", get(quiz::get_quiz))
        .route("/quiz/{subject_id}/submit", post(quiz::submit_quiz))
        .route("/api/award", post(award::award_xp))
        .merge(
            Router::new()
                .route("/student/dashboard", get(dashboard::student_dashboard))
                .layer(middleware::from_fn(student_middleware)),
        )
        .merge(
            Router::new()
                .route("/teacher/dashboard", get(dashboard::teacher_dashboard))
                .layer(middleware::from_fn(teacher_middleware)),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
