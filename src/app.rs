use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::config;
use crate::handlers::{auth, edu, root, users};
use crate::middleware::validate_body_middleware;
use crate::validation::{ValidationChain, LOGIN, REGISTRATION};

pub fn app() -> Router {
    let router = Router::new()
        .route("/", get(root::index))
        .route("/health", get(root::health))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(edu_routes())
        .layer(DefaultBodyLimit::max(config().api.max_request_size_bytes));

    let router = if config().api.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router.layer(CorsLayer::new())
    };

    if config().api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn auth_routes() -> Router {
    let login: &'static ValidationChain = &LOGIN;
    let registration: &'static ValidationChain = &REGISTRATION;

    Router::new()
        .route(
            "/login",
            post(auth::login).layer(from_fn_with_state(login, validate_body_middleware)),
        )
        .route(
            "/registration",
            post(auth::registration).layer(from_fn_with_state(registration, validate_body_middleware)),
        )
}

fn user_routes() -> Router {
    Router::new().route("/users", get(users::user_list)).route(
        "/users/:id",
        get(users::user_show)
            .put(users::user_update)
            .delete(users::user_delete),
    )
}

fn edu_routes() -> Router {
    Router::new()
        .route("/api/edu", get(edu::report))
        .route("/api/edu/find", post(edu::find))
        .route("/api/edu/find-one", post(edu::find_one))
        .route("/api/edu/aggregate/:function/:attribute", get(edu::aggregate))
        .route("/api/edu/employees", post(edu::employee_create))
        .route(
            "/api/edu/employees/:id",
            patch(edu::employee_update).delete(edu::employee_delete),
        )
        .route("/api/edu/employees/:id/restore", post(edu::employee_restore))
        .route("/api/edu/employees/:id/subordinates", get(edu::subordinates))
}
