// handlers/root/index.rs - GET / handler

use axum::Json;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "Edu API (Rust)",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "POST /login, POST /registration",
            "users": "GET /users, GET|PUT|DELETE /users/:id",
            "report": "GET /api/edu[?firedSince=YYYY-MM-DD]",
            "find": "POST /api/edu/find, POST /api/edu/find-one",
            "aggregate": "GET /api/edu/aggregate/:fn/:attribute",
            "employees": "POST /api/edu/employees, PATCH|DELETE /api/edu/employees/:id",
            "restore": "POST /api/edu/employees/:id/restore",
            "subordinates": "GET /api/edu/employees/:id/subordinates",
            "health": "GET /health"
        }
    }))
}
