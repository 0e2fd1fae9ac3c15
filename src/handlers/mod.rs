// handlers/mod.rs - route handlers grouped by path prefix
//
// auth   POST /login, /registration (body validation runs first)
// users  /users, /users/:id
// edu    /api/edu/*
// root   /, /health

pub mod auth;
pub mod edu;
pub mod root;
pub mod users;
