//! API Module
//!
//! HTTP handlers and routing exposing the host cache as a JSON API.
//!
//! # Endpoints
//! - `PUT /set`, `POST /add` - Store values
//! - `GET /get/:key`, `POST /get_many` - Read values
//! - `DELETE /del/:key`, `POST /delete_many`, `DELETE /clear` - Remove values
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
