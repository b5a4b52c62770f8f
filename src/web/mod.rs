//! JSON web API over the reference data and matcher.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! medlink serve
//!
//! # Custom port and auto-open browser
//! medlink serve --port 3000 --open
//!
//! # Bind to all interfaces
//! medlink serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Landing page listing the endpoints
//! - `GET /api/symptoms` - Symptoms grouped by category (`?category=`)
//! - `POST /api/triage` - Rank conditions for `{"symptoms": [...], "limit": n}`
//! - `GET /api/conditions`, `GET /api/conditions/{id}`
//! - `GET /api/korean-medicine` (`?q=`), `GET /api/korean-medicine/{id}`
//! - `GET /api/interactions` (`?category=&q=`)
//! - `GET /api/emergency`, `GET /api/emergency/{section}`
//! - `GET /api/safety`
//!
//! Errors are returned as `{"error", "error_type", "details": null}`.

pub mod server;
