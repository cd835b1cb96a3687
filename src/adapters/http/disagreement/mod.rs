//! HTTP adapter for the disagreement module.
//!
//! # Endpoints
//!
//! - `GET /` - HTML form
//! - `POST /run` - HTML report
//! - `POST /api/disagreements` - JSON report
//! - `GET /api/health` - Health and analysis mode

pub mod dto;
pub mod handlers;
pub mod pages;
pub mod routes;

pub use handlers::DisagreementAppState;
pub use routes::disagreement_router;
