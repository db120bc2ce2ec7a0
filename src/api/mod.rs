//! HTTP trigger API for the daily calculation.
//!
//! This module exposes the orchestrator to an external scheduler or
//! recalculation trigger over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculateDayRequest, CalculateRangeRequest};
pub use response::{ApiError, ApiErrorResponse, RangeResponse};
pub use state::AppState;
