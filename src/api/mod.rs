//! HTTP API module for the household tax engine.
//!
//! This module provides the REST endpoint that accepts a household's raw
//! inputs and returns its calculated tax position.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, HouseholdRequest, InvestmentRequest, MAX_INPUT_MAGNITUDE, PersonRequest,
    coerce_count, coerce_decimal, coerce_flag,
};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
