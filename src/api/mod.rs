//! HTTP API module for the Take-Home Pay Engine.
//!
//! This module provides the REST API endpoints for calculating take-home
//! pay and listing the supported prefectures.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ENGINE_VERSION, create_router};
pub use request::CalculationRequest;
pub use response::{ApiError, PrefectureEntry, PrefectureListResponse};
pub use state::AppState;
