//! Events Layer - request/response message types
//!
//! Transport-neutral shapes for the three remote operations plus status.

pub mod requests;
pub mod responses;

pub use requests::{AddRequest, CheckRequest, ConfigureRequest, FilterRequest};
pub use responses::{error_codes, ErrorResponse, FilterResponse};
