//! Handler Layer
//!
//! Dispatches request messages to the service and folds every outcome into
//! a response message.

pub mod request_handler;

pub use request_handler::FilterRequestHandler;
