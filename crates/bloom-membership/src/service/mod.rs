//! Service Layer
//!
//! Owns the active filter and implements the inbound port on top of it.

pub mod filter_service;

pub use filter_service::FilterService;
