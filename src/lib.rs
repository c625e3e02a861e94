//! Concierge application library
//!
//! The hotel service stores hotels and answers existence checks; the customer
//! service stores customers and assigns them to hotels after confirming with
//! the hotel service over HTTP.

pub mod modules;
pub mod service;

pub use service::Service;
