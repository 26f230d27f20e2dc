//! Error handling for the session store and services.

pub mod domain;

pub use domain::DomainError;
