//! Infrastructure layer - database, session stores, and state assembly.

pub mod db;
pub mod db_errors;
pub mod memory_store;
pub mod state;
