pub mod uno_sessions;
