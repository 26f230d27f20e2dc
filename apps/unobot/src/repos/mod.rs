pub mod sessions;

pub use sessions::{SeaSessionStore, SessionDocument, SessionPatch, SessionStore, StoreHealth};
