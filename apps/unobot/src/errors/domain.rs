//! Repository-level error type shared by the store implementations.
//!
//! It knows nothing about HTTP. Services return `AppError` and convert with
//! `From<DomainError> for AppError`. Rule rejections are a separate type,
//! [`crate::domain::RuleError`], and never travel through here.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Operational failure kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    /// A stored document could not be decoded.
    DataCorruption,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// A session already exists for the (guild, channel) pair.
    SessionExists,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    Validation(String),
    Conflict(ConflictKind, String),
    NotFound(NotFoundKind, String),
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// A stored document field failed to decode.
    pub fn corrupt(field: &str, detail: impl Display) -> Self {
        Self::Infra(
            InfraErrorKind::DataCorruption,
            format!("session field `{field}` is unreadable: {detail}"),
        )
    }
}
