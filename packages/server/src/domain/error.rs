//! Domain errors.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    InvalidConnectionId,

    #[error("display name must not be empty")]
    EmptyDisplayName,
}

/// Connection registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The connection already has a participant; the registry rejects the join.
    #[error("connection '{0}' is already registered")]
    DuplicateRegistration(String),
}

/// Message routing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("recipient '{0}' is not registered")]
    RecipientNotFound(String),
}
