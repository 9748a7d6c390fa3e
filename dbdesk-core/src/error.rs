//! Error types for `DbDesk`
//!
//! This module defines all error types used throughout the `DbDesk` core,
//! providing descriptive error messages for profile-store persistence,
//! backup-storage access, and connection-probe operations.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for `DbDesk` operations
#[derive(Debug, Error)]
pub enum DbDeskError {
    /// Profile-store persistence errors
    #[error("Profile store error: {0}")]
    Store(#[from] StoreError),

    /// Backup-storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Connection-engine errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to profile-store file operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Profile store location could not be determined
    #[error("Profile store location not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read the profile store
    #[error("Failed to read profile store: {0}")]
    Read(String),

    /// Failed to deserialize stored profiles
    #[error("Failed to deserialize profiles: {0}")]
    Deserialize(String),

    /// Failed to serialize profiles
    #[error("Failed to serialize profiles: {0}")]
    Serialize(String),

    /// Failed to write the profile store
    #[error("Failed to write profile store: {0}")]
    Write(String),

    /// Invalid profile data
    #[error("Invalid profile value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },
}

/// Errors related to backup-storage access
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage root directory missing or inaccessible
    #[error("Storage root not accessible: {0}")]
    RootUnavailable(String),

    /// Failed to enumerate stored files
    #[error("Failed to list storage: {0}")]
    List(String),

    /// Failed to create a stored file
    #[error("Failed to create {name}: {reason}")]
    Create {
        /// The logical file name
        name: String,
        /// The reason creation failed
        reason: String,
    },
}

/// Errors raised by a connection engine while probing connectivity
///
/// These never escape the validator: every variant is mapped to a
/// `valid = false` outcome at the probe boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The connection string could not be interpreted
    #[error("Malformed connection string: {0}")]
    InvalidTarget(String),

    /// Opening the connection failed
    #[error("Failed to open connection: {0}")]
    Open(String),

    /// The no-op round trip failed
    #[error("Connection probe failed: {0}")]
    Probe(String),

    /// Closing the connection failed
    #[error("Failed to close connection: {0}")]
    Close(String),
}

/// Signal raised when the user dismisses a selection dialog
///
/// This is control flow, not a failure: callers abort the surrounding
/// operation and must not log it as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Operation cancelled by user")]
pub struct CancelRequest;

/// Result type alias for `DbDesk` operations
pub type Result<T> = std::result::Result<T, DbDeskError>;

/// Result type alias for profile-store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for backup-storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type alias for connection-engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;
