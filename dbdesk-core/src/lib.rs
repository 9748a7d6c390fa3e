//! `DbDesk` Core Library
//!
//! This crate provides the core functionality for the `DbDesk` desktop
//! application shell: database-profile storage and selection, asynchronous
//! connection validation, and the backup/restore target-selection flows.
//! Rendering is out of scope; interactive surfaces are expressed as
//! capability traits a frontend implements.

pub mod dialect;
pub mod error;
pub mod models;
pub mod selection;
pub mod storage;
pub mod store;
pub mod validator;
pub mod wizard;

pub use error::{
    CancelRequest, DbDeskError, EngineError, Result, StorageError, StoreError,
};
pub use models::{Profile, ProfileSet, StoredFile};
pub use selection::{
    default_backup_label, sanitize_label, select_database, BackupMechanism,
    BackupSelectionView, BackupSelector, Confirmation, FilePicker, LocationMode, ProfileChoice,
    RestoreSelectionView, RestoreSelector, SelectBackup, SelectOutcome, SelectRestore,
    SelectionFrontend, SelectionResult, SelectionSettings,
};
pub use storage::{LocalStorage, Storage, BACKUP_EXTENSION};
pub use store::ProfileStore;
pub use validator::{Connection, ConnectionEngine, ConnectionValidator, TcpProbeEngine};
pub use wizard::{ConfirmOutcome, ProfileWizard, WizardState};
