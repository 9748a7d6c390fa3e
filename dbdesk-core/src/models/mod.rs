//! Data models for `DbDesk`

mod profile;
mod stored_file;

pub use profile::{Profile, ProfileSet};
pub use stored_file::StoredFile;
