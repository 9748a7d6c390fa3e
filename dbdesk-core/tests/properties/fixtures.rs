//! Shared fixtures for the property tests

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use dbdesk_core::error::{EngineError, EngineResult, StorageResult};
use dbdesk_core::{Connection, ConnectionEngine, Storage, StoredFile};

/// In-memory storage with a fixed catalog
#[derive(Debug, Default)]
pub struct MemoryStorage {
    names: BTreeSet<String>,
}

impl MemoryStorage {
    pub fn with(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            names: names.iter().map(ToString::to_string).collect(),
        })
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn list(&self) -> StorageResult<Vec<StoredFile>> {
        Ok(self
            .names
            .iter()
            .map(|n| StoredFile::new(n.clone(), n.clone()))
            .collect())
    }

    fn create(&self, _name: &str) -> StorageResult<Box<dyn Write + Send>> {
        Ok(Box::new(Vec::<u8>::new()))
    }
}

/// Engine whose probes always succeed or always fail
pub struct FixedEngine {
    reachable: bool,
}

impl FixedEngine {
    pub fn reachable() -> Arc<Self> {
        Arc::new(Self { reachable: true })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self { reachable: false })
    }
}

struct NoOpConnection;

impl Connection for NoOpConnection {
    fn probe(&mut self) -> EngineResult<()> {
        Ok(())
    }

    fn close(self: Box<Self>) -> EngineResult<()> {
        Ok(())
    }
}

impl ConnectionEngine for FixedEngine {
    fn open(&self, _connection_string: &str) -> EngineResult<Box<dyn Connection>> {
        if self.reachable {
            Ok(Box::new(NoOpConnection))
        } else {
            Err(EngineError::Open("unreachable".to_string()))
        }
    }
}
