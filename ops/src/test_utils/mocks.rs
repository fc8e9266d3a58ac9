//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing and that
//! record every call so tests can verify behavior.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::LaunchSpec;
use crate::domain::ports::{
    EnvStore, InterpreterProbe, ProcessControl, ReadinessProbe, ServiceManager,
};
use crate::error::{EnvFileError, ProbeError, ProcessError};

// ============================================================================
// In-Memory Env Store
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryEnvStore {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
    writes: Arc<AtomicUsize>,
    read_only: bool,
}

impl InMemoryEnvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a file
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    /// Reject every write with a permission error
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn content(&self, path: &Path) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EnvStore for InMemoryEnvStore {
    async fn read(&self, path: &Path) -> Result<String, EnvFileError> {
        self.content(path).ok_or_else(|| EnvFileError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }

    async fn write(&self, path: &Path, content: &str) -> Result<(), EnvFileError> {
        if self.read_only {
            return Err(EnvFileError::Write {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

// ============================================================================
// Mock Service Manager
// ============================================================================

#[derive(Clone)]
pub struct MockServiceManager {
    failure: Option<String>,
    restarted: Arc<RwLock<Vec<String>>>,
}

impl MockServiceManager {
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            restarted: Arc::default(),
        }
    }

    /// Every restart exits non-zero with `stderr`
    pub fn failing(stderr: &str) -> Self {
        Self {
            failure: Some(stderr.to_string()),
            restarted: Arc::default(),
        }
    }

    /// Services a restart was requested for
    pub fn restarted(&self) -> Vec<String> {
        self.restarted.read().unwrap().clone()
    }
}

#[async_trait]
impl ServiceManager for MockServiceManager {
    async fn restart(&self, service: &str) -> Result<(), ProcessError> {
        self.restarted.write().unwrap().push(service.to_string());
        match &self.failure {
            None => Ok(()),
            Some(stderr) => Err(ProcessError::Exit {
                program: "systemctl".to_string(),
                code: Some(5),
                stderr: stderr.clone(),
            }),
        }
    }
}

// ============================================================================
// Mock Process Control
// ============================================================================

#[derive(Clone)]
pub struct MockProcessControl {
    kill_result: Arc<RwLock<Option<Result<bool, ProcessError>>>>,
    spawn_fails: bool,
    killed: Arc<RwLock<Vec<String>>>,
    spawned: Arc<RwLock<Vec<LaunchSpec>>>,
}

impl MockProcessControl {
    /// Kills succeed with a match, spawns return pid 4242
    pub fn new() -> Self {
        Self {
            kill_result: Arc::default(),
            spawn_fails: false,
            killed: Arc::default(),
            spawned: Arc::default(),
        }
    }

    /// Result returned by the next `kill_matching` call
    pub fn with_kill_result(self, result: Result<bool, ProcessError>) -> Self {
        *self.kill_result.write().unwrap() = Some(result);
        self
    }

    pub fn with_spawn_failure(mut self) -> Self {
        self.spawn_fails = true;
        self
    }

    pub fn killed_patterns(&self) -> Vec<String> {
        self.killed.read().unwrap().clone()
    }

    pub fn spawned(&self) -> Vec<LaunchSpec> {
        self.spawned.read().unwrap().clone()
    }
}

impl Default for MockProcessControl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessControl for MockProcessControl {
    async fn kill_matching(&self, pattern: &str) -> Result<bool, ProcessError> {
        self.killed.write().unwrap().push(pattern.to_string());
        self.kill_result.write().unwrap().take().unwrap_or(Ok(true))
    }

    async fn spawn_detached(&self, spec: &LaunchSpec) -> Result<u32, ProcessError> {
        if self.spawn_fails {
            return Err(ProcessError::Spawn {
                program: spec.program.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.spawned.write().unwrap().push(spec.clone());
        Ok(4242)
    }
}

// ============================================================================
// Mock Readiness Probe
// ============================================================================

/// Answers from a script; the last answer repeats once the script runs out
#[derive(Clone)]
pub struct MockReadinessProbe {
    answers: Arc<Vec<bool>>,
    calls: Arc<AtomicUsize>,
}

impl MockReadinessProbe {
    pub fn sequence(answers: Vec<bool>) -> Self {
        Self {
            answers: Arc::new(answers),
            calls: Arc::default(),
        }
    }

    pub fn ready() -> Self {
        Self::sequence(vec![true])
    }

    pub fn never() -> Self {
        Self::sequence(vec![false])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadinessProbe for MockReadinessProbe {
    async fn is_ready(&self, _url: &str, _timeout: Duration) -> bool {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(n)
            .or_else(|| self.answers.last())
            .copied()
            .unwrap_or(false)
    }
}

// ============================================================================
// Mock Interpreter Probe
// ============================================================================

#[derive(Clone)]
pub struct MockInterpreterProbe {
    version: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockInterpreterProbe {
    pub fn with_version(version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            version: None,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InterpreterProbe for MockInterpreterProbe {
    async fn version(&self, _interpreter: &Path) -> Result<String, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.version.clone().ok_or(ProbeError::EmptyVersion)
    }
}
