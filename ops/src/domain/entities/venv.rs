//! Virtual environment domain entity
//!
//! Describes where a Python virtual environment keeps its interpreter and
//! activation scripts, and how activating it changes a process environment.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Platform flavour of a virtual environment layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VenvFlavor {
    /// `bin/python`, `bin/activate`
    Posix,
    /// `Scripts\python.exe`, `Scripts\Activate.ps1`
    Windows,
}

impl VenvFlavor {
    pub fn current() -> Self {
        if cfg!(windows) {
            VenvFlavor::Windows
        } else {
            VenvFlavor::Posix
        }
    }
}

/// Resolved paths of a virtual environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenvLayout {
    pub root: PathBuf,
    pub flavor: VenvFlavor,
    pub scripts_dir: PathBuf,
    pub interpreter: PathBuf,
    pub activate_script: PathBuf,
}

impl VenvLayout {
    pub fn new(root: impl Into<PathBuf>, flavor: VenvFlavor) -> Self {
        let root = root.into();
        let (scripts_dir, interpreter, activate_script) = match flavor {
            VenvFlavor::Posix => {
                let scripts = root.join("bin");
                let python = scripts.join("python");
                let activate = scripts.join("activate");
                (scripts, python, activate)
            }
            VenvFlavor::Windows => {
                let scripts = root.join("Scripts");
                let python = scripts.join("python.exe");
                let activate = scripts.join("Activate.ps1");
                (scripts, python, activate)
            }
        };

        Self {
            root,
            flavor,
            scripts_dir,
            interpreter,
            activate_script,
        }
    }

    /// Locate a virtual environment at `root`, if the directory exists
    pub fn detect(root: &Path) -> Option<Self> {
        if root.is_dir() {
            Some(Self::new(root, VenvFlavor::current()))
        } else {
            None
        }
    }

    /// Shell command an operator types to activate this environment
    pub fn activate_command(&self) -> String {
        match self.flavor {
            VenvFlavor::Posix => format!("source {}", self.activate_script.display()),
            VenvFlavor::Windows => format!("& {}", self.activate_script.display()),
        }
    }

    /// `PATH` with the scripts directory in front
    pub fn activated_path(&self, current: Option<OsString>) -> Result<OsString, String> {
        let mut dirs = vec![self.scripts_dir.clone()];
        if let Some(current) = current {
            dirs.extend(
                std::env::split_paths(&current).filter(|p| p != &self.scripts_dir),
            );
        }
        std::env::join_paths(dirs).map_err(|e| e.to_string())
    }

    /// Variables an activated shell carries
    ///
    /// `PYTHONHOME` is cleared the same way the stock activation scripts do.
    pub fn activation_env(
        &self,
        current_path: Option<OsString>,
    ) -> Result<Vec<(String, Option<OsString>)>, String> {
        Ok(vec![
            (
                "VIRTUAL_ENV".to_string(),
                Some(self.root.clone().into_os_string()),
            ),
            (
                "PATH".to_string(),
                Some(self.activated_path(current_path)?),
            ),
            ("PYTHONHOME".to_string(), None),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_layout() {
        let venv = VenvLayout::new("venv", VenvFlavor::Posix);
        assert_eq!(venv.interpreter, PathBuf::from("venv/bin/python"));
        assert_eq!(venv.activate_script, PathBuf::from("venv/bin/activate"));
        assert_eq!(venv.activate_command(), "source venv/bin/activate");
    }

    #[test]
    fn windows_layout() {
        let venv = VenvLayout::new("venv", VenvFlavor::Windows);
        assert_eq!(venv.scripts_dir, PathBuf::from("venv").join("Scripts"));
        assert!(venv.interpreter.ends_with("python.exe"));
        assert!(venv.activate_command().starts_with("& "));
        assert!(venv.activate_command().ends_with("Activate.ps1"));
    }

    #[test]
    fn detect_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(VenvLayout::detect(&dir.path().join("venv")).is_none());

        std::fs::create_dir(dir.path().join("venv")).unwrap();
        let venv = VenvLayout::detect(&dir.path().join("venv")).unwrap();
        assert_eq!(venv.root, dir.path().join("venv"));
    }

    #[test]
    fn activated_path_prepends_scripts_once() {
        let venv = VenvLayout::new("/work/venv", VenvFlavor::current());
        let current = std::env::join_paths([venv.scripts_dir.clone(), PathBuf::from("/usr/bin")])
            .unwrap();
        let path = venv.activated_path(Some(current)).unwrap();
        let dirs: Vec<PathBuf> = std::env::split_paths(&path).collect();
        assert_eq!(dirs, vec![venv.scripts_dir.clone(), PathBuf::from("/usr/bin")]);
    }

    #[test]
    fn activation_env_sets_virtual_env_and_clears_pythonhome() {
        let venv = VenvLayout::new("/work/venv", VenvFlavor::current());
        let vars = venv.activation_env(None).unwrap();
        assert_eq!(vars[0].0, "VIRTUAL_ENV");
        assert_eq!(vars[0].1.as_deref(), Some(std::ffi::OsStr::new("/work/venv")));
        assert_eq!(vars[2], ("PYTHONHOME".to_string(), None));
    }
}
