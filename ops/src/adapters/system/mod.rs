//! Host system adapter
//!
//! Shells out to `systemctl`, `pkill` and the Python interpreter.

pub mod command;
pub mod process;
pub mod python;
pub mod systemctl;

pub use process::PkillProcessControl;
pub use python::PythonInterpreterProbe;
pub use systemctl::SystemctlServiceManager;
