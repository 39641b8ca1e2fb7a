pub mod executable;
pub mod limit;

use log::debug;
use std::{ffi::OsString, io, os::unix::process::CommandExt};
use thiserror::Error;

use self::{
  executable::Executable,
  limit::{Limit, LimitError},
};

#[derive(Debug, Error)]
pub enum LaunchError {
  #[error("Usage: {program} MEMORY_LIMIT PROGRAM [ARGUMENT]...")]
  Usage { program: String },
  #[error(transparent)]
  LimitError(#[from] LimitError),
  #[error("failed to execute {program:?}: {source}")]
  ExecFailed { program: OsString, source: io::Error },
}

impl LaunchError {
  /// errors carrying a description from the operating system go to stderr,
  /// everything else to stdout
  pub fn is_os_error(&self) -> bool {
    match self {
      LaunchError::Usage { .. } => false,
      LaunchError::LimitError(e) => e.is_os_error(),
      LaunchError::ExecFailed { .. } => true,
    }
  }
}

/// Replace the current process with a program under a resource limit
pub struct Launch<L: Limit> {
  limit: L,
  executable: Executable,
}

impl<L: Limit> Launch<L> {
  pub fn new(limit: L, executable: Executable) -> Self {
    Self { limit, executable }
  }

  /// Apply the limit, then replace the process image
  ///
  /// Like [`CommandExt::exec`] this only returns on failure. Nothing runs
  /// between applying the limit and the `exec` call.
  pub fn exec(self) -> LaunchError {
    let mut command = self.executable.command();
    if let Err(e) = self.limit.apply() {
      return e.into();
    }
    debug!("executing {:?}", self.executable);
    let source = command.exec();
    LaunchError::ExecFailed {
      program: self.executable.name,
      source,
    }
  }
}
