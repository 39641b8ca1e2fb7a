use std::io;
use thiserror::Error;

use crate::utils::Memory;

pub mod rlimit;

#[derive(Debug, Error)]
pub enum LimitError {
  #[error("Invalid MEMORY_LIMIT: {0}")]
  Invalid(Memory),
  #[error("getrlimit failed: {0}")]
  QueryFailed(#[source] io::Error),
  #[error("Cannot set a limit higher than the hard limit: {ceiling}")]
  ExceedsCeiling { ceiling: Memory },
  #[error("setrlimit failed: {0}")]
  SetFailed(#[source] io::Error),
}

impl LimitError {
  /// errors carrying a description from the operating system
  pub fn is_os_error(&self) -> bool {
    matches!(self, LimitError::QueryFailed(_) | LimitError::SetFailed(_))
  }
}

/// Limit the resources of the current process
///
/// The limit stays in place across `exec`, so whatever replaces this
/// process image inherits it.
pub trait Limit {
  /// apply this limit to the calling process
  fn apply(&self) -> Result<(), LimitError>;
}
