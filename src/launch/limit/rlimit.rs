use log::debug;
use rlimit::{getrlimit, setrlimit, Resource};

use crate::utils::Memory;

use super::{Limit, LimitError};

/// Use `setrlimit` to lower the data segment soft limit
pub struct DataLimit {
  /// requested soft limit
  memory: Memory,
}

impl DataLimit {
  pub fn new(memory: Memory) -> Result<Self, LimitError> {
    if memory.is_zero() {
      return Err(LimitError::Invalid(memory));
    }
    Ok(Self { memory })
  }
}

/// The soft limit may not be raised above the hard one
pub fn check_ceiling(requested: Memory, hard: Memory) -> Result<(), LimitError> {
  if requested > hard {
    Err(LimitError::ExceedsCeiling { ceiling: hard })
  } else {
    Ok(())
  }
}

impl Limit for DataLimit {
  fn apply(&self) -> Result<(), LimitError> {
    let (soft, hard) = getrlimit(Resource::DATA).map_err(LimitError::QueryFailed)?;
    debug!("current data limit: soft={soft} hard={hard}");

    check_ceiling(self.memory, Memory::from_bytes(hard))?;

    // hard limit is left as is
    setrlimit(Resource::DATA, self.memory.into_bytes(), hard).map_err(LimitError::SetFailed)?;
    debug!("data soft limit set to {}", self.memory);
    Ok(())
  }
}
