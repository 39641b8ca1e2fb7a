use std::{ffi::OsStr, fmt::Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Memory(u64);

impl Memory {
  pub fn from_bytes(bytes: u64) -> Self {
    Memory(bytes)
  }
}

impl Memory {
  pub fn into_bytes(self) -> u64 {
    self.0
  }

  pub fn is_zero(self) -> bool {
    self.0 == 0
  }
}

impl Display for Memory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Parse MEMORY_LIMIT the way `atoi` would
///
/// Leading whitespace and an optional `+` are skipped, then the longest run
/// of decimal digits is read and anything after it is ignored. Input with no
/// digits, or with a leading `-`, yields zero, so malformed input and an
/// explicit `0` end up as the same invalid limit. Overflow saturates.
pub fn parse_memory_limit(raw: &OsStr) -> Memory {
  let raw = raw.to_string_lossy();
  let trimmed = raw.trim_start_matches(|c: char| c.is_ascii_whitespace());
  let digits = match trimmed.strip_prefix('+') {
    Some(rest) => rest,
    None => trimmed,
  };

  let bytes = digits
    .bytes()
    .take_while(u8::is_ascii_digit)
    .fold(0u64, |acc, digit| {
      acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
    });

  Memory::from_bytes(bytes)
}
