use std::{fmt, str::FromStr};

use crate::error::{Result, VmError};

/// Page replacement policy, fixed for the whole run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Policy {
    /// Evict the resident page that was loaded first.
    #[default]
    Fifo,
    /// Evict the resident page that was accessed least recently.
    Lru,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "FIFO"),
            Policy::Lru => write!(f, "LRU"),
        }
    }
}

impl FromStr for Policy {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "fifo" => Ok(Policy::Fifo),
            "2" | "lru" => Ok(Policy::Lru),
            other => Err(VmError::ConfigurationInvalid(format!(
                "unknown replacement policy {:?}",
                other
            ))),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MmuConfig {
    pub page_size: usize,
    pub physical_memory_size: usize,
    pub policy: Policy,
}

impl MmuConfig {
    pub fn new(page_size: usize, physical_memory_size: usize, policy: Policy) -> Self {
        MmuConfig {
            page_size,
            physical_memory_size,
            policy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(VmError::ConfigurationInvalid(
                "page size must be positive".to_owned(),
            ));
        }

        if self.physical_memory_size % self.page_size != 0 {
            return Err(VmError::ConfigurationInvalid(format!(
                "physical memory ({} bytes) is not a multiple of the page size ({} bytes)",
                self.physical_memory_size, self.page_size
            )));
        }

        if self.frame_count() == 0 {
            return Err(VmError::ConfigurationInvalid(
                "physical memory must hold at least one frame".to_owned(),
            ));
        }

        Ok(())
    }

    /// Only meaningful once [`MmuConfig::validate`] has passed.
    pub fn frame_count(&self) -> usize {
        self.physical_memory_size / self.page_size
    }
}
