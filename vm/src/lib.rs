//! Demand-paged virtual memory simulator.
//!
//! A fixed pool of physical frames is shared by every registered process.
//! Each access is translated into a (page, offset) pair, checked against the
//! owning process' page table and, on a page fault, served by the replacement
//! engine under the configured [`Policy`].

pub mod address;
pub mod config;
pub mod error;
pub mod frame_table;
pub mod mmu;
pub mod page_replacer;
pub mod page_table;
pub mod process;

pub use config::{MmuConfig, Policy};
pub use error::{Result, VmError};
pub use mmu::{AccessEvent, AccessKind, Mmu, Statistics, Translation};
pub use process::ProcessId;

pub type FrameIndex = usize;
pub type PageIndex = usize;
