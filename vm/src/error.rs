use thiserror::Error;

use crate::process::ProcessId;

pub type Result<T> = std::result::Result<T, VmError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    /// No process with this id was ever created.
    #[error("process {0} not found")]
    ProcessNotFound(ProcessId),

    /// The virtual address lies at or beyond the end of the process.
    #[error("address {address:#06X} out of bounds for process {process} ({size} bytes)")]
    AddressOutOfBounds {
        process: ProcessId,
        address: usize,
        size: usize,
    },

    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("invalid process size: {0} bytes")]
    InvalidProcessSize(usize),
}
