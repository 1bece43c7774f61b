use std::{collections::BTreeMap, fmt};

use log::debug;

use crate::{
    address,
    error::{Result, VmError},
    page_table::PageTable,
};

/// Sequential process identifier, starting at 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub usize);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Process {
    id: ProcessId,
    size_bytes: usize,
    page_table: PageTable,
}

impl Process {
    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_table.len()
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub(crate) fn page_table_mut(&mut self) -> &mut PageTable {
        &mut self.page_table
    }
}

#[derive(Clone, Debug)]
pub struct ProcessRegistry {
    processes: BTreeMap<ProcessId, Process>,
    next_id: usize,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        ProcessRegistry {
            processes: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn create_process(&mut self, size_bytes: usize, page_size: usize) -> Result<ProcessId> {
        if size_bytes == 0 {
            return Err(VmError::InvalidProcessSize(size_bytes));
        }

        let id = ProcessId(self.next_id);
        self.next_id += 1;

        let page_count = address::page_count(size_bytes, page_size);

        debug!("mmu: process {} created, {} bytes in {} pages", id, size_bytes, page_count);

        self.processes.insert(
            id,
            Process {
                id,
                size_bytes,
                page_table: PageTable::new(page_count),
            },
        );

        Ok(id)
    }

    pub fn lookup(&self, id: ProcessId) -> Result<&Process> {
        self.processes.get(&id).ok_or(VmError::ProcessNotFound(id))
    }

    pub(crate) fn lookup_mut(&mut self, id: ProcessId) -> Result<&mut Process> {
        self.processes.get_mut(&id).ok_or(VmError::ProcessNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Processes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.values()
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
