use log::{debug, info, warn};

use crate::{
    address,
    config::{MmuConfig, Policy},
    error::{Result, VmError},
    frame_table::FrameTable,
    page_replacer::PageReplacer,
    page_table::Page,
    process::{Process, ProcessId, ProcessRegistry},
    FrameIndex, PageIndex,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// What the fault check did for a single access.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessEvent {
    Hit,
    FaultLoadedToFreeFrame {
        frame: FrameIndex,
    },
    FaultEvictedFrame {
        frame: FrameIndex,
        evicted_process: ProcessId,
        evicted_page: PageIndex,
    },
}

impl AccessEvent {
    pub fn is_fault(&self) -> bool {
        !matches!(self, AccessEvent::Hit)
    }
}

/// Result of one completed access. `timestamp` is the simulated time at
/// which the access happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    pub process: ProcessId,
    pub virtual_address: usize,
    pub page_number: PageIndex,
    pub offset: usize,
    pub frame: FrameIndex,
    pub physical_address: usize,
    pub timestamp: u64,
    pub event: AccessEvent,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Statistics {
    pub total_accesses: u64,
    pub total_faults: u64,
    pub policy: Policy,
}

impl Statistics {
    /// Percentage of accesses that faulted, 0 when nothing was accessed.
    pub fn fault_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            return 0.0;
        }

        self.total_faults as f64 / self.total_accesses as f64 * 100.0
    }
}

/// The simulated memory manager: one physical frame pool shared by every
/// process, plus the counters of the run.
#[derive(Debug)]
pub struct Mmu {
    config: MmuConfig,
    frames: FrameTable,
    processes: ProcessRegistry,
    current_time: u64,
    total_accesses: u64,
    total_faults: u64,
}

impl Mmu {
    pub fn new(config: MmuConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "mmu: {} frames of {} bytes, {} replacement",
            config.frame_count(),
            config.page_size,
            config.policy
        );

        Ok(Mmu {
            config,
            frames: FrameTable::new(config.frame_count()),
            processes: ProcessRegistry::new(),
            current_time: 0,
            total_accesses: 0,
            total_faults: 0,
        })
    }

    pub fn config(&self) -> &MmuConfig {
        &self.config
    }

    pub fn policy(&self) -> Policy {
        self.config.policy
    }

    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    pub fn processes(&self) -> &ProcessRegistry {
        &self.processes
    }

    pub fn process(&self, pid: ProcessId) -> Result<&Process> {
        self.processes.lookup(pid)
    }

    pub fn create_process(&mut self, size_bytes: usize) -> Result<ProcessId> {
        self.processes.create_process(size_bytes, self.config.page_size)
    }

    pub fn read(&mut self, pid: ProcessId, address: usize) -> Result<Translation> {
        self.access(pid, address, AccessKind::Read)
    }

    pub fn write(&mut self, pid: ProcessId, address: usize) -> Result<Translation> {
        self.access(pid, address, AccessKind::Write)
    }

    /// Applies one access end to end. Rejected accesses leave every counter
    /// and the clock untouched.
    pub fn access(&mut self, pid: ProcessId, address: usize, kind: AccessKind) -> Result<Translation> {
        let size = self.processes.lookup(pid)?.size_bytes();

        if address >= size {
            warn!("mmu: process {} address {:#06X} rejected, size is {} bytes", pid, address, size);

            return Err(VmError::AddressOutOfBounds {
                process: pid,
                address,
                size,
            });
        }

        let (page_number, page_offset) = address::translate(address, self.config.page_size);

        debug!(
            "mmu: process {} access addr {:#06X} page_num={:#02X} page_offset={:#02X}",
            pid, address, page_number, page_offset
        );

        self.total_accesses += 1;

        let resident = self
            .processes
            .lookup(pid)?
            .page_table()
            .get(page_number)
            .and_then(Page::frame);

        let (frame_idx, event) = match resident {
            Some(frame_idx) => {
                debug!("mmu: page hit");
                (frame_idx, AccessEvent::Hit)
            }
            None => {
                self.total_faults += 1;
                info!("mmu: page fault on process {} page {}", pid, page_number);
                self.handle_page_fault(pid, page_number)?
            }
        };

        let now = self.current_time;
        let page_table = self.processes.lookup_mut(pid)?.page_table_mut();

        page_table.touch(page_number, now);
        if kind == AccessKind::Write {
            page_table.mark_dirty(page_number);
        }

        let physical_address = frame_idx * self.config.page_size + page_offset;

        debug!(
            "mmu: page {:#02X} mapped to frame {:#02X}, physical addr {:#06X}",
            page_number, frame_idx, physical_address
        );

        self.current_time += 1;

        Ok(Translation {
            process: pid,
            virtual_address: address,
            page_number,
            offset: page_offset,
            frame: frame_idx,
            physical_address,
            timestamp: now,
            event,
        })
    }

    fn handle_page_fault(
        &mut self,
        pid: ProcessId,
        page_number: PageIndex,
    ) -> Result<(FrameIndex, AccessEvent)> {
        if let Some(free_idx) = self.frames.find_free_frame() {
            self.install(free_idx, pid, page_number)?;

            return Ok((free_idx, AccessEvent::FaultLoadedToFreeFrame { frame: free_idx }));
        }

        let victim_idx = self
            .config
            .policy
            .pick_replacement_frame(&self.frames, &self.processes)
            .ok_or_else(|| VmError::ConfigurationInvalid("no frame to replace".to_owned()))?;

        let (evicted_process, evicted_page) = self
            .evict(victim_idx)?
            .ok_or_else(|| VmError::ConfigurationInvalid("victim frame was empty".to_owned()))?;

        self.install(victim_idx, pid, page_number)?;

        Ok((
            victim_idx,
            AccessEvent::FaultEvictedFrame {
                frame: victim_idx,
                evicted_process,
                evicted_page,
            },
        ))
    }

    /// Empties `frame_idx` and drops the owning page's frame reference.
    fn evict(&mut self, frame_idx: FrameIndex) -> Result<Option<(ProcessId, PageIndex)>> {
        let Some((pid, page_number)) = self.frames.clear(frame_idx) else {
            return Ok(None);
        };

        let page_table = self.processes.lookup_mut(pid)?.page_table_mut();

        if page_table.get(page_number).is_some_and(Page::is_modified) {
            info!(
                "mmu: page {:#02X} of process {} is dirty, would be written back",
                page_number, pid
            );
        }

        page_table.clear(page_number);

        info!(
            "mmu: evicted process {} page {} from frame {}",
            pid, page_number, frame_idx
        );

        Ok(Some((pid, page_number)))
    }

    fn install(&mut self, frame_idx: FrameIndex, pid: ProcessId, page_number: PageIndex) -> Result<()> {
        let now = self.current_time;

        self.processes
            .lookup_mut(pid)?
            .page_table_mut()
            .set(page_number, frame_idx, now);
        self.frames.set(frame_idx, pid, page_number, now);

        info!("mmu: process {} page {} loaded into frame {}", pid, page_number, frame_idx);

        Ok(())
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            total_accesses: self.total_accesses,
            total_faults: self.total_faults,
            policy: self.config.policy,
        }
    }

    /// Checks that occupied frames and resident pages map onto each other
    /// one to one.
    pub fn check_consistency(&self) -> bool {
        let frames_point_back = self.frames.occupied().all(|(frame_idx, pid, page_number)| {
            self.processes
                .lookup(pid)
                .ok()
                .and_then(|process| process.page_table().get(page_number))
                .and_then(Page::frame)
                == Some(frame_idx)
        });

        let pages_point_back = self.processes.iter().all(|process| {
            process.page_table().iter().all(|(page_number, page)| match page.frame() {
                Some(frame_idx) => {
                    self.frames.get(frame_idx).and_then(|frame| frame.occupant())
                        == Some((process.id(), page_number))
                }
                None => true,
            })
        });

        let resident: usize = self
            .processes
            .iter()
            .map(|process| process.page_table().resident_count())
            .sum();

        frames_point_back && pages_point_back && resident == self.frames.occupied_count()
    }

    /// Ends the run and hands back the final counters.
    pub fn shutdown(self) -> Statistics {
        let stats = self.statistics();

        info!(
            "mmu: shutdown after {} accesses, {} faults",
            stats.total_accesses, stats.total_faults
        );

        stats
    }
}
