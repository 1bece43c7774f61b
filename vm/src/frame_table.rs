use crate::{process::ProcessId, FrameIndex, PageIndex};

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Frame {
    occupant: Option<(ProcessId, PageIndex)>,
    load_time: Option<u64>,
}

impl Frame {
    pub fn occupant(&self) -> Option<(ProcessId, PageIndex)> {
        self.occupant
    }

    pub fn load_time(&self) -> Option<u64> {
        self.load_time
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Physical memory, one slot per frame.
#[derive(Clone, Debug)]
pub struct FrameTable {
    frames: Vec<Frame>,
}

impl FrameTable {
    pub fn new(frame_count: usize) -> Self {
        FrameTable {
            frames: vec![Frame::default(); frame_count],
        }
    }

    pub fn get(&self, frame_index: FrameIndex) -> Option<&Frame> {
        self.frames.get(frame_index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrameIndex, &Frame)> {
        self.frames.iter().enumerate()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (FrameIndex, ProcessId, PageIndex)> + '_ {
        self.iter()
            .filter_map(|(idx, frame)| frame.occupant.map(|(pid, page)| (idx, pid, page)))
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Lowest-indexed frame with no occupant.
    pub fn find_free_frame(&self) -> Option<FrameIndex> {
        self.frames.iter().position(Frame::is_free)
    }

    pub(crate) fn set(&mut self, frame_index: FrameIndex, pid: ProcessId, page: PageIndex, now: u64) {
        self.frames[frame_index] = Frame {
            occupant: Some((pid, page)),
            load_time: Some(now),
        };
    }

    pub(crate) fn clear(&mut self, frame_index: FrameIndex) -> Option<(ProcessId, PageIndex)> {
        let frame = &mut self.frames[frame_index];

        frame.load_time = None;
        frame.occupant.take()
    }
}
