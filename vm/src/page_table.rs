use crate::{FrameIndex, PageIndex};

/// One entry of a process' page table.
///
/// A page is resident exactly when it holds a frame index; there is no
/// separate presence flag that could drift out of sync with it.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Page {
    frame: Option<FrameIndex>,
    load_time: Option<u64>,
    last_access_time: Option<u64>,
    modified: bool,
    referenced: bool,
}

impl Page {
    pub fn is_present(&self) -> bool {
        self.frame.is_some()
    }

    pub fn frame(&self) -> Option<FrameIndex> {
        self.frame
    }

    pub fn load_time(&self) -> Option<u64> {
        self.load_time
    }

    pub fn last_access_time(&self) -> Option<u64> {
        self.last_access_time
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn is_referenced(&self) -> bool {
        self.referenced
    }
}

#[derive(Clone, Debug)]
pub struct PageTable {
    table: Vec<Page>,
}

impl PageTable {
    pub fn new(page_count: usize) -> Self {
        PageTable {
            table: vec![Page::default(); page_count],
        }
    }

    pub fn get(&self, page_number: PageIndex) -> Option<&Page> {
        self.table.get(page_number)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageIndex, &Page)> {
        self.table.iter().enumerate()
    }

    pub fn resident_count(&self) -> usize {
        self.table.iter().filter(|page| page.is_present()).count()
    }

    pub(crate) fn set(&mut self, page_number: PageIndex, frame_index: FrameIndex, now: u64) {
        let page = &mut self.table[page_number];

        page.frame = Some(frame_index);
        page.load_time = Some(now);
        page.modified = false;
    }

    pub(crate) fn clear(&mut self, page_number: PageIndex) {
        let page = &mut self.table[page_number];

        page.frame = None;
        page.referenced = false;
    }

    pub(crate) fn touch(&mut self, page_number: PageIndex, now: u64) {
        let page = &mut self.table[page_number];

        page.last_access_time = Some(now);
        page.referenced = true;
    }

    pub(crate) fn mark_dirty(&mut self, page_number: PageIndex) {
        self.table[page_number].modified = true;
    }
}
