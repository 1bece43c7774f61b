use crate::{
    config::Policy, frame_table::FrameTable, page_table::Page, process::ProcessRegistry,
    FrameIndex,
};

pub trait PageReplacer {
    /// Ordering key of a resident page. The page with the smallest key is
    /// the next one to go.
    fn victim_key(&self, page: &Page) -> Option<u64>;

    /// Scans the occupied frames in ascending index order and returns the
    /// one whose page has the smallest key. Equal keys keep the lower index.
    fn pick_replacement_frame(
        &self,
        frames: &FrameTable,
        processes: &ProcessRegistry,
    ) -> Option<FrameIndex> {
        let mut victim: Option<(FrameIndex, Option<u64>)> = None;

        for (frame_idx, pid, page_number) in frames.occupied() {
            let key = processes
                .lookup(pid)
                .ok()
                .and_then(|process| process.page_table().get(page_number))
                .and_then(|page| self.victim_key(page));

            match victim {
                Some((_, best)) if key >= best => {}
                _ => victim = Some((frame_idx, key)),
            }
        }

        victim.map(|(frame_idx, _)| frame_idx)
    }
}

pub struct FIFOPageReplacer;

impl PageReplacer for FIFOPageReplacer {
    fn victim_key(&self, page: &Page) -> Option<u64> {
        page.load_time()
    }
}

pub struct LRUPageReplacer;

impl PageReplacer for LRUPageReplacer {
    fn victim_key(&self, page: &Page) -> Option<u64> {
        page.last_access_time()
    }
}

impl PageReplacer for Policy {
    fn victim_key(&self, page: &Page) -> Option<u64> {
        match self {
            Policy::Fifo => FIFOPageReplacer.victim_key(page),
            Policy::Lru => LRUPageReplacer.victim_key(page),
        }
    }
}
