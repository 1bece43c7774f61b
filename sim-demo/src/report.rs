//! Text rendering of the simulator state. Everything here only reads from
//! the [`Mmu`]; nothing in the engine depends on it.

use vm::{AccessEvent, Mmu, Statistics, Translation};

fn time_or_dash(time: Option<u64>) -> String {
    time.map_or_else(|| "-".to_owned(), |t| t.to_string())
}

pub fn print_translation(t: &Translation) {
    match t.event {
        AccessEvent::Hit => {}
        AccessEvent::FaultLoadedToFreeFrame { frame } => {
            println!(
                "t={}: PAGE FAULT! process {} page {} loaded into free frame {}",
                t.timestamp, t.process, t.page_number, frame
            );
        }
        AccessEvent::FaultEvictedFrame {
            frame,
            evicted_process,
            evicted_page,
        } => {
            println!(
                "t={}: PAGE FAULT! frame {} evicted (process {} page {}), process {} page {} loaded",
                t.timestamp, frame, evicted_process, evicted_page, t.process, t.page_number
            );
        }
    }

    println!(
        "t={}: process {} virtual {:#07X} -> page {} offset {:#06X} -> frame {} -> physical {:#07X}{}",
        t.timestamp,
        t.process,
        t.virtual_address,
        t.page_number,
        t.offset,
        t.frame,
        t.physical_address,
        if t.event.is_fault() { "" } else { " (hit)" }
    );
}

pub fn print_memory(mmu: &Mmu) {
    println!("\n===== physical memory (t={}) =====", mmu.current_time());

    for (idx, frame) in mmu.frames().iter() {
        match frame.occupant() {
            Some((pid, page)) => println!(
                "frame {:>3}: process {} page {:>3} (loaded t={})",
                idx,
                pid,
                page,
                time_or_dash(frame.load_time())
            ),
            None => println!("frame {:>3}: [free]", idx),
        }
    }

    for process in mmu.processes().iter() {
        println!(
            "\nprocess {} ({} bytes, {} pages)",
            process.id(),
            process.size_bytes(),
            process.page_count()
        );

        for (page_number, page) in process.page_table().iter() {
            match page.frame() {
                Some(frame) => println!(
                    "  page {:>3}: frame {:>3} loaded t={} last access t={}{}",
                    page_number,
                    frame,
                    time_or_dash(page.load_time()),
                    time_or_dash(page.last_access_time()),
                    if page.is_modified() { " [dirty]" } else { "" }
                ),
                None => println!("  page {:>3}: not present", page_number),
            }
        }
    }
}

pub fn print_statistics(stats: &Statistics) {
    println!("\n===== statistics =====");
    println!("algorithm:      {}", stats.policy);
    println!("total accesses: {}", stats.total_accesses);
    println!("page faults:    {}", stats.total_faults);
    println!("fault rate:     {:.2}%", stats.fault_rate());
}
