use proptest::prelude::*;
use vm::{AccessEvent, Mmu, MmuConfig, Policy, ProcessId, Translation};

const PAGE_SIZE: usize = 4096;

fn four_frame_mmu(policy: Policy) -> (Mmu, ProcessId) {
    let mut mmu = Mmu::new(MmuConfig::new(PAGE_SIZE, 16384, policy)).unwrap();
    let pid = mmu.create_process(20000).unwrap();

    (mmu, pid)
}

fn touch_pages(mmu: &mut Mmu, pid: ProcessId, pages: &[usize]) -> Vec<Translation> {
    pages
        .iter()
        .map(|page| mmu.read(pid, page * PAGE_SIZE).unwrap())
        .collect()
}

#[test]
fn fifo_evicts_in_load_order() {
    let (mut mmu, pid) = four_frame_mmu(Policy::Fifo);

    let trace = touch_pages(&mut mmu, pid, &[0, 1, 2, 3, 4, 0]);

    assert!(trace.iter().all(|t| t.event.is_fault()));
    assert_eq!(
        trace[4].event,
        AccessEvent::FaultEvictedFrame {
            frame: 0,
            evicted_process: pid,
            evicted_page: 0
        }
    );
    assert_eq!(
        trace[5].event,
        AccessEvent::FaultEvictedFrame {
            frame: 1,
            evicted_process: pid,
            evicted_page: 1
        }
    );

    let stats = mmu.statistics();
    assert_eq!(stats.total_faults, 6);
    assert_eq!(stats.total_accesses, 6);
    assert_eq!(stats.fault_rate(), 100.0);
    assert!(mmu.check_consistency());
}

#[test]
fn lru_keeps_recently_used_page() {
    let (mut mmu, pid) = four_frame_mmu(Policy::Lru);

    let trace = touch_pages(&mut mmu, pid, &[0, 1, 2, 3, 0, 4]);

    assert_eq!(trace[4].event, AccessEvent::Hit);
    assert_eq!(trace[4].frame, 0);
    assert_eq!(
        trace[5].event,
        AccessEvent::FaultEvictedFrame {
            frame: 1,
            evicted_process: pid,
            evicted_page: 1
        }
    );
    assert_eq!(mmu.statistics().total_faults, 5);
    assert_eq!(mmu.statistics().total_accesses, 6);
}

#[test]
fn fifo_ignores_recent_use() {
    let (mut mmu, pid) = four_frame_mmu(Policy::Fifo);

    let trace = touch_pages(&mut mmu, pid, &[0, 1, 2, 3, 0, 4]);

    assert_eq!(trace[4].event, AccessEvent::Hit);
    assert_eq!(
        trace[5].event,
        AccessEvent::FaultEvictedFrame {
            frame: 0,
            evicted_process: pid,
            evicted_page: 0
        }
    );
}

#[test]
fn frames_are_shared_across_processes() {
    let mut mmu = Mmu::new(MmuConfig::new(PAGE_SIZE, 2 * PAGE_SIZE, Policy::Fifo)).unwrap();
    let a = mmu.create_process(2 * PAGE_SIZE).unwrap();
    let b = mmu.create_process(PAGE_SIZE).unwrap();

    mmu.read(a, 0).unwrap();
    mmu.read(a, PAGE_SIZE).unwrap();
    let t = mmu.read(b, 123).unwrap();

    assert_eq!(
        t.event,
        AccessEvent::FaultEvictedFrame {
            frame: 0,
            evicted_process: a,
            evicted_page: 0
        }
    );
    assert_eq!(t.physical_address, 123);
    assert!(mmu.check_consistency());
}

#[test]
fn translation_reports_time_before_increment() {
    let (mut mmu, pid) = four_frame_mmu(Policy::Lru);

    let trace = touch_pages(&mut mmu, pid, &[2, 2, 3]);

    let times: Vec<u64> = trace.iter().map(|t| t.timestamp).collect();
    assert_eq!(times, vec![0, 1, 2]);
    assert_eq!(mmu.current_time(), 3);
}

#[test]
fn physical_address_keeps_offset() {
    let (mut mmu, pid) = four_frame_mmu(Policy::Fifo);

    mmu.read(pid, 0).unwrap();
    let t = mmu.read(pid, 3 * PAGE_SIZE + 0x123).unwrap();

    assert_eq!(t.page_number, 3);
    assert_eq!(t.offset, 0x123);
    assert_eq!(t.frame, 1);
    assert_eq!(t.physical_address, PAGE_SIZE + 0x123);
}

fn replay(policy: Policy, sizes: &[usize], accesses: &[(usize, usize)]) -> (Mmu, Vec<Translation>) {
    let mut mmu = Mmu::new(MmuConfig::new(64, 3 * 64, policy)).unwrap();
    let pids: Vec<ProcessId> = sizes.iter().map(|&size| mmu.create_process(size).unwrap()).collect();

    let trace = accesses
        .iter()
        .filter_map(|&(which, address)| mmu.read(pids[which % pids.len()], address).ok())
        .collect();

    (mmu, trace)
}

fn any_policy() -> impl Strategy<Value = Policy> {
    prop_oneof![Just(Policy::Fifo), Just(Policy::Lru)]
}

proptest! {
    #[test]
    fn tables_stay_consistent(
        policy in any_policy(),
        sizes in prop::collection::vec(1usize..400, 1..4),
        accesses in prop::collection::vec((0usize..4, 0usize..400), 0..80),
    ) {
        let (mmu, trace) = replay(policy, &sizes, &accesses);
        let stats = mmu.statistics();

        prop_assert!(mmu.check_consistency());
        prop_assert!(stats.total_faults <= stats.total_accesses);
        prop_assert_eq!(stats.total_accesses, trace.len() as u64);
        prop_assert_eq!(mmu.current_time(), trace.len() as u64);
        prop_assert!(mmu.frames().occupied_count() <= mmu.frames().len());
    }

    #[test]
    fn replay_is_deterministic(
        policy in any_policy(),
        sizes in prop::collection::vec(1usize..400, 1..4),
        accesses in prop::collection::vec((0usize..4, 0usize..400), 0..80),
    ) {
        let (first, first_trace) = replay(policy, &sizes, &accesses);
        let (second, second_trace) = replay(policy, &sizes, &accesses);

        prop_assert_eq!(first_trace, second_trace);
        prop_assert_eq!(first.statistics(), second.statistics());
    }

    #[test]
    fn rereading_resident_page_never_faults(address in 0usize..20000, repeats in 1usize..10) {
        let (mut mmu, pid) = four_frame_mmu(Policy::Lru);

        mmu.read(pid, address).unwrap();
        for _ in 0..repeats {
            prop_assert_eq!(mmu.read(pid, address).unwrap().event, AccessEvent::Hit);
        }
        prop_assert_eq!(mmu.statistics().total_faults, 1);
    }
}
