mod report;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use vm::{Mmu, MmuConfig, Policy, VmError};

#[derive(Parser, Debug)]
#[command(about = "Demand paging simulator with FIFO and LRU replacement")]
struct Args {
    /// Replacement policy (fifo or lru). Asked interactively when omitted.
    #[arg(short, long)]
    policy: Option<Policy>,

    #[arg(long, default_value_t = 4096)]
    page_size: usize,

    /// Physical memory in bytes, a multiple of the page size.
    #[arg(long, default_value_t = 16384)]
    memory_size: usize,
}

fn prompt_policy() -> Result<Policy> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Replacement algorithm (1 - FIFO, 2 - LRU): ");
        io::stdout().flush()?;

        let line = lines
            .next()
            .context("stdin closed before an algorithm was chosen")??;

        match line.parse() {
            Ok(policy) => return Ok(policy),
            Err(err) => println!("{}", err),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let policy = match args.policy {
        Some(policy) => policy,
        None => prompt_policy()?,
    };

    let config = MmuConfig::new(args.page_size, args.memory_size, policy);
    let mut mmu = Mmu::new(config).context("cannot start the simulator")?;

    let p1 = mmu.create_process(20000)?;
    let p2 = mmu.create_process(12000)?;

    let script = [
        (p1, 0x0000),
        (p1, 0x1A2B),
        (p2, 0x0100),
        (p1, 0x2F00),
        (p2, 0x1800),
        (p1, 0x0004),
        (p2, 0x2EDF),
        (p1, 0x4E1F),
        (p2, 0x0200),
        (p1, 0x1000),
    ];

    for (pid, address) in script {
        match mmu.read(pid, address) {
            Ok(translation) => report::print_translation(&translation),
            Err(err @ (VmError::AddressOutOfBounds { .. } | VmError::ProcessNotFound(_))) => {
                warn!("access skipped: {}", err);
            }
            Err(err) => return Err(err.into()),
        }
    }

    report::print_memory(&mmu);
    report::print_statistics(&mmu.shutdown());

    Ok(())
}
