/*!
 * Process Simulator - Demo Entry Point
 *
 * Registers one process of every kind, runs them all and prints:
 * - Execution outcomes
 * - Counts by kind and by state
 * - The registry summary
 */

use miette::{IntoDiagnostic, Result};
use tracing::info;

use procsim::init_tracing;
use procsim::process::{
    BatchProcess, CpuProcess, DaemonProcess, Device, IoProcess, MemoryProcess, MemoryType,
    NetworkProcess, ProcessRegistry, Protocol, RealTimeProcess,
};
use procsim::SimulationConfig;

fn main() -> Result<()> {
    init_tracing();

    let config = SimulationConfig::from_env()?;
    info!(?config, "Process simulator starting...");

    let registry = ProcessRegistry::builder()
        .with_config(config)
        .with_private_pids()
        .build()?;

    registry.register("compiler", CpuProcess::new(50_000, 4)?)?;
    registry.register("disk-reader", IoProcess::new(Device::Disk, 4096)?)?;
    registry.register("sshd", DaemonProcess::new("ssh", true)?)?;
    registry.register("web-client", NetworkProcess::new(Protocol::Https, 49152, 443)?)?;
    registry.register("allocator", MemoryProcess::new(512, MemoryType::Ram)?)?;
    registry.register(
        "nightly-backup",
        BatchProcess::new(["compress logs", "upload archive", "rotate"], "backup.sh")?,
    )?;
    registry.register("abs-controller", RealTimeProcess::new(400, true)?)?;

    println!("=== REGISTERED PROCESSES (by priority) ===");
    for process in registry.sorted_by_priority() {
        println!("{process}");
    }
    println!();

    println!("=== EXECUTION ===");
    for outcome in registry.execute_all() {
        println!("{outcome}");
    }
    println!();

    println!("=== STATISTICS ===");
    let by_type = serde_json::to_string_pretty(&registry.stats_by_type().to_labeled_map())
        .into_diagnostic()?;
    println!("{by_type}");
    let by_state = serde_json::to_string_pretty(&registry.stats_by_state()).into_diagnostic()?;
    println!("{by_state}");
    println!();

    print!("{}", registry.summary());

    info!("Process simulator finished");
    Ok(())
}
