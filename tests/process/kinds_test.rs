/*!
 * Process Kind Tests
 * Per-kind workloads, outcome details and parameter validation
 */

use pretty_assertions::assert_eq;
use procsim::process::{
    BatchProcess, CpuProcess, DaemonProcess, Device, Entropy, ExecutionContext, IoProcess,
    ManualClock, MemoryProcess, MemoryType, NetworkProcess, Process, ProcessKind, ProcessState,
    ProcessType, Protocol, RealTimeProcess,
};
use procsim::{ProcessError, SimulationConfig};
use std::sync::Arc;

fn context(clock: Arc<ManualClock>, config: SimulationConfig) -> ExecutionContext {
    ExecutionContext::new(clock, Entropy::seeded(9), config)
}

#[test]
fn test_new_process_defaults_per_kind() {
    let cases: Vec<(ProcessKind, ProcessType, u8)> = vec![
        (CpuProcess::new(10, 2).unwrap().into(), ProcessType::Cpu, 7),
        (IoProcess::new(Device::Disk, 1).unwrap().into(), ProcessType::Io, 4),
        (DaemonProcess::new("cron", false).unwrap().into(), ProcessType::Daemon, 3),
        (
            NetworkProcess::new(Protocol::Tcp, 1024, 80).unwrap().into(),
            ProcessType::Network,
            6,
        ),
        (MemoryProcess::new(64, MemoryType::Ram).unwrap().into(), ProcessType::Memory, 8),
        (BatchProcess::new(["a"], "job.sh").unwrap().into(), ProcessType::Batch, 2),
        (RealTimeProcess::new(100, false).unwrap().into(), ProcessType::RealTime, 9),
        (RealTimeProcess::new(100, true).unwrap().into(), ProcessType::RealTime, 10),
    ];

    for (pid, (kind, process_type, priority)) in (1..).zip(cases) {
        let process = Process::new(pid, "p", kind).unwrap();
        assert_eq!(process.process_type(), process_type);
        assert_eq!(process.state(), ProcessState::New, "{process_type}");
        assert_eq!(process.execution_time_ms(), 0, "{process_type}");
        assert_eq!(process.priority(), priority, "{process_type}");
    }
}

#[test]
fn test_io_blocks_on_device() {
    let clock = Arc::new(ManualClock::new());
    let ctx = context(clock.clone(), SimulationConfig::instant().with_base_wait(120, 120));
    let mut process =
        Process::new(1, "reader", IoProcess::new(Device::Disk, 2048).unwrap()).unwrap();

    let outcome = process.execute(&ctx);

    assert_eq!(
        outcome.message(),
        "[PID: 1 | reader] - Estado: TERMINATED - Transferred 2048 bytes via DISK. Blocked: 100ms"
    );
    assert_eq!(process.execution_time_ms(), 120);
    assert_eq!(clock.sleep_count(), 2);
}

#[test]
fn test_io_interrupted_while_blocked() {
    let clock = Arc::new(ManualClock::new());
    let ctx = context(clock.clone(), SimulationConfig::instant());
    let mut process =
        Process::new(1, "kbd", IoProcess::new(Device::Keyboard, 1).unwrap()).unwrap();

    clock.interrupt_after(1);
    assert!(process.execute(&ctx).is_aborted());
    assert_eq!(process.state(), ProcessState::Ready);
}

#[test]
fn test_device_parsing() {
    assert_eq!("keyboard".parse::<Device>().unwrap(), Device::Keyboard);
    assert_eq!(" Network ".parse::<Device>().unwrap(), Device::Network);
    assert!(matches!(
        "floppy".parse::<Device>(),
        Err(ProcessError::InvalidChoice { .. })
    ));
}

#[test]
fn test_daemon_auto_start_tag() {
    let ctx = context(Arc::new(ManualClock::new()), SimulationConfig::instant());
    let mut process =
        Process::new(3, "cron", DaemonProcess::new("cron", true).unwrap()).unwrap();

    let message = process.execute(&ctx).message();
    assert!(message
        .ends_with("Service 'cron' running in background. [Autoiniciable] Monitoring every 30s"));
}

#[test]
fn test_network_packets_in_range() {
    let ctx = context(Arc::new(ManualClock::new()), SimulationConfig::instant());
    let mut process =
        Process::new(4, "curl", NetworkProcess::new(Protocol::Http, 5000, 80).unwrap()).unwrap();

    for _ in 0..20 {
        process.execute(&ctx);
        let ProcessKind::Network(net) = process.kind() else {
            panic!("expected a network process");
        };
        assert!((100..=1000).contains(&net.packets_sent()));
    }
    assert!(process
        .execute(&ctx)
        .message()
        .contains("Protocol HTTP | Port 5000 → 80 | Packets sent: "));
}

#[test]
fn test_network_port_bounds() {
    assert!(NetworkProcess::new(Protocol::Tcp, 0, 80).is_err());
    assert!(NetworkProcess::new(Protocol::Udp, 1, 65536).is_err());
    assert!(NetworkProcess::new(Protocol::Udp, 1, 65535).is_ok());
}

#[test]
fn test_memory_fragmentation_never_negative() {
    let ctx = context(Arc::new(ManualClock::new()), SimulationConfig::instant());
    let kind = MemoryProcess::with_fragmentation(256, MemoryType::Virtual, 0.5).unwrap();
    let mut process = Process::new(5, "swap", kind).unwrap();

    for _ in 0..10 {
        process.execute(&ctx);
    }
    let ProcessKind::Memory(mem) = process.kind() else {
        panic!("expected a memory process");
    };
    assert!(mem.fragmentation() >= 0.0);
    assert!(mem.fragmentation() <= 0.5);
}

#[test]
fn test_memory_initial_fragmentation_range() {
    for _ in 0..50 {
        let mem = MemoryProcess::new(64, MemoryType::Ram).unwrap();
        assert!((0.0..15.0).contains(&mem.fragmentation()));
    }
    assert!(MemoryProcess::with_fragmentation(64, MemoryType::Ram, 100.5).is_err());
}

#[test]
fn test_batch_skips_blank_tasks() {
    let mut config = SimulationConfig::instant();
    config.task_wait_min_ms = 60;
    config.task_wait_max_ms = 60;
    let ctx = context(Arc::new(ManualClock::new()), config);
    let batch = BatchProcess::new(["compress", "  ", "upload"], "backup.sh").unwrap();
    let mut process = Process::new(6, "backup", batch).unwrap();

    let message = process.execute(&ctx).message();

    assert_eq!(
        message,
        "[PID: 6 | backup] - Estado: TERMINATED - Script 'backup.sh' completed. Tasks: 2/3\n  ✓ compress\n  ✓ upload"
    );
    assert_eq!(process.execution_time_ms(), 120);
}

#[test]
fn test_batch_count_resets_between_runs() {
    let ctx = context(Arc::new(ManualClock::new()), SimulationConfig::instant());
    let mut process =
        Process::new(7, "job", BatchProcess::new(["a", "b"], "job.sh").unwrap()).unwrap();

    process.execute(&ctx);
    process.execute(&ctx);
    let ProcessKind::Batch(batch) = process.kind() else {
        panic!("expected a batch process");
    };
    assert_eq!(batch.tasks_completed(), 2);
    assert!(batch.all_tasks_completed());
}

#[test]
fn test_kind_setters_revalidate() {
    let kind = MemoryProcess::with_fragmentation(10, MemoryType::Ram, 3.0).unwrap();
    let mut process = Process::new(8, "swap", kind).unwrap();

    let rejected = process.update_kind(|kind| match kind {
        ProcessKind::Memory(mem) => mem.set_fragmentation(-1.0),
        _ => unreachable!(),
    });
    assert!(rejected.is_err());

    process
        .update_kind(|kind| match kind {
            ProcessKind::Memory(mem) => mem.set_allocated_mb(20),
            _ => unreachable!(),
        })
        .unwrap();
    assert_eq!(
        process.to_string(),
        "Memory [PID=8, Name=swap, State=NEW, Priority=8, Memory=20 MB, Type=RAM, Fragmentation=3.00%]"
    );
}
