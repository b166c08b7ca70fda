/*!
 * Process Registry Tests
 * Registration, lookup, ordering, bulk execution and bookkeeping
 */

use pretty_assertions::assert_eq;
use procsim::process::{
    CpuProcess, DaemonProcess, ExecutionOutcome, ManualClock, Process, ProcessKind,
    ProcessRegistry, ProcessState, ProcessType, RealTimeProcess,
};
use procsim::{FailurePolicy, ProcessError, SimulationConfig};
use std::sync::Arc;

fn registry_with(clock: Arc<ManualClock>, config: SimulationConfig) -> ProcessRegistry {
    ProcessRegistry::builder()
        .with_config(config.with_seed(42))
        .with_clock(clock)
        .with_private_pids()
        .build()
        .unwrap()
}

fn registry() -> ProcessRegistry {
    registry_with(
        Arc::new(ManualClock::new()),
        SimulationConfig::instant().with_base_wait(100, 100),
    )
}

fn cpu() -> CpuProcess {
    CpuProcess::new(100, 2).unwrap()
}

#[test]
fn test_register_and_lookup() {
    let reg = registry();
    let pid = reg.register("gcc", cpu()).unwrap();

    assert_eq!(pid, 1000);
    let process = reg.get_process(pid).unwrap();
    assert_eq!(process.name(), "gcc");
    assert_eq!(process.priority(), 7);
    assert_eq!(process.state(), ProcessState::New);
    assert!(reg.contains(pid));
    assert!(reg.get_process(9999).is_none());
}

#[test]
fn test_lookup_returns_a_copy() {
    let reg = registry();
    let pid = reg.register("gcc", cpu()).unwrap();

    let mut copy = reg.get_process(pid).unwrap();
    copy.set_priority(1).unwrap();

    assert_eq!(reg.get_process(pid).unwrap().priority(), 7);
}

#[test]
fn test_duplicate_pid_rejected() {
    let reg = registry();
    reg.submit(Process::new(1001, "a", cpu()).unwrap()).unwrap();

    let result = reg.submit(Process::new(1001, "b", cpu()).unwrap());
    assert!(matches!(result, Err(ProcessError::DuplicatePid(1001))));
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.get_process(1001).unwrap().name(), "a");
}

#[test]
fn test_remove() {
    let reg = registry();
    let a = reg.register("a", cpu()).unwrap();
    let b = reg.register("b", cpu()).unwrap();

    assert!(reg.remove(a));
    assert!(!reg.remove(a));
    assert_eq!(reg.list_processes().len(), 1);
    assert_eq!(reg.list_processes()[0].pid(), b);
}

#[test]
fn test_list_by_type_and_stats() {
    let reg = registry();
    reg.register("a", cpu()).unwrap();
    reg.register("b", DaemonProcess::new("cron", true).unwrap()).unwrap();
    reg.register("c", cpu()).unwrap();

    let cpus: Vec<String> = reg
        .list_by_type(ProcessType::Cpu)
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(cpus, vec!["a", "c"]);
    assert!(reg.list_by_type(ProcessType::Batch).is_empty());

    let stats = reg.stats_by_type().to_labeled_map();
    assert_eq!(stats["Total"], 3);
    assert_eq!(stats["ProcesoCPU"], 2);
    assert_eq!(stats["Daemon"], 1);
    assert_eq!(stats["ProcesoRed"], 0);
    assert_eq!(stats.len(), 8);
}

#[test]
fn test_sorted_by_priority_is_stable() {
    let reg = registry();
    let names = ["A", "B", "C", "D"];
    for (name, priority) in names.iter().zip([2, 8, 2, 9]) {
        let pid = reg.register(name, cpu()).unwrap();
        reg.set_priority(pid, priority).unwrap();
    }

    let order: Vec<String> = reg
        .sorted_by_priority()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(order, vec!["D", "B", "A", "C"]);

    // Registration order is untouched
    assert_eq!(reg.list_processes()[0].name(), "A");
}

#[test]
fn test_execute_all_records_history() {
    let reg = registry();
    reg.register("a", cpu()).unwrap();
    reg.register("b", cpu()).unwrap();
    reg.register("c", DaemonProcess::new("sshd", false).unwrap()).unwrap();

    let outcomes = reg.execute_all();
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(ExecutionOutcome::is_completed));
    assert_eq!(reg.history().len(), 3);
    assert_eq!(
        reg.history()[2],
        "[PID: 1002 | c] - Estado: TERMINATED - Service 'sshd' running in background. Monitoring every 30s"
    );

    let states = reg.stats_by_state();
    assert_eq!(states.count(ProcessState::Terminated), 3);
    assert_eq!(states.count(ProcessState::New), 0);
    for process in reg.list_processes() {
        assert_eq!(process.execution_time_ms(), 100);
    }
}

#[test]
fn test_execute_single_and_unknown() {
    let reg = registry();
    let pid = reg.register("gcc", cpu()).unwrap();

    let outcome = reg.execute(pid);
    assert_eq!(
        outcome.message(),
        "[PID: 1000 | gcc] - Estado: TERMINATED - Executed 100 operations on 2 cores. Time: 100ms"
    );

    let missing = reg.execute(9999);
    assert_eq!(missing, ExecutionOutcome::NotFound { pid: 9999 });
    assert_eq!(missing.to_string(), "Process not found with PID: 9999");
    assert_eq!(reg.history().len(), 1);
}

#[test]
fn test_rerun_terminated_process() {
    let reg = registry();
    let pid = reg.register("gcc", cpu()).unwrap();

    assert!(reg.execute(pid).is_completed());
    assert!(reg.execute(pid).is_completed());
    assert_eq!(reg.get_process(pid).unwrap().state(), ProcessState::Terminated);
    assert_eq!(reg.history().len(), 2);
}

#[test]
fn test_interrupted_execution_fail_fast() {
    let clock = Arc::new(ManualClock::new());
    let reg = registry_with(clock.clone(), SimulationConfig::instant());
    let first = reg.register("a", cpu()).unwrap();
    reg.register("b", cpu()).unwrap();
    reg.register("c", cpu()).unwrap();

    clock.interrupt_after(1);
    let outcomes = reg.execute_all();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_aborted());
    assert_eq!(outcomes[0].pid(), first);
    let process = reg.get_process(first).unwrap();
    assert_eq!(process.state(), ProcessState::Ready);
    assert_eq!(process.execution_time_ms(), 0);
    assert!(reg.history().is_empty());
    assert_eq!(reg.stats_by_state().count(ProcessState::New), 2);
}

#[test]
fn test_interrupted_execution_continue() {
    let clock = Arc::new(ManualClock::new());
    let reg = registry_with(
        clock.clone(),
        SimulationConfig::instant().with_failure_policy(FailurePolicy::Continue),
    );
    for name in ["a", "b", "c"] {
        reg.register(name, cpu()).unwrap();
    }

    clock.interrupt_after(2);
    let outcomes = reg.execute_all();

    let aborted: Vec<bool> = outcomes.iter().map(ExecutionOutcome::is_aborted).collect();
    assert_eq!(aborted, vec![false, true, false]);
    assert_eq!(reg.history().len(), 2);

    // A retry picks the process up from Ready
    assert!(reg.execute(outcomes[1].pid()).is_completed());
}

#[test]
fn test_realtime_deadline_verdicts() {
    let clock = Arc::new(ManualClock::with_overhead(std::time::Duration::from_millis(50)));
    let reg = registry_with(clock, SimulationConfig::instant().with_base_wait(100, 100));
    let late = reg.register("late", RealTimeProcess::new(120, true).unwrap()).unwrap();
    let ok = reg.register("ok", RealTimeProcess::new(200, false).unwrap()).unwrap();

    let late_outcome = reg.execute(late).message();
    assert!(late_outcome.ends_with(
        "Deadline: 120ms | Actual time: 150ms ✗ EXCEEDED [CRÍTICO] | Jitter: 50.00ms"
    ));
    assert_eq!(reg.get_process(late).unwrap().execution_time_ms(), 150);

    let ok_outcome = reg.execute(ok).message();
    assert!(
        ok_outcome.ends_with("Deadline: 200ms | Actual time: 150ms ✓ PASSED | Jitter: 50.00ms")
    );
}

#[test]
fn test_set_priority_and_critical_through_update() {
    let reg = registry();
    let pid = reg.register("abs", RealTimeProcess::new(50, false).unwrap()).unwrap();
    assert_eq!(reg.get_process(pid).unwrap().priority(), 9);

    reg.update(pid, |p| p.set_critical(true)).unwrap();
    assert_eq!(reg.get_process(pid).unwrap().priority(), 10);

    assert!(matches!(
        reg.set_priority(pid, 0),
        Err(ProcessError::OutOfRange { .. })
    ));
    assert_eq!(reg.get_process(pid).unwrap().priority(), 10);
}

#[test]
fn test_registered_kind_cannot_be_swapped() {
    let reg = registry();
    let pid = reg.register("gcc", cpu()).unwrap();

    let result = reg.update(pid, |p| {
        p.update_kind(|kind| {
            *kind = ProcessKind::from(RealTimeProcess::new(50, true)?);
            Ok(())
        })
    });

    assert!(matches!(result, Err(ProcessError::WrongKind { .. })));
    let process = reg.get_process(pid).unwrap();
    assert_eq!(process.process_type(), ProcessType::Cpu);
    assert_eq!(process.priority(), 7);
    assert_eq!(reg.stats_by_type().count(ProcessType::RealTime), 0);
}

#[test]
fn test_next_pid_and_clear() {
    let reg = registry();
    assert_eq!(reg.next_pid().unwrap(), 1000);
    assert_eq!(reg.next_pid().unwrap(), 1001);
    let pid = reg.register("a", cpu()).unwrap();
    assert_eq!(pid, 1002);

    reg.execute(pid);
    reg.clear();
    assert!(reg.is_empty());
    assert_eq!(reg.history().len(), 1);
    assert_eq!(reg.register("b", cpu()).unwrap(), 1003);

    reg.clear_history();
    assert!(reg.history().is_empty());
}

#[test]
fn test_summary() {
    let reg = registry();
    let empty = reg.summary();
    assert_eq!(empty.process_count, 0);
    assert_eq!(empty.next_pid, 1000);
    assert_eq!(empty.average_priority, None);

    reg.register("a", cpu()).unwrap();
    reg.register("b", DaemonProcess::new("x", false).unwrap()).unwrap();
    reg.execute_all();

    let summary = reg.summary();
    assert_eq!(summary.process_count, 2);
    assert_eq!(summary.execution_count, 2);
    assert_eq!(summary.next_pid, 1002);
    assert_eq!(summary.average_priority, Some(5.0));
    assert!(summary.to_string().contains("Average priority: 5.00"));
}

#[test]
fn test_registries_share_global_pids() {
    let a = ProcessRegistry::new();
    let b = ProcessRegistry::default();
    assert!(a.pid_allocator().shares_counter_with(b.pid_allocator()));

    let first = a.next_pid().unwrap();
    let second = b.next_pid().unwrap();
    assert!(second > first);
    assert!(first >= 1000);
}
