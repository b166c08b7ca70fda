/*!
 * Validation Properties
 * Constructors accept exactly their documented ranges
 */

use procsim::process::{CpuProcess, NetworkProcess, Process, Protocol, RealTimeProcess};
use proptest::prelude::*;

proptest! {
    #[test]
    fn cpu_cores_accepted_only_in_range(cores in -50i64..50) {
        let result = CpuProcess::new(10, cores);
        prop_assert_eq!(result.is_ok(), (1..=16).contains(&cores));
    }

    #[test]
    fn ports_accepted_only_in_range(port in -10i64..70_000) {
        let result = NetworkProcess::new(Protocol::Tcp, port, 443);
        prop_assert_eq!(result.is_ok(), (1..=65_535).contains(&port));
    }

    #[test]
    fn priority_accepted_only_in_range(priority in -20i64..30) {
        let mut process = Process::new(1, "p", CpuProcess::new(1, 1).unwrap()).unwrap();
        let accepted = process.set_priority(priority).is_ok();
        prop_assert_eq!(accepted, (1..=10).contains(&priority));
        if !accepted {
            prop_assert_eq!(process.priority(), 7);
        }
    }

    #[test]
    fn realtime_priority_tracks_criticality(deadline in 1i64..10_000, critical in any::<bool>()) {
        let kind = RealTimeProcess::new(deadline, !critical).unwrap();
        let mut process = Process::new(1, "rt", kind).unwrap();
        process.set_critical(critical).unwrap();
        prop_assert_eq!(process.priority(), if critical { 10 } else { 9 });
    }

    #[test]
    fn blank_names_rejected(spaces in " {0,8}") {
        prop_assert!(Process::new(1, &spaces, CpuProcess::new(1, 1).unwrap()).is_err());
    }
}
