// Headless mode: load every panel once and print the rendered regions as text

use crate::api::Backend;
use crate::dashboard::Dashboard;
use crate::worker::Worker;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Run the initial load plus a health scan to completion and render the result.
pub fn capture(backend: Arc<dyn Backend>) -> String {
    let worker = Worker::new(backend);
    let mut dashboard = Dashboard::new();
    dashboard.start(Instant::now());
    dashboard.load_health();

    let mut in_flight = 0usize;
    loop {
        for job in dashboard.take_jobs() {
            worker.submit(job);
            in_flight += 1;
        }
        if in_flight == 0 {
            break;
        }
        let Some(completion) = worker.recv() else {
            warn!(in_flight, "worker channel closed early");
            break;
        };
        in_flight -= 1;
        dashboard.handle(completion);
    }

    info!("snapshot complete");
    dashboard.regions().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoint;
    use crate::api::fake::FakeBackend;
    use crate::models::{ControllerInfo, DriveHealth, PhysicalDrive, VirtualDrive};

    fn backend() -> FakeBackend {
        FakeBackend {
            controller: ControllerInfo {
                model: "MegaRAID 9361-8i".into(),
                serial: "SK12345678".into(),
                firmware: "4.680.00-8527".into(),
                status: "Online".into(),
            },
            drives: vec![PhysicalDrive {
                slot: "252:0".into(),
                did: "10".into(),
                state: "Onln".into(),
                dg: "0".into(),
                size: "3.637 TB".into(),
                interface: "SAS".into(),
                media: "HDD".into(),
                model: "HGST HUS726040AL".into(),
            }],
            vdrives: vec![VirtualDrive {
                dg_vd: "0/0".into(),
                raid_type: "RAID1".into(),
                state: "Optl".into(),
                access: "RW".into(),
                size: "3.637 TB".into(),
                device: Some("/dev/sdb".into()),
                ..Default::default()
            }],
            health: vec![DriveHealth {
                slot: "252:0".into(),
                status: "Good".into(),
                overall_health: "Good".into(),
                temperature: "34C".into(),
                power_on_hours: "12000".into(),
                media_errors: "0".into(),
                predictive_failures: "0".into(),
            }],
            devices: vec!["/dev/sdb".into()],
            ..Default::default()
        }
    }

    #[test]
    fn snapshot_contains_every_panel() {
        let backend = Arc::new(backend());
        let text = capture(backend.clone());

        assert!(text.contains("Model: MegaRAID 9361-8i"));
        assert!(text.contains("Status: [Online]<success>"));
        assert!(text.contains("252:0 | 10 | [Onln]<success>"));
        assert!(text.contains("`/dev/sdb`"));
        assert!(text.contains("34C<success>"));
        assert!(!text.contains("Loading..."));

        let calls = backend.calls();
        assert_eq!(calls.len(), 6);
        assert!(calls.contains(&Endpoint::Health));
    }

    #[test]
    fn snapshot_is_stable() {
        let first = capture(Arc::new(backend()));
        let second = capture(Arc::new(backend()));
        assert_eq!(first, second);
    }

    #[test]
    fn unreachable_backend_leaves_placeholders() {
        let text = capture(Arc::new(FakeBackend {
            fail_with: Some(503),
            ..Default::default()
        }));

        assert!(text.contains("Status: [Unknown]<secondary>"));
        assert!(text.contains("~ Loading..."));
        assert!(text.contains("Error loading health data"));
    }
}
