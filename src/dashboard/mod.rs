// Dashboard controller: owns session state and view regions, issues fetches, applies answers

// User initiated commands (create, delete, benchmark, filesystem actions)
mod commands;
// Periodic refresh scheduling
mod poller;
// View region models
pub mod regions;
// Pure data -> region renderers
pub mod render;
// Cached reference data
mod state;

pub use commands::ValidationError;

use crate::api::{ApiError, Call, Endpoint, Outcome};
use crate::worker::{Completion, Job};
use commands::Command;
use poller::Poller;
use regions::Regions;
use state::SessionState;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Read-only data sources, each rendering into its own region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fetcher {
    Controller,
    Drives,
    VirtualDrives,
    RaidTypes,
    Health,
    TestDevices,
}

impl Fetcher {
    fn call(self) -> Call {
        match self {
            Fetcher::Controller => Call::Controller,
            Fetcher::Drives => Call::Drives,
            Fetcher::VirtualDrives => Call::VirtualDrives,
            Fetcher::RaidTypes => Call::RaidTypes,
            Fetcher::Health => Call::Health,
            Fetcher::TestDevices => Call::TestDevices,
        }
    }

    pub fn endpoint(self) -> Endpoint {
        self.call().endpoint()
    }
}

/// The dashboard client.
///
/// Never touches the network itself: every request becomes a [`Job`] in the outbox,
/// and answers come back through [`Dashboard::handle`]. Whoever drives the dashboard
/// (the GUI or snapshot mode) moves jobs to a worker and completions back.
pub struct Dashboard {
    state: SessionState,
    regions: Regions,
    poller: Poller,
    /// Newest ticket issued per fetcher; older answers are stale
    latest: HashMap<Fetcher, u64>,
    outbox: Vec<Job>,
    next_ticket: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            regions: Regions::default(),
            poller: Poller::default(),
            latest: HashMap::new(),
            outbox: Vec::new(),
            next_ticket: 1,
        }
    }

    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    /// Mutable access for input widgets (text fields, checkboxes).
    pub fn regions_mut(&mut self) -> &mut Regions {
        &mut self.regions
    }

    /// Hand every queued job to the caller.
    pub fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.outbox)
    }

    #[cfg(test)]
    pub fn has_jobs(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Initial load: every read fetcher except health, then arm the poller.
    pub fn start(&mut self, now: Instant) {
        self.refresh_all();
        self.fetch(Fetcher::RaidTypes);
        self.fetch(Fetcher::TestDevices);
        self.poller.start(now);
    }

    /// Run the periodic refresh if it is due. Returns true when it ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.poller.due(now) {
            self.refresh_all();
            true
        } else {
            false
        }
    }

    pub fn until_next_refresh(&self, now: Instant) -> Option<Duration> {
        self.poller.until_due(now)
    }

    /// Controller, physical drives and virtual drives. Reference data is not refreshed.
    pub fn refresh_all(&mut self) {
        self.fetch(Fetcher::Controller);
        self.refresh_drive_lists();
    }

    pub fn refresh_drive_lists(&mut self) {
        self.fetch(Fetcher::Drives);
        self.fetch(Fetcher::VirtualDrives);
    }

    /// Scan drive health on demand.
    pub fn load_health(&mut self) {
        render::render_health_pending(&mut self.regions.health);
        self.fetch(Fetcher::Health);
    }

    fn issue(&mut self, call: Call) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        debug!(ticket, endpoint = %call.endpoint(), "queueing request");
        self.outbox.push(Job { ticket, call });
        ticket
    }

    fn fetch(&mut self, fetcher: Fetcher) {
        let ticket = self.issue(fetcher.call());
        self.latest.insert(fetcher, ticket);
    }

    /// Unwraps a read result if it answers the newest request of its fetcher.
    fn accept<T>(&self, fetcher: Fetcher, ticket: u64, result: Result<T, ApiError>) -> Option<T> {
        if self.latest.get(&fetcher) != Some(&ticket) {
            debug!(ticket, endpoint = %fetcher.endpoint(), "dropping stale response");
            return None;
        }
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(endpoint = %fetcher.endpoint(), error = %e, "fetch failed");
                None
            }
        }
    }

    /// Apply the answer to a previously issued job.
    pub fn handle(&mut self, completion: Completion) {
        let Completion { ticket, outcome } = completion;
        match outcome {
            Outcome::Controller(result) => {
                if let Some(info) = self.accept(Fetcher::Controller, ticket, result) {
                    render::render_controller(&info, &mut self.regions.controller);
                }
            }
            Outcome::Drives(result) => {
                if let Some(drives) = self.accept(Fetcher::Drives, ticket, result) {
                    render::render_drives(&drives, &mut self.regions.drives);
                    self.state.replace_drives(drives);
                    // Offer the fresh list unless the user already started ticking drives
                    if self.regions.dialogs.create && self.regions.selection.checked_slots().is_empty() {
                        self.update_drive_selection();
                    }
                }
            }
            Outcome::VirtualDrives(result) => {
                if let Some(vdrives) = self.accept(Fetcher::VirtualDrives, ticket, result) {
                    render::render_vdrives(&vdrives, &mut self.regions.vdrives);
                }
            }
            Outcome::RaidTypes(result) => {
                if let Some(types) = self.accept(Fetcher::RaidTypes, ticket, result) {
                    render::render_raid_types(&types, &mut self.regions.raid_types);
                    self.state.replace_raid_types(types);
                    self.update_drive_selection();
                }
            }
            Outcome::Health(result) => {
                if self.latest.get(&Fetcher::Health) != Some(&ticket) {
                    debug!(ticket, "dropping stale health response");
                    return;
                }
                match result {
                    Ok(health) => render::render_health(&health, &mut self.regions.health),
                    Err(e) => {
                        warn!(endpoint = %Endpoint::Health, error = %e, "fetch failed");
                        render::render_health_error(&mut self.regions.health);
                    }
                }
            }
            Outcome::TestDevices(result) => {
                if let Some(devices) = self.accept(Fetcher::TestDevices, ticket, result) {
                    render::render_test_devices(&devices, &mut self.regions.speed);
                }
            }
            Outcome::SpeedTest(result) => self.finish_speed_test(result),
            Outcome::CreateArray(result) => self.finish_command(Command::CreateArray, result),
            Outcome::DeleteArray(result) => self.finish_command(Command::DeleteArray, result),
            Outcome::Mount(result) => self.finish_command(Command::Mount, result),
            Outcome::Unmount(result) => self.finish_command(Command::Unmount, result),
            Outcome::Format(result) => self.finish_command(Command::Format, result),
        }
    }
}
