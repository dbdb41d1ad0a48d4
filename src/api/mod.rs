// Backend contract: endpoints, the Backend trait and the request/outcome vocabulary

// Blocking HTTP implementation of the backend
mod http;

pub use http::HttpBackend;

use crate::models::{
    CommandResponse, ControllerInfo, CreateArrayRequest, DeleteArrayRequest, DriveHealth,
    FormatRequest, MountRequest, PhysicalDrive, RaidTypeDescriptor, SpeedTestRequest,
    SpeedTestResult, UnmountRequest, VirtualDrive,
};
use std::fmt;

/// Every route the dashboard talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Controller,
    Drives,
    VirtualDrives,
    RaidTypes,
    Health,
    TestDevices,
    SpeedTest,
    CreateArray,
    DeleteArray,
    Mount,
    Unmount,
    Format,
}

impl Endpoint {
    /// Path relative to the backend base URL
    pub fn path(self) -> &'static str {
        match self {
            Self::Controller => "/api/controller",
            Self::Drives => "/api/drives",
            Self::VirtualDrives => "/api/vdrives",
            Self::RaidTypes => "/api/raid_types",
            Self::Health => "/api/health",
            Self::TestDevices => "/api/test_devices",
            Self::SpeedTest => "/api/speed_test",
            Self::CreateArray => "/api/create_raid",
            Self::DeleteArray => "/api/delete_raid",
            Self::Mount => "/api/mount",
            Self::Unmount => "/api/unmount",
            Self::Format => "/api/format",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Failure talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Could not start request: {0}")]
    Spawn(String),
}

/// Operations the RAID management backend exposes.
///
/// Implementations must be shareable across worker threads.
pub trait Backend: Send + Sync {
    fn controller(&self) -> Result<ControllerInfo, ApiError>;
    fn drives(&self) -> Result<Vec<PhysicalDrive>, ApiError>;
    fn virtual_drives(&self) -> Result<Vec<VirtualDrive>, ApiError>;
    fn raid_types(&self) -> Result<Vec<RaidTypeDescriptor>, ApiError>;
    fn health(&self) -> Result<Vec<DriveHealth>, ApiError>;
    fn test_devices(&self) -> Result<Vec<String>, ApiError>;
    fn speed_test(&self, request: &SpeedTestRequest) -> Result<SpeedTestResult, ApiError>;
    fn create_array(&self, request: &CreateArrayRequest) -> Result<CommandResponse, ApiError>;
    fn delete_array(&self, request: &DeleteArrayRequest) -> Result<CommandResponse, ApiError>;
    fn mount(&self, request: &MountRequest) -> Result<CommandResponse, ApiError>;
    fn unmount(&self, request: &UnmountRequest) -> Result<CommandResponse, ApiError>;
    fn format(&self, request: &FormatRequest) -> Result<CommandResponse, ApiError>;
}

/// A single backend request, ready to be executed on any thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Controller,
    Drives,
    VirtualDrives,
    RaidTypes,
    Health,
    TestDevices,
    SpeedTest(SpeedTestRequest),
    CreateArray(CreateArrayRequest),
    DeleteArray(DeleteArrayRequest),
    Mount(MountRequest),
    Unmount(UnmountRequest),
    Format(FormatRequest),
}

impl Call {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Controller => Endpoint::Controller,
            Self::Drives => Endpoint::Drives,
            Self::VirtualDrives => Endpoint::VirtualDrives,
            Self::RaidTypes => Endpoint::RaidTypes,
            Self::Health => Endpoint::Health,
            Self::TestDevices => Endpoint::TestDevices,
            Self::SpeedTest(_) => Endpoint::SpeedTest,
            Self::CreateArray(_) => Endpoint::CreateArray,
            Self::DeleteArray(_) => Endpoint::DeleteArray,
            Self::Mount(_) => Endpoint::Mount,
            Self::Unmount(_) => Endpoint::Unmount,
            Self::Format(_) => Endpoint::Format,
        }
    }
}

/// Typed result of a [`Call`].
#[derive(Debug)]
pub enum Outcome {
    Controller(Result<ControllerInfo, ApiError>),
    Drives(Result<Vec<PhysicalDrive>, ApiError>),
    VirtualDrives(Result<Vec<VirtualDrive>, ApiError>),
    RaidTypes(Result<Vec<RaidTypeDescriptor>, ApiError>),
    Health(Result<Vec<DriveHealth>, ApiError>),
    TestDevices(Result<Vec<String>, ApiError>),
    SpeedTest(Result<SpeedTestResult, ApiError>),
    CreateArray(Result<CommandResponse, ApiError>),
    DeleteArray(Result<CommandResponse, ApiError>),
    Mount(Result<CommandResponse, ApiError>),
    Unmount(Result<CommandResponse, ApiError>),
    Format(Result<CommandResponse, ApiError>),
}

impl Outcome {
    /// The outcome of a call to `endpoint` that never reached the backend.
    pub fn failed(endpoint: Endpoint, err: ApiError) -> Self {
        match endpoint {
            Endpoint::Controller => Self::Controller(Err(err)),
            Endpoint::Drives => Self::Drives(Err(err)),
            Endpoint::VirtualDrives => Self::VirtualDrives(Err(err)),
            Endpoint::RaidTypes => Self::RaidTypes(Err(err)),
            Endpoint::Health => Self::Health(Err(err)),
            Endpoint::TestDevices => Self::TestDevices(Err(err)),
            Endpoint::SpeedTest => Self::SpeedTest(Err(err)),
            Endpoint::CreateArray => Self::CreateArray(Err(err)),
            Endpoint::DeleteArray => Self::DeleteArray(Err(err)),
            Endpoint::Mount => Self::Mount(Err(err)),
            Endpoint::Unmount => Self::Unmount(Err(err)),
            Endpoint::Format => Self::Format(Err(err)),
        }
    }
}

/// Runs one call against the backend. Blocks until the backend answers.
pub fn execute(backend: &dyn Backend, call: Call) -> Outcome {
    match call {
        Call::Controller => Outcome::Controller(backend.controller()),
        Call::Drives => Outcome::Drives(backend.drives()),
        Call::VirtualDrives => Outcome::VirtualDrives(backend.virtual_drives()),
        Call::RaidTypes => Outcome::RaidTypes(backend.raid_types()),
        Call::Health => Outcome::Health(backend.health()),
        Call::TestDevices => Outcome::TestDevices(backend.test_devices()),
        Call::SpeedTest(req) => Outcome::SpeedTest(backend.speed_test(&req)),
        Call::CreateArray(req) => Outcome::CreateArray(backend.create_array(&req)),
        Call::DeleteArray(req) => Outcome::DeleteArray(backend.delete_array(&req)),
        Call::Mount(req) => Outcome::Mount(backend.mount(&req)),
        Call::Unmount(req) => Outcome::Unmount(backend.unmount(&req)),
        Call::Format(req) => Outcome::Format(backend.format(&req)),
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory backend for tests.

    use super::*;
    use std::sync::Mutex;

    /// Serves canned data and records every call it receives.
    #[derive(Default)]
    pub struct FakeBackend {
        pub controller: ControllerInfo,
        pub drives: Vec<PhysicalDrive>,
        pub vdrives: Vec<VirtualDrive>,
        pub raid_types: Vec<RaidTypeDescriptor>,
        pub health: Vec<DriveHealth>,
        pub devices: Vec<String>,
        pub speed: SpeedTestResult,
        pub command: CommandResponse,
        /// When set, every read fails with this HTTP status
        pub fail_with: Option<u16>,
        pub calls: Mutex<Vec<Endpoint>>,
    }

    impl FakeBackend {
        fn record<T: Clone>(&self, endpoint: Endpoint, value: &T) -> Result<T, ApiError> {
            self.calls.lock().unwrap().push(endpoint);
            match self.fail_with {
                Some(status) => Err(ApiError::Http(status)),
                None => Ok(value.clone()),
            }
        }

        pub fn calls(&self) -> Vec<Endpoint> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Backend for FakeBackend {
        fn controller(&self) -> Result<ControllerInfo, ApiError> {
            self.record(Endpoint::Controller, &self.controller)
        }
        fn drives(&self) -> Result<Vec<PhysicalDrive>, ApiError> {
            self.record(Endpoint::Drives, &self.drives)
        }
        fn virtual_drives(&self) -> Result<Vec<VirtualDrive>, ApiError> {
            self.record(Endpoint::VirtualDrives, &self.vdrives)
        }
        fn raid_types(&self) -> Result<Vec<RaidTypeDescriptor>, ApiError> {
            self.record(Endpoint::RaidTypes, &self.raid_types)
        }
        fn health(&self) -> Result<Vec<DriveHealth>, ApiError> {
            self.record(Endpoint::Health, &self.health)
        }
        fn test_devices(&self) -> Result<Vec<String>, ApiError> {
            self.record(Endpoint::TestDevices, &self.devices)
        }
        fn speed_test(&self, _: &SpeedTestRequest) -> Result<SpeedTestResult, ApiError> {
            self.record(Endpoint::SpeedTest, &self.speed)
        }
        fn create_array(&self, _: &CreateArrayRequest) -> Result<CommandResponse, ApiError> {
            self.record(Endpoint::CreateArray, &self.command)
        }
        fn delete_array(&self, _: &DeleteArrayRequest) -> Result<CommandResponse, ApiError> {
            self.record(Endpoint::DeleteArray, &self.command)
        }
        fn mount(&self, _: &MountRequest) -> Result<CommandResponse, ApiError> {
            self.record(Endpoint::Mount, &self.command)
        }
        fn unmount(&self, _: &UnmountRequest) -> Result<CommandResponse, ApiError> {
            self.record(Endpoint::Unmount, &self.command)
        }
        fn format(&self, _: &FormatRequest) -> Result<CommandResponse, ApiError> {
            self.record(Endpoint::Format, &self.command)
        }
    }
}
