// HTTP implementation of the backend contract using a blocking reqwest client

use super::{ApiError, Backend, Endpoint};
use crate::models::{
    CommandResponse, ControllerInfo, CreateArrayRequest, DeleteArrayRequest, DriveHealth,
    FormatRequest, MountRequest, PhysicalDrive, RaidTypeDescriptor, SpeedTestRequest,
    SpeedTestResult, UnmountRequest, VirtualDrive,
};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Talks JSON to the RAID management backend.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client for the given base URL (e.g., "http://raidhost:5000").
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ApiError::InvalidUrl(base_url)),
        }

        // Benchmarks and array creation can take minutes, so requests never time out
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        debug!(%endpoint, "GET");
        let resp = self.client.get(self.url(endpoint)).send()?;
        decode(resp)
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(%endpoint, "POST");
        let resp = self.client.post(self.url(endpoint)).json(body).send()?;
        decode(resp)
    }
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if resp.status().is_success() {
        Ok(resp.json()?)
    } else {
        Err(ApiError::Http(resp.status().as_u16()))
    }
}

impl Backend for HttpBackend {
    fn controller(&self) -> Result<ControllerInfo, ApiError> {
        self.get(Endpoint::Controller)
    }

    fn drives(&self) -> Result<Vec<PhysicalDrive>, ApiError> {
        self.get(Endpoint::Drives)
    }

    fn virtual_drives(&self) -> Result<Vec<VirtualDrive>, ApiError> {
        self.get(Endpoint::VirtualDrives)
    }

    fn raid_types(&self) -> Result<Vec<RaidTypeDescriptor>, ApiError> {
        self.get(Endpoint::RaidTypes)
    }

    fn health(&self) -> Result<Vec<DriveHealth>, ApiError> {
        self.get(Endpoint::Health)
    }

    fn test_devices(&self) -> Result<Vec<String>, ApiError> {
        self.get(Endpoint::TestDevices)
    }

    fn speed_test(&self, request: &SpeedTestRequest) -> Result<SpeedTestResult, ApiError> {
        self.post(Endpoint::SpeedTest, request)
    }

    fn create_array(&self, request: &CreateArrayRequest) -> Result<CommandResponse, ApiError> {
        self.post(Endpoint::CreateArray, request)
    }

    fn delete_array(&self, request: &DeleteArrayRequest) -> Result<CommandResponse, ApiError> {
        self.post(Endpoint::DeleteArray, request)
    }

    fn mount(&self, request: &MountRequest) -> Result<CommandResponse, ApiError> {
        self.post(Endpoint::Mount, request)
    }

    fn unmount(&self, request: &UnmountRequest) -> Result<CommandResponse, ApiError> {
        self.post(Endpoint::Unmount, request)
    }

    fn format(&self, request: &FormatRequest) -> Result<CommandResponse, ApiError> {
        self.post(Endpoint::Format, request)
    }
}
