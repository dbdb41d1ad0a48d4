// Data models for controller, drive, array and benchmark information exchanged with the backend

use serde::{Deserialize, Serialize};

/// Drive states that mark a physical drive as healthy and not yet part of any array.
const UNCONFIGURED_GOOD_STATES: [&str; 2] = ["Unconfigured Good", "UGood"];

/// Summary of the RAID controller as reported by `/api/controller`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerInfo {
    /// Controller product name
    pub model: String,
    /// Controller serial number
    pub serial: String,
    /// Firmware version string
    pub firmware: String,
    /// Controller status, "Online" when the controller answered
    pub status: String,
}

/// A single physical drive attached to the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalDrive {
    /// Enclosure and slot identifier (e.g., 252:0), unique within one listing
    pub slot: String,
    /// Device id assigned by the controller
    pub did: String,
    /// Free-text state token (e.g., Online, Unconfigured Good)
    pub state: String,
    /// Drive group the drive belongs to, "-" when unassigned
    pub dg: String,
    /// Formatted capacity (e.g., "3.637 TB")
    pub size: String,
    /// Interface (SAS, SATA, NVMe)
    pub interface: String,
    /// Media type (HDD, SSD)
    pub media: String,
    /// Manufacturer model name
    pub model: String,
}

impl PhysicalDrive {
    /// Returns true when the drive can be offered for a new array.
    pub fn is_unconfigured_good(&self) -> bool {
        UNCONFIGURED_GOOD_STATES.contains(&self.state.as_str())
    }
}

/// A logical RAID volume as reported by `/api/vdrives`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualDrive {
    /// Drive group / virtual drive identifier (e.g., "0/239"), unique within one listing
    pub dg_vd: String,
    /// RAID level (e.g., RAID5)
    #[serde(rename = "type")]
    pub raid_type: String,
    /// Array state (e.g., Optimal, Degraded)
    pub state: String,
    /// Access policy (RW, RO)
    pub access: String,
    /// Formatted capacity
    pub size: String,
    /// Operating system block device, if the backend resolved one
    pub device: Option<String>,
    /// Current mount point of the block device
    pub mount_point: Option<String>,
    /// Filesystem found on the block device
    pub filesystem: Option<String>,
    /// Whether the block device is currently mounted
    pub mounted: bool,
}

impl VirtualDrive {
    /// Device path as displayed; "N/A" when the backend did not provide one.
    pub fn device_label(&self) -> &str {
        match self.device.as_deref() {
            Some(dev) if !dev.is_empty() => dev,
            _ => "N/A",
        }
    }

    /// Where the array is mounted, if anywhere.
    pub fn mount_label(&self) -> Option<&str> {
        self.mount_point.as_deref().filter(|mp| !mp.is_empty())
    }

    /// Filesystem on the block device, if one was detected.
    pub fn filesystem_label(&self) -> Option<&str> {
        self.filesystem.as_deref().filter(|fs| !fs.is_empty())
    }

    /// Block device usable for filesystem actions, if any.
    pub fn block_device(&self) -> Option<&str> {
        self.device
            .as_deref()
            .filter(|dev| !dev.is_empty() && *dev != "N/A")
    }
}

/// One entry of the RAID level catalog served by `/api/raid_types`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidTypeDescriptor {
    /// Identifier sent in create requests (e.g., raid5)
    pub value: String,
    /// Display label
    pub name: String,
    /// Minimum number of drives the level needs
    pub min_drives: u32,
}

/// SMART derived health for one drive, served by `/api/health`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveHealth {
    /// Enclosure and slot identifier
    pub slot: String,
    /// Human readable status line
    pub status: String,
    /// "Good" or a warning token
    pub overall_health: String,
    /// Temperature as reported (e.g., "38C (100.40 F)")
    pub temperature: String,
    /// Power on hours as reported
    pub power_on_hours: String,
    /// Media error counter as a decimal string
    pub media_errors: String,
    /// Predictive failure counter as a decimal string
    pub predictive_failures: String,
}

/// Result of a benchmark run from `/api/speed_test`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTestResult {
    /// Sequential read throughput
    pub read_speed: String,
    /// Read operations per second
    pub read_iops: String,
    /// Sequential write throughput
    pub write_speed: String,
    /// Write operations per second
    pub write_iops: String,
    /// "Completed" on a full run, otherwise the reason it stopped
    pub status: String,
}

impl SpeedTestResult {
    /// Returns true when the backend finished the benchmark.
    pub fn is_completed(&self) -> bool {
        self.status == "Completed"
    }
}

/// Reply shared by every mutating endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandResponse {
    /// Set by the backend when the controller reported success
    pub success: bool,
    /// Short error description
    pub error: Option<String>,
    /// Raw command output
    pub output: Option<String>,
    /// Confirmation text for filesystem actions
    pub message: Option<String>,
}

impl CommandResponse {
    /// Best explanation the backend gave for a failure.
    pub fn failure_detail(&self) -> Option<&str> {
        [self.error.as_deref(), self.output.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
    }
}

/// Body of `/api/create_raid`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateArrayRequest {
    /// RAID level identifier
    #[serde(rename = "type")]
    pub raid_type: String,
    /// Slots of the member drives
    pub drives: Vec<String>,
}

/// Body of `/api/delete_raid`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteArrayRequest {
    pub vd_id: String,
}

/// Benchmark duration profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTestKind {
    /// Short run on a small working set
    #[default]
    Quick,
    /// Longer run on a larger working set
    Full,
}

impl SpeedTestKind {
    /// Label shown in the test type selector
    pub fn label(self) -> &'static str {
        match self {
            Self::Quick => "Quick (10s)",
            Self::Full => "Full (30s)",
        }
    }
}

/// Body of `/api/speed_test`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedTestRequest {
    pub device: String,
    #[serde(rename = "type")]
    pub kind: SpeedTestKind,
}

/// Filesystems the backend knows how to create.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filesystem {
    #[default]
    Ext4,
    Xfs,
}

impl Filesystem {
    /// Name as passed to the backend
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ext4 => "ext4",
            Self::Xfs => "xfs",
        }
    }
}

/// Body of `/api/mount`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountRequest {
    pub device: String,
    pub mount_point: String,
}

/// Body of `/api/unmount`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmountRequest {
    pub device: String,
}

/// Body of `/api/format`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRequest {
    pub device: String,
    pub filesystem: Filesystem,
}
