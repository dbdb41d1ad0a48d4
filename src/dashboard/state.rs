// Session state: the last fetched reference data plus the pending delete target

use crate::models::{PhysicalDrive, RaidTypeDescriptor};

/// Data the dashboard keeps between renders.
///
/// Lists are always replaced wholesale by the latest successful fetch.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// RAID level catalog, fetched once per session
    raid_types: Vec<RaidTypeDescriptor>,
    /// Physical drives from the most recent listing
    drives: Vec<PhysicalDrive>,
    /// Array identifier awaiting delete confirmation
    pending_delete: Option<String>,
}

impl SessionState {
    pub fn replace_raid_types(&mut self, types: Vec<RaidTypeDescriptor>) {
        self.raid_types = types;
    }

    /// Descriptor for a RAID type identifier
    pub fn raid_type(&self, value: &str) -> Option<&RaidTypeDescriptor> {
        self.raid_types.iter().find(|t| t.value == value)
    }

    pub fn drives(&self) -> &[PhysicalDrive] {
        &self.drives
    }

    pub fn replace_drives(&mut self, drives: Vec<PhysicalDrive>) {
        self.drives = drives;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn set_pending_delete(&mut self, vd_id: Option<String>) {
        self.pending_delete = vd_id;
    }
}
