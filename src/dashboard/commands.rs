// Command dispatchers: validate local input, confirm, send the mutating request, settle the result

use super::Dashboard;
use super::regions::{
    Button, Buttons, Confirmation, FormatForm, Metric, MountForm, PendingCommand, RowAction,
    Severity,
};
use super::render;
use crate::api::{ApiError, Call};
use crate::models::{
    CommandResponse, CreateArrayRequest, DeleteArrayRequest, MountRequest, SpeedTestRequest,
    SpeedTestResult, UnmountRequest,
};
use tracing::{info, warn};

/// Mount point suggested when the mount dialog opens.
pub const DEFAULT_MOUNT_POINT: &str = "/mnt/raid";

/// Shown when a failed command response carries neither `error` nor `output`.
const NO_DETAILS: &str = "no details returned by the controller";

/// Input problems caught before any request is sent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a RAID type")]
    NoRaidType,

    #[error("Unknown RAID type: {0}")]
    UnknownRaidType(String),

    #[error("Please select at least one drive")]
    NoDrives,

    #[error("{raid_type} requires at least {min_drives} drives")]
    TooFewDrives { raid_type: String, min_drives: u32 },

    #[error("Please select a device to test")]
    NoDevice,

    #[error("Please enter a mount point")]
    NoMountPoint,
}

/// Mutating requests that share the disable / request / restore / notify flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    CreateArray,
    DeleteArray,
    Mount,
    Unmount,
    Format,
}

impl Command {
    pub fn idle_label(self) -> &'static str {
        match self {
            Command::CreateArray => "Create RAID",
            Command::DeleteArray => "Delete RAID",
            Command::Mount => "Mount",
            Command::Unmount => "Unmount",
            Command::Format => "Format",
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            Command::CreateArray => "Creating...",
            Command::DeleteArray => "Deleting...",
            Command::Mount => "Mounting...",
            Command::Unmount => "Unmounting...",
            Command::Format => "Formatting...",
        }
    }

    fn success_text(self) -> &'static str {
        match self {
            Command::CreateArray => "RAID array created successfully!",
            Command::DeleteArray => "RAID array deleted successfully",
            Command::Mount => "Device mounted successfully",
            Command::Unmount => "Device unmounted successfully",
            Command::Format => "Device formatted successfully",
        }
    }

    /// Prefix for a response that reports failure
    fn failure_prefix(self) -> &'static str {
        match self {
            Command::CreateArray => "Failed to create RAID",
            Command::DeleteArray => "Failed to delete RAID",
            Command::Mount => "Failed to mount device",
            Command::Unmount => "Failed to unmount device",
            Command::Format => "Failed to format device",
        }
    }

    /// Prefix for a request that never completed
    fn error_prefix(self) -> &'static str {
        match self {
            Command::CreateArray => "Error creating RAID",
            Command::DeleteArray => "Error deleting RAID",
            Command::Mount => "Error mounting device",
            Command::Unmount => "Error unmounting device",
            Command::Format => "Error formatting device",
        }
    }

    pub fn button(self, buttons: &mut Buttons) -> &mut Button {
        match self {
            Command::CreateArray => &mut buttons.create,
            Command::DeleteArray => &mut buttons.delete,
            Command::Mount => &mut buttons.mount,
            Command::Unmount => &mut buttons.unmount,
            Command::Format => &mut buttons.format,
        }
    }
}

impl Dashboard {
    /// Queue a notice for a validation failure and hand the error back.
    fn reject(&mut self, err: ValidationError) -> Result<(), ValidationError> {
        self.regions.notify(Severity::Warning, err.to_string());
        Err(err)
    }

    /// Disable the command's control and send its request. Ignored while one is in flight.
    fn dispatch(&mut self, command: Command, call: Call) {
        let button = command.button(&mut self.regions.buttons);
        if button.busy {
            return;
        }
        button.start(command.busy_label());
        self.issue(call);
    }

    /// Choose a RAID type and rebuild the drive selection panel.
    pub fn select_raid_type(&mut self, value: &str) {
        self.regions.raid_types.selected = value.to_string();
        self.update_drive_selection();
    }

    pub(super) fn update_drive_selection(&mut self) {
        let raid_type = self.state.raid_type(&self.regions.raid_types.selected);
        render::render_selection(raid_type, self.state.drives(), &mut self.regions.selection);
    }

    /// Open the create dialog with a fresh drive listing.
    pub fn open_create_dialog(&mut self) {
        self.regions.dialogs.create = true;
        self.fetch(super::Fetcher::Drives);
        self.update_drive_selection();
    }

    pub fn close_create_dialog(&mut self) {
        self.regions.dialogs.create = false;
    }

    fn validate_create(&self) -> Result<CreateArrayRequest, ValidationError> {
        let selected = &self.regions.raid_types.selected;
        if selected.is_empty() {
            return Err(ValidationError::NoRaidType);
        }

        let drives = self.regions.selection.checked_slots();
        if drives.is_empty() {
            return Err(ValidationError::NoDrives);
        }

        let raid_type = self
            .state
            .raid_type(selected)
            .ok_or_else(|| ValidationError::UnknownRaidType(selected.clone()))?;
        if (drives.len() as u64) < u64::from(raid_type.min_drives) {
            return Err(ValidationError::TooFewDrives {
                raid_type: selected.to_uppercase(),
                min_drives: raid_type.min_drives,
            });
        }

        Ok(CreateArrayRequest {
            raid_type: selected.clone(),
            drives,
        })
    }

    /// Validate the create dialog and ask for confirmation. Nothing is sent yet.
    pub fn create_array(&mut self) -> Result<(), ValidationError> {
        let request = match self.validate_create() {
            Ok(request) => request,
            Err(err) => return self.reject(err),
        };

        let prompt = format!(
            "Create {} array with {} drives?",
            request.raid_type.to_uppercase(),
            request.drives.len()
        );
        self.regions.dialogs.confirm = Some(Confirmation {
            prompt,
            command: PendingCommand::CreateArray(request),
        });
        Ok(())
    }

    /// The user accepted the pending confirmation.
    pub fn confirm(&mut self) {
        let Some(confirmation) = self.regions.dialogs.confirm.take() else {
            return;
        };
        match confirmation.command {
            PendingCommand::CreateArray(req) => {
                self.dispatch(Command::CreateArray, Call::CreateArray(req))
            }
            PendingCommand::Unmount(req) => self.dispatch(Command::Unmount, Call::Unmount(req)),
            PendingCommand::Format(req) => self.dispatch(Command::Format, Call::Format(req)),
        }
    }

    /// The user declined the pending confirmation.
    pub fn dismiss_confirmation(&mut self) {
        self.regions.dialogs.confirm = None;
    }

    /// Remember the array to delete and open the delete dialog.
    pub fn show_delete(&mut self, vd_id: &str) {
        self.state.set_pending_delete(Some(vd_id.to_string()));
        self.regions.dialogs.delete = Some(vd_id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.regions.dialogs.delete = None;
    }

    pub fn confirm_delete(&mut self) {
        let Some(vd_id) = self.state.pending_delete().map(str::to_string) else {
            return;
        };
        self.dispatch(
            Command::DeleteArray,
            Call::DeleteArray(DeleteArrayRequest { vd_id }),
        );
    }

    /// Start a benchmark of the chosen device.
    pub fn run_speed_test(&mut self) -> Result<(), ValidationError> {
        if self.regions.buttons.speed_test.busy {
            return Ok(());
        }
        let device = self.regions.speed.device.trim().to_string();
        if device.is_empty() {
            return self.reject(ValidationError::NoDevice);
        }

        render::render_speed_pending(&mut self.regions.speed);
        self.regions.buttons.speed_test.start("Testing...");
        let kind = self.regions.speed.kind;
        self.issue(Call::SpeedTest(SpeedTestRequest { device, kind }));
        Ok(())
    }

    pub(super) fn finish_speed_test(&mut self, result: Result<SpeedTestResult, ApiError>) {
        self.regions.buttons.speed_test.restore("Run Test");
        match result {
            Ok(result) => {
                render::render_speed_result(&result, &mut self.regions.speed);
                if !result.is_completed() {
                    self.regions.notify(
                        Severity::Warning,
                        format!("Test completed with status: {}", result.status),
                    );
                }
            }
            Err(e) => {
                warn!(error = %e, "speed test failed");
                for metric in self.regions.speed.metrics_mut() {
                    if *metric == Metric::Busy {
                        *metric = Metric::default();
                    }
                }
                self.regions
                    .notify(Severity::Error, format!("Error running speed test: {}", e));
            }
        }
    }

    pub fn open_mount(&mut self, device: &str) {
        self.regions.dialogs.mount = Some(MountForm {
            device: device.to_string(),
            mount_point: DEFAULT_MOUNT_POINT.to_string(),
        });
    }

    pub fn cancel_mount(&mut self) {
        self.regions.dialogs.mount = None;
    }

    pub fn confirm_mount(&mut self) -> Result<(), ValidationError> {
        let Some(form) = self.regions.dialogs.mount.clone() else {
            return Ok(());
        };
        let mount_point = form.mount_point.trim().to_string();
        if mount_point.is_empty() {
            return self.reject(ValidationError::NoMountPoint);
        }
        self.dispatch(
            Command::Mount,
            Call::Mount(MountRequest {
                device: form.device,
                mount_point,
            }),
        );
        Ok(())
    }

    /// Ask before unmounting a device.
    pub fn request_unmount(&mut self, device: &str) {
        self.regions.dialogs.confirm = Some(Confirmation {
            prompt: format!("Unmount {}?", device),
            command: PendingCommand::Unmount(UnmountRequest {
                device: device.to_string(),
            }),
        });
    }

    pub fn open_format(&mut self, device: &str) {
        self.regions.dialogs.format = Some(FormatForm {
            device: device.to_string(),
            filesystem: Default::default(),
        });
    }

    pub fn cancel_format(&mut self) {
        self.regions.dialogs.format = None;
    }

    /// Ask before formatting the device chosen in the format dialog.
    pub fn confirm_format(&mut self) {
        let Some(form) = self.regions.dialogs.format.clone() else {
            return;
        };
        self.regions.dialogs.confirm = Some(Confirmation {
            prompt: format!(
                "Format {} as {}? All data on the device will be lost.",
                form.device,
                form.filesystem.as_str()
            ),
            command: PendingCommand::Format(crate::models::FormatRequest {
                device: form.device,
                filesystem: form.filesystem,
            }),
        });
    }

    /// React to a row action button.
    pub fn row_action(&mut self, action: &RowAction) {
        match action {
            RowAction::Delete { vd_id } => self.show_delete(vd_id),
            RowAction::Mount { device } => self.open_mount(device),
            RowAction::Unmount { device } => self.request_unmount(device),
            RowAction::Format { device } => self.open_format(device),
        }
    }

    /// Drop the oldest notice once the user has read it.
    pub fn acknowledge_notice(&mut self) {
        self.regions.notices.pop_front();
    }

    pub(super) fn finish_command(
        &mut self,
        command: Command,
        result: Result<CommandResponse, ApiError>,
    ) {
        command
            .button(&mut self.regions.buttons)
            .restore(command.idle_label());

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                warn!(?command, error = %e, "command request failed");
                self.regions.notify(
                    Severity::Error,
                    format!("{}: {}", command.error_prefix(), e),
                );
                return;
            }
        };

        if !resp.success {
            let detail = resp.failure_detail().unwrap_or(NO_DETAILS);
            warn!(?command, detail, "command rejected");
            self.regions.notify(
                Severity::Error,
                format!("{}: {}", command.failure_prefix(), detail),
            );
            return;
        }

        info!(?command, "command succeeded");
        let text = resp
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| command.success_text().to_string());
        self.regions.notify(Severity::Info, text);

        match command {
            Command::CreateArray => {
                self.regions.dialogs.create = false;
                self.refresh_all();
            }
            Command::DeleteArray => {
                self.regions.dialogs.delete = None;
                self.state.set_pending_delete(None);
                self.refresh_drive_lists();
            }
            Command::Mount => {
                self.regions.dialogs.mount = None;
                self.fetch(super::Fetcher::VirtualDrives);
            }
            Command::Unmount => self.fetch(super::Fetcher::VirtualDrives),
            Command::Format => {
                self.regions.dialogs.format = None;
                self.fetch(super::Fetcher::VirtualDrives);
            }
        }
    }
}
