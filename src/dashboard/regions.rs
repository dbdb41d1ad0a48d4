// View regions: the rendered content of every panel, dialog and button of the dashboard

use crate::models::{CreateArrayRequest, Filesystem, FormatRequest, SpeedTestKind, UnmountRequest};
use std::collections::VecDeque;
use std::fmt;

/// Column headers of the physical drive table.
pub const DRIVE_COLUMNS: &[&str] = &[
    "Slot",
    "DID",
    "State",
    "DG",
    "Size",
    "Interface",
    "Media",
    "Model",
];

/// Column headers of the virtual drive table.
pub const VDRIVE_COLUMNS: &[&str] = &[
    "DG/VD",
    "Type",
    "State",
    "Access",
    "Size",
    "Device",
    "Mount",
    "Actions",
];

/// Column headers of the drive health table.
pub const HEALTH_COLUMNS: &[&str] = &[
    "Slot",
    "Status",
    "Temperature",
    "Power On Hours",
    "Media Errors",
    "Predictive Failures",
];

/// Visual severity attached to badges and coloured text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Danger,
    #[default]
    Secondary,
    Primary,
    Muted,
}

impl Tone {
    pub fn name(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Info => "info",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
            Tone::Secondary => "secondary",
            Tone::Primary => "primary",
            Tone::Muted => "muted",
        }
    }
}

/// Action button rendered inside a table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowAction {
    Delete { vd_id: String },
    Mount { device: String },
    Unmount { device: String },
    Format { device: String },
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Delete { .. } => "Delete",
            RowAction::Mount { .. } => "Mount",
            RowAction::Unmount { .. } => "Unmount",
            RowAction::Format { .. } => "Format",
        }
    }

    /// Identifier the action is bound to
    pub fn target(&self) -> &str {
        match self {
            RowAction::Delete { vd_id } => vd_id,
            RowAction::Mount { device }
            | RowAction::Unmount { device }
            | RowAction::Format { device } => device,
        }
    }
}

/// One table cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Bold text in a tone
    Strong { text: String, tone: Tone },
    /// Text in a tone
    Toned { text: String, tone: Tone },
    /// Pill shaped label
    Badge { text: String, tone: Tone },
    /// Monospace text
    Code(String),
    Actions(Vec<RowAction>),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Strong { text, tone } => write!(f, "*{}*<{}>", text, tone.name()),
            Cell::Toned { text, tone } => write!(f, "{}<{}>", text, tone.name()),
            Cell::Badge { text, tone } => write!(f, "[{}]<{}>", text, tone.name()),
            Cell::Code(text) => write!(f, "`{}`", text),
            Cell::Actions(actions) => {
                for (i, action) in actions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}({})", action.label(), action.target())?;
                }
                Ok(())
            }
        }
    }
}

/// One table row: either data cells or a single message spanning the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Row {
    Cells(Vec<Cell>),
    Message {
        text: String,
        span: usize,
        tone: Option<Tone>,
        busy: bool,
    },
}

/// A table body with fixed, positional columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub columns: &'static [&'static str],
    pub rows: Vec<Row>,
}

impl Table {
    /// Empty table showing a busy "Loading..." row
    pub fn loading(columns: &'static [&'static str]) -> Self {
        let mut table = Self {
            columns,
            rows: Vec::new(),
        };
        table.show_message("Loading...", None, true);
        table
    }

    /// Replace the body with one message row spanning every column.
    pub fn show_message(&mut self, text: impl Into<String>, tone: Option<Tone>, busy: bool) {
        self.rows = vec![Row::Message {
            text: text.into(),
            span: self.columns.len(),
            tone,
            busy,
        }];
    }

    pub fn set_rows(&mut self, rows: Vec<Vec<Cell>>) {
        self.rows = rows.into_iter().map(Row::Cells).collect();
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join(" | "))?;
        for row in &self.rows {
            match row {
                Row::Cells(cells) => {
                    let line: Vec<String> = cells.iter().map(ToString::to_string).collect();
                    writeln!(f, "{}", line.join(" | "))?;
                }
                Row::Message {
                    text,
                    span,
                    tone,
                    busy,
                } => {
                    let marker = if *busy { "~ " } else { "" };
                    match tone {
                        Some(tone) => writeln!(f, "{}{} (span {}, {})", marker, text, span, tone.name())?,
                        None => writeln!(f, "{}{} (span {})", marker, text, span)?,
                    }
                }
            }
        }
        Ok(())
    }
}

/// Controller summary fields and status badge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerPanel {
    pub model: String,
    pub serial: String,
    pub firmware: String,
    pub status: String,
    pub status_tone: Tone,
}

impl Default for ControllerPanel {
    fn default() -> Self {
        Self {
            model: "--".into(),
            serial: "--".into(),
            firmware: "--".into(),
            status: "Unknown".into(),
            status_tone: Tone::Secondary,
        }
    }
}

impl fmt::Display for ControllerPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Serial: {}", self.serial)?;
        writeln!(f, "Firmware: {}", self.firmware)?;
        writeln!(f, "Status: [{}]<{}>", self.status, self.status_tone.name())
    }
}

/// An entry of the RAID type selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// The RAID type selector. An empty `selected` means the placeholder is chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RaidTypeSelect {
    pub options: Vec<SelectOption>,
    pub selected: String,
}

impl RaidTypeSelect {
    pub const PLACEHOLDER: &'static str = "Select RAID type...";

    /// Label of the chosen option, or the placeholder
    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|opt| opt.value == self.selected)
            .map(|opt| opt.label.as_str())
            .unwrap_or(Self::PLACEHOLDER)
    }
}

/// A drive offered for a new array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkbox {
    pub slot: String,
    pub label: String,
    pub checked: bool,
}

/// What the drive selection panel currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionBody {
    /// Muted hint, shown before a RAID type is chosen
    Prompt(String),
    /// Shown when no drive qualifies
    Warning(String),
    Drives(Vec<Checkbox>),
}

/// Drive selection panel of the create dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriveSelection {
    /// Minimum drive count hint for the chosen RAID type
    pub hint: String,
    pub body: SelectionBody,
}

impl Default for DriveSelection {
    fn default() -> Self {
        Self {
            hint: String::new(),
            body: SelectionBody::Prompt("Please select a RAID type first".into()),
        }
    }
}

impl DriveSelection {
    /// Slots of the ticked checkboxes, in display order
    pub fn checked_slots(&self) -> Vec<String> {
        match &self.body {
            SelectionBody::Drives(boxes) => boxes
                .iter()
                .filter(|cb| cb.checked)
                .map(|cb| cb.slot.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Tick or untick the checkbox bound to `slot`.
    pub fn set_checked(&mut self, slot: &str, checked: bool) {
        if let SelectionBody::Drives(boxes) = &mut self.body {
            if let Some(cb) = boxes.iter_mut().find(|cb| cb.slot == slot) {
                cb.checked = checked;
            }
        }
    }
}

/// A benchmark metric field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Metric {
    Busy,
    Value(String),
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Value("--".into())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Busy => f.write_str("..."),
            Metric::Value(v) => f.write_str(v),
        }
    }
}

/// Speed test inputs and results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeedPanel {
    /// Devices offered by the backend
    pub devices: Vec<String>,
    /// Device to test
    pub device: String,
    pub kind: SpeedTestKind,
    /// Results are hidden until the first run
    pub visible: bool,
    pub read_speed: Metric,
    pub read_iops: Metric,
    pub write_speed: Metric,
    pub write_iops: Metric,
}

impl SpeedPanel {
    pub fn metrics_mut(&mut self) -> [&mut Metric; 4] {
        [
            &mut self.read_speed,
            &mut self.read_iops,
            &mut self.write_speed,
            &mut self.write_iops,
        ]
    }
}

/// A clickable control whose label and enabled state change while its request runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub enabled: bool,
    pub busy: bool,
}

impl Button {
    pub fn idle(label: &'static str) -> Self {
        Self {
            label,
            enabled: true,
            busy: false,
        }
    }

    /// Disable the control and show a busy label.
    pub fn start(&mut self, busy_label: &'static str) {
        self.label = busy_label;
        self.enabled = false;
        self.busy = true;
    }

    /// Put the control back to its resting state.
    pub fn restore(&mut self, idle_label: &'static str) {
        *self = Self::idle(idle_label);
    }
}

/// Buttons whose state follows an in-flight request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buttons {
    pub create: Button,
    pub delete: Button,
    pub speed_test: Button,
    pub mount: Button,
    pub unmount: Button,
    pub format: Button,
}

impl Default for Buttons {
    fn default() -> Self {
        Self {
            create: Button::idle("Create RAID"),
            delete: Button::idle("Delete RAID"),
            speed_test: Button::idle("Run Test"),
            mount: Button::idle("Mount"),
            unmount: Button::idle("Unmount"),
            format: Button::idle("Format"),
        }
    }
}

/// Mount dialog contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountForm {
    pub device: String,
    pub mount_point: String,
}

/// Format dialog contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatForm {
    pub device: String,
    pub filesystem: Filesystem,
}

/// A mutating request held back until the user confirms it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingCommand {
    CreateArray(CreateArrayRequest),
    Unmount(UnmountRequest),
    Format(FormatRequest),
}

/// Yes/no question shown before a destructive request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub prompt: String,
    pub command: PendingCommand,
}

/// Which dialogs are open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dialogs {
    pub create: bool,
    pub confirm: Option<Confirmation>,
    /// Identifier shown in the delete confirmation dialog
    pub delete: Option<String>,
    pub mount: Option<MountForm>,
    pub format: Option<FormatForm>,
}

/// Severity of a user notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A message the user has to acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

/// Everything the dashboard displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Regions {
    pub controller: ControllerPanel,
    pub drives: Table,
    pub vdrives: Table,
    pub health: Table,
    pub raid_types: RaidTypeSelect,
    pub selection: DriveSelection,
    pub speed: SpeedPanel,
    pub buttons: Buttons,
    pub dialogs: Dialogs,
    /// Pending notifications, oldest first
    pub notices: VecDeque<Notice>,
}

impl Default for Regions {
    fn default() -> Self {
        let mut health = Table::loading(HEALTH_COLUMNS);
        health.show_message("Click \"Scan\" to read drive health", Some(Tone::Muted), false);
        Self {
            controller: ControllerPanel::default(),
            drives: Table::loading(DRIVE_COLUMNS),
            vdrives: Table::loading(VDRIVE_COLUMNS),
            health,
            raid_types: RaidTypeSelect::default(),
            selection: DriveSelection::default(),
            speed: SpeedPanel::default(),
            buttons: Buttons::default(),
            dialogs: Dialogs::default(),
            notices: VecDeque::new(),
        }
    }
}

impl Regions {
    pub fn notify(&mut self, severity: Severity, text: impl Into<String>) {
        self.notices.push_back(Notice {
            severity,
            text: text.into(),
        });
    }
}

impl fmt::Display for Regions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Controller")?;
        write!(f, "{}", self.controller)?;
        writeln!(f, "\n== Physical Drives")?;
        write!(f, "{}", self.drives)?;
        writeln!(f, "\n== RAID Arrays")?;
        write!(f, "{}", self.vdrives)?;
        writeln!(f, "\n== Drive Health")?;
        write!(f, "{}", self.health)
    }
}
