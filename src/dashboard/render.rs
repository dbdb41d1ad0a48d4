// Renderers: pure mappings from backend data to the content of one view region

use super::regions::{
    Cell, Checkbox, ControllerPanel, DriveSelection, Metric, RaidTypeSelect, RowAction,
    SelectOption, SelectionBody, SpeedPanel, Table, Tone,
};
use crate::models::{
    ControllerInfo, DriveHealth, PhysicalDrive, RaidTypeDescriptor, SpeedTestResult, VirtualDrive,
};
use regex::Regex;
use std::sync::LazyLock;

/// Temperatures above this many degrees Celsius are flagged.
pub const TEMPERATURE_LIMIT_C: i64 = 50;

/// Ordered state classification rules; the first group with a matching token wins.
const STATE_RULES: [(&[&str], Tone); 4] = [
    (&["OPTL", "ONLN", "OPTIMAL", "ONLINE"], Tone::Success),
    (&["UGOOD", "UNCONFIGURED"], Tone::Info),
    (&["DGRD", "PDGD"], Tone::Warning),
    (&["OFFLN", "FAIL"], Tone::Danger),
];

/// Leading integer of a temperature reading such as "38C (100.40 F)"
static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid temperature pattern"));

/// Badge tone for a drive or array state, by case-insensitive substring match.
pub fn classify_state(state: &str) -> Tone {
    let upper = state.to_uppercase();
    STATE_RULES
        .iter()
        .find(|(tokens, _)| tokens.iter().any(|token| upper.contains(token)))
        .map(|(_, tone)| *tone)
        .unwrap_or(Tone::Secondary)
}

/// Whole degrees at the start of a temperature reading, if it starts with a number.
/// Digit runs too long for `i64` saturate toward their sign.
pub fn parse_temperature(reading: &str) -> Option<i64> {
    let digits = LEADING_INT.captures(reading)?.get(1)?.as_str();
    match digits.parse() {
        Ok(t) => Some(t),
        // The capture is always a signed digit run, so the only failure is overflow
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Tone for a temperature cell; unreadable values are not flagged.
pub fn temperature_tone(reading: &str) -> Tone {
    match parse_temperature(reading) {
        Some(t) if t > TEMPERATURE_LIMIT_C => Tone::Danger,
        _ => Tone::Success,
    }
}

/// Tone for an error counter, compared as text against "0".
pub fn counter_tone(counter: &str) -> Tone {
    if counter == "0" {
        Tone::Success
    } else {
        Tone::Danger
    }
}

pub fn render_controller(info: &ControllerInfo, panel: &mut ControllerPanel) {
    panel.model = info.model.clone();
    panel.serial = info.serial.clone();
    panel.firmware = info.firmware.clone();
    panel.status = info.status.clone();
    panel.status_tone = if info.status == "Online" {
        Tone::Success
    } else {
        Tone::Danger
    };
}

pub fn render_drives(drives: &[PhysicalDrive], table: &mut Table) {
    if drives.is_empty() {
        table.show_message("No physical drives found", None, false);
        return;
    }

    table.set_rows(
        drives
            .iter()
            .map(|drive| {
                vec![
                    Cell::Text(drive.slot.clone()),
                    Cell::Text(drive.did.clone()),
                    Cell::Badge {
                        text: drive.state.clone(),
                        tone: classify_state(&drive.state),
                    },
                    Cell::Text(drive.dg.clone()),
                    Cell::Text(drive.size.clone()),
                    Cell::Text(drive.interface.clone()),
                    Cell::Text(drive.media.clone()),
                    Cell::Text(drive.model.clone()),
                ]
            })
            .collect(),
    );
}

/// Row actions offered for an array: delete always, filesystem actions when a device is attached.
fn array_actions(vd: &VirtualDrive) -> Vec<RowAction> {
    let mut actions = Vec::new();
    if let Some(device) = vd.block_device() {
        if vd.mounted {
            actions.push(RowAction::Unmount {
                device: device.to_string(),
            });
        } else {
            actions.push(RowAction::Mount {
                device: device.to_string(),
            });
            actions.push(RowAction::Format {
                device: device.to_string(),
            });
        }
    }
    actions.push(RowAction::Delete {
        vd_id: vd.dg_vd.clone(),
    });
    actions
}

/// Mount point and filesystem of an array's block device.
fn mount_cell(vd: &VirtualDrive) -> Cell {
    match (vd.mount_label(), vd.filesystem_label()) {
        (Some(mp), Some(fs)) => Cell::Toned {
            text: format!("{} ({})", mp, fs),
            tone: Tone::Success,
        },
        (Some(mp), None) => Cell::Toned {
            text: mp.to_string(),
            tone: Tone::Success,
        },
        (None, Some(fs)) => Cell::Toned {
            text: format!("Not mounted ({})", fs),
            tone: Tone::Muted,
        },
        (None, None) if vd.block_device().is_some() => Cell::Toned {
            text: "No filesystem".into(),
            tone: Tone::Muted,
        },
        (None, None) => Cell::Text("--".into()),
    }
}

pub fn render_vdrives(vdrives: &[VirtualDrive], table: &mut Table) {
    if vdrives.is_empty() {
        table.show_message("No RAID arrays configured", Some(Tone::Muted), false);
        return;
    }

    table.set_rows(
        vdrives
            .iter()
            .map(|vd| {
                vec![
                    Cell::Text(vd.dg_vd.clone()),
                    Cell::Badge {
                        text: vd.raid_type.clone(),
                        tone: Tone::Primary,
                    },
                    Cell::Badge {
                        text: vd.state.clone(),
                        tone: classify_state(&vd.state),
                    },
                    Cell::Text(vd.access.clone()),
                    Cell::Text(vd.size.clone()),
                    Cell::Code(vd.device_label().to_string()),
                    mount_cell(vd),
                    Cell::Actions(array_actions(vd)),
                ]
            })
            .collect(),
    );
}

/// Fill the RAID type selector; the placeholder is chosen again.
pub fn render_raid_types(types: &[RaidTypeDescriptor], select: &mut RaidTypeSelect) {
    select.options = types
        .iter()
        .map(|t| SelectOption {
            value: t.value.clone(),
            label: t.name.clone(),
        })
        .collect();
    select.selected.clear();
}

/// Rebuild the drive selection panel for the chosen RAID type.
///
/// Only drives in an unconfigured-good state are offered. Every checkbox starts unticked.
pub fn render_selection(
    raid_type: Option<&RaidTypeDescriptor>,
    drives: &[PhysicalDrive],
    selection: &mut DriveSelection,
) {
    let Some(raid_type) = raid_type else {
        *selection = DriveSelection::default();
        return;
    };

    selection.hint = format!("Minimum {} drives required", raid_type.min_drives);

    let boxes: Vec<Checkbox> = drives
        .iter()
        .filter(|d| d.is_unconfigured_good())
        .map(|d| Checkbox {
            slot: d.slot.clone(),
            label: format!("{} - {} {}", d.slot, d.size, d.model),
            checked: false,
        })
        .collect();

    selection.body = if boxes.is_empty() {
        SelectionBody::Warning("No unconfigured drives available".into())
    } else {
        SelectionBody::Drives(boxes)
    };
}

pub fn render_health_pending(table: &mut Table) {
    table.show_message("Scanning drives...", None, true);
}

pub fn render_health_error(table: &mut Table) {
    table.show_message("Error loading health data", Some(Tone::Danger), false);
}

pub fn render_health(health: &[DriveHealth], table: &mut Table) {
    if health.is_empty() {
        table.show_message("No drive health data available", None, false);
        return;
    }

    table.set_rows(
        health
            .iter()
            .map(|h| {
                let status_tone = if h.overall_health == "Good" {
                    Tone::Success
                } else {
                    Tone::Warning
                };
                vec![
                    Cell::Text(h.slot.clone()),
                    Cell::Strong {
                        text: h.status.clone(),
                        tone: status_tone,
                    },
                    Cell::Toned {
                        text: h.temperature.clone(),
                        tone: temperature_tone(&h.temperature),
                    },
                    Cell::Text(h.power_on_hours.clone()),
                    Cell::Toned {
                        text: h.media_errors.clone(),
                        tone: counter_tone(&h.media_errors),
                    },
                    Cell::Toned {
                        text: h.predictive_failures.clone(),
                        tone: counter_tone(&h.predictive_failures),
                    },
                ]
            })
            .collect(),
    );
}

/// Show the results panel with busy placeholders in every metric.
pub fn render_speed_pending(panel: &mut SpeedPanel) {
    panel.visible = true;
    for metric in panel.metrics_mut() {
        *metric = Metric::Busy;
    }
}

/// Copy the benchmark figures verbatim, whatever the run status.
pub fn render_speed_result(result: &SpeedTestResult, panel: &mut SpeedPanel) {
    panel.visible = true;
    panel.read_speed = Metric::Value(result.read_speed.clone());
    panel.read_iops = Metric::Value(result.read_iops.clone());
    panel.write_speed = Metric::Value(result.write_speed.clone());
    panel.write_iops = Metric::Value(result.write_iops.clone());
}

/// Offer the backend's device list, keeping the current choice when it is still listed.
pub fn render_test_devices(devices: &[String], panel: &mut SpeedPanel) {
    panel.devices = devices.to_vec();
    if !panel.devices.contains(&panel.device) {
        panel.device = panel.devices.first().cloned().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::regions::{
        DRIVE_COLUMNS, HEALTH_COLUMNS, Row, VDRIVE_COLUMNS,
    };

    fn drive(slot: &str, state: &str) -> PhysicalDrive {
        PhysicalDrive {
            slot: slot.into(),
            did: "10".into(),
            state: state.into(),
            dg: "-".into(),
            size: "3.637 TB".into(),
            interface: "SAS".into(),
            media: "HDD".into(),
            model: "HGST HUS726040AL".into(),
        }
    }

    fn raid(value: &str, min_drives: u32) -> RaidTypeDescriptor {
        RaidTypeDescriptor {
            value: value.into(),
            name: value.to_uppercase(),
            min_drives,
        }
    }

    #[test]
    fn classify_state_follows_rule_order() {
        assert_eq!(classify_state("Optl"), Tone::Success);
        assert_eq!(classify_state("Online"), Tone::Success);
        assert_eq!(classify_state("UGood"), Tone::Info);
        assert_eq!(classify_state("Unconfigured Good"), Tone::Info);
        assert_eq!(classify_state("Dgrd"), Tone::Warning);
        assert_eq!(classify_state("Partially Degraded"), Tone::Secondary);
        assert_eq!(classify_state("Pdgd"), Tone::Warning);
        assert_eq!(classify_state("Offln"), Tone::Danger);
        assert_eq!(classify_state("Failed"), Tone::Danger);
        assert_eq!(classify_state("Rebuilding"), Tone::Secondary);
        assert_eq!(classify_state(""), Tone::Secondary);
    }

    #[test]
    fn classify_state_first_matching_group_wins() {
        assert_eq!(classify_state("Onln FAIL"), Tone::Success);
        assert_eq!(classify_state("ugood-offln"), Tone::Info);
        // spelled-out "Offline" matches none of the abbreviated tokens
        assert_eq!(classify_state("Offline"), Tone::Secondary);
        // "Unconfigured Bad" still matches the UNCONFIGURED token
        assert_eq!(classify_state("Unconfigured Bad"), Tone::Info);
    }

    #[test]
    fn empty_drive_list_renders_single_spanning_row() {
        let mut table = Table::loading(DRIVE_COLUMNS);
        render_drives(&[], &mut table);

        assert_eq!(table.rows.len(), 1);
        match &table.rows[0] {
            Row::Message { text, span, .. } => {
                assert_eq!(text, "No physical drives found");
                assert_eq!(*span, 8);
            }
            other => panic!("unexpected row: {other:?}"),
        }
    }

    #[test]
    fn drive_rows_keep_backend_order_and_badge_state() {
        let mut table = Table::loading(DRIVE_COLUMNS);
        render_drives(&[drive("252:3", "Online"), drive("252:1", "UGood")], &mut table);

        let Row::Cells(first) = &table.rows[0] else {
            panic!("expected cells");
        };
        assert_eq!(first.len(), DRIVE_COLUMNS.len());
        assert_eq!(first[0], Cell::Text("252:3".into()));
        assert_eq!(
            first[2],
            Cell::Badge {
                text: "Online".into(),
                tone: Tone::Success
            }
        );
        let Row::Cells(second) = &table.rows[1] else {
            panic!("expected cells");
        };
        assert_eq!(second[0], Cell::Text("252:1".into()));
    }

    #[test]
    fn virtual_drive_row_shows_device_and_delete_action() {
        let vd = VirtualDrive {
            dg_vd: "DG0/VD0".into(),
            raid_type: "RAID5".into(),
            state: "Optl".into(),
            access: "RW".into(),
            size: "10TB".into(),
            device: Some("/dev/sda".into()),
            ..Default::default()
        };
        let mut table = Table::loading(VDRIVE_COLUMNS);
        render_vdrives(&[vd], &mut table);

        let Row::Cells(cells) = &table.rows[0] else {
            panic!("expected cells");
        };
        assert_eq!(cells[5], Cell::Code("/dev/sda".into()));
        let Cell::Actions(actions) = &cells[7] else {
            panic!("expected actions");
        };
        assert!(actions.contains(&RowAction::Delete {
            vd_id: "DG0/VD0".into()
        }));
        assert_eq!(
            cells[2],
            Cell::Badge {
                text: "Optl".into(),
                tone: Tone::Success
            }
        );
    }

    #[test]
    fn virtual_drive_without_device_shows_na_and_only_delete() {
        let vd = VirtualDrive {
            dg_vd: "0/1".into(),
            device: None,
            ..Default::default()
        };
        let mut table = Table::loading(VDRIVE_COLUMNS);
        render_vdrives(&[vd], &mut table);

        let Row::Cells(cells) = &table.rows[0] else {
            panic!("expected cells");
        };
        assert_eq!(cells[5], Cell::Code("N/A".into()));
        assert_eq!(cells[6], Cell::Text("--".into()));
        assert_eq!(
            cells[7],
            Cell::Actions(vec![RowAction::Delete {
                vd_id: "0/1".into()
            }])
        );
    }

    #[test]
    fn mounted_array_offers_unmount() {
        let vd = VirtualDrive {
            dg_vd: "0/2".into(),
            device: Some("/dev/sdc".into()),
            mounted: true,
            ..Default::default()
        };
        assert_eq!(
            array_actions(&vd),
            vec![
                RowAction::Unmount {
                    device: "/dev/sdc".into()
                },
                RowAction::Delete {
                    vd_id: "0/2".into()
                },
            ]
        );
    }

    #[test]
    fn mount_column_shows_where_and_what() {
        let mounted = VirtualDrive {
            device: Some("/dev/sdc".into()),
            mount_point: Some("/mnt/raid".into()),
            filesystem: Some("xfs".into()),
            mounted: true,
            ..Default::default()
        };
        assert_eq!(
            mount_cell(&mounted),
            Cell::Toned {
                text: "/mnt/raid (xfs)".into(),
                tone: Tone::Success
            }
        );

        let formatted = VirtualDrive {
            device: Some("/dev/sdd".into()),
            mount_point: Some(String::new()),
            filesystem: Some("ext4".into()),
            ..Default::default()
        };
        assert_eq!(
            mount_cell(&formatted),
            Cell::Toned {
                text: "Not mounted (ext4)".into(),
                tone: Tone::Muted
            }
        );

        let blank = VirtualDrive {
            device: Some("/dev/sde".into()),
            ..Default::default()
        };
        assert_eq!(
            mount_cell(&blank),
            Cell::Toned {
                text: "No filesystem".into(),
                tone: Tone::Muted
            }
        );
    }

    #[test]
    fn empty_array_list_is_muted_message() {
        let mut table = Table::loading(VDRIVE_COLUMNS);
        render_vdrives(&[], &mut table);
        assert_eq!(
            table.rows,
            vec![Row::Message {
                text: "No RAID arrays configured".into(),
                span: 8,
                tone: Some(Tone::Muted),
                busy: false,
            }]
        );
    }

    #[test]
    fn health_counters_and_temperature_are_classified() {
        let entry = DriveHealth {
            slot: "252:0".into(),
            status: "Needs Attention".into(),
            overall_health: "Warning".into(),
            temperature: "38C (100.40 F)".into(),
            power_on_hours: "21874".into(),
            media_errors: "0".into(),
            predictive_failures: "3".into(),
        };
        let mut table = Table::loading(HEALTH_COLUMNS);
        render_health(&[entry], &mut table);

        let Row::Cells(cells) = &table.rows[0] else {
            panic!("expected cells");
        };
        assert_eq!(
            cells[1],
            Cell::Strong {
                text: "Needs Attention".into(),
                tone: Tone::Warning
            }
        );
        assert_eq!(
            cells[2],
            Cell::Toned {
                text: "38C (100.40 F)".into(),
                tone: Tone::Success
            }
        );
        assert_eq!(
            cells[4],
            Cell::Toned {
                text: "0".into(),
                tone: Tone::Success
            }
        );
        assert_eq!(
            cells[5],
            Cell::Toned {
                text: "3".into(),
                tone: Tone::Danger
            }
        );
    }

    #[test]
    fn temperature_threshold_is_strictly_above_fifty() {
        assert_eq!(temperature_tone("50"), Tone::Success);
        assert_eq!(temperature_tone("51C"), Tone::Danger);
        assert_eq!(temperature_tone(" 72C (161.60 F)"), Tone::Danger);
        assert_eq!(temperature_tone("N/A"), Tone::Success);
        assert_eq!(parse_temperature("-5C"), Some(-5));
        assert_eq!(parse_temperature("C38"), None);
    }

    #[test]
    fn oversized_temperature_saturates_and_is_flagged() {
        assert_eq!(parse_temperature("99999999999999999999999C"), Some(i64::MAX));
        assert_eq!(parse_temperature("-99999999999999999999999C"), Some(i64::MIN));
        assert_eq!(temperature_tone("99999999999999999999999C"), Tone::Danger);
        assert_eq!(temperature_tone("-99999999999999999999999C"), Tone::Success);
    }

    #[test]
    fn counters_compare_as_text() {
        assert_eq!(counter_tone("0"), Tone::Success);
        assert_eq!(counter_tone("00"), Tone::Danger);
        assert_eq!(counter_tone(""), Tone::Danger);
    }

    #[test]
    fn selection_offers_only_unconfigured_good_drives() {
        let drives = vec![
            drive("252:0", "Online"),
            drive("252:1", "Unconfigured Good"),
            drive("252:2", "UGood"),
            drive("252:3", "Unconfigured Bad"),
        ];
        let mut selection = DriveSelection::default();
        render_selection(Some(&raid("raid1", 2)), &drives, &mut selection);

        assert_eq!(selection.hint, "Minimum 2 drives required");
        let SelectionBody::Drives(boxes) = &selection.body else {
            panic!("expected checkboxes");
        };
        let slots: Vec<&str> = boxes.iter().map(|b| b.slot.as_str()).collect();
        assert_eq!(slots, vec!["252:1", "252:2"]);
        assert_eq!(boxes[0].label, "252:1 - 3.637 TB HGST HUS726040AL");
        assert!(boxes.iter().all(|b| !b.checked));
    }

    #[test]
    fn selection_warns_when_nothing_qualifies() {
        let mut selection = DriveSelection::default();
        render_selection(Some(&raid("raid5", 3)), &[drive("252:0", "Online")], &mut selection);
        assert_eq!(
            selection.body,
            SelectionBody::Warning("No unconfigured drives available".into())
        );
    }

    #[test]
    fn selection_without_type_prompts_and_clears_hint() {
        let mut selection = DriveSelection::default();
        render_selection(Some(&raid("raid5", 3)), &[], &mut selection);
        render_selection(None, &[drive("252:1", "UGood")], &mut selection);
        assert_eq!(selection, DriveSelection::default());
    }

    #[test]
    fn raid_type_selector_resets_to_placeholder() {
        let mut select = RaidTypeSelect {
            selected: "raid0".into(),
            ..Default::default()
        };
        render_raid_types(&[raid("raid1", 2), raid("raid5", 3)], &mut select);

        assert_eq!(select.options.len(), 2);
        assert_eq!(select.options[1].value, "raid5");
        assert_eq!(select.selected_label(), RaidTypeSelect::PLACEHOLDER);
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let drives = vec![drive("252:0", "Online"), drive("252:1", "Dgrd")];
        let mut first = Table::loading(DRIVE_COLUMNS);
        let mut second = Table::loading(DRIVE_COLUMNS);

        render_drives(&drives, &mut first);
        let once = first.to_string();
        render_drives(&drives, &mut first);
        render_drives(&drives, &mut second);

        assert_eq!(first.to_string(), once);
        assert_eq!(second.to_string(), once);
        assert_eq!(first, second);
    }

    #[test]
    fn test_device_choice_survives_refresh() {
        let mut panel = SpeedPanel::default();
        render_test_devices(&["/dev/sda".into(), "/dev/sdb".into()], &mut panel);
        assert_eq!(panel.device, "/dev/sda");

        panel.device = "/dev/sdb".into();
        render_test_devices(&["/dev/sda".into(), "/dev/sdb".into()], &mut panel);
        assert_eq!(panel.device, "/dev/sdb");

        render_test_devices(&["/dev/nvme0n1".into()], &mut panel);
        assert_eq!(panel.device, "/dev/nvme0n1");
    }
}
