// Main application state and UI rendering logic for the RAID dashboard

use crate::api::Backend;
use crate::dashboard::{Dashboard, ValidationError};
use crate::dashboard::regions::{Regions, RowAction, SelectionBody, Severity, Tone};
use crate::gui::{badge, command_button, data_table, section, stat_card, tone_color};
use crate::models::{Filesystem, SpeedTestKind};
use crate::worker::Worker;
use eframe::egui;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Something the user did this frame. Collected while painting, applied afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Intent {
    Refresh,
    ScanHealth,
    OpenCreate,
    CloseCreate,
    SelectRaidType(String),
    SubmitCreate,
    Confirm,
    Dismiss,
    Row(RowAction),
    ConfirmDelete,
    CancelDelete,
    ConfirmMount,
    CancelMount,
    ConfirmFormat,
    CancelFormat,
    RunSpeedTest,
    AcknowledgeNotice,
}

/// Main application state for the eframe app.
/// Owns the dashboard and the worker that runs its requests.
pub struct AppState {
    /// Session state, regions and refresh schedule
    dashboard: Dashboard,

    /// Executes queued requests off the UI thread
    worker: Worker,

    /// Backend address shown in the header
    backend_url: String,
}

impl AppState {
    /// Creates the application state and kicks off the initial load.
    ///
    /// # Arguments
    /// * `cc` - eframe creation context containing egui context
    /// * `backend` - where requests go
    /// * `backend_url` - label for the header
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        backend: Arc<dyn Backend>,
        backend_url: String,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        // Each completion wakes the UI so answers render without user input
        let ctx = cc.egui_ctx.clone();
        let worker = Worker::new(backend).with_waker(Arc::new(move || ctx.request_repaint()));

        let mut s = Self {
            dashboard: Dashboard::new(),
            worker,
            backend_url,
        };
        s.dashboard.start(Instant::now());
        s.flush();
        s
    }

    /// Hand queued jobs to the worker.
    fn flush(&mut self) {
        for job in self.dashboard.take_jobs() {
            self.worker.submit(job);
        }
    }

    /// Apply every answer that arrived since the last frame.
    fn pump(&mut self) {
        for completion in self.worker.drain() {
            self.dashboard.handle(completion);
        }
    }

    fn apply(&mut self, intent: Intent) {
        let dash = &mut self.dashboard;
        let checked: Result<(), ValidationError> = match intent {
            Intent::Refresh => {
                dash.refresh_all();
                Ok(())
            }
            Intent::ScanHealth => {
                dash.load_health();
                Ok(())
            }
            Intent::OpenCreate => {
                dash.open_create_dialog();
                Ok(())
            }
            Intent::CloseCreate => {
                dash.close_create_dialog();
                Ok(())
            }
            Intent::SelectRaidType(value) => {
                dash.select_raid_type(&value);
                Ok(())
            }
            Intent::SubmitCreate => dash.create_array(),
            Intent::Confirm => {
                dash.confirm();
                Ok(())
            }
            Intent::Dismiss => {
                dash.dismiss_confirmation();
                Ok(())
            }
            Intent::Row(action) => {
                dash.row_action(&action);
                Ok(())
            }
            Intent::ConfirmDelete => {
                dash.confirm_delete();
                Ok(())
            }
            Intent::CancelDelete => {
                dash.cancel_delete();
                Ok(())
            }
            Intent::ConfirmMount => dash.confirm_mount(),
            Intent::CancelMount => {
                dash.cancel_mount();
                Ok(())
            }
            Intent::ConfirmFormat => {
                dash.confirm_format();
                Ok(())
            }
            Intent::CancelFormat => {
                dash.cancel_format();
                Ok(())
            }
            Intent::RunSpeedTest => dash.run_speed_test(),
            Intent::AcknowledgeNotice => {
                dash.acknowledge_notice();
                Ok(())
            }
        };
        // The dashboard already queued a notice for the user
        if let Err(e) = checked {
            debug!(error = %e, "input rejected");
        }
    }
}

impl eframe::App for AppState {
    /// Main UI update function called every frame.
    /// Applies finished requests, runs the periodic refresh, paints, then submits new requests.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump();
        self.dashboard.tick(Instant::now());

        let mut intents = Vec::new();
        let regions = self.dashboard.regions_mut();
        header(ctx, &self.backend_url, regions, &mut intents);
        body(ctx, regions, &mut intents);
        dialogs(ctx, regions, &mut intents);

        for intent in intents {
            self.apply(intent);
        }
        self.flush();

        // Wake up for the next periodic refresh even if nothing else happens
        if let Some(wait) = self.dashboard.until_next_refresh(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

/// TOP PANEL: controller summary and manual refresh
fn header(ctx: &egui::Context, backend_url: &str, regions: &Regions, intents: &mut Vec<Intent>) {
    egui::TopBottomPanel::top("controller_panel")
        .frame(
            egui::Frame::none()
                .fill(egui::Color32::WHITE)
                .inner_margin(egui::vec2(20.0, 12.0)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("RAID Controller").size(20.0).strong());
                ui.add_space(12.0);
                badge(ui, &regions.controller.status, regions.controller.status_tone);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let refresh_btn = egui::Button::new(egui::RichText::new("🔄").size(14.0)).frame(false);
                    if ui.add(refresh_btn).on_hover_text("Refresh").clicked() {
                        intents.push(Intent::Refresh);
                    }
                    ui.label(
                        egui::RichText::new(backend_url)
                            .size(11.0)
                            .color(egui::Color32::from_gray(120)),
                    );
                });
            });

            ui.add_space(6.0);

            egui::Grid::new("controller_grid")
                .spacing([15.0, 6.0])
                .show(ui, |ui| {
                    for header in &["Model", "Serial no.", "Firmware"] {
                        ui.label(egui::RichText::new(*header).strong().size(11.0));
                    }
                    ui.end_row();

                    ui.label(egui::RichText::new(&regions.controller.model).size(11.0));
                    ui.label(egui::RichText::new(&regions.controller.serial).size(11.0));
                    ui.label(egui::RichText::new(&regions.controller.firmware).size(11.0));
                    ui.end_row();
                });
        });
}

/// CENTRAL PANEL: drive tables, health scan and speed test
fn body(ctx: &egui::Context, regions: &mut Regions, intents: &mut Vec<Intent>) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::from_rgb(245, 247, 250)))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);

                section(ui, "Physical Drives", |ui| {
                    data_table(ui, "drive_grid", &regions.drives, &|_| true);
                });

                ui.add_space(12.0);

                let buttons = regions.buttons.clone();
                section(ui, "RAID Arrays", |ui| {
                    if command_button(ui, &buttons.create, tone_color(Tone::Primary)) {
                        intents.push(Intent::OpenCreate);
                    }
                    ui.add_space(8.0);
                    let clicked = data_table(ui, "vdrive_grid", &regions.vdrives, &|action| {
                        match action {
                            RowAction::Delete { .. } => buttons.delete.enabled,
                            RowAction::Mount { .. } => buttons.mount.enabled,
                            RowAction::Unmount { .. } => buttons.unmount.enabled,
                            RowAction::Format { .. } => buttons.format.enabled,
                        }
                    });
                    if let Some(action) = clicked {
                        intents.push(Intent::Row(action));
                    }
                });

                ui.add_space(12.0);

                section(ui, "Drive Health", |ui| {
                    if ui.button("Scan").clicked() {
                        intents.push(Intent::ScanHealth);
                    }
                    ui.add_space(8.0);
                    data_table(ui, "health_grid", &regions.health, &|_| true);
                });

                ui.add_space(12.0);

                section(ui, "Speed Test", |ui| speed_test(ui, regions, intents));

                ui.add_space(15.0);
            });
        });
}

fn speed_test(ui: &mut egui::Ui, regions: &mut Regions, intents: &mut Vec<Intent>) {
    let speed = &mut regions.speed;

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Device").size(11.0));
        if speed.devices.is_empty() {
            // Backend offered nothing; let the user type a device path
            ui.text_edit_singleline(&mut speed.device);
        } else {
            egui::ComboBox::from_id_salt("speed_device")
                .selected_text(speed.device.as_str())
                .show_ui(ui, |ui| {
                    for device in &speed.devices {
                        ui.selectable_value(&mut speed.device, device.clone(), device);
                    }
                });
        }

        ui.add_space(12.0);
        for kind in [SpeedTestKind::Quick, SpeedTestKind::Full] {
            ui.radio_value(&mut speed.kind, kind, kind.label());
        }

        ui.add_space(12.0);
        if command_button(ui, &regions.buttons.speed_test, tone_color(Tone::Primary)) {
            intents.push(Intent::RunSpeedTest);
        }
    });

    if !speed.visible {
        return;
    }

    let card_width = 240.0;
    let card_spacing = 11.0;
    let card_height = 75.0;

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        stat_card(ui, card_width, card_height, "Read Speed", &speed.read_speed, egui::Color32::from_rgb(59, 130, 246));
        ui.add_space(card_spacing);
        stat_card(ui, card_width, card_height, "Read IOPS", &speed.read_iops, egui::Color32::from_rgb(139, 92, 246));
        ui.add_space(card_spacing);
        stat_card(ui, card_width, card_height, "Write Speed", &speed.write_speed, egui::Color32::from_rgb(34, 197, 94));
        ui.add_space(card_spacing);
        stat_card(ui, card_width, card_height, "Write IOPS", &speed.write_iops, egui::Color32::from_rgb(251, 146, 60));
    });
}

fn modal(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

/// Dialog windows. At most one confirmation and one notice are shown at a time.
fn dialogs(ctx: &egui::Context, regions: &mut Regions, intents: &mut Vec<Intent>) {
    if regions.dialogs.create {
        create_dialog(ctx, regions, intents);
    }

    if let Some(vd_id) = &regions.dialogs.delete {
        modal("Delete RAID Array").show(ctx, |ui| {
            ui.label(format!("Delete RAID array {}?", vd_id));
            ui.label(
                egui::RichText::new("All data on this array will be lost.")
                    .color(tone_color(Tone::Danger)),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if command_button(ui, &regions.buttons.delete, tone_color(Tone::Danger)) {
                    intents.push(Intent::ConfirmDelete);
                }
                if ui.button("Cancel").clicked() {
                    intents.push(Intent::CancelDelete);
                }
            });
        });
    }

    if let Some(form) = &mut regions.dialogs.mount {
        let button = &regions.buttons.mount;
        modal("Mount Device").show(ctx, |ui| {
            ui.label(egui::RichText::new(&form.device).monospace());
            ui.horizontal(|ui| {
                ui.label("Mount point");
                ui.text_edit_singleline(&mut form.mount_point);
            });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if command_button(ui, button, tone_color(Tone::Success)) {
                    intents.push(Intent::ConfirmMount);
                }
                if ui.button("Cancel").clicked() {
                    intents.push(Intent::CancelMount);
                }
            });
        });
    }

    if let Some(form) = &mut regions.dialogs.format {
        let button = &regions.buttons.format;
        modal("Format Device").show(ctx, |ui| {
            ui.label(egui::RichText::new(&form.device).monospace());
            ui.horizontal(|ui| {
                for fs in [Filesystem::Ext4, Filesystem::Xfs] {
                    ui.radio_value(&mut form.filesystem, fs, fs.as_str());
                }
            });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if command_button(ui, button, tone_color(Tone::Danger)) {
                    intents.push(Intent::ConfirmFormat);
                }
                if ui.button("Cancel").clicked() {
                    intents.push(Intent::CancelFormat);
                }
            });
        });
    }

    if let Some(confirmation) = &regions.dialogs.confirm {
        modal("Confirm").show(ctx, |ui| {
            ui.label(&confirmation.prompt);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    intents.push(Intent::Confirm);
                }
                if ui.button("Cancel").clicked() {
                    intents.push(Intent::Dismiss);
                }
            });
        });
    } else if let Some(notice) = regions.notices.front() {
        let tone = match notice.severity {
            Severity::Info => Tone::Success,
            Severity::Warning => Tone::Warning,
            Severity::Error => Tone::Danger,
        };
        modal("Notice").show(ctx, |ui| {
            ui.label(egui::RichText::new(&notice.text).color(tone_color(tone)));
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                intents.push(Intent::AcknowledgeNotice);
            }
        });
    }
}

fn create_dialog(ctx: &egui::Context, regions: &mut Regions, intents: &mut Vec<Intent>) {
    modal("Create RAID Array").show(ctx, |ui| {
        let select = &regions.raid_types;
        let mut chosen = select.selected.clone();
        egui::ComboBox::from_id_salt("raid_type")
            .selected_text(select.selected_label())
            .width(260.0)
            .show_ui(ui, |ui| {
                for opt in &select.options {
                    ui.selectable_value(&mut chosen, opt.value.clone(), &opt.label);
                }
            });
        if chosen != select.selected {
            intents.push(Intent::SelectRaidType(chosen));
        }

        let selection = &mut regions.selection;
        if !selection.hint.is_empty() {
            ui.label(
                egui::RichText::new(&selection.hint)
                    .size(11.0)
                    .color(egui::Color32::from_gray(120)),
            );
        }
        ui.add_space(6.0);

        match &mut selection.body {
            SelectionBody::Prompt(text) => {
                ui.label(egui::RichText::new(text.as_str()).color(tone_color(Tone::Muted)));
            }
            SelectionBody::Warning(text) => {
                ui.label(egui::RichText::new(text.as_str()).color(tone_color(Tone::Warning)));
            }
            SelectionBody::Drives(boxes) => {
                for cb in boxes.iter_mut() {
                    ui.checkbox(&mut cb.checked, cb.label.as_str());
                }
            }
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if command_button(ui, &regions.buttons.create, tone_color(Tone::Primary)) {
                intents.push(Intent::SubmitCreate);
            }
            if ui.button("Close").clicked() {
                intents.push(Intent::CloseCreate);
            }
        });
    });
}
