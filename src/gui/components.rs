// Reusable UI components: cards, badges, command buttons and region tables

use crate::dashboard::regions::{Button, Cell, Metric, Row, RowAction, Table, Tone};
use eframe::egui;

/// Palette used for every tone in the dashboard
pub fn tone_color(tone: Tone) -> egui::Color32 {
    match tone {
        Tone::Success => egui::Color32::from_rgb(16, 185, 129),
        Tone::Info => egui::Color32::from_rgb(14, 165, 233),
        Tone::Warning => egui::Color32::from_rgb(245, 158, 11),
        Tone::Danger => egui::Color32::from_rgb(239, 68, 68),
        Tone::Secondary => egui::Color32::from_gray(140),
        Tone::Primary => egui::Color32::from_rgb(59, 130, 246),
        Tone::Muted => egui::Color32::from_gray(120),
    }
}

/// Small filled pill with white text.
pub fn badge(ui: &mut egui::Ui, text: &str, tone: Tone) {
    egui::Frame::none()
        .fill(tone_color(tone))
        .rounding(6.0)
        .inner_margin(egui::vec2(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(text)
                    .color(egui::Color32::WHITE)
                    .size(11.0)
                    .strong(),
            );
        });
}

/// White card with a title; the dashboard's sections all share this frame.
pub fn section<R>(
    ui: &mut egui::Ui,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    ui.horizontal(|ui| {
        ui.add_space(20.0);
        let inner = egui::Frame::none()
            .fill(egui::Color32::WHITE)
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(220)))
            .rounding(10.0)
            .inner_margin(15.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width() - 40.0);
                ui.label(egui::RichText::new(title).size(14.0).strong());
                ui.add_space(8.0);
                add_contents(ui)
            })
            .inner;
        ui.add_space(20.0);
        inner
    })
    .inner
}

/// Metric card; shows a spinner while the value is pending.
pub fn stat_card(
    ui: &mut egui::Ui,
    width: f32,
    height: f32,
    label: &str,
    value: &Metric,
    color: egui::Color32,
) {
    egui::Frame::none()
        .fill(egui::Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(230)))
        .rounding(10.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(width);
            ui.set_height(height);
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(label)
                        .size(11.0)
                        .color(egui::Color32::from_gray(120)),
                );
                ui.add_space(8.0);
                match value {
                    Metric::Busy => {
                        ui.spinner();
                    }
                    Metric::Value(v) => {
                        ui.label(egui::RichText::new(v).size(22.0).color(color).strong());
                    }
                }
            });
        });
}

/// Button bound to an in-flight request. Returns true when clicked.
pub fn command_button(ui: &mut egui::Ui, button: &Button, fill: egui::Color32) -> bool {
    ui.horizontal(|ui| {
        let clicked = ui
            .add_enabled(
                button.enabled,
                egui::Button::new(egui::RichText::new(button.label).color(egui::Color32::WHITE))
                    .fill(fill),
            )
            .clicked();
        if button.busy {
            ui.spinner();
        }
        clicked
    })
    .inner
}

fn cell(ui: &mut egui::Ui, cell: &Cell, enabled: &dyn Fn(&RowAction) -> bool) -> Option<RowAction> {
    match cell {
        Cell::Text(text) => {
            ui.label(egui::RichText::new(text).size(11.0));
        }
        Cell::Strong { text, tone } => {
            ui.label(
                egui::RichText::new(text)
                    .size(11.0)
                    .strong()
                    .color(tone_color(*tone)),
            );
        }
        Cell::Toned { text, tone } => {
            ui.label(egui::RichText::new(text).size(11.0).color(tone_color(*tone)));
        }
        Cell::Badge { text, tone } => badge(ui, text, *tone),
        Cell::Code(text) => {
            ui.label(egui::RichText::new(text).size(11.0).monospace());
        }
        Cell::Actions(actions) => {
            let mut clicked = None;
            ui.horizontal(|ui| {
                for action in actions {
                    let color = match action {
                        RowAction::Delete { .. } | RowAction::Format { .. } => Tone::Danger,
                        RowAction::Mount { .. } => Tone::Success,
                        RowAction::Unmount { .. } => Tone::Warning,
                    };
                    let btn = egui::Button::new(
                        egui::RichText::new(action.label())
                            .size(11.0)
                            .color(egui::Color32::WHITE),
                    )
                    .fill(tone_color(color))
                    .small();
                    if ui.add_enabled(enabled(action), btn).clicked() {
                        clicked = Some(action.clone());
                    }
                }
            });
            return clicked;
        }
    }
    None
}

/// Striped grid for a region table. Returns the row action clicked this frame.
pub fn data_table(
    ui: &mut egui::Ui,
    id: &str,
    table: &Table,
    enabled: &dyn Fn(&RowAction) -> bool,
) -> Option<RowAction> {
    let mut clicked = None;
    egui::Grid::new(id)
        .striped(true)
        .spacing([25.0, 10.0])
        .show(ui, |ui| {
            for header in table.columns {
                ui.label(egui::RichText::new(*header).strong().size(11.0));
            }
            ui.end_row();

            for row in &table.rows {
                match row {
                    Row::Cells(cells) => {
                        for c in cells {
                            if let Some(action) = cell(ui, c, enabled) {
                                clicked = Some(action);
                            }
                        }
                    }
                    // Grid has no column span; the message sits in the first column
                    Row::Message { text, tone, busy, .. } => {
                        ui.horizontal(|ui| {
                            if *busy {
                                ui.spinner();
                            }
                            let color = tone.map(tone_color).unwrap_or(egui::Color32::from_gray(100));
                            ui.label(egui::RichText::new(text).size(11.0).color(color));
                        });
                    }
                }
                ui.end_row();
            }
        });
    clicked
}
