use eframe::egui::{
    self,
    containers,
};

use super::View;
use crate::core::HealthStatus;

pub enum TopBarAction {
    Navigate(View),
    OpenSettings,
    RefreshHistory,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        current: View,
        has_result: bool,
        health: Option<&HealthStatus>,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.button("Refresh History").clicked() {
                        action = Some(TopBarAction::RefreshHistory);
                    }
                    if ui.button("Settings").clicked() {
                        action = Some(TopBarAction::OpenSettings);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.separator();

                for view in View::ALL {
                    let enabled = view != View::Results || has_result;
                    let clicked = ui
                        .add_enabled_ui(enabled, |ui| {
                            ui.selectable_label(current == view, view.label()).clicked()
                        })
                        .inner;
                    if clicked && current != view {
                        action = Some(TopBarAction::Navigate(view));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicator(ui, health);
                });
            });
        });

        action
    }

    fn show_status_indicator(ui: &mut egui::Ui, health: Option<&HealthStatus>) {
        let (color, tooltip) = match health {
            None => (egui::Color32::GRAY, "Checking analysis service...".to_string()),
            Some(status) if status.healthy => {
                (egui::Color32::from_rgb(0, 200, 0), service_tooltip("Service online", status))
            }
            Some(status) => {
                (egui::Color32::from_rgb(200, 80, 80), service_tooltip("Service offline", status))
            }
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("Service").on_hover_text(&tooltip);
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(&tooltip);
        });
    }
}

fn service_tooltip(headline: &str, status: &HealthStatus) -> String {
    let mut lines = vec![format!("{} ({})", headline, status.status)];

    let mut services: Vec<_> = status.services.iter().collect();
    services.sort_by(|a, b| a.0.cmp(b.0));
    for (name, up) in services {
        lines.push(format!("{}: {}", name, if *up { "up" } else { "down" }));
    }

    if let Some(timestamp) = &status.timestamp {
        lines.push(format!("Checked at {}", timestamp));
    }

    lines.join("\n")
}
