use std::time::{
    Duration,
    Instant,
};

use eframe::egui;

use crate::{
    core::video::VideoFileType,
    upload::UploadController,
};

const LARGE_SPACING: f32 = 10.0;
const COMPLETION_HOLD: Duration = Duration::from_millis(600);

/// Progress as the upload view shows it. A completed run stays at 100 for a
/// moment, even though the controller has already reset to 0.
#[derive(Debug, Default)]
pub struct ProgressDisplay {
    percent: u8,
    completed_at: Option<Instant>,
}

impl ProgressDisplay {
    pub fn record(&mut self, percent: u8, now: Instant) {
        if percent == 100 {
            self.completed_at = Some(now);
        }
        self.percent = percent;
    }

    pub fn is_holding(&self, now: Instant) -> bool {
        self.completed_at.is_some_and(|at| now.duration_since(at) < COMPLETION_HOLD)
    }

    pub fn percent(&self, now: Instant) -> u8 {
        if self.is_holding(now) {
            100
        } else {
            self.percent
        }
    }
}

pub enum UploadAction {
    Browse,
    Cancel,
}

pub struct UploadView;

impl UploadView {
    pub fn show(
        ui: &mut egui::Ui,
        controller: &UploadController,
        progress: &ProgressDisplay,
        max_upload_bytes: u64,
    ) -> Option<UploadAction> {
        let mut action = None;
        let busy = controller.is_busy();
        let now = Instant::now();
        let finishing = progress.is_holding(now);

        ui.heading("Analyze a Pitch");
        ui.add_space(LARGE_SPACING);

        egui::Frame::group(ui.style()).inner_margin(24.0).show(ui, |ui| {
            ui.set_min_height(160.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("🎬").size(36.0));
                ui.add_space(LARGE_SPACING);
                ui.label("Drop a video anywhere in the window, or");

                if ui.add_enabled(!busy, egui::Button::new("Browse for Video...")).clicked() {
                    action = Some(UploadAction::Browse);
                }

                ui.add_space(LARGE_SPACING);
                ui.weak(format!(
                    "Supported: {} (max {} MB)",
                    VideoFileType::supported_extensions().join(", "),
                    max_upload_bytes / (1024 * 1024)
                ));
            });
        });

        if busy || finishing {
            ui.add_space(LARGE_SPACING);

            ui.add(
                egui::ProgressBar::new(progress.percent(now) as f32 / 100.0)
                    .show_percentage()
                    .animate(busy),
            );

            ui.add_space(5.0);
            if busy {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label(format!(
                        "Analyzing {}...",
                        controller.active_filename().unwrap_or("video")
                    ));
                });

                ui.add_space(LARGE_SPACING);
                if ui.button("Cancel Analysis").clicked() {
                    action = Some(UploadAction::Cancel);
                }
            } else {
                ui.label("Analysis complete");
            }

            ui.ctx().request_repaint();
        }

        action
    }
}
