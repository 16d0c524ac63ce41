use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use crate::core::{
    history::summarize,
    AnalysisResult,
};

pub enum DashboardAction {
    Open(AnalysisResult),
    Forget(String),
    NewUpload,
}

pub struct DashboardView;

impl DashboardView {
    /// `records` is the merged history, local entries first. Only those whose id
    /// `is_local` accepts can be forgotten.
    pub fn show(
        ui: &mut egui::Ui,
        records: &[AnalysisResult],
        is_local: impl Fn(&str) -> bool,
    ) -> Option<DashboardAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading("Your Pitches");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("New Analysis").clicked() {
                    action = Some(DashboardAction::NewUpload);
                }
            });
        });

        let (count, average) = summarize(records);
        ui.horizontal(|ui| {
            ui.label(format!("{} {}", count, if count == 1 { "analysis" } else { "analyses" }));
            ui.separator();
            match average {
                Some(average) => ui.label(format!("Average overall score: {:.0}%", average)),
                None => ui.weak("No scores yet"),
            };
        });

        ui.separator();

        if records.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label("Nothing here yet. Upload a pitch video to get started.");
            });
            return action;
        }

        let text_height = egui::TextStyle::Body
            .resolve(ui.style())
            .size
            .max(ui.spacing().interact_size.y);

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(130.0))
            .column(Column::remainder().at_least(160.0).clip(true))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(120.0))
            .header(25.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Date");
                });
                header.col(|ui| {
                    ui.strong("File");
                });
                header.col(|ui| {
                    ui.strong("Overall");
                });
                header.col(|ui| {
                    ui.strong("Mood");
                });
                header.col(|_| {});
            })
            .body(|body| {
                body.rows(text_height, records.len(), |mut row| {
                    let record = &records[row.index()];

                    row.col(|ui| {
                        ui.label(record.format_created_at());
                    });
                    row.col(|ui| {
                        ui.label(&record.filename).on_hover_text(&record.id);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}%", record.analysis.overall_score));
                    });
                    row.col(|ui| {
                        ui.label(record.analysis.dominant_emotion().unwrap_or("-"));
                    });
                    row.col(|ui| {
                        if ui.small_button("Open").clicked() {
                            action = Some(DashboardAction::Open(record.clone()));
                        }
                        if is_local(&record.id) && ui.small_button("Forget").clicked() {
                            action = Some(DashboardAction::Forget(record.id.clone()));
                        }
                    });
                });
            });

        action
    }
}
