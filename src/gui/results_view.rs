use eframe::egui;

use crate::core::{
    models::{
        Analysis,
        CoachingFeedback,
        Metrics,
    },
    AnalysisResult,
};

const SECTION_SPACING: f32 = 14.0;

pub enum ResultsAction {
    Export,
    NewUpload,
}

pub struct ResultsView;

impl ResultsView {
    pub fn show(ui: &mut egui::Ui, result: Option<&AnalysisResult>) -> Option<ResultsAction> {
        let Some(result) = result else {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label("No analysis yet. Upload a pitch video to get feedback.");
            });
            return None;
        };

        let mut action = None;

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading(&result.filename);
                ui.weak(format!("Analyzed {}", result.format_created_at()));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Analyze Another").clicked() {
                    action = Some(ResultsAction::NewUpload);
                }
                if ui.button("Export JSON...").clicked() {
                    action = Some(ResultsAction::Export);
                }
            });
        });

        ui.separator();

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            score_cards(ui, &result.analysis);
            ui.add_space(SECTION_SPACING);

            ui.columns(2, |columns| {
                emotions(&mut columns[0], &result.analysis);
                metrics(&mut columns[1], &result.analysis.metrics);
            });
            ui.add_space(SECTION_SPACING);

            ui.strong("Transcript");
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                if result.analysis.transcript.trim().is_empty() {
                    ui.weak("No transcript available.");
                } else {
                    ui.label(&result.analysis.transcript);
                }
            });
            ui.add_space(SECTION_SPACING);

            feedback(ui, &result.analysis.coaching_feedback);
        });

        action
    }
}

fn score_color(score: f32) -> egui::Color32 {
    if score >= 80.0 {
        egui::Color32::from_rgb(0, 200, 0)
    } else if score >= 60.0 {
        egui::Color32::from_rgb(220, 160, 40)
    } else {
        egui::Color32::from_rgb(200, 80, 80)
    }
}

fn score_cards(ui: &mut egui::Ui, analysis: &Analysis) {
    ui.horizontal_wrapped(|ui| {
        for (label, score) in analysis.score_cards() {
            egui::Frame::group(ui.style()).inner_margin(12.0).show(ui, |ui| {
                ui.set_min_width(120.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{:.0}%", score))
                            .size(26.0)
                            .strong()
                            .color(score_color(score)),
                    );
                    ui.small(label);
                });
            });
        }
    });
}

fn emotions(ui: &mut egui::Ui, analysis: &Analysis) {
    ui.strong("Emotions");
    for (label, score) in analysis.ranked_emotions() {
        ui.horizontal(|ui| {
            ui.add_sized([90.0, 18.0], egui::Label::new(capitalize(label)));
            ui.add(
                egui::ProgressBar::new(score)
                    .desired_width(ui.available_width())
                    .text(format!("{:.0}%", score * 100.0)),
            );
        });
    }
}

fn metrics(ui: &mut egui::Ui, metrics: &Metrics) {
    ui.strong("Delivery");
    egui::Grid::new("delivery_metrics").num_columns(2).striped(true).show(ui, |ui| {
        ui.label("Speech rate");
        ui.label(format!("{:.0} wpm", metrics.speech_rate));
        ui.end_row();

        ui.label("Pauses");
        ui.label(metrics.pause_frequency.to_string());
        ui.end_row();

        ui.label("Filler words");
        ui.label(metrics.filler_words.to_string());
        ui.end_row();

        ui.label("Gestures");
        ui.label(metrics.gesture_frequency.to_string());
        ui.end_row();

        ui.label("Eye contact");
        ui.label(format!("{:.0}%", metrics.eye_contact_percentage));
        ui.end_row();
    });
}

fn feedback(ui: &mut egui::Ui, feedback: &CoachingFeedback) {
    let sections = [
        ("Strengths", &feedback.strengths),
        ("Areas to Improve", &feedback.improvements),
        ("Recommendations", &feedback.recommendations),
    ];

    ui.columns(sections.len(), |columns| {
        for (column, (title, items)) in columns.iter_mut().zip(sections) {
            column.strong(title);
            if items.is_empty() {
                column.weak("Nothing noted.");
            }
            for item in items {
                column.label(format!("• {}", item));
            }
        }
    });
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
