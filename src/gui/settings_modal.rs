use eframe::egui;

use crate::core::config::{
    parse_base_url,
    FallbackPolicy,
    SettingsData,
    BASE_URL_ENV,
    DEFAULT_BASE_URL,
    FALLBACK_ENV,
};

pub struct SettingsModal {
    open: bool,
    original: SettingsData,
    base_url_input: String,
    fallback_policy: FallbackPolicy,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self {
            open: false,
            original: SettingsData::default(),
            base_url_input: String::new(),
            fallback_policy: FallbackPolicy::default(),
        }
    }

    pub fn open_settings(&mut self, current_settings: &SettingsData) {
        self.original = current_settings.clone();
        self.base_url_input = current_settings.api_base_url.clone().unwrap_or_default();
        self.fallback_policy = current_settings.fallback_policy;
        self.open = true;
    }

    fn edited(&self) -> SettingsData {
        let url = self.base_url_input.trim();
        SettingsData {
            api_base_url: if url.is_empty() {
                None
            } else {
                Some(parse_base_url(url).unwrap_or_else(|| url.to_string()))
            },
            fallback_policy: self.fallback_policy,
        }
    }

    fn is_dirty(&self) -> bool {
        self.edited() != self.original
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut result = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(460.0);
            ui.heading("Analysis Service");
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label("Service URL:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.base_url_input)
                        .hint_text(DEFAULT_BASE_URL)
                        .desired_width(280.0),
                );
            });

            let url_valid = is_valid_url(&self.base_url_input);
            if !url_valid {
                ui.colored_label(egui::Color32::RED, "⚠ Enter a full http:// or https:// URL");
            }
            if std::env::var(BASE_URL_ENV).is_ok() {
                ui.weak(format!("{} is set and takes precedence.", BASE_URL_ENV));
            }

            ui.add_space(10.0);
            ui.label("When the service fails:");
            for policy in [FallbackPolicy::Synthesize, FallbackPolicy::Propagate] {
                ui.radio_value(&mut self.fallback_policy, policy, policy.label());
            }
            if std::env::var(FALLBACK_ENV).is_ok() {
                ui.weak(format!("{} is set and takes precedence.", FALLBACK_ENV));
            }

            ui.add_space(10.0);
            ui.separator();

            let is_dirty = self.is_dirty();
            ui.horizontal(|ui| {
                if is_dirty {
                    ui.colored_label(egui::Color32::YELLOW, "⚠");
                    ui.label("Settings have been modified");
                } else {
                    ui.colored_label(egui::Color32::TRANSPARENT, "⚠");
                    ui.label("");
                }
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                let save_clicked = ui
                    .add_enabled(is_dirty && url_valid, egui::Button::new("Save Settings"))
                    .clicked();
                let close_clicked = ui.button("Close").clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("Restore Default").clicked();
                });

                if save_clicked {
                    let settings = self.edited();
                    self.original = settings.clone();
                    result = Some(settings);
                    ui.close();
                } else if close_clicked {
                    ui.close();
                } else if reset_clicked {
                    self.base_url_input.clear();
                    self.fallback_policy = FallbackPolicy::default();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}

fn is_valid_url(input: &str) -> bool {
    input.trim().is_empty() || parse_base_url(input).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_url_means_default() {
        let mut modal = SettingsModal::new();
        modal.open_settings(&SettingsData {
            api_base_url: Some("http://coach:9000".to_string()),
            fallback_policy: FallbackPolicy::Synthesize,
        });
        assert!(!modal.is_dirty());

        modal.base_url_input = "   ".to_string();
        assert!(modal.is_dirty());
        assert_eq!(modal.edited().api_base_url, None);
    }

    #[test]
    fn only_http_urls_are_accepted() {
        assert!(is_valid_url(""));
        assert!(is_valid_url("https://coach.example.com"));
        assert!(is_valid_url("HTTP://coach:8000"));
        assert!(!is_valid_url("coach.example.com"));
        assert!(!is_valid_url("localhost:8000"));
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("http://my host"));
        assert!(!is_valid_url("ftp://coach"));
    }
}
