use std::{
    collections::VecDeque,
    time::{
        Duration,
        Instant,
    },
};

use eframe::egui;

use crate::upload::{
    Notification,
    Severity,
};

const MAX_VISIBLE: usize = 4;

struct Toast {
    notification: Notification,
    shown_at: Instant,
}

impl Toast {
    fn lifetime(&self) -> Duration {
        match self.notification.severity {
            Severity::Error => Duration::from_secs(8),
            Severity::Success | Severity::Info => Duration::from_secs(4),
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.lifetime()
    }
}

/// Stack of short-lived messages in the bottom-right corner. Click to dismiss.
#[derive(Default)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    fn push_at(&mut self, notification: Notification, now: Instant) {
        self.toasts.push_back(Toast { notification, shown_at: now });
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.expired(now));
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.toasts.is_empty() {
            return;
        }

        let mut dismissed = None;

        egui::Area::new(egui::Id::new("notifications"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for (index, toast) in self.toasts.iter().enumerate() {
                    let (icon, color) = severity_style(toast.notification.severity);

                    let response = egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.5, color))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new(icon).size(18.0).color(color));
                                ui.vertical(|ui| {
                                    ui.strong(&toast.notification.title);
                                    ui.label(&toast.notification.message);
                                });
                            });
                        })
                        .response
                        .interact(egui::Sense::click());

                    if response.clicked() {
                        dismissed = Some(index);
                    }
                    ui.add_space(6.0);
                }
            });

        if let Some(index) = dismissed {
            self.toasts.remove(index);
        }

        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

fn severity_style(severity: Severity) -> (&'static str, egui::Color32) {
    match severity {
        Severity::Success => ("✔", egui::Color32::from_rgb(0, 200, 0)),
        Severity::Info => ("ℹ", egui::Color32::LIGHT_BLUE),
        Severity::Error => ("⚠", egui::Color32::from_rgb(200, 80, 80)),
    }
}
