mod app;
mod dashboard_view;
mod notifications;
mod results_view;
mod settings_modal;
mod top_bar;
mod upload_view;

pub use app::CoachApp;

/// The screen shown in the central panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Upload,
    Results,
}

impl View {
    pub const ALL: [View; 3] = [View::Dashboard, View::Upload, View::Results];

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Upload => "Upload",
            View::Results => "Results",
        }
    }
}
