use std::{
    mem,
    path::Path,
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

use eframe::egui::{
    self,
    Id,
};
use tracing::{
    info,
    warn,
};

use super::{
    dashboard_view::{
        DashboardAction,
        DashboardView,
    },
    notifications::Notifications,
    results_view::{
        ResultsAction,
        ResultsView,
    },
    settings_modal::SettingsModal,
    top_bar::{
        TopBar,
        TopBarAction,
    },
    upload_view::{
        ProgressDisplay,
        UploadAction,
        UploadView,
    },
    View,
};
use crate::{
    api::AnalysisClient,
    core::{
        config::{
            ClientConfig,
            SettingsData,
        },
        history::{
            AnalysisHistory,
            HISTORY_FILE,
        },
        tasks::{
            CancellableTask,
            TaskManager,
            TaskResult,
        },
        video::VideoFileType,
        AnalysisResult,
        AnalysisStore,
        HealthStatus,
        VideoFile,
    },
    persistence::{
        export_json,
        load_json_or_default,
        save_json,
        SETTINGS_FILE,
    },
    upload::{
        ControllerEvent,
        Notification,
        SubmitOutcome,
        UploadController,
    },
};

const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(30);

pub struct CoachApp {
    // Configuration
    settings_data: SettingsData,
    max_upload_bytes: u64,

    // Analysis state
    store: AnalysisStore,
    controller: UploadController,
    history: AnalysisHistory,
    remote_history: Vec<AnalysisResult>,

    // UI State
    view: View,
    progress: ProgressDisplay,
    results_pending: bool,
    notifications: Notifications,
    settings_modal: SettingsModal,

    // External Services
    health: Option<HealthStatus>,
    last_health_check: Option<Instant>,
    task_manager: TaskManager,
}

impl CoachApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_data: SettingsData,
        task_manager: TaskManager,
        max_upload_bytes: u64,
    ) -> Self {
        let store = AnalysisStore::new();
        let history = load_json_or_default::<AnalysisHistory>(HISTORY_FILE);
        info!("Loaded {} saved analyses", history.len());

        task_manager.fetch_history();

        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);

        Self {
            settings_data,
            max_upload_bytes,

            controller: UploadController::new(store.clone(), max_upload_bytes),
            store,
            history,
            remote_history: Vec::new(),

            view: View::default(),
            progress: ProgressDisplay::default(),
            results_pending: false,
            notifications: Notifications::default(),
            settings_modal: SettingsModal::new(),

            health: None,
            last_health_check: None,
            task_manager,
        }
    }
}

impl eframe::App for CoachApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }
        self.drain_controller_events();
        self.show_pending_results();

        self.update_health_status();
        self.handle_file_drops(ctx);
        self.draw_file_drop_overlay(ctx);

        let current = self.store.current();

        if let Some(action) =
            TopBar::show(ctx, self.view, current.is_some(), self.health.as_ref())
        {
            match action {
                TopBarAction::Navigate(view) => self.view = view,
                TopBarAction::OpenSettings => self.settings_modal.open_settings(&self.settings_data),
                TopBarAction::RefreshHistory => self.task_manager.fetch_history(),
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Dashboard => {
                let records = self.history.merged_with(&self.remote_history);
                let history = &self.history;
                let action =
                    DashboardView::show(ui, &records, |id| history.get(id).is_some());
                if let Some(action) = action {
                    self.handle_dashboard_action(action);
                }
            }
            View::Upload => {
                if let Some(action) = UploadView::show(
                    ui,
                    &self.controller,
                    &self.progress,
                    self.max_upload_bytes,
                ) {
                    match action {
                        UploadAction::Browse => self.browse_for_video(),
                        UploadAction::Cancel => self.cancel_upload(),
                    }
                }
            }
            View::Results => {
                if let Some(action) = ResultsView::show(ui, current.as_deref()) {
                    match action {
                        ResultsAction::Export => self.export_current(),
                        ResultsAction::NewUpload => self.view = View::Upload,
                    }
                }
            }
        });

        if let Some(settings) = self.settings_modal.show(ctx) {
            self.apply_settings(settings);
        }

        self.notifications.show(ctx);

        if self.controller.is_busy() || self.results_pending {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else {
            ctx.request_repaint_after(HEALTH_POLL_INTERVAL);
        }
    }
}

impl CoachApp {
    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Upload(update) => self.controller.apply(update),
            TaskResult::History(remote) => {
                info!("Fetched {} analyses from the service", remote.len());
                self.remote_history = remote;
            }
            TaskResult::Health(status) => {
                let was_healthy = self.health.as_ref().map(|h| h.healthy);
                if was_healthy != Some(status.healthy) {
                    info!("Analysis service is {}", status.status);
                }
                self.health = Some(status);
            }
        }
    }

    fn drain_controller_events(&mut self) {
        for event in self.controller.take_events() {
            match event {
                ControllerEvent::Progress(percent) => {
                    self.progress.record(percent, Instant::now())
                }
                ControllerEvent::Published(result) => self.remember(result),
                ControllerEvent::Notify(notification) => self.notifications.push(notification),
                ControllerEvent::NavigateToResults => self.results_pending = true,
            }
        }
    }

    /// Switches to the results once the finished progress bar has been seen.
    fn show_pending_results(&mut self) {
        if self.results_pending && !self.progress.is_holding(Instant::now()) {
            self.results_pending = false;
            self.view = View::Results;
        }
    }

    fn remember(&mut self, result: Arc<AnalysisResult>) {
        self.history.add(result.as_ref().clone());
        self.save_history();
    }

    fn submit_path(&mut self, path: &Path) {
        let file = match VideoFile::from_path(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                self.notifications.push(Notification::error("Upload Error", e.to_string()));
                return;
            }
        };

        match self.controller.submit(&file) {
            SubmitOutcome::Started(submission) => {
                self.results_pending = false;
                self.view = View::Upload;
                self.task_manager.start_upload(file, submission);
            }
            SubmitOutcome::Rejected(_) => {}
            SubmitOutcome::Ignored => self.notifications.push(Notification::info(
                "Upload In Progress",
                "Wait for the current analysis to finish before starting another.",
            )),
        }
    }

    fn browse_for_video(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Video files", VideoFileType::supported_extensions())
            .pick_file()
        {
            self.submit_path(&path);
        }
    }

    fn cancel_upload(&mut self) {
        if self.controller.cancel().is_some() {
            self.task_manager.cancel(CancellableTask::Upload);
        }
    }

    fn handle_dashboard_action(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::Open(record) => {
                info!("Re-opening analysis {}", record.id);
                self.store.publish(record);
                self.view = View::Results;
            }
            DashboardAction::Forget(id) => {
                self.history.remove(&id);
                self.save_history();
            }
            DashboardAction::NewUpload => self.view = View::Upload,
        }
    }

    fn export_current(&mut self) {
        let Some(result) = self.store.current() else {
            return;
        };

        let stem = Path::new(&result.filename)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("analysis");

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .set_file_name(format!("{}-report.json", stem))
            .save_file()
        else {
            return;
        };

        match export_json(result.as_ref(), &path) {
            Ok(()) => self.notifications.push(Notification::success(
                "Report Exported",
                format!("Saved to {}", path.display()),
            )),
            Err(e) => {
                warn!("Export failed: {}", e);
                self.notifications.push(Notification::error("Export Failed", e.to_string()));
            }
        }
    }

    fn apply_settings(&mut self, settings: SettingsData) {
        self.settings_data = settings;
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            warn!("Failed to save settings: {}", e);
        }

        let config = ClientConfig::from_env(&self.settings_data);
        match AnalysisClient::new(config.clone()) {
            Ok(client) => {
                info!("Analysis service now at {}", config.base_url);
                self.task_manager.set_client(client);
                self.max_upload_bytes = config.max_upload_bytes;
                self.controller.set_max_upload_bytes(config.max_upload_bytes);
                self.health = None;
                self.last_health_check = None;
                self.task_manager.fetch_history();
            }
            Err(e) => {
                warn!("Could not rebuild the analysis client: {}", e);
                self.notifications.push(Notification::error("Settings Error", e.to_string()));
            }
        }
    }

    fn save_history(&self) {
        if let Err(e) = save_json(&self.history, HISTORY_FILE) {
            warn!("Failed to save analysis history: {}", e);
        }
    }

    fn update_health_status(&mut self) {
        let now = Instant::now();
        let should_check = match self.last_health_check {
            None => true,
            Some(last_check) => now.duration_since(last_check) >= HEALTH_POLL_INTERVAL,
        };

        if should_check {
            self.task_manager.check_health();
            self.last_health_check = Some(now);
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input_mut(|i| mem::take(&mut i.raw.dropped_files));
        if dropped.is_empty() {
            return;
        }

        if let Some(path) = dropped.iter().find_map(|f| f.path.clone()) {
            self.submit_path(&path);
        }
    }

    fn draw_file_drop_overlay(&self, ctx: &egui::Context) {
        let hovering_any = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if !hovering_any || self.controller.is_busy() {
            return;
        }

        let size = egui::vec2(300.0, 120.0);

        egui::Modal::new(Id::new("file_drop_overlay")).show(ctx, |ui| {
            ui.set_max_size(size);
            ui.set_min_size(size);

            ui.centered_and_justified(|ui| {
                ui.heading("📥  Drop to analyze");
            });
        });
    }
}
