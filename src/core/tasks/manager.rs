use std::{
    collections::HashMap,
    sync::{
        mpsc,
        Arc,
    },
    time::Duration,
};

use tokio::runtime::Runtime;
use tracing::debug;

use super::{
    CancellableTask,
    TaskHandle,
    TaskResult,
};
use crate::{
    api::{
        AnalysisClient,
        AnalysisService,
    },
    core::{
        video::VideoFile,
        CoachError,
    },
    upload::{
        run_upload,
        SubmissionId,
        UpdateSink,
        PROGRESS_TICK,
    },
};

/// Runs network work off the UI thread and hands results back through a channel
/// that the UI drains once per frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    client: Arc<AnalysisClient>,
    tasks: HashMap<CancellableTask, TaskHandle>,
    progress_tick: Duration,
}

impl TaskManager {
    pub fn new(client: AnalysisClient) -> Result<Self, CoachError> {
        let runtime = Arc::new(Runtime::new()?);
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            runtime,
            receiver,
            sender,
            client: Arc::new(client),
            tasks: HashMap::new(),
            progress_tick: PROGRESS_TICK,
        })
    }

    pub fn with_progress_tick(mut self, tick: Duration) -> Self {
        self.progress_tick = tick;
        self
    }

    /// Swaps the client used by tasks started from now on.
    pub fn set_client(&mut self, client: AnalysisClient) {
        self.client = Arc::new(client);
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        self.tasks.retain(|_, handle| !handle.is_finished());
        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<AnalysisClient>) {
        (self.sender.clone(), self.client.clone())
    }

    pub fn start_upload(&mut self, file: VideoFile, submission: SubmissionId) {
        let (sender, client) = self.task_context();
        let tick = self.progress_tick;

        let sink: UpdateSink = Arc::new(move |update| {
            let _ = sender.send(TaskResult::Upload(update));
        });

        let join_handle = self.runtime.spawn(async move {
            run_upload(client.as_ref(), &file, submission, tick, sink).await;
        });

        if let Some(previous) =
            self.tasks.insert(CancellableTask::Upload, TaskHandle::new(join_handle))
        {
            previous.cancel();
        }
    }

    pub fn cancel(&mut self, task: CancellableTask) {
        if let Some(handle) = self.tasks.remove(&task) {
            debug!("Cancelling {:?} task", task);
            handle.cancel();
        }
    }

    pub fn is_running(&self, task: CancellableTask) -> bool {
        self.tasks.get(&task).map(|h| !h.is_finished()).unwrap_or(false)
    }

    pub fn fetch_history(&self) {
        let (sender, client) = self.task_context();

        self.runtime.spawn(async move {
            let history = client.get_history().await;
            let _ = sender.send(TaskResult::History(history));
        });
    }

    pub fn check_health(&self) {
        let (sender, client) = self.task_context();

        self.runtime.spawn(async move {
            let status = client.health_check().await;
            let _ = sender.send(TaskResult::Health(status));
        });
    }
}
