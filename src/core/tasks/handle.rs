use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancellableTask {
    Upload,
}

pub struct TaskHandle {
    join_handle: Option<JoinHandle<()>>,
}

impl TaskHandle {
    pub fn new(join_handle: JoinHandle<()>) -> Self {
        Self { join_handle: Some(join_handle) }
    }

    pub fn cancel(&self) {
        if let Some(handle) = &self.join_handle {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join_handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }
}
