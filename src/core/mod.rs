pub mod config;
pub mod errors;
pub mod fallback;
pub mod history;
pub mod http;
pub mod models;
pub mod store;
pub mod tasks;
pub mod video;

pub use errors::CoachError;
pub use models::{
    AnalysisResult,
    HealthStatus,
};
pub use store::AnalysisStore;
pub use video::VideoFile;
