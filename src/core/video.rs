use std::path::{
    Path,
    PathBuf,
};

use super::errors::ValidationError;

pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoFileType {
    Mp4,
    Avi,
    Mov,
    Mkv,
    Webm,
    M4v,
    Other(String),
}

impl VideoFileType {
    pub fn from_extension(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "mp4" => VideoFileType::Mp4,
            "avi" => VideoFileType::Avi,
            "mov" => VideoFileType::Mov,
            "mkv" => VideoFileType::Mkv,
            "webm" => VideoFileType::Webm,
            "m4v" => VideoFileType::M4v,
            other => VideoFileType::Other(other.to_string()),
        }
    }

    pub fn mime_type(&self) -> &str {
        match self {
            VideoFileType::Mp4 => "video/mp4",
            VideoFileType::Avi => "video/x-msvideo",
            VideoFileType::Mov => "video/quicktime",
            VideoFileType::Mkv => "video/x-matroska",
            VideoFileType::Webm => "video/webm",
            VideoFileType::M4v => "video/x-m4v",
            VideoFileType::Other(ext) => match ext.as_str() {
                "png" => "image/png",
                "jpg" | "jpeg" => "image/jpeg",
                "gif" => "image/gif",
                "mp3" => "audio/mpeg",
                "wav" => "audio/wav",
                "txt" => "text/plain",
                "pdf" => "application/pdf",
                _ => "application/octet-stream",
            },
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, VideoFileType::Other(_))
    }

    pub fn supported_extensions() -> &'static [&'static str] {
        &["mp4", "avi", "mov", "mkv", "webm", "m4v"]
    }
}

/// A file the user dropped or picked, described the way an upload needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub path: PathBuf,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl VideoFile {
    pub fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let metadata =
            std::fs::metadata(path).map_err(|e| ValidationError::Unreadable(e.to_string()))?;

        if !metadata.is_file() {
            return Err(ValidationError::Unreadable(format!("{} is not a file", path.display())));
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown file".to_string());

        let file_type = VideoFileType::from_extension(&path.to_string_lossy());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            mime_type: file_type.mime_type().to_string(),
            size: metadata.len(),
        })
    }

    pub fn validate(&self, max_bytes: u64) -> Result<(), ValidationError> {
        if !self.mime_type.starts_with("video/") {
            return Err(ValidationError::NotAVideo { mime_type: self.mime_type.clone() });
        }

        if self.size > max_bytes {
            return Err(ValidationError::TooLarge { size: self.size, limit: max_bytes });
        }

        Ok(())
    }

    pub fn format_size(&self) -> String {
        if self.size < 1024 {
            format!("{} B", self.size)
        } else if self.size < 1024 * 1024 {
            format!("{:.1} KB", self.size as f64 / 1024.0)
        } else {
            format!("{:.1} MB", self.size as f64 / (1024.0 * 1024.0))
        }
    }
}
