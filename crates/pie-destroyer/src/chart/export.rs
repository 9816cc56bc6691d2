use super::render::{render_svg, ChartSpec};
use mime::Mime;
use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

pub const EXPORT_FILE_STEM: &str = "pie-chart-destroyer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    pub scale: u32,
    pub background: String,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            scale: 2,
            background: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub mime: Mime,
    pub bytes: Vec<u8>,
}

impl CapturedImage {
    pub fn file_name(&self) -> String {
        let extension = if self.mime.type_().as_str() != "image" {
            "bin"
        } else {
            match self.mime.subtype().as_str() {
                "svg" => "svg",
                "png" => "png",
                "jpeg" => "jpg",
                _ => "bin",
            }
        };
        format!("{EXPORT_FILE_STEM}.{extension}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("capture failed: {0}")]
    Capture(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("download failed: {0}")]
    Download(#[from] std::io::Error),
}

/// Turns a chart into an image.
pub trait SurfaceCapture: Debug {
    fn capture(
        &self,
        chart: &ChartSpec,
        settings: &CaptureSettings,
    ) -> Result<CapturedImage, ExportError>;
}

pub trait ClipboardSink: Debug {
    fn write_image(&self, image: &CapturedImage) -> Result<(), ExportError>;
}

/// Persists an image under a fixed file name and reports where it went.
pub trait DownloadSink: Debug {
    fn save(&self, file_name: &str, image: &CapturedImage) -> Result<PathBuf, ExportError>;
}

/// Vector capture through the built-in SVG renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgCapture;

impl SurfaceCapture for SvgCapture {
    fn capture(
        &self,
        chart: &ChartSpec,
        settings: &CaptureSettings,
    ) -> Result<CapturedImage, ExportError> {
        let svg = render_svg(chart, settings.scale, &settings.background);
        Ok(CapturedImage {
            mime: mime::IMAGE_SVG,
            bytes: svg.into_bytes(),
        })
    }
}

/// Writes downloads into a directory, overwriting the previous export.
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    directory: PathBuf,
}

impl DirectoryDownload {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl DownloadSink for DirectoryDownload {
    fn save(&self, file_name: &str, image: &CapturedImage) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(file_name);
        fs::write(&path, &image.bytes)?;
        Ok(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if std::env::consts::OS == "macos" {
            Self::Mac
        } else {
            Self::Other
        }
    }

    pub const fn screenshot_shortcut(self) -> &'static str {
        match self {
            Self::Mac => "Mac: Press Cmd + Shift + 4, then drag to select your chart",
            Self::Other => "Windows: Press Windows + Shift + S, then drag to select your chart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    CopiedToClipboard,
    Downloaded { path: PathBuf },
    ManualInstructions { instructions: String },
}

impl ExportOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::CopiedToClipboard => {
                "Chart copied to clipboard! You can now paste it anywhere you need.".to_string()
            }
            Self::Downloaded { path } => format!(
                "Chart saved to {}! You can now use this image file anywhere you need.",
                path.display()
            ),
            Self::ManualInstructions { instructions } => instructions.clone(),
        }
    }
}

/// Three-stage export: clipboard, then download, then manual screenshot instructions.
///
/// A stage runs only when the one before it failed. The final stage cannot fail.
#[derive(Debug)]
pub struct ExportPipeline {
    capture: Box<dyn SurfaceCapture>,
    clipboard: Option<Box<dyn ClipboardSink>>,
    download: Box<dyn DownloadSink>,
    settings: CaptureSettings,
    platform: Platform,
}

impl ExportPipeline {
    pub fn new(
        capture: Box<dyn SurfaceCapture>,
        clipboard: Option<Box<dyn ClipboardSink>>,
        download: Box<dyn DownloadSink>,
    ) -> Self {
        Self {
            capture,
            clipboard,
            download,
            settings: CaptureSettings::default(),
            platform: Platform::current(),
        }
    }

    pub fn with_settings(mut self, settings: CaptureSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn run(&self, chart: &ChartSpec) -> ExportOutcome {
        if let Some(clipboard) = &self.clipboard {
            match self.capture.capture(chart, &self.settings) {
                Ok(image) => match clipboard.write_image(&image) {
                    Ok(()) => {
                        info!("chart copied to clipboard");
                        return ExportOutcome::CopiedToClipboard;
                    }
                    Err(err) => {
                        warn!(error = %err, "clipboard write failed, trying download");
                        return self.download_or_instructions(&image);
                    }
                },
                Err(err) => warn!(error = %err, "capture failed, trying download fallback"),
            }
        }

        match self.capture.capture(chart, &self.settings) {
            Ok(image) => self.download_or_instructions(&image),
            Err(err) => {
                warn!(error = %err, "download fallback failed, showing manual instructions");
                self.manual_instructions()
            }
        }
    }

    fn download_or_instructions(&self, image: &CapturedImage) -> ExportOutcome {
        match self.download.save(&image.file_name(), image) {
            Ok(path) => {
                info!(path = %path.display(), "chart saved");
                ExportOutcome::Downloaded { path }
            }
            Err(err) => {
                warn!(error = %err, "download failed, showing manual instructions");
                self.manual_instructions()
            }
        }
    }

    fn manual_instructions(&self) -> ExportOutcome {
        ExportOutcome::ManualInstructions {
            instructions: format!(
                "Automatic capture failed. Please take a manual screenshot:\n\n{}\n\nThen you can paste the image anywhere you need it!",
                self.platform.screenshot_shortcut()
            ),
        }
    }
}
