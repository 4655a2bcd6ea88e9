use std::io::{self, Write};
use std::process::{Command, Stdio};

use engine_logging::{engine_info, engine_warn};

use crate::fetch::Fetcher;
use crate::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("download failed: {0}")]
    Network(#[from] FetchError),
    #[error("not a decodable image: {0}")]
    Decode(String),
    #[error("could not launch viewer: {0}")]
    Viewer(String),
}

/// Checks that a byte buffer holds a real image.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ImageDimensions, ImageError>;
}

/// Hands an image location to something that shows it to the user.
pub trait ImageViewer {
    fn open(&self, target: &str) -> Result<(), ImageError>;
}

/// Fully decodes the buffer with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterImageDecoder;

impl ImageDecoder for RasterImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ImageDimensions, ImageError> {
        let image =
            image::load_from_memory(bytes).map_err(|err| ImageError::Decode(err.to_string()))?;
        Ok(ImageDimensions {
            width: image.width(),
            height: image.height(),
        })
    }
}

/// Opens targets with the desktop's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl ImageViewer for SystemViewer {
    fn open(&self, target: &str) -> Result<(), ImageError> {
        run_opener(opener_command(target))
    }
}

/// Run the opener to completion; a non-zero exit means nothing was shown.
///
/// The platform openers hand the target to the real viewer and return, so
/// waiting here does not block on the viewer window.
fn run_opener(mut cmd: Command) -> Result<(), ImageError> {
    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|err| ImageError::Viewer(err.to_string()))?;
    if status.success() {
        Ok(())
    } else {
        Err(ImageError::Viewer(format!("opener exited with {status}")))
    }
}

#[cfg(target_os = "windows")]
fn opener_command(target: &str) -> Command {
    let mut cmd = Command::new("cmd");
    // The empty argument is the window title `start` expects before the target.
    cmd.args(["/C", "start", "", target]);
    cmd
}

#[cfg(target_os = "macos")]
fn opener_command(target: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(target);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(target: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(target);
    cmd
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplaySummary {
    pub opened: usize,
    pub failed: usize,
}

/// Downloads, validates and opens images one at a time.
pub struct ImagePresenter<'a> {
    fetcher: &'a dyn Fetcher,
    decoder: &'a dyn ImageDecoder,
    viewer: &'a dyn ImageViewer,
}

impl<'a> ImagePresenter<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        decoder: &'a dyn ImageDecoder,
        viewer: &'a dyn ImageViewer,
    ) -> Self {
        Self {
            fetcher,
            decoder,
            viewer,
        }
    }

    /// Show every image, writing one line to `out` per failure.
    ///
    /// A failing image never stops the loop; only errors writing to `out`
    /// are returned.
    pub fn display_images<W: Write>(
        &self,
        out: &mut W,
        images: &[String],
    ) -> io::Result<DisplaySummary> {
        let mut summary = DisplaySummary::default();
        if images.is_empty() {
            writeln!(out, "No images found.")?;
            return Ok(summary);
        }

        for url in images {
            match self.show(url) {
                Ok(dims) => {
                    engine_info!("Opened image {} ({}x{})", url, dims.width, dims.height);
                    summary.opened += 1;
                }
                Err(err) => {
                    engine_warn!("Image {} failed: {}", url, err);
                    writeln!(out, "Failed to display image: {url}")?;
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }

    fn show(&self, url: &str) -> Result<ImageDimensions, ImageError> {
        let output = self.fetcher.fetch(url)?;
        let dims = self.decoder.decode(&output.bytes)?;
        self.viewer.open(url)?;
        Ok(dims)
    }
}
