//! Frame source abstraction and the bundled image-sequence adapter.
//!
//! The analysis core pulls frames strictly in order through [`FrameSource`];
//! decoding real video containers is the job of an adapter behind this trait.
//! The bundled [`ImageSequenceSource`] reads a directory of still images
//! sorted by file name, which is enough for recorded sessions exported as
//! frame dumps and for offline replay.

use crate::{Error, Result};
use image::ImageReader;
use std::path::{Path, PathBuf};

/// One decoded video frame in RGB8 layout
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Interleaved RGB pixel data, row-major
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap a decoded RGB image
    #[must_use]
    pub fn from_rgb(image: image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

/// Sequential pull-based frame supplier
pub trait FrameSource {
    /// Frames-per-second hint; non-positive when the source cannot tell
    fn fps(&self) -> f64;

    /// Frame width in pixels
    fn width(&self) -> u32;

    /// Frame height in pixels
    fn height(&self) -> u32;

    /// Pull the next frame, or `None` at end of stream
    ///
    /// # Errors
    ///
    /// Returns an error if the next frame exists but cannot be decoded.
    fn read(&mut self) -> Result<Option<Frame>>;
}

/// Recognized still-image file extensions
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];

/// Frame source backed by a directory of still images, ordered by file name
pub struct ImageSequenceSource {
    files: Vec<PathBuf>,
    next: usize,
    fps: f64,
    width: u32,
    height: u32,
}

impl ImageSequenceSource {
    /// Open a directory of image frames
    ///
    /// The fps hint is supplied by the caller since a bare image sequence
    /// carries no timing information.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceOpen`] if `dir` is not a readable directory,
    /// [`Error::EmptyInput`] if it contains no image files, and an image
    /// error if the first frame cannot be decoded.
    pub fn open<P: AsRef<Path>>(dir: P, fps: f64) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::SourceOpen(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| Error::SourceOpen(format!("{}: {e}", dir.display())))?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                    })
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(Error::EmptyInput(format!(
                "no image frames in {}",
                dir.display()
            )));
        }

        // Decode the first frame up front so dimension queries and
        // open-time failures behave like a real capture device.
        let first = ImageReader::open(&files[0])?.decode()?.to_rgb8();
        let (width, height) = first.dimensions();

        log::info!(
            "Opened image sequence: {} frames, {}x{}, fps hint {:.1}",
            files.len(),
            width,
            height,
            fps
        );

        Ok(Self {
            files,
            next: 0,
            fps,
            width,
            height,
        })
    }

    /// Number of frames in the sequence
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.files.len()
    }
}

impl FrameSource for ImageSequenceSource {
    fn fps(&self) -> f64 {
        self.fps
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn read(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.files.get(self.next) else {
            return Ok(None);
        };
        let image = ImageReader::open(path)?.decode()?.to_rgb8();
        self.next += 1;
        Ok(Some(Frame::from_rgb(image)))
    }
}
