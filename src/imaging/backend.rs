//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the narrow interface through which the rest
//! of the crate touches pixels: open, inspect, transform, encode. Writing the
//! encoded bytes to disk is not a backend concern (see [`crate::files`]).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust on top of the
//! `image` crate. Everything is statically linked into the binary.

use super::params::{OutputFormat, Quality};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Encode(String),
    #[error("{0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Transform operations take the image by value and hand back the result, so
/// each in-flight image has exactly one owner from `open` until `encode`.
/// `Sync` is required because one backend is shared by every worker of a
/// batch.
pub trait ImageBackend: Sync {
    /// Decoded in-memory image.
    type Image: Send;

    /// Decode an image from disk.
    fn open(&self, path: &Path) -> Result<Self::Image, BackendError>;

    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Resize to exactly `width`×`height`, scaling to cover and center-cropping
    /// the overflow when the aspect ratio changes.
    fn resize(
        &self,
        image: Self::Image,
        width: u32,
        height: u32,
    ) -> Result<Self::Image, BackendError>;

    fn grayscale(&self, image: Self::Image) -> Result<Self::Image, BackendError>;

    /// Mirror top-to-bottom.
    fn flip(&self, image: Self::Image) -> Result<Self::Image, BackendError>;

    /// Mirror left-to-right.
    fn flop(&self, image: Self::Image) -> Result<Self::Image, BackendError>;

    /// Gaussian blur with the given sigma.
    fn blur(&self, image: Self::Image, sigma: f32) -> Result<Self::Image, BackendError>;

    /// Encode into the target container, returning the file bytes.
    fn encode(
        &self,
        image: &Self::Image,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock backend that records operations without touching pixels.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    pub struct MockBackend {
        /// Dimensions every opened image reports.
        pub source: Dimensions,
        /// Paths whose `open` fails with a decode error.
        pub undecodable: Mutex<HashSet<PathBuf>>,
        /// Operation name (`"blur"`, `"encode"`, ...) that always fails.
        pub failing_op: Option<&'static str>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    /// What the mock hands out as a "decoded" image.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MockImage {
        pub width: u32,
        pub height: u32,
        pub gray: bool,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Open(String),
        Resize { width: u32, height: u32 },
        Grayscale,
        Flip,
        Flop,
        Blur(f32),
        Encode { format: OutputFormat, quality: u32 },
    }

    impl Default for MockBackend {
        fn default() -> Self {
            Self::with_source(Dimensions {
                width: 800,
                height: 600,
            })
        }
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_source(source: Dimensions) -> Self {
            Self {
                source,
                undecodable: Mutex::new(HashSet::new()),
                failing_op: None,
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_on(op: &'static str) -> Self {
            Self {
                failing_op: Some(op),
                ..Self::default()
            }
        }

        pub fn mark_undecodable(&self, path: &Path) {
            self.undecodable
                .lock()
                .unwrap()
                .insert(path.to_path_buf());
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record(&self, op: RecordedOp, name: &str) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(op);
            if self.failing_op == Some(name) {
                return Err(BackendError::ProcessingFailed(format!("mock {name} failure")));
            }
            Ok(())
        }
    }

    impl ImageBackend for MockBackend {
        type Image = MockImage;

        fn open(&self, path: &Path) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Open(path.to_string_lossy().to_string()), "open")?;
            if self.undecodable.lock().unwrap().contains(path) {
                return Err(BackendError::Decode(format!(
                    "Unsupported image format: {}",
                    path.display()
                )));
            }
            Ok(MockImage {
                width: self.source.width,
                height: self.source.height,
                gray: false,
            })
        }

        fn dimensions(&self, image: &MockImage) -> Dimensions {
            Dimensions {
                width: image.width,
                height: image.height,
            }
        }

        fn resize(
            &self,
            image: MockImage,
            width: u32,
            height: u32,
        ) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Resize { width, height }, "resize")?;
            Ok(MockImage {
                width,
                height,
                ..image
            })
        }

        fn grayscale(&self, image: MockImage) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Grayscale, "grayscale")?;
            Ok(MockImage {
                gray: true,
                ..image
            })
        }

        fn flip(&self, image: MockImage) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Flip, "flip")?;
            Ok(image)
        }

        fn flop(&self, image: MockImage) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Flop, "flop")?;
            Ok(image)
        }

        fn blur(&self, image: MockImage, sigma: f32) -> Result<MockImage, BackendError> {
            self.record(RecordedOp::Blur(sigma), "blur")?;
            Ok(image)
        }

        fn encode(
            &self,
            image: &MockImage,
            format: OutputFormat,
            quality: Quality,
        ) -> Result<Vec<u8>, BackendError> {
            self.record(
                RecordedOp::Encode {
                    format,
                    quality: quality.value(),
                },
                "encode",
            )?;
            Ok(format!("{format}:{}x{}", image.width, image.height).into_bytes())
        }
    }

    #[test]
    fn mock_records_open_and_reports_source_dimensions() {
        let backend = MockBackend::with_source(Dimensions {
            width: 640,
            height: 480,
        });

        let image = backend.open(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(
            backend.dimensions(&image),
            Dimensions {
                width: 640,
                height: 480
            }
        );

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Open(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_undecodable_path_fails_open() {
        let backend = MockBackend::new();
        backend.mark_undecodable(Path::new("/bad.png"));

        assert!(matches!(
            backend.open(Path::new("/bad.png")),
            Err(BackendError::Decode(_))
        ));
        assert!(backend.open(Path::new("/good.png")).is_ok());
    }

    #[test]
    fn mock_failing_op_still_records() {
        let backend = MockBackend::failing_on("flip");
        let image = backend.open(Path::new("/a.jpg")).unwrap();

        assert!(backend.flip(image).is_err());
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Open("/a.jpg".into()), RecordedOp::Flip]
        );
    }
}
