//! The processing session: one image at a time through the pipeline.
//!
//! [`Session`] is the orchestrator a host UI talks to. It owns the current
//! decoded raster, the latest processed output, and the image store, and it
//! wires the three together:
//!
//! ```text
//! encoded bytes -> decode -> RasterBuffer -> filter -> encode -> PNG
//!                                                        |
//!                                              save -> ImageStore
//! ```
//!
//! All state lives in explicit fields with method contracts instead of
//! ambient component state, so the session is unit-testable without any
//! rendering harness. Every error is recoverable - the session stays
//! usable after any failure, and a failed `process` leaves the previous
//! output untouched.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;

use tonelab_core::{decode, encode_png, filter, ProcessingMode, RasterBuffer};
use tonelab_store::{ImageRecord, ImageStore, StoreError};

/// Errors surfaced by the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The supplied bytes could not be decoded into a raster.
    #[error(transparent)]
    Decode(#[from] tonelab_core::DecodeError),

    /// The processed raster could not be re-encoded.
    #[error(transparent)]
    Encode(#[from] tonelab_core::EncodeError),

    /// The filter rejected its parameters.
    #[error(transparent)]
    Filter(#[from] tonelab_core::FilterError),

    /// The image store was unavailable.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// `process` was called before any image was loaded.
    #[error("No image loaded")]
    NoImage,

    /// `save` was called before a successful `process`.
    #[error("No processed image to save")]
    NoProcessedImage,

    /// A filter computation is already in flight.
    #[error("A processing operation is already running")]
    Busy,

    /// A history record held a payload that could not be parsed.
    #[error("Stored image record is not readable: {0}")]
    InvalidRecord(String),
}

/// The image currently loaded into the session.
#[derive(Debug, Clone)]
struct CurrentImage {
    raster: RasterBuffer,
    name: String,
}

/// The most recent filter output, re-encoded for display.
#[derive(Debug, Clone)]
struct ProcessedOutput {
    png: Vec<u8>,
    mode: ProcessingMode,
}

/// Orchestrates decoding, filtering and persistence for one image at a time.
#[derive(Debug)]
pub struct Session {
    store: ImageStore,
    current: Option<CurrentImage>,
    processed: Option<ProcessedOutput>,
    // Guards the processed-output slot against overlapping process calls
    // when the host runs the session from a background worker.
    busy: bool,
}

impl Session {
    /// Create a session backed by the given store.
    pub fn new(store: ImageStore) -> Self {
        Self {
            store,
            current: None,
            processed: None,
            busy: false,
        }
    }

    /// Load encoded image bytes as the new current image.
    ///
    /// Any previously processed output is cleared; the original raster is
    /// kept decoded in memory for subsequent `process` calls.
    pub fn load_image(&mut self, bytes: &[u8], name: &str) -> Result<(), SessionError> {
        let raster = decode(bytes)?;
        log::debug!(
            "loaded image {name:?} ({}x{})",
            raster.width,
            raster.height
        );
        self.current = Some(CurrentImage {
            raster,
            name: name.to_string(),
        });
        self.processed = None;
        Ok(())
    }

    /// Run a filter over the current image and keep the PNG-encoded result.
    ///
    /// Returns the encoded bytes for display. On any failure (no image
    /// loaded, invalid threshold, encoder error) the previously processed
    /// output is left untouched. Rejects with [`SessionError::Busy`] if a
    /// computation is already in flight. A plain single-threaded caller
    /// can never observe `Busy` - the flag only matters for a host that
    /// re-enters the session through a worker shim while a computation
    /// is running.
    pub fn process(
        &mut self,
        mode: ProcessingMode,
        threshold: i32,
    ) -> Result<&[u8], SessionError> {
        if self.busy {
            return Err(SessionError::Busy);
        }
        self.busy = true;
        let result = self.process_inner(mode, threshold);
        self.busy = false;
        result?;

        Ok(self
            .processed
            .as_ref()
            .map(|p| p.png.as_slice())
            .unwrap_or_default())
    }

    fn process_inner(&mut self, mode: ProcessingMode, threshold: i32) -> Result<(), SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NoImage)?;
        let output = filter::apply(&current.raster, mode, threshold)?;
        let png = encode_png(&output)?;
        log::debug!("processed {:?} as {mode} ({} bytes)", current.name, png.len());
        self.processed = Some(ProcessedOutput { png, mode });
        Ok(())
    }

    /// Persist the processed output, returning the assigned record id.
    ///
    /// The stored name is derived from the filter mode and the original
    /// name (`grayscale_cat.png` for an upload called `cat.png`). Fails
    /// with [`SessionError::NoProcessedImage`] - and writes nothing - if
    /// called before a successful `process`.
    pub async fn save(&self) -> Result<i64, SessionError> {
        let processed = self
            .processed
            .as_ref()
            .ok_or(SessionError::NoProcessedImage)?;
        let current = self.current.as_ref().ok_or(SessionError::NoProcessedImage)?;

        let name = format!("{}_{}", processed.mode, current.name);
        let data = to_data_url(&processed.png);
        let id = self.store.put(&data, &name).await?;
        log::debug!("saved {name:?} as record {id}");
        Ok(id)
    }

    /// Re-enter the pipeline with a previously saved record.
    ///
    /// The record's payload becomes the new current image and any processed
    /// output is cleared.
    pub fn select_from_history(&mut self, record: &ImageRecord) -> Result<(), SessionError> {
        let bytes = from_data_url(&record.data)?;
        let raster = decode(&bytes)?;
        self.current = Some(CurrentImage {
            raster,
            name: record.name.clone(),
        });
        self.processed = None;
        Ok(())
    }

    /// All saved records, for a history/thumbnail pane.
    pub async fn list_saved(&self) -> Result<Vec<ImageRecord>, SessionError> {
        Ok(self.store.list_all().await?)
    }

    /// Remove a saved record. Deleting an absent id is a no-op.
    pub async fn delete_saved(&self, id: i64) -> Result<(), SessionError> {
        Ok(self.store.delete(id).await?)
    }

    /// Name of the currently loaded image, if any.
    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.name.as_str())
    }

    /// The decoded raster of the current image, if any.
    pub fn current_raster(&self) -> Option<&RasterBuffer> {
        self.current.as_ref().map(|c| &c.raster)
    }

    /// PNG bytes of the latest processed output, if any.
    pub fn processed_png(&self) -> Option<&[u8]> {
        self.processed.as_ref().map(|p| p.png.as_slice())
    }

    /// Whether a filter computation is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Wrap PNG bytes in a self-describing data URL for storage.
fn to_data_url(png: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", BASE64.encode(png))
}

/// Recover encoded image bytes from a stored data URL.
///
/// Tolerates a bare base64 payload without the URL prefix.
fn from_data_url(data: &str) -> Result<Vec<u8>, SessionError> {
    let encoded = match data.split_once("base64,") {
        Some((_, rest)) => rest,
        None => data,
    };
    BASE64
        .decode(encoded.trim())
        .map_err(|e| SessionError::InvalidRecord(e.to_string()))
}
