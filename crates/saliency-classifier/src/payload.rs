//! Signal payloads: plot images and numeric arrays

use crate::error::ClassifierError;
use base64::{engine::general_purpose, Engine as _};
use ndarray::Array2;
use ndarray_npy::read_npy;
use std::path::Path;
use tracing::debug;

/// Array file name used when none is given
pub const DEFAULT_SIGNALS_FILE: &str = "medoids4llm.npy";

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// A rendered signal plot, embedded as a PNG data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    data_url: String,
}

impl ImagePayload {
    /// Encode raw PNG bytes
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, ClassifierError> {
        if !bytes.starts_with(PNG_SIGNATURE) {
            return Err(ClassifierError::Payload(
                "image is not a PNG file".to_string(),
            ));
        }
        Ok(Self {
            data_url: format!(
                "data:image/png;base64,{}",
                general_purpose::STANDARD.encode(bytes)
            ),
        })
    }

    /// Read and encode a PNG file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            ClassifierError::Payload(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!("Loaded image {} ({} bytes)", path.display(), bytes.len());
        Self::from_png_bytes(&bytes)
    }

    /// The `data:image/png;base64,...` URL
    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

/// Representative time series (centroids or medoids), one row per signal
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    rows: Vec<Vec<f64>>,
}

impl Signals {
    /// Wrap rows of samples
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Load a 2-D `.npy` array of `f64` or `f32` samples
    pub fn from_npy(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let array: Array2<f64> = match read_npy::<_, Array2<f64>>(path) {
            Ok(array) => array,
            Err(f64_err) => match read_npy::<_, Array2<f32>>(path) {
                Ok(array) => array.mapv(f64::from),
                Err(_) => {
                    return Err(ClassifierError::Payload(format!(
                        "Failed to read {}: {}",
                        path.display(),
                        f64_err
                    )))
                }
            },
        };

        debug!(
            "Loaded {} signals of length {} from {}",
            array.nrows(),
            array.ncols(),
            path.display()
        );
        Ok(Self::from_rows(
            array.outer_iter().map(|row| row.to_vec()).collect(),
        ))
    }

    /// Signal rows in file order
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of signals
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no signals
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What the model is asked to look at
#[derive(Debug, Clone, PartialEq)]
pub enum SignalPayload {
    /// Plot images, one per signal
    Images(Vec<ImagePayload>),
    /// Raw samples rendered as text
    Numeric(Signals),
}

impl SignalPayload {
    /// Number of signals in the payload
    pub fn signal_count(&self) -> usize {
        match self {
            SignalPayload::Images(images) => images.len(),
            SignalPayload::Numeric(signals) => signals.len(),
        }
    }
}
