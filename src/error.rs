use std::path::PathBuf;

/// Failure taxonomy for the core. Nothing here is fatal to the process:
/// a load error aborts that load only, an invalid metric leaves one district
/// unclassifiable, and a skipped feature excludes one polygon from the scan.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or corrupt dataset / boundary document.
    #[error("failed to load {path}: {source}")]
    DataLoad {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A WER value that cannot be coerced to a number.
    #[error("invalid metric for district {district:?}: {value}")]
    InvalidMetric { district: String, value: String },

    /// A malformed polygon feature. Reported per feature; the surrounding
    /// scan skips the feature and continues.
    #[error("malformed geometry for feature {index}: {source}")]
    Geometry {
        index: usize,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
