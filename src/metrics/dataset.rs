use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use ahash::AHashSet;
use serde::Deserialize;

use crate::error::{Error, Result};
use super::tier::{classify, Tier};

/// A WER value as found in the dataset file. Numbers pass through; numeric
/// strings are coerced (datasets in the wild carry both); anything else is
/// an invalid metric when read.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    // Catch-all so one null/object WER never aborts the whole dataset load
    Other(serde_json::Value),
}

impl MetricValue {
    /// Coerce to a float, or report which value failed.
    pub fn as_f64(&self, district: &str) -> Result<f64> {
        match self {
            MetricValue::Number(v) => Ok(*v),
            MetricValue::Text(s) => s.trim().parse().map_err(|_| Error::InvalidMetric {
                district: district.to_string(),
                value: s.clone(),
            }),
            MetricValue::Other(v) => Err(Error::InvalidMetric {
                district: district.to_string(),
                value: v.to_string(),
            }),
        }
    }
}

/// One audio/transcript pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    #[serde(rename = "URL")]
    pub url: String,
    // Both spellings appear across dataset versions; normalized here, once.
    #[serde(rename = "Model_Output", alias = "ModelOutput")]
    pub model_output: String,
    #[serde(rename = "Reference")]
    pub reference: String,
}

/// Per-district results for one model.
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictMetrics {
    #[serde(rename = "WER")]
    pub wer: MetricValue,
    // BTreeMap keeps sample iteration deterministic (sorted by id).
    #[serde(rename = "Samples", default)]
    pub samples: BTreeMap<String, Sample>,
}

/// All districts evaluated for one model.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ModelReport {
    districts: BTreeMap<String, DistrictMetrics>,
}

impl ModelReport {
    /// District names present for this model, in sorted order.
    pub fn districts(&self) -> impl Iterator<Item = &str> {
        self.districts.keys().map(|k| k.as_str())
    }

    pub fn district(&self, name: &str) -> Option<&DistrictMetrics> {
        self.districts.get(name)
    }

    pub fn len(&self) -> usize { self.districts.len() }

    pub fn is_empty(&self) -> bool { self.districts.is_empty() }

    /// The resolver's pre-filter: districts with metric data for this model.
    pub fn eligible_districts(&self) -> AHashSet<&str> {
        self.districts.keys().map(|k| k.as_str()).collect()
    }

    /// Tier for one district, or `None` when the district is absent or its
    /// WER is not coercible to a number (rendered as no-data, not an abort).
    pub fn tier(&self, name: &str) -> Option<Tier> {
        let metrics = self.districts.get(name)?;
        metrics.wer.as_f64(name).ok().map(classify)
    }
}

/// A full metric dataset: model name → per-district results.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct MetricDataset {
    models: BTreeMap<String, ModelReport>,
}

impl MetricDataset {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::DataLoad {
            path: "<inline>".into(),
            source: anyhow::Error::new(e).context("Failed to parse metric dataset"),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let wrap = |source: anyhow::Error| Error::DataLoad {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path)
            .map_err(|e| wrap(anyhow::Error::new(e).context("Failed to open metric dataset")))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| wrap(anyhow::Error::new(e).context("Failed to parse metric dataset")))
    }

    /// Model names, in sorted order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(|k| k.as_str())
    }

    pub fn model(&self, name: &str) -> Option<&ModelReport> {
        self.models.get(name)
    }

    pub fn len(&self) -> usize { self.models.len() }

    pub fn is_empty(&self) -> bool { self.models.is_empty() }
}
