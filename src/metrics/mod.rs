mod dataset;
mod tier;

pub use dataset::{DistrictMetrics, MetricDataset, MetricValue, ModelReport, Sample};
pub use tier::{classify, Tier, NO_DATA_COLOR};
