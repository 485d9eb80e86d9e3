#![doc = "District-resolution and WER classification core"]
mod error;
mod geom;
mod metrics;
mod region;
mod select;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use region::{BoundaryStore, RegionCollection};

#[doc(inline)]
pub use metrics::{
    classify, DistrictMetrics, MetricDataset, MetricValue, ModelReport, Sample, Tier,
    NO_DATA_COLOR,
};

#[doc(inline)]
pub use select::{reduce, resolve, ClickEvent, DistrictRef, Selection, SelectionEvent};
