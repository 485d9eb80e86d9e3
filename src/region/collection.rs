use std::sync::Arc;

use ahash::AHashMap;
use geo::{MultiPolygon, Point, Rect};

use crate::geom::Geometries;
use super::geojson::DistrictFeature;

/// One state's district boundaries: names in file order, a name index, and
/// the geometry store. Immutable after construction; share via `Arc`.
#[derive(Debug, Clone)]
pub struct RegionCollection {
    state: Arc<str>,
    names: Vec<Arc<str>>,
    index: AHashMap<Arc<str>, u32>,
    geoms: Geometries,
}

impl RegionCollection {
    pub(super) fn from_features(state: &str, features: Vec<DistrictFeature>) -> Self {
        let names: Vec<Arc<str>> = features.iter()
            .map(|f| Arc::from(f.district.as_str()))
            .collect();
        let index = names.iter().enumerate()
            .map(|(i, name)| (Arc::clone(name), i as u32))
            .collect();
        let shapes: Vec<MultiPolygon<f64>> = features.into_iter().map(|f| f.shape).collect();

        Self { state: Arc::from(state), names, index, geoms: Geometries::new(shapes) }
    }

    /// Name of the owning state.
    #[inline] pub fn state(&self) -> &Arc<str> { &self.state }

    /// District names, in boundary-file order.
    #[inline] pub fn district_names(&self) -> &[Arc<str>] { &self.names }

    /// Number of district features.
    #[inline] pub fn len(&self) -> usize { self.geoms.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.geoms.is_empty() }

    /// Slot of a district by exact name match. Case or spacing mismatches
    /// against the metric dataset are an offline cleaning concern, not
    /// papered over here.
    #[inline]
    pub fn district_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|&i| i as usize)
    }

    /// Bounding rectangle of the whole region, if any shape has one.
    pub fn bounds(&self) -> Option<Rect<f64>> { self.geoms.bounds() }

    /// Iterate (district, shape) pairs in file order.
    pub fn features(&self) -> impl Iterator<Item = (&Arc<str>, &MultiPolygon<f64>)> {
        self.names.iter().zip(self.geoms.shapes().iter())
    }

    pub(crate) fn candidates_at(&self, point: Point<f64>) -> Vec<usize> {
        self.geoms.candidates_at(point)
    }

    pub(crate) fn contains(&self, idx: usize, point: Point<f64>) -> bool {
        self.geoms.contains(idx, point)
    }

    pub(crate) fn district_name(&self, idx: usize) -> Option<&Arc<str>> {
        self.names.get(idx)
    }
}
