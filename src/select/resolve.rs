use std::sync::Arc;

use ahash::AHashSet;
use geo::Point;
use tracing::trace;

use crate::region::RegionCollection;

/// Identity of a resolved district: owning state (absent when the caller is
/// working with a single anonymous region) plus district name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistrictRef {
    pub state: Option<Arc<str>>,
    pub district: Arc<str>,
}

impl DistrictRef {
    pub fn new(state: Option<Arc<str>>, district: Arc<str>) -> Self {
        Self { state, district }
    }
}

/// Find the district containing a clicked point.
///
/// Regions are scanned in store order; within a region, bbox candidates at
/// the point are taken in feature insertion order. A feature whose district
/// is not in `eligible` is skipped before any containment test runs — the
/// cheap name filter is what keeps an all-India scan fast, and it guarantees
/// the result always has metric data. First containing match wins: district
/// polygons are assumed non-overlapping, so with well-formed data first-match
/// and best-match coincide; with overlapping data the first in enumeration
/// order is returned.
///
/// `(lat, lng)` follows the click convention; geometry is (lon, lat).
/// Returns `None` when no eligible polygon contains the point; the caller
/// should leave its current selection unchanged in that case.
pub fn resolve(
    lat: f64,
    lng: f64,
    regions: &[Arc<RegionCollection>],
    eligible: &AHashSet<&str>,
) -> Option<DistrictRef> {
    if eligible.is_empty() {
        return None;
    }
    let point = Point::new(lng, lat);

    for region in regions {
        for idx in region.candidates_at(point) {
            let Some(name) = region.district_name(idx) else { continue };
            if !eligible.contains(name.as_ref()) {
                continue;
            }
            if region.contains(idx, point) {
                trace!(state = %region.state(), district = %name, "resolved click");
                return Some(DistrictRef::new(
                    Some(Arc::clone(region.state())),
                    Arc::clone(name),
                ));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::BoundaryStore;
    use std::fs;

    fn doc(features: &[(&str, serde_json::Value)]) -> String {
        let features: Vec<serde_json::Value> = features.iter().map(|(name, rings)| {
            serde_json::json!({
                "type": "Feature",
                "properties": { "district": name },
                "geometry": { "type": "Polygon", "coordinates": rings },
            })
        }).collect();
        serde_json::json!({ "type": "FeatureCollection", "features": features }).to_string()
    }

    fn square(x0: f64, y0: f64) -> serde_json::Value {
        serde_json::json!([[
            [x0, y0], [x0 + 1.0, y0], [x0 + 1.0, y0 + 1.0], [x0, y0 + 1.0], [x0, y0]
        ]])
    }

    fn store_with(docs: &[(&str, String)]) -> BoundaryStore {
        let dir = tempfile::tempdir().unwrap();
        let mut store = BoundaryStore::new();
        for (state, body) in docs {
            let path = dir.path().join(format!("{state}.json"));
            fs::write(&path, body).unwrap();
            store.load(state, &path).unwrap();
        }
        store
    }

    #[test]
    fn point_inside_eligible_district_resolves() {
        let store = store_with(&[(
            "karnataka",
            doc(&[("Bangalore", square(0.0, 0.0)), ("Mysuru", square(2.0, 0.0))]),
        )]);
        let eligible: AHashSet<&str> = ["Bangalore", "Mysuru"].into_iter().collect();

        let hit = resolve(0.5, 0.5, store.regions(), &eligible).unwrap();
        assert_eq!(hit.district.as_ref(), "Bangalore");
        assert_eq!(hit.state.as_deref(), Some("karnataka"));

        let hit = resolve(0.5, 2.5, store.regions(), &eligible).unwrap();
        assert_eq!(hit.district.as_ref(), "Mysuru");
    }

    #[test]
    fn eligibility_beats_geometry() {
        let store = store_with(&[("karnataka", doc(&[("Bangalore", square(0.0, 0.0))]))]);

        let empty = AHashSet::new();
        assert_eq!(resolve(0.5, 0.5, store.regions(), &empty), None);

        let other: AHashSet<&str> = ["Mysuru"].into_iter().collect();
        assert_eq!(resolve(0.5, 0.5, store.regions(), &other), None);
    }

    #[test]
    fn sea_click_resolves_to_none() {
        let store = store_with(&[("karnataka", doc(&[("Bangalore", square(0.0, 0.0))]))]);
        let eligible: AHashSet<&str> = ["Bangalore"].into_iter().collect();
        assert_eq!(resolve(40.0, 70.0, store.regions(), &eligible), None);
    }

    #[test]
    fn degenerate_feature_does_not_block_a_later_match() {
        // "Broken" has a two-point ring; it parses into a degenerate polygon
        // that can never contain anything. "Bangalore" follows it and must
        // still win the scan.
        let store = store_with(&[(
            "karnataka",
            doc(&[
                ("Broken", serde_json::json!([[[0.0, 0.0], [1.0, 1.0]]])),
                ("Bangalore", square(0.0, 0.0)),
            ]),
        )]);
        let eligible: AHashSet<&str> = ["Broken", "Bangalore"].into_iter().collect();

        let hit = resolve(0.5, 0.5, store.regions(), &eligible).unwrap();
        assert_eq!(hit.district.as_ref(), "Bangalore");
    }

    #[test]
    fn first_region_in_store_order_wins_on_overlap() {
        // Same square registered under two states; the store's insertion
        // order decides.
        let store = store_with(&[
            ("karnataka", doc(&[("Bangalore", square(0.0, 0.0))])),
            ("kerala", doc(&[("Kasaragod", square(0.0, 0.0))])),
        ]);
        let eligible: AHashSet<&str> = ["Bangalore", "Kasaragod"].into_iter().collect();

        let hit = resolve(0.5, 0.5, store.regions(), &eligible).unwrap();
        assert_eq!(hit.state.as_deref(), Some("karnataka"));
        assert_eq!(hit.district.as_ref(), "Bangalore");
    }
}
