use std::sync::Arc;

use ahash::AHashSet;

use crate::region::RegionCollection;
use super::resolve::{resolve, DistrictRef};

/// A map click as reported by the UI. The token distinguishes repeated
/// identical clicks across re-renders; the UI increments it per interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub lat: f64,
    pub lng: f64,
    pub token: u64,
}

/// Per-session selection: current model, current district, last click token.
/// Initialized empty at session start; updated only through [`reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub model: Option<Arc<str>>,
    pub district: Option<DistrictRef>,
    pub last_token: Option<u64>,
}

/// An interaction the UI reports. The reducer owns all transition logic, so
/// the hosting framework's rerun mechanics never touch selection state
/// directly.
#[derive(Debug, Clone)]
pub enum SelectionEvent {
    ModelChosen(Arc<str>),
    DistrictChosen(DistrictRef),
    MapClicked(ClickEvent),
}

/// Pure transition function: current selection + event → next selection.
///
/// - A click whose token matches the last-processed one is a no-op, so
///   replaying the same event across re-renders cannot oscillate.
/// - A click that resolves to no district keeps the current one (a near-miss
///   outside a border must not lose context) but records the token.
/// - Choosing a model keeps the district if it is still eligible under the
///   new model and clears it otherwise.
pub fn reduce(
    current: &Selection,
    event: &SelectionEvent,
    regions: &[Arc<RegionCollection>],
    eligible: &AHashSet<&str>,
) -> Selection {
    match event {
        SelectionEvent::ModelChosen(model) => {
            let district = current.district.clone().filter(|d| {
                eligible.contains(d.district.as_ref())
            });
            Selection {
                model: Some(Arc::clone(model)),
                district,
                last_token: current.last_token,
            }
        }
        SelectionEvent::DistrictChosen(district) => Selection {
            model: current.model.clone(),
            district: Some(district.clone()),
            last_token: current.last_token,
        },
        SelectionEvent::MapClicked(click) => {
            if current.last_token == Some(click.token) {
                return current.clone();
            }
            let district = resolve(click.lat, click.lng, regions, eligible)
                .or_else(|| current.district.clone());
            Selection {
                model: current.model.clone(),
                district,
                last_token: Some(click.token),
            }
        }
    }
}
