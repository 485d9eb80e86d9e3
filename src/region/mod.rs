mod collection;
mod geojson;
mod store;

pub use collection::RegionCollection;
pub use store::BoundaryStore;
