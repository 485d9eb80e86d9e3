mod bbox;
mod geom;

use bbox::BoundingBox;
pub(crate) use geom::Geometries;
