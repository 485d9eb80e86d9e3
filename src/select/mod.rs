mod resolve;
mod state;

pub use resolve::{resolve, DistrictRef};
pub use state::{reduce, ClickEvent, Selection, SelectionEvent};
