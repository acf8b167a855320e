pub mod rows;
pub mod surface;
pub mod theme;

pub use rows::{Placeholder, Row, RowContent, RowKey};
pub use surface::{RenderSurface, RowProjection};
