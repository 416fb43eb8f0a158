//! Widget system: the per-type hook trait.

pub mod traits;

pub use traits::{Widget, WidgetCx};
