//! Layout: three-pass single-axis flow.

pub mod engine;

pub use engine::{layout, measure, place, resolve};
