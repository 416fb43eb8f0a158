//! # flowbox
//!
//! A small retained-mode UI engine: a tree of nodes re-styled, laid out and
//! painted every frame, with pointer and keyboard interaction dispatched
//! between frames.
//!
//! ## Core Systems
//!
//! - **[`style`]**: declared/computed styles, `trait:state` selectors, cascade, sheet parser
//! - **[`dom`]**: slotmap-backed node arena with tree operations, mount state and queries
//! - **[`layout`]**: three-pass single-axis flow layout (measure, resolve, place)
//! - **[`event`]**: raw input, node events, hover/press/focus dispatch, next-frame queue
//! - **[`widget`]**: the `Widget` trait seam between the engine and node content
//! - **[`widgets`]**: built-in widgets: Panel, Label, Button, Checkbox
//! - **[`render`]**: paint traversal, draw commands, pixel buffers, raster canvas, crossterm driver
//! - **[`root`]**: the frame loop (queue drain, animate, cascade, layout, paint)
//! - **[`app`]**: application config and terminal event loop
//! - **[`testing`]**: headless `Pilot` and snapshot helpers
//! - **[`geometry`]**: Point, Size, Rect, Spacing, Axis primitives

// Foundation
pub mod geometry;

// Core systems
pub mod dom;
pub mod layout;
pub mod style;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod render;

// Application
pub mod app;
pub mod root;

// Testing support
pub mod testing;

pub use app::{App, AppConfig};
pub use dom::{Dom, NodeId};
pub use root::Root;
