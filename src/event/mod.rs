//! Event system: input samples, node events, dispatch, next-frame queue.

pub mod dispatch;
pub mod handler;
pub mod input;
pub mod queue;

pub use dispatch::{dispatch, terminate_if_disabled};
pub use handler::{fire, EventCx, EventKind, Handler, Handlers, NodeEvent};
pub use input::{InputBatch, InputSample, KeyCode, MouseButton, ScrollDirection};
pub use queue::{Deferred, FrameQueue};
