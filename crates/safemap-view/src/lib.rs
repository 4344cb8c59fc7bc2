//! View layer: turns loaded records into map markers and list markup, and
//! drives the loading / error / retry lifecycle of each remote operation.
//!
//! Rendering targets are abstract ([`SpatialView`], [`ListView`]); the
//! in-memory [`MarkerLayer`] and [`HtmlPanel`] implementations are what the
//! CLI writes out and what the tests inspect.

pub mod actions;
pub mod controller;
pub mod escape;
pub mod markup;
pub mod pages;
pub mod render;
pub mod views;

pub use controller::{Control, LoadOutcome, Operation, OperationState, Rejected, Ticket, Trigger};
pub use escape::escape_html;
pub use pages::{Action, ListSection, LocationsPage, LocationsState, SafetyPanel};
pub use render::{ListRecord, RenderCoordinator};
pub use views::{Bounds, HtmlPanel, ListView, Marker, MarkerIcon, MarkerLayer, SpatialView, Viewport};
