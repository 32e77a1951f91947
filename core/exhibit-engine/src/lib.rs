//! FILENAME: core/exhibit-engine/src/lib.rs
//! Interactive filtered exhibits for Calcula.
//!
//! An exhibit takes a labeled loss triangle, exposes one list control per
//! categorical axis plus one over the measures, and keeps the origin x
//! development slice picked by those controls rendered on a host sheet.
//!
//! Layers:
//! - `registry` / `selection`: what can be filtered and what is picked
//! - `slice`: the matrix the selection resolves to
//! - `layout` / `binding`: controls placed and wired on the host
//! - `coordinator`: lifecycle and refresh loop
//! - `session`: host session scope

pub mod binding;
pub mod config;
pub mod coordinator;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod logging;
pub mod naming;
pub mod registry;
pub mod selection;
pub mod session;
pub mod slice;

pub use binding::{BoundControl, ChangeInbox};
pub use config::ExhibitConfig;
pub use coordinator::{
    Exhibit, ExhibitComponent, ExhibitState, LossDevelopmentExhibit, RefreshReport,
};
pub use dataset::Dataset;
pub use engine::rect_address;
pub use error::ExhibitError;
pub use layout::{plan_layout, ControlPlacement};
pub use naming::{control_name, engine_name, host_name};
pub use registry::{DimensionKind, FilterDimension, FilterRegistry};
pub use selection::FilterSelection;
pub use session::HostSession;
pub use slice::{slice, RenderedSlice};
