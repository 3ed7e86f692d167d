//! Layout reconciliation for the group call screen.
//!
//! Call session notifications flow through [`CallStateObserver`] into a
//! [`LayoutReconciler`], which rebuilds a [`ViewPlan`] from the live session
//! each time. [`GroupCallPresenter`] hands plans to a [`PlanRenderer`] along
//! with the directives implied by the previous plan.

pub mod config;
pub mod controls;
pub mod observer;
pub mod plan;
pub mod presenter;
pub mod reconciler;
pub mod render;
pub mod scroll;

pub use config::{load_settings, LayoutSettings, SettingsError};
pub use controls::{
    back_navigation, dispatch_call_command, CallCommand, CallCommandDispatchError,
    CallControlAction, CallControls,
};
pub use observer::{CallStateChange, CallStateObserver, CallStateSink};
pub use plan::{LocalTile, LocalTilePosition, LocalTileSize, PaginationOffset, RenderMode, ViewPlan};
pub use presenter::GroupCallPresenter;
pub use reconciler::{LayoutReconciler, Reconciliation};
pub use render::{plan_directives, PlanRenderer, RenderDirective};
pub use scroll::ScrollPosition;

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod fixtures;
