use serde::Serialize;
use shared::domain::{CallEndReason, RemoteDevice};

use crate::plan::ViewPlan;

/// One-shot instructions derived from the difference between two plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderDirective {
    ShowWaitingIndicator,
    HideWaitingIndicator,
    /// The grid page just appeared; land on it.
    ScrollToGridPage,
    /// Drop to a single page at offset zero with scrolling disabled.
    CollapseToSinglePage,
    ReloadOverflow,
}

pub trait PlanRenderer {
    /// `plan` replaces whatever was displayed before.
    fn render(&mut self, plan: &ViewPlan, directives: &[RenderDirective]);
    fn reload_overflow(&mut self, members: &[RemoteDevice]);
    fn tear_down(&mut self, reason: CallEndReason);
}

pub fn plan_directives(previous: Option<&ViewPlan>, next: &ViewPlan) -> Vec<RenderDirective> {
    let mut directives = Vec::new();

    let was_suspended = previous.is_some_and(ViewPlan::is_suspended);
    if next.is_suspended() && !was_suspended {
        directives.push(RenderDirective::ShowWaitingIndicator);
    } else if !next.is_suspended() && was_suspended {
        directives.push(RenderDirective::HideWaitingIndicator);
    }

    let was_grid_visible = previous.map(|plan| plan.grid_visible);
    match (was_grid_visible, next.grid_visible) {
        (Some(false) | None, true) => directives.push(RenderDirective::ScrollToGridPage),
        (Some(true) | None, false) => directives.push(RenderDirective::CollapseToSinglePage),
        _ => {}
    }

    let roster_changed = previous.map_or(true, |plan| {
        plan.grid_members != next.grid_members || plan.overflow_members != next.overflow_members
    });
    if roster_changed {
        directives.push(RenderDirective::ReloadOverflow);
    }

    directives
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
