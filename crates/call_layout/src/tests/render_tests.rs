use shared::domain::{ConnectionState, JoinState};

use super::*;
use crate::fixtures::{joined_call, local, reconciler};

fn plan_for(remotes: u32) -> ViewPlan {
    reconciler(4).recompute(&joined_call(remotes))
}

#[test]
fn first_single_page_plan_collapses_and_loads_overflow() {
    let directives = plan_directives(None, &plan_for(1));
    assert_eq!(
        directives,
        vec![
            RenderDirective::CollapseToSinglePage,
            RenderDirective::ReloadOverflow
        ]
    );
}

#[test]
fn grid_appearing_scrolls_to_grid_page() {
    let directives = plan_directives(Some(&plan_for(1)), &plan_for(2));
    assert!(directives.contains(&RenderDirective::ScrollToGridPage));
    assert!(directives.contains(&RenderDirective::ReloadOverflow));
    assert!(!directives.contains(&RenderDirective::CollapseToSinglePage));
}

#[test]
fn grid_staying_visible_keeps_scroll_position() {
    let directives = plan_directives(Some(&plan_for(2)), &plan_for(3));
    assert_eq!(directives, vec![RenderDirective::ReloadOverflow]);
}

#[test]
fn unchanged_plan_needs_no_directives() {
    let plan = plan_for(6);
    assert!(plan_directives(Some(&plan), &plan.clone()).is_empty());
}

#[test]
fn grid_disappearing_collapses_viewport() {
    let directives = plan_directives(Some(&plan_for(2)), &plan_for(1));
    assert!(directives.contains(&RenderDirective::CollapseToSinglePage));
    assert!(!directives.contains(&RenderDirective::ScrollToGridPage));
}

#[test]
fn waiting_indicator_follows_suspension() {
    let connected = plan_for(2);
    let mut snapshot = joined_call(2);
    snapshot.local_device = local(ConnectionState::Reconnecting, JoinState::Joined);
    let suspended = reconciler(4).recompute(&snapshot);

    let entering = plan_directives(Some(&connected), &suspended);
    assert_eq!(entering[0], RenderDirective::ShowWaitingIndicator);
    assert!(entering.contains(&RenderDirective::CollapseToSinglePage));

    let leaving = plan_directives(Some(&suspended), &connected);
    assert_eq!(leaving[0], RenderDirective::HideWaitingIndicator);
    assert!(leaving.contains(&RenderDirective::ScrollToGridPage));

    let still = plan_directives(Some(&suspended), &suspended.clone());
    assert!(still.is_empty());
}
