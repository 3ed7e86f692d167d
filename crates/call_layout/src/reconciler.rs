use call_session::CallSession;
use shared::domain::{CallEndReason, CallSnapshot, JoinState, RemoteDevice};
use tracing::{debug, info};

use crate::{
    config::LayoutSettings,
    observer::CallStateChange,
    plan::{LocalTile, PaginationOffset, RenderMode, ViewPlan},
    scroll::ScrollPosition,
};

/// Minimum joined members (local included) before the grid page appears.
const GRID_MIN_JOINED_MEMBERS: usize = 3;
/// Above this many joined members the local tile moves into the overflow strip.
const PIP_MAX_JOINED_MEMBERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    Updated(ViewPlan),
    TearDown(CallEndReason),
    /// The call already ended; nothing was recomputed.
    Ignored,
}

/// Owns the derived view state of a group call screen.
pub struct LayoutReconciler {
    settings: LayoutSettings,
    current: Option<ViewPlan>,
    ended: Option<CallEndReason>,
}

impl LayoutReconciler {
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            settings,
            current: None,
            ended: None,
        }
    }

    pub fn grid_capacity(&self) -> usize {
        self.settings.grid_max_items
    }

    pub fn current_plan(&self) -> Option<&ViewPlan> {
        self.current.as_ref()
    }

    pub fn ended_reason(&self) -> Option<CallEndReason> {
        self.ended
    }

    pub fn is_ended(&self) -> bool {
        self.ended.is_some()
    }

    /// Derives the full view plan for `snapshot`.
    ///
    /// Does not read or touch the previously computed plan.
    pub fn recompute(&self, snapshot: &CallSnapshot) -> ViewPlan {
        let local_device = snapshot.local_device;
        let member_count = snapshot.joined_member_count();

        // Roster data is stale while the transport is down.
        if !local_device.is_connected() {
            return ViewPlan::suspended(local_device.connection_state, member_count);
        }

        let devices = &snapshot.joined_remote_device_states;
        let joined = local_device.join_state == JoinState::Joined;

        let (mode, local_tile) = match (local_device.join_state, devices.first()) {
            (JoinState::NotJoined | JoinState::Joining, _) => {
                (RenderMode::PreJoin, LocalTile::FULL_SCREEN)
            }
            (JoinState::Joined, None) => (RenderMode::SingleParticipant, LocalTile::FULL_SCREEN),
            (JoinState::Joined, Some(speaker)) => {
                let local_tile = if member_count > PIP_MAX_JOINED_MEMBERS {
                    LocalTile::OVERFLOW_THUMBNAIL
                } else {
                    LocalTile::PICTURE_IN_PICTURE
                };
                (RenderMode::SpeakerPlusGrid { speaker: *speaker }, local_tile)
            }
        };

        let grid_visible = joined && member_count >= GRID_MIN_JOINED_MEMBERS;
        let pagination_offset = if grid_visible {
            PaginationOffset::GridPage
        } else {
            PaginationOffset::SpeakerPage
        };

        let (grid_members, overflow_members) = if joined {
            split_at_capacity(devices, self.grid_capacity())
        } else {
            (Vec::new(), Vec::new())
        };

        ViewPlan {
            mode,
            grid_visible,
            scroll_enabled: grid_visible,
            pagination_offset,
            local_tile,
            grid_members,
            overflow_members,
            joined_member_count: member_count,
        }
    }

    /// Handles one observed change against the live session.
    pub fn apply(&mut self, change: CallStateChange, session: &dyn CallSession) -> Reconciliation {
        if let Some(reason) = self.ended {
            debug!(?change, ?reason, "layout: ignoring change after call end");
            return Reconciliation::Ignored;
        }

        if let CallStateChange::CallEnded(reason) = change {
            info!(
                "layout: call ended reason={reason:?} local={}",
                reason.is_locally_initiated()
            );
            self.current = None;
            self.ended = Some(reason);
            return Reconciliation::TearDown(reason);
        }

        let plan = self.recompute(&session.snapshot());
        debug!(
            ?change,
            mode = ?plan.mode,
            grid_visible = plan.grid_visible,
            overflow = plan.overflow_members.len(),
            "layout: recomputed view plan"
        );
        self.current = Some(plan.clone());
        Reconciliation::Updated(plan)
    }

    /// Index into the remote roster where the overflow strip starts.
    ///
    /// Follows the live scroll offset rather than the plan's pagination: on the
    /// speaker page only the speaker tile is hidden from the strip, on the grid
    /// page everything the grid already shows is.
    pub fn first_overflow_member_index(&self, scroll: ScrollPosition) -> usize {
        if scroll.is_on_speaker_page() {
            1
        } else {
            self.grid_capacity()
        }
    }

    pub fn visible_overflow(&self, plan: &ViewPlan, scroll: ScrollPosition) -> Vec<RemoteDevice> {
        plan.overflow_strip(self.first_overflow_member_index(scroll))
    }
}

fn split_at_capacity(
    devices: &[RemoteDevice],
    capacity: usize,
) -> (Vec<RemoteDevice>, Vec<RemoteDevice>) {
    let (grid, overflow) = devices.split_at(capacity.min(devices.len()));
    (grid.to_vec(), overflow.to_vec())
}

#[cfg(test)]
#[path = "tests/reconciler_tests.rs"]
mod tests;
