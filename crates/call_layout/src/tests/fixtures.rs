use shared::domain::{
    CallEndReason, CallSnapshot, ConnectionState, DemuxId, JoinState, LocalDeviceState,
    ParticipantId, RemoteDevice,
};
use uuid::Uuid;

use crate::{
    config::LayoutSettings,
    observer::{CallStateChange, CallStateSink},
    plan::ViewPlan,
    reconciler::LayoutReconciler,
    render::{PlanRenderer, RenderDirective},
};

pub fn participant(n: u32) -> ParticipantId {
    ParticipantId(Uuid::from_u128(u128::from(n)))
}

pub fn local_participant() -> ParticipantId {
    participant(0)
}

pub fn device(n: u32) -> RemoteDevice {
    RemoteDevice::new(DemuxId(n), participant(n))
}

pub fn local(connection_state: ConnectionState, join_state: JoinState) -> LocalDeviceState {
    LocalDeviceState::new(connection_state, join_state)
}

pub fn connected_joined() -> LocalDeviceState {
    local(ConnectionState::Connected, JoinState::Joined)
}

/// Local participant plus remotes `1..=remote_count`, every remote rendering.
pub fn joined_call(remote_count: u32) -> CallSnapshot {
    let mut members = vec![local_participant()];
    members.extend((1..=remote_count).map(participant));
    CallSnapshot {
        local_device: connected_joined(),
        joined_group_members: members,
        joined_remote_device_states: (1..=remote_count).map(device).collect(),
    }
}

pub fn reconciler(capacity: usize) -> LayoutReconciler {
    LayoutReconciler::new(LayoutSettings::with_grid_max_items(capacity).expect("capacity"))
}

#[derive(Default)]
pub struct RecordingSink {
    pub changes: Vec<CallStateChange>,
    pub snapshots: Vec<CallSnapshot>,
}

impl CallStateSink for RecordingSink {
    fn on_call_state_changed(
        &mut self,
        change: CallStateChange,
        session: &dyn call_session::CallSession,
    ) {
        self.changes.push(change);
        self.snapshots.push(session.snapshot());
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<(ViewPlan, Vec<RenderDirective>)>,
    pub overflow_reloads: Vec<Vec<RemoteDevice>>,
    pub tear_downs: Vec<CallEndReason>,
}

impl RecordingRenderer {
    pub fn last_plan(&self) -> &ViewPlan {
        &self.frames.last().expect("at least one frame").0
    }

    pub fn last_directives(&self) -> &[RenderDirective] {
        &self.frames.last().expect("at least one frame").1
    }
}

impl PlanRenderer for RecordingRenderer {
    fn render(&mut self, plan: &ViewPlan, directives: &[RenderDirective]) {
        self.frames.push((plan.clone(), directives.to_vec()));
    }

    fn reload_overflow(&mut self, members: &[RemoteDevice]) {
        self.overflow_reloads.push(members.to_vec());
    }

    fn tear_down(&mut self, reason: CallEndReason) {
        self.tear_downs.push(reason);
    }
}
