//! Boundary to the external group call session.
//!
//! The layout core only reads a [`CallSnapshot`] and listens for
//! [`CallSessionEvent`]s; everything else about the media session stays
//! behind [`CallSession`].

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use shared::{
    domain::{CallEndReason, CallSnapshot, LocalDeviceState, ParticipantId, RemoteDevice},
    error::SessionUpdateError,
    protocol::CallSessionEvent,
};
use tokio::sync::broadcast;
use tracing::{debug, warn};

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub trait CallSession {
    fn is_group_call(&self) -> bool;
    fn snapshot(&self) -> CallSnapshot;
    fn subscribe_events(&self) -> broadcast::Receiver<CallSessionEvent>;
}

/// A state change pushed into a [`ScriptedCallSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionUpdate {
    LocalDevice(LocalDeviceState),
    RemoteDevices(Vec<RemoteDevice>),
    JoinedMembers(Vec<ParticipantId>),
    SfuInfo,
    MembershipProof,
    GroupMembers,
    End { reason: CallEndReason },
}

impl SessionUpdate {
    fn notification(&self) -> CallSessionEvent {
        match self {
            SessionUpdate::LocalDevice(_) => CallSessionEvent::LocalDeviceStateChanged,
            SessionUpdate::RemoteDevices(_) => CallSessionEvent::RemoteDeviceStatesChanged,
            SessionUpdate::JoinedMembers(_) => CallSessionEvent::JoinedMembersChanged,
            SessionUpdate::SfuInfo => CallSessionEvent::SfuInfoUpdated,
            SessionUpdate::MembershipProof => CallSessionEvent::MembershipProofUpdated,
            SessionUpdate::GroupMembers => CallSessionEvent::GroupMembersUpdated,
            SessionUpdate::End { reason } => CallSessionEvent::Ended { reason: *reason },
        }
    }
}

/// In-process group call session driven by explicit [`SessionUpdate`]s.
///
/// Meant for a single coordination thread; state lives in a `RefCell`.
pub struct ScriptedCallSession {
    state: RefCell<CallSnapshot>,
    ended: RefCell<Option<CallEndReason>>,
    events: broadcast::Sender<CallSessionEvent>,
}

impl ScriptedCallSession {
    pub fn new(initial: CallSnapshot) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RefCell::new(initial),
            ended: RefCell::new(None),
            events,
        }
    }

    pub fn ended_reason(&self) -> Option<CallEndReason> {
        *self.ended.borrow()
    }

    /// Applies `update` and notifies subscribers.
    ///
    /// Updates that would leave a remote device outside the joined roster are
    /// rejected and the session state is left untouched.
    pub fn apply(&self, update: SessionUpdate) -> Result<CallSessionEvent, SessionUpdateError> {
        if self.ended.borrow().is_some() {
            return Err(SessionUpdateError::CallEnded);
        }

        let notification = update.notification();
        let mut candidate = self.state.borrow().clone();
        let mut ended = None;
        match update {
            SessionUpdate::LocalDevice(local_device) => candidate.local_device = local_device,
            SessionUpdate::RemoteDevices(devices) => {
                candidate.joined_remote_device_states = devices
            }
            SessionUpdate::JoinedMembers(members) => candidate.joined_group_members = members,
            SessionUpdate::End { reason } => ended = Some(reason),
            SessionUpdate::SfuInfo
            | SessionUpdate::MembershipProof
            | SessionUpdate::GroupMembers => {}
        }

        if let Err(err) = candidate.validate() {
            warn!("call session: rejected update err={err}");
            return Err(err.into());
        }
        self.state.replace(candidate);
        if ended.is_some() {
            self.ended.replace(ended);
        }

        // No receivers is fine; the session does not require observers.
        let receivers = self.events.send(notification).unwrap_or(0);
        debug!(?notification, receivers, "call session notified observers");
        Ok(notification)
    }
}

impl CallSession for ScriptedCallSession {
    fn is_group_call(&self) -> bool {
        true
    }

    fn snapshot(&self) -> CallSnapshot {
        self.state.borrow().clone()
    }

    fn subscribe_events(&self) -> broadcast::Receiver<CallSessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
