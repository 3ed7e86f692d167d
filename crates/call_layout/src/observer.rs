use std::rc::Rc;

use call_session::CallSession;
use shared::{domain::CallEndReason, protocol::CallSessionEvent};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

/// The call-state changes the layout core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStateChange {
    LocalDeviceStateChanged,
    RemoteRosterChanged,
    MembershipChanged,
    CallEnded(CallEndReason),
}

impl CallStateChange {
    /// Session notifications with no layout impact map to `None`.
    pub fn from_session_event(event: CallSessionEvent) -> Option<Self> {
        match event {
            CallSessionEvent::LocalDeviceStateChanged => Some(Self::LocalDeviceStateChanged),
            CallSessionEvent::RemoteDeviceStatesChanged => Some(Self::RemoteRosterChanged),
            CallSessionEvent::JoinedMembersChanged => Some(Self::MembershipChanged),
            CallSessionEvent::Ended { reason } => Some(Self::CallEnded(reason)),
            CallSessionEvent::SfuInfoUpdated
            | CallSessionEvent::MembershipProofUpdated
            | CallSessionEvent::GroupMembersUpdated => None,
        }
    }
}

pub trait CallStateSink {
    fn on_call_state_changed(&mut self, change: CallStateChange, session: &dyn CallSession);
}

/// Subscribes to a group call session and forwards its changes to a sink.
///
/// Every change is forwarded as-is; duplicates and bursts are the sink's
/// problem. The session handle goes along with each change so the sink reads
/// current state instead of trusting the notification.
pub struct CallStateObserver<S: CallSession> {
    session: Rc<S>,
    events: broadcast::Receiver<CallSessionEvent>,
    closed: bool,
}

impl<S: CallSession> CallStateObserver<S> {
    pub fn new(session: Rc<S>) -> Self {
        assert!(
            session.is_group_call(),
            "group call layout attached to a non-group call"
        );
        let events = session.subscribe_events();
        Self {
            session,
            events,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Forwards a single notification. Returns whether the sink was invoked.
    pub fn forward(&self, event: CallSessionEvent, sink: &mut impl CallStateSink) -> bool {
        let Some(change) = CallStateChange::from_session_event(event) else {
            return false;
        };
        debug!(?change, "observer: forwarding call state change");
        sink.on_call_state_changed(change, self.session.as_ref());
        true
    }

    /// Forwards every notification queued since the last drain, in order.
    pub fn drain(&mut self, sink: &mut impl CallStateSink) -> usize {
        let mut forwarded = 0;
        while !self.closed {
            match self.events.try_recv() {
                Ok(event) => {
                    if self.forward(event, sink) {
                        forwarded += 1;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("observer: dropped {skipped} call notifications, resyncing from session");
                    sink.on_call_state_changed(
                        CallStateChange::LocalDeviceStateChanged,
                        self.session.as_ref(),
                    );
                    forwarded += 1;
                }
                Err(TryRecvError::Closed) => {
                    debug!("observer: call session closed its notification channel");
                    self.closed = true;
                }
            }
        }
        forwarded
    }
}

#[cfg(test)]
#[path = "tests/observer_tests.rs"]
mod tests;
