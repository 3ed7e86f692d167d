use shared::domain::{ConnectionState, DemuxId, JoinState};
use tokio::sync::broadcast::error::TryRecvError;
use uuid::Uuid;

use super::*;

fn participant(n: u128) -> ParticipantId {
    ParticipantId(Uuid::from_u128(n))
}

fn joined() -> LocalDeviceState {
    LocalDeviceState::new(ConnectionState::Connected, JoinState::Joined)
}

#[test]
fn applies_update_and_notifies_subscribers() {
    let session = ScriptedCallSession::new(CallSnapshot::default());
    let mut events = session.subscribe_events();

    let notification = session
        .apply(SessionUpdate::LocalDevice(joined()))
        .expect("apply");

    assert_eq!(notification, CallSessionEvent::LocalDeviceStateChanged);
    assert_eq!(events.try_recv(), Ok(CallSessionEvent::LocalDeviceStateChanged));
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(session.snapshot().local_device, joined());
}

#[test]
fn applies_updates_without_any_subscriber() {
    let session = ScriptedCallSession::new(CallSnapshot::default());
    session
        .apply(SessionUpdate::JoinedMembers(vec![participant(1)]))
        .expect("apply without receivers");
    assert_eq!(session.snapshot().joined_group_members, vec![participant(1)]);
}

#[test]
fn rejects_remote_devices_for_unjoined_participants() {
    let session = ScriptedCallSession::new(CallSnapshot::default());
    let mut events = session.subscribe_events();

    let err = session
        .apply(SessionUpdate::RemoteDevices(vec![RemoteDevice::new(
            DemuxId(7),
            participant(2),
        )]))
        .expect_err("device outside roster");

    assert!(matches!(err, SessionUpdateError::Invariant(_)));
    assert!(session.snapshot().joined_remote_device_states.is_empty());
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn members_then_devices_is_accepted() {
    let session = ScriptedCallSession::new(CallSnapshot::default());
    let bob = participant(2);
    session
        .apply(SessionUpdate::JoinedMembers(vec![participant(1), bob]))
        .expect("members");
    session
        .apply(SessionUpdate::RemoteDevices(vec![RemoteDevice::new(DemuxId(1), bob)]))
        .expect("devices");

    assert_eq!(session.snapshot().remote_device_count(), 1);
}

#[test]
fn ended_session_refuses_further_updates() {
    let session = ScriptedCallSession::new(CallSnapshot::default());
    let notification = session
        .apply(SessionUpdate::End {
            reason: CallEndReason::ServerExplicitlyDisconnected,
        })
        .expect("end");

    assert_eq!(
        notification,
        CallSessionEvent::Ended {
            reason: CallEndReason::ServerExplicitlyDisconnected
        }
    );
    assert_eq!(
        session.ended_reason(),
        Some(CallEndReason::ServerExplicitlyDisconnected)
    );
    assert_eq!(
        session.apply(SessionUpdate::SfuInfo),
        Err(SessionUpdateError::CallEnded)
    );
}

#[test]
fn session_updates_parse_from_tagged_json() {
    let update: SessionUpdate = serde_json::from_str(
        r#"{"type":"local_device","payload":{"connection_state":"reconnecting","join_state":"joined"}}"#,
    )
    .expect("parse");

    assert_eq!(
        update,
        SessionUpdate::LocalDevice(LocalDeviceState::new(
            ConnectionState::Reconnecting,
            JoinState::Joined
        ))
    );
}
