use uuid::Uuid;

use crate::{
    domain::{
        CallEndReason, CallSnapshot, ConnectionState, DemuxId, JoinState, LocalDeviceState,
        ParticipantId, RemoteDevice,
    },
    error::SessionInvariantError,
    protocol::CallSessionEvent,
};

fn participant(n: u128) -> ParticipantId {
    ParticipantId(Uuid::from_u128(n))
}

#[test]
fn snapshot_with_joined_remote_devices_is_valid() {
    let alice = participant(1);
    let bob = participant(2);
    let snapshot = CallSnapshot {
        local_device: LocalDeviceState::new(ConnectionState::Connected, JoinState::Joined),
        joined_group_members: vec![alice, bob],
        joined_remote_device_states: vec![RemoteDevice::new(DemuxId(10), bob)],
    };

    assert_eq!(snapshot.validate(), Ok(()));
    assert_eq!(snapshot.joined_member_count(), 2);
    assert_eq!(snapshot.speaker().map(|d| d.participant_id), Some(bob));
}

#[test]
fn snapshot_rejects_remote_device_outside_roster() {
    let stranger = participant(9);
    let snapshot = CallSnapshot {
        local_device: LocalDeviceState::new(ConnectionState::Connected, JoinState::Joined),
        joined_group_members: vec![participant(1)],
        joined_remote_device_states: vec![RemoteDevice::new(DemuxId(3), stranger)],
    };

    assert_eq!(
        snapshot.validate(),
        Err(SessionInvariantError::RemoteDeviceNotJoined {
            demux_id: DemuxId(3),
            participant_id: stranger,
        })
    );
}

#[test]
fn session_events_use_tagged_wire_shape() {
    let json = serde_json::to_value(CallSessionEvent::Ended {
        reason: CallEndReason::ServerExplicitlyDisconnected,
    })
    .expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "type": "ended",
            "payload": { "reason": "server_explicitly_disconnected" }
        })
    );

    let parsed: CallSessionEvent =
        serde_json::from_str(r#"{"type":"joined_members_changed"}"#).expect("parse");
    assert_eq!(parsed, CallSessionEvent::JoinedMembersChanged);
}

#[test]
fn only_device_disconnect_counts_as_local_hangup() {
    assert!(CallEndReason::DeviceExplicitlyDisconnected.is_locally_initiated());
    assert!(!CallEndReason::HasMaxDevices.is_locally_initiated());
}
