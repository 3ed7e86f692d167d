use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionInvariantError;

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);
    };
}

id_newtype!(ParticipantId, Uuid);
id_newtype!(DemuxId, u32);

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for DemuxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "demux:{}", self.0)
    }
}

/// Transport-level link health of the local device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connecting,
    Connected,
    Reconnecting,
    Disconnected,
}

/// Progress of the local device through the call's media plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinState {
    NotJoined,
    Joining,
    Joined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalDeviceState {
    pub connection_state: ConnectionState,
    pub join_state: JoinState,
}

impl LocalDeviceState {
    pub fn new(connection_state: ConnectionState, join_state: JoinState) -> Self {
        Self {
            connection_state,
            join_state,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state == ConnectionState::Connected
    }

    pub fn is_joined(&self) -> bool {
        self.join_state == JoinState::Joined
    }
}

impl Default for LocalDeviceState {
    fn default() -> Self {
        Self::new(ConnectionState::Connecting, JoinState::NotJoined)
    }
}

/// A remote device currently rendering video in the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteDevice {
    pub demux_id: DemuxId,
    pub participant_id: ParticipantId,
    #[serde(default)]
    pub video_muted: bool,
}

impl RemoteDevice {
    pub fn new(demux_id: DemuxId, participant_id: ParticipantId) -> Self {
        Self {
            demux_id,
            participant_id,
            video_muted: false,
        }
    }
}

/// Point-in-time read of everything the layout core needs from a group call.
///
/// `joined_remote_device_states` is ordered by join/speaking priority; the
/// first entry is the speaker. `joined_group_members` includes the local
/// participant once the local device has joined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSnapshot {
    pub local_device: LocalDeviceState,
    #[serde(default)]
    pub joined_group_members: Vec<ParticipantId>,
    #[serde(default)]
    pub joined_remote_device_states: Vec<RemoteDevice>,
}

impl CallSnapshot {
    pub fn joined_member_count(&self) -> usize {
        self.joined_group_members.len()
    }

    pub fn remote_device_count(&self) -> usize {
        self.joined_remote_device_states.len()
    }

    pub fn speaker(&self) -> Option<&RemoteDevice> {
        self.joined_remote_device_states.first()
    }

    /// Every rendering remote device must belong to a joined member.
    pub fn validate(&self) -> Result<(), SessionInvariantError> {
        for device in &self.joined_remote_device_states {
            if !self.joined_group_members.contains(&device.participant_id) {
                return Err(SessionInvariantError::RemoteDeviceNotJoined {
                    demux_id: device.demux_id,
                    participant_id: device.participant_id,
                });
            }
        }
        Ok(())
    }
}

/// Why a group call ended. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallEndReason {
    DeviceExplicitlyDisconnected,
    ServerExplicitlyDisconnected,
    CallManagerIsBusy,
    SfuClientFailedToJoin,
    HasMaxDevices,
}

impl CallEndReason {
    pub fn is_locally_initiated(&self) -> bool {
        matches!(self, CallEndReason::DeviceExplicitlyDisconnected)
    }
}
