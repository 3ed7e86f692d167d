use serde::{Deserialize, Serialize};

use crate::domain::CallEndReason;

/// Notifications emitted by a group call session.
///
/// Notifications carry no roster payload; observers re-read the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CallSessionEvent {
    LocalDeviceStateChanged,
    RemoteDeviceStatesChanged,
    JoinedMembersChanged,
    Ended { reason: CallEndReason },
    SfuInfoUpdated,
    MembershipProofUpdated,
    GroupMembersUpdated,
}
