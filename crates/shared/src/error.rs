use thiserror::Error;

use crate::domain::{DemuxId, ParticipantId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionInvariantError {
    #[error("remote device {demux_id} belongs to participant {participant_id} who has not joined")]
    RemoteDeviceNotJoined {
        demux_id: DemuxId,
        participant_id: ParticipantId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionUpdateError {
    #[error("call has already ended")]
    CallEnded,
    #[error("update rejected: {0}")]
    Invariant(#[from] SessionInvariantError),
}
