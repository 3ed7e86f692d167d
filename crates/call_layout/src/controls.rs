//! Call control bar actions and the commands they issue to the call service.

use crossbeam_channel::{Sender, TrySendError};
use shared::domain::JoinState;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallControlAction {
    Hangup,
    Cancel,
    Join,
    Back,
    ToggleMute,
    ToggleVideo,
    ToggleSpeakerphone,
    FlipCamera,
    ShowMembers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallCommand {
    TerminateCall,
    /// Keep the call running and leave the full-screen call view.
    LeaveCallView,
    Join,
    SetOutgoingAudioMuted(bool),
    SetLocalVideoMuted(bool),
    RequestSpeakerphone(bool),
    UseFrontCamera(bool),
}

impl CallCommand {
    fn name(&self) -> &'static str {
        match self {
            CallCommand::TerminateCall => "terminate_call",
            CallCommand::LeaveCallView => "leave_call_view",
            CallCommand::Join => "join",
            CallCommand::SetOutgoingAudioMuted(_) => "set_outgoing_audio_muted",
            CallCommand::SetLocalVideoMuted(_) => "set_local_video_muted",
            CallCommand::RequestSpeakerphone(_) => "request_speakerphone",
            CallCommand::UseFrontCamera(_) => "use_front_camera",
        }
    }
}

/// Toggle state of the control bar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallControls {
    audio_muted: bool,
    video_enabled: bool,
    speakerphone: bool,
    front_camera: bool,
}

impl Default for CallControls {
    fn default() -> Self {
        Self {
            audio_muted: false,
            video_enabled: true,
            speakerphone: false,
            front_camera: true,
        }
    }
}

impl CallControls {
    pub fn audio_muted(&self) -> bool {
        self.audio_muted
    }

    pub fn video_enabled(&self) -> bool {
        self.video_enabled
    }

    pub fn speakerphone(&self) -> bool {
        self.speakerphone
    }

    pub fn front_camera(&self) -> bool {
        self.front_camera
    }

    pub fn handle(&mut self, action: CallControlAction, join_state: JoinState) -> Option<CallCommand> {
        match action {
            CallControlAction::Hangup | CallControlAction::Cancel => {
                Some(CallCommand::TerminateCall)
            }
            CallControlAction::Join => Some(CallCommand::Join),
            CallControlAction::Back => Some(back_navigation(join_state)),
            CallControlAction::ToggleMute => {
                self.audio_muted = !self.audio_muted;
                Some(CallCommand::SetOutgoingAudioMuted(self.audio_muted))
            }
            CallControlAction::ToggleVideo => {
                self.video_enabled = !self.video_enabled;
                Some(CallCommand::SetLocalVideoMuted(!self.video_enabled))
            }
            CallControlAction::ToggleSpeakerphone => {
                self.speakerphone = !self.speakerphone;
                Some(CallCommand::RequestSpeakerphone(self.speakerphone))
            }
            CallControlAction::FlipCamera => {
                self.front_camera = !self.front_camera;
                Some(CallCommand::UseFrontCamera(self.front_camera))
            }
            CallControlAction::ShowMembers => None,
        }
    }
}

/// Back leaves a joined call running in the background; otherwise it ends it.
pub fn back_navigation(join_state: JoinState) -> CallCommand {
    match join_state {
        JoinState::Joined => CallCommand::LeaveCallView,
        JoinState::NotJoined | JoinState::Joining => CallCommand::TerminateCall,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallCommandDispatchError {
    #[error("call command queue is full; dropped {0}")]
    QueueFull(&'static str),
    #[error("call service disconnected; dropped {0}")]
    Disconnected(&'static str),
}

pub fn dispatch_call_command(
    cmd_tx: &Sender<CallCommand>,
    cmd: CallCommand,
) -> Result<(), CallCommandDispatchError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued call command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(CallCommandDispatchError::QueueFull(cmd_name)),
        Err(TrySendError::Disconnected(_)) => {
            Err(CallCommandDispatchError::Disconnected(cmd_name))
        }
    }
}

#[cfg(test)]
#[path = "tests/controls_tests.rs"]
mod tests;
