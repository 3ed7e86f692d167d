//! Renderer-facing description of the group call screen.

use serde::Serialize;
use shared::domain::{ConnectionState, RemoteDevice};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderMode {
    /// Transport is not connected; the renderer shows a waiting indicator.
    Suspended { connection_state: ConnectionState },
    /// Local camera preview before joining.
    PreJoin,
    /// Joined, but nobody else is rendering video.
    SingleParticipant,
    /// The first remote device fills the speaker page.
    SpeakerPlusGrid { speaker: RemoteDevice },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationOffset {
    GridPage,
    SpeakerPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalTileSize {
    FullScreen,
    PictureInPicture,
    OverflowThumbnail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalTilePosition {
    FillSpeakerPage,
    AboveControls,
    TopOfOverflowStrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalTile {
    pub size: LocalTileSize,
    pub position: LocalTilePosition,
}

impl LocalTile {
    pub const FULL_SCREEN: LocalTile = LocalTile {
        size: LocalTileSize::FullScreen,
        position: LocalTilePosition::FillSpeakerPage,
    };
    pub const PICTURE_IN_PICTURE: LocalTile = LocalTile {
        size: LocalTileSize::PictureInPicture,
        position: LocalTilePosition::AboveControls,
    };
    pub const OVERFLOW_THUMBNAIL: LocalTile = LocalTile {
        size: LocalTileSize::OverflowThumbnail,
        position: LocalTilePosition::TopOfOverflowStrip,
    };
}

/// Complete snapshot of what the renderer must display.
///
/// Plans are never patched in place; every recompute produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewPlan {
    pub mode: RenderMode,
    pub grid_visible: bool,
    pub scroll_enabled: bool,
    pub pagination_offset: PaginationOffset,
    pub local_tile: LocalTile,
    /// Remote devices on the grid page, speaker first.
    pub grid_members: Vec<RemoteDevice>,
    /// Remote devices beyond grid capacity, in roster order.
    pub overflow_members: Vec<RemoteDevice>,
    pub joined_member_count: usize,
}

impl ViewPlan {
    pub fn suspended(connection_state: ConnectionState, joined_member_count: usize) -> Self {
        Self {
            mode: RenderMode::Suspended { connection_state },
            grid_visible: false,
            scroll_enabled: false,
            pagination_offset: PaginationOffset::SpeakerPage,
            local_tile: LocalTile::FULL_SCREEN,
            grid_members: Vec::new(),
            overflow_members: Vec::new(),
            joined_member_count,
        }
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self.mode, RenderMode::Suspended { .. })
    }

    pub fn speaker(&self) -> Option<&RemoteDevice> {
        match &self.mode {
            RenderMode::SpeakerPlusGrid { speaker } => Some(speaker),
            _ => None,
        }
    }

    /// Members the overflow strip lists when it starts at roster index `first`.
    pub fn overflow_strip(&self, first: usize) -> Vec<RemoteDevice> {
        self.grid_members
            .iter()
            .chain(&self.overflow_members)
            .skip(first)
            .copied()
            .collect()
    }
}
