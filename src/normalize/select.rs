//! Picks the tracks the normalizers read from.

use vidmeta_av::{RawTrack, TrackKind};

/// The first General, Video and Audio track of a probe, if present.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectedTracks<'a> {
    pub general: Option<&'a RawTrack>,
    pub video: Option<&'a RawTrack>,
    pub audio: Option<&'a RawTrack>,
}

impl<'a> SelectedTracks<'a> {
    /// Selected tracks in General > Video > Audio priority, skipping absent ones.
    pub fn by_priority(&self) -> impl Iterator<Item = &'a RawTrack> {
        [self.general, self.video, self.audio].into_iter().flatten()
    }

    /// Whether the probe has enough to describe a media file.
    pub fn is_viable(&self) -> bool {
        self.general.is_some() || self.video.is_some()
    }
}

/// Select the first track of each type. Later duplicates are ignored.
pub fn select(tracks: &[RawTrack]) -> SelectedTracks<'_> {
    let first = move |kind: TrackKind| tracks.iter().find(|t| t.kind == kind);

    SelectedTracks {
        general: first(TrackKind::General),
        video: first(TrackKind::Video),
        audio: first(TrackKind::Audio),
    }
}
