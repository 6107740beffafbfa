use super::UNKNOWN;
use vidmeta_av::RawTrack;

/// Exact frame rate, else the nominal one, suffixed with `fps`.
pub fn normalize_frame_rate(video: Option<&RawTrack>) -> String {
    video
        .and_then(|t| t.text("FrameRate").or_else(|| t.text("FrameRate_Nominal")))
        .map(|rate| format!("{} fps", rate))
        .unwrap_or_else(|| UNKNOWN.to_string())
}
