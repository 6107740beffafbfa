//! MP4/MOV container parsing

use std::io::Read;

use mp4parse::{read_mp4, SampleEntry, TrackType};

use super::ContainerContents;
use crate::probe::types::{RawTrack, TrackKind};
use crate::{Error, Result};

/// Parse an ISO-BMFF stream into MediaInfo-style tracks.
pub(crate) fn probe<R: Read>(mut reader: R) -> Result<ContainerContents> {
    let context = read_mp4(&mut reader)
        .map_err(|e| Error::ContainerParse(format!("MP4 parse error: {:?}", e)))?;

    let movie_scale = context.timescale.map(|ts| ts.0);
    let mut streams = Vec::new();
    let mut duration_ms = None;

    for track in &context.tracks {
        let track_ms = track_duration_ms(track, movie_scale);
        duration_ms = duration_ms.max(track_ms);

        let raw = match track.track_type {
            TrackType::Video => video_track(track),
            TrackType::Audio => audio_track(track),
            TrackType::Metadata => Some(RawTrack::new(TrackKind::Other("Text".to_string()))),
            _ => None,
        };

        if let Some(mut raw) = raw {
            if let Some(ms) = track_ms {
                raw.insert("Duration", ms);
            }
            streams.push(raw);
        }
    }

    Ok(ContainerContents {
        duration_ms,
        streams,
    })
}

/// Track duration in milliseconds, using the track timescale when present
/// and the movie timescale otherwise.
fn track_duration_ms(track: &mp4parse::Track, movie_scale: Option<u64>) -> Option<u64> {
    let duration = track.duration?.0;
    let scale = track.timescale.map(|s| s.0).or(movie_scale)?;
    if scale == 0 {
        return None;
    }
    Some(duration.saturating_mul(1000) / scale)
}

fn video_track(track: &mp4parse::Track) -> Option<RawTrack> {
    let stsd = track.stsd.as_ref()?;
    let SampleEntry::Video(ve) = stsd.descriptions.first()? else {
        return None;
    };

    let format = match &ve.codec_specific {
        mp4parse::VideoCodecSpecific::AVCConfig(_) => "AVC",
        mp4parse::VideoCodecSpecific::AV1Config(_) => "AV1",
        mp4parse::VideoCodecSpecific::VPxConfig(_) => "VP9",
        mp4parse::VideoCodecSpecific::ESDSConfig(_) => "MPEG-4 Visual",
        mp4parse::VideoCodecSpecific::H263Config(_) => "H.263",
        #[allow(unreachable_patterns)]
        _ => return None,
    };

    Some(
        RawTrack::new(TrackKind::Video)
            .with("Format", format)
            .with("Width", ve.width as u32)
            .with("Height", ve.height as u32),
    )
}

fn audio_track(track: &mp4parse::Track) -> Option<RawTrack> {
    let stsd = track.stsd.as_ref()?;
    let SampleEntry::Audio(ae) = stsd.descriptions.first()? else {
        return None;
    };

    let (format, profile) = match &ae.codec_specific {
        mp4parse::AudioCodecSpecific::ES_Descriptor(esds) => match esds.audio_object_type {
            Some(1) => ("AAC", Some("Main")),
            Some(2) => ("AAC", Some("LC")),
            Some(5) => ("AAC", Some("HE-AAC")),
            Some(29) => ("AAC", Some("HE-AACv2")),
            _ => ("AAC", None),
        },
        mp4parse::AudioCodecSpecific::FLACSpecificBox(_) => ("FLAC", None),
        mp4parse::AudioCodecSpecific::OpusSpecificBox(_) => ("Opus", None),
        mp4parse::AudioCodecSpecific::ALACSpecificBox(_) => ("ALAC", None),
        mp4parse::AudioCodecSpecific::MP3 => ("MPEG Audio", Some("Layer 3")),
        mp4parse::AudioCodecSpecific::LPCM => ("PCM", None),
        #[allow(unreachable_patterns)]
        _ => return None,
    };

    let mut raw = RawTrack::new(TrackKind::Audio)
        .with("Format", format)
        .with("Channels", ae.channelcount as u64)
        .with("SamplingRate", ae.samplerate as f64);
    if let Some(profile) = profile {
        raw.insert("Format_Profile", profile);
    }
    Some(raw)
}
