//! Shared fixtures for integration tests.

/// One EBML element: id bytes, a vint size, then the body.
pub fn element(id: &[u8], body: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    if body.len() < 0x7F {
        out.push(0x80 | body.len() as u8);
    } else {
        out.push(0x01);
        out.extend_from_slice(&(body.len() as u64).to_be_bytes()[1..]);
    }
    out.extend_from_slice(body);
    out
}

/// Smallest Matroska file the native engine accepts: a 2:15 segment with
/// one 1920x1080 AVC track at 25 fps and one 6-channel AC-3 track.
pub fn minimal_mkv() -> Vec<u8> {
    let ebml = element(&[0x1A, 0x45, 0xDF, 0xA3], &element(&[0x42, 0x82], b"matroska"));

    let info = element(
        &[0x15, 0x49, 0xA9, 0x66],
        &[
            // TimestampScale: 1 ms
            element(&[0x2A, 0xD7, 0xB1], &[0x0F, 0x42, 0x40]),
            // Duration in timestamp units
            element(&[0x44, 0x89], &135_000f64.to_be_bytes()),
        ]
        .concat(),
    );

    let video = element(
        &[0xE0],
        &[
            element(&[0xB0], &1920u16.to_be_bytes()),
            element(&[0xBA], &1080u16.to_be_bytes()),
        ]
        .concat(),
    );
    let video_entry = element(
        &[0xAE],
        &[
            element(&[0xD7], &[1]),
            element(&[0x83], &[1]),
            element(&[0x86], b"V_MPEG4/ISO/AVC"),
            // DefaultDuration: 40 ms per frame
            element(&[0x23, 0xE3, 0x83], &40_000_000u32.to_be_bytes()),
            video,
        ]
        .concat(),
    );

    let audio = element(
        &[0xE1],
        &[
            element(&[0x9F], &[6]),
            element(&[0xB5], &48_000f64.to_be_bytes()),
        ]
        .concat(),
    );
    let audio_entry = element(
        &[0xAE],
        &[
            element(&[0xD7], &[2]),
            element(&[0x83], &[2]),
            element(&[0x86], b"A_AC3"),
            audio,
        ]
        .concat(),
    );

    let tracks = element(&[0x16, 0x54, 0xAE, 0x6B], &[video_entry, audio_entry].concat());
    let segment = element(&[0x18, 0x53, 0x80, 0x67], &[info, tracks].concat());

    [ebml, segment].concat()
}
