//! Fuzz target: `FrameDecoder` on arbitrary UART noise
//!
//! The first byte picks a split point; the rest is fed in two slices.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Splitting the input never changes the decoded frames or the stats
//! - Every emitted frame is counted, and no more frames than `len / 4`
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use soilwatch::protocol::FRAME_LEN;
use soilwatch::protocol::codec::FrameDecoder;

fuzz_target!(|data: &[u8]| {
    let Some((&cut, bytes)) = data.split_first() else {
        return;
    };
    let at = usize::from(cut).min(bytes.len());

    let mut whole = FrameDecoder::new();
    let expected = whole.feed_slice(bytes);

    let mut split = FrameDecoder::new();
    let mut got = split.feed_slice(&bytes[..at]);
    got.extend(split.feed_slice(&bytes[at..]));

    assert_eq!(got, expected, "split at {at} changed the decoded frames");
    assert_eq!(split.stats(), whole.stats());
    assert!(expected.len() <= bytes.len() / FRAME_LEN);
    assert_eq!(whole.stats().frames_decoded, expected.len() as u64);

    // A reset always leaves the decoder hunting for a header.
    whole.reset();
    assert!(!whole.is_mid_frame());
    assert_eq!(whole.bytes_to_complete(), FRAME_LEN);
});
