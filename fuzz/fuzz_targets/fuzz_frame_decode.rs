#![no_main]

use bytes::BytesMut;
use h2frame::{AnyFrame, Frame, FrameDecoder, FrameEncoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let decoder = FrameDecoder::new();
    let encoder = FrameEncoder::new();
    let mut buf = BytesMut::from(data);

    // Try to decode frames until we run out of data or hit an error
    loop {
        let before = buf.len();
        match decoder.decode(&mut buf) {
            Ok(Some(frame)) => {
                let consumed = before - buf.len();
                let _ = frame.stream_id();

                match &frame {
                    AnyFrame::GoAway(f) => {
                        assert!(f.last_stream_id() <= 0x7FFF_FFFF);
                        let _ = f.error();
                        assert_eq!(f.body_len() + 9, consumed);
                    }
                    AnyFrame::Raw(f) => {
                        assert_eq!(f.payload.len() + 9, consumed);
                    }
                }

                // Anything that decoded must encode again
                let mut out = BytesMut::new();
                encoder.encode(&frame, &mut out).unwrap();
                assert_eq!(out.len(), consumed);
            }
            Ok(None) => {
                // Need more data
                break;
            }
            Err(_) => {
                // Parse error - expected for malformed input
                break;
            }
        }
    }
});
