//! Fuzz target: `FrameDecoder::feed`
//!
//! Drives arbitrary byte sequences into the streaming frame decoder and
//! asserts that it never panics, never yields a payload above the
//! configured limit, and decodes a clean frame after a reset.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use eaci::eaci::codec::{FrameDecoder, FrameEvent, RxState};
use eaci::eaci::message::{EaciMessage, MsgType};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the length limit so oversized frames are exercised.
    let Some((&limit, data)) = data.split_first() else {
        return;
    };
    let mut decoder = FrameDecoder::with_max_param_len(limit as usize);

    decoder.feed(data, |event| {
        if let FrameEvent::Message(msg) = event {
            assert!(msg.param.len() <= limit as usize, "payload exceeds limit");
        }
    });

    decoder.reset();
    assert_eq!(decoder.state(), RxState::RxStart);

    let probe = EaciMessage::new(MsgType::Cmd, 1, &[]).unwrap();
    let mut decoded = 0;
    decoder.feed(&probe.encode(), |event| {
        assert_eq!(event, FrameEvent::Message(probe.clone()));
        decoded += 1;
    });
    assert_eq!(decoded, 1);
});
