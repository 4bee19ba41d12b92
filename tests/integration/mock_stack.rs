//! Mock adapters for integration tests.
//!
//! `MockStack` records every request the bridge forwards and
//! `MockTransport` records every frame it writes, so tests can assert on
//! the full history without a BLE stack or UART.

use std::collections::VecDeque;

use eaci::app::ports::StackPort;
use eaci::app::{EaciApp, StackEvent};
use eaci::config::EaciConfig;
use eaci::eaci::transport::Transport;
use eaci::eaci::wire::BdAddr;
use eaci::gap::{Connected, GapEvent, GapRequest};
use eaci::profiles::{EnableCfm, ProfileEvent, ProfileRequest};

pub const PEER: [u8; 6] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];
pub const CONHDL: u16 = 0;

// ── Stack call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackCall {
    Gap(GapRequest),
    Profile { conhdl: u16, request: ProfileRequest },
}

// ── MockStack ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockStack {
    pub calls: Vec<StackCall>,
}

impl StackPort for MockStack {
    fn gap_request(&mut self, request: &GapRequest) {
        self.calls.push(StackCall::Gap(request.clone()));
    }

    fn profile_request(&mut self, conhdl: u16, request: &ProfileRequest) {
        self.calls.push(StackCall::Profile {
            conhdl,
            request: request.clone(),
        });
    }
}

// ── MockTransport ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockTransport {
    pub written: Vec<Vec<u8>>,
    pub rx: VecDeque<u8>,
    pub fail_writes: bool,
}

impl Transport for MockTransport {
    type Error = &'static str;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err("uart down");
        }
        self.written.push(frame.to_vec());
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────

pub fn make_app(config: EaciConfig) -> (EaciApp<MockTransport>, MockStack) {
    let app = EaciApp::new(config, MockTransport::default()).expect("valid config");
    (app, MockStack::default())
}

/// Run every pending TX completion and return all frames written so far.
pub fn drain(app: &mut EaciApp<MockTransport>) -> Vec<Vec<u8>> {
    while app.link().pending() > 0 {
        app.tx_done().expect("tx_done");
    }
    app.tx_done().expect("tx_done");
    app.link().transport().written.clone()
}

/// Report a successful connection to `PEER` on `CONHDL`.
pub fn connect(app: &mut EaciApp<MockTransport>) {
    app.handle_stack_event(&StackEvent::Gap(GapEvent::Connected(Connected {
        status: 0,
        conhdl: CONHDL,
        addr: BdAddr::new(PEER),
    })))
    .expect("connect event");
}

/// Report a successful enable confirmation for `wrap`'s profile.
pub fn enable_cfm(
    app: &mut EaciApp<MockTransport>,
    wrap: impl FnOnce(EnableCfm) -> ProfileEvent,
) {
    app.handle_stack_event(&StackEvent::Profile {
        conhdl: CONHDL,
        event: wrap(EnableCfm { status: 0 }),
    })
    .expect("enable event");
}

/// `[head.., PEER]`
pub fn with_peer(head: &[u8]) -> Vec<u8> {
    let mut v = head.to_vec();
    v.extend_from_slice(&PEER);
    v
}
