//! Host byte stream → framing → dispatcher → stack.

use eaci::app::{DropReason, Outcome, StackEvent};
use eaci::config::EaciConfig;
use eaci::eaci::codec::RxState;
use eaci::eaci::message::{EaciMessage, MsgType};
use eaci::eaci::wire::BdAddr;
use eaci::gap::{Disconnected, GapEvent, GapRequest};
use eaci::profiles::batt::BattRequest;
use eaci::profiles::hrp::HrpRequest;
use eaci::profiles::{ProfileEvent, ProfileId, ProfileRequest};

use super::mock_stack::{CONHDL, PEER, StackCall, connect, drain, enable_cfm, make_app, with_peer};

const BATT_ENABLE: [u8; 9] = [0xEB, 0x01, 0x06, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66];

// ── GAP commands ──────────────────────────────────────────────

#[test]
fn adv_command_starts_advertising() {
    let (mut app, mut stack) = make_app(EaciConfig::default());

    app.on_rx_bytes(&[0xEA, 0x01, 0x05, 0x01, 0x30, 0x00, 0x64, 0x00], &mut stack);

    assert_eq!(
        stack.calls,
        [StackCall::Gap(GapRequest::Advertise {
            intv_min: 0x0030,
            intv_max: 0x0064
        })]
    );
    assert!(drain(&mut app).is_empty(), "a forwarded CMD has no direct reply");
}

#[test]
fn disconnect_for_unknown_peer_is_dropped() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    let mut frame = vec![0xEA, 0x04, 0x06];
    frame.extend_from_slice(&PEER);

    app.on_rx_bytes(&frame, &mut stack);
    assert!(stack.calls.is_empty());

    connect(&mut app);
    app.on_rx_bytes(&frame, &mut stack);
    assert_eq!(
        stack.calls,
        [StackCall::Gap(GapRequest::Disconnect { conhdl: CONHDL })]
    );
}

// ── Profile requests ──────────────────────────────────────────

#[test]
fn battery_enable_on_resolved_handle() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    connect(&mut app);

    app.on_rx_bytes(&BATT_ENABLE, &mut stack);

    assert_eq!(
        stack.calls,
        [StackCall::Profile {
            conhdl: CONHDL,
            request: ProfileRequest::Batt(BattRequest::Enable)
        }]
    );
}

#[test]
fn unresolved_address_forwards_nothing_and_emits_nothing() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    connect(&mut app);
    let before = drain(&mut app).len();

    app.on_rx_bytes(&[0xEB, 0x01, 0x06, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF], &mut stack);

    assert!(stack.calls.is_empty());
    assert_eq!(drain(&mut app).len(), before, "silent drop must not reply");
}

#[test]
fn out_of_range_id_yields_data_error() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    connect(&mut app);
    let before = drain(&mut app).len();

    // BATT has 3 request ids; 4 is the sentinel.
    app.on_rx_bytes(&[0xEB, 0x04, 0x06, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66], &mut stack);

    assert!(stack.calls.is_empty());
    let written = drain(&mut app);
    assert_eq!(written.len(), before + 1);
    assert_eq!(written.last().unwrap(), &[0xFA, 0x00, 0x01, 0x02]);
}

#[test]
fn same_request_twice_forwards_twice() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    connect(&mut app);

    app.on_rx_bytes(&BATT_ENABLE, &mut stack);
    app.on_rx_bytes(&BATT_ENABLE, &mut stack);

    assert_eq!(stack.calls.len(), 2);
    assert_eq!(stack.calls[0], stack.calls[1]);
}

#[test]
fn request_before_enable_confirmation_is_dropped() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    connect(&mut app);
    let read = EaciMessage::new(MsgType::DataReq, 2, &with_peer(&[0x00])).unwrap();

    assert_eq!(
        app.handle_message(&read, &mut stack),
        Outcome::Dropped(DropReason::NotEnabled)
    );

    enable_cfm(&mut app, |c| {
        ProfileEvent::Batt(eaci::profiles::batt::BattEvent::Enable(c))
    });
    assert_eq!(app.handle_message(&read, &mut stack), Outcome::Forwarded);
}

#[test]
fn disconnection_clears_profile_state() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    connect(&mut app);
    enable_cfm(&mut app, |c| {
        ProfileEvent::Batt(eaci::profiles::batt::BattEvent::Enable(c))
    });
    assert!(app.profile_env().is_enabled_on(ProfileId::Batt, CONHDL));

    app.handle_stack_event(&StackEvent::Gap(GapEvent::Disconnected(Disconnected {
        conhdl: CONHDL,
        reason: 0x13,
    })))
    .unwrap();

    assert!(app.connections().is_empty());
    assert!(!app.profile_env().is_enabled_on(ProfileId::Batt, CONHDL));
    app.on_rx_bytes(&BATT_ENABLE, &mut stack);
    assert!(stack.calls.is_empty(), "peer is gone, nothing to forward");
}

#[test]
fn truncated_payload_is_dropped_silently() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    connect(&mut app);
    let before = drain(&mut app).len();

    app.on_rx_bytes(&[0xEB, 0x01, 0x03, 0x11, 0x22, 0x33], &mut stack);

    assert!(stack.calls.is_empty());
    assert_eq!(drain(&mut app).len(), before);
}

#[test]
fn request_profile_switch_routes_to_new_decoder() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    connect(&mut app);
    app.select_request_profile(ProfileId::Hrp).unwrap();

    app.on_rx_bytes(&BATT_ENABLE, &mut stack);

    assert_eq!(
        stack.calls,
        [StackCall::Profile {
            conhdl: CONHDL,
            request: ProfileRequest::Hrp(HrpRequest::Enable)
        }]
    );
}

// ── Framing errors ────────────────────────────────────────────

#[test]
fn unknown_type_byte_reports_and_recovers() {
    let (mut app, mut stack) = make_app(EaciConfig::default());

    app.on_rx_bytes(&[0x42], &mut stack);
    app.on_rx_bytes(&[0xEA, 0x02, 0x01, 0x01], &mut stack);

    assert_eq!(app.decoder().state(), RxState::RxStart);
    assert_eq!(drain(&mut app), [vec![0xFA, 0x00, 0x01, 0x01]]);
    assert_eq!(stack.calls, [StackCall::Gap(GapRequest::Scan { start: true })]);
}

#[test]
fn oversized_frame_is_discarded_with_length_error() {
    let config = EaciConfig {
        max_param_len: 8,
        ..EaciConfig::default()
    };
    let (mut app, mut stack) = make_app(config);
    let mut bytes = vec![0xEB, 0x01, 0x0A];
    bytes.extend_from_slice(&[0xEB; 10]);
    bytes.extend_from_slice(&[0xEA, 0x02, 0x01, 0x00]);

    app.on_rx_bytes(&bytes, &mut stack);

    assert_eq!(drain(&mut app), [vec![0xFA, 0x00, 0x01, 0x03]]);
    assert_eq!(stack.calls, [StackCall::Gap(GapRequest::Scan { start: false })]);
}

#[test]
fn poll_reads_from_transport() {
    let (mut app, mut stack) = make_app(EaciConfig::default());
    app.link_mut()
        .transport_mut()
        .rx
        .extend([0xEA, 0x01, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00]);

    assert_eq!(app.poll(&mut stack).unwrap(), 8);
    assert_eq!(app.poll(&mut stack).unwrap(), 0);
    assert_eq!(stack.calls, [StackCall::Gap(GapRequest::StopAdvertising)]);
}

#[test]
fn connect_event_is_forwarded_to_host() {
    let (mut app, _stack) = make_app(EaciConfig::default());
    connect(&mut app);

    assert_eq!(
        app.connections().resolve(&BdAddr::new(PEER)),
        CONHDL
    );
    let written = drain(&mut app);
    assert_eq!(written.len(), 1);
    assert_eq!(&written[0][..3], &[0xED, 0x04, 0x09]);
}
