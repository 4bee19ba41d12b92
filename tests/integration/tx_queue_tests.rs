//! Outbound path: queueing while the UART is busy.

use eaci::app::StackEvent;
use eaci::config::EaciConfig;
use eaci::eaci::link::{TX_QUEUE_DEPTH, TxState};
use eaci::eaci::message::ErrorCode;
use eaci::error::{Error, LinkError};
use eaci::profiles::ProfileEvent;
use eaci::profiles::batt::{BattEvent, BattLevel};

use super::mock_stack::{CONHDL, drain, make_app};

fn level(level: u8) -> StackEvent {
    StackEvent::Profile {
        conhdl: CONHDL,
        event: ProfileEvent::Batt(BattEvent::Level(BattLevel { level })),
    }
}

#[test]
fn frames_drain_in_fifo_order() {
    let (mut app, _stack) = make_app(EaciConfig::default());

    for l in 1..=3 {
        app.handle_stack_event(&level(l)).unwrap();
    }
    assert_eq!(app.link().state(), TxState::Ongoing);
    assert_eq!(app.link().transport().written.len(), 1);
    assert_eq!(app.link().pending(), 2);

    app.tx_done().unwrap();
    app.tx_done().unwrap();
    assert_eq!(app.link().pending(), 0);
    assert_eq!(app.link().state(), TxState::Ongoing);

    app.tx_done().unwrap();
    assert_eq!(app.link().state(), TxState::Idle);

    let levels: Vec<u8> = app
        .link()
        .transport()
        .written
        .iter()
        .map(|f| f[5])
        .collect();
    assert_eq!(levels, [1, 2, 3]);
}

#[test]
fn full_queue_reports_and_drops() {
    let (mut app, _stack) = make_app(EaciConfig::default());
    app.handle_stack_event(&level(0)).unwrap();
    for l in 0..TX_QUEUE_DEPTH {
        app.handle_stack_event(&level(l as u8)).unwrap();
    }

    assert_eq!(
        app.handle_stack_event(&level(0xFF)),
        Err(Error::Link(LinkError::QueueFull))
    );
    assert_eq!(app.link().pending(), TX_QUEUE_DEPTH);
}

#[test]
fn pdu_send_checks_length_byte() {
    let (mut app, _stack) = make_app(EaciConfig::default());

    assert_eq!(
        app.pdu_send(&[0xFA, 0x00, 0x02, 0x01]),
        Err(Error::Link(LinkError::InvalidPdu))
    );
    app.pdu_send(&[0xFA, 0x00, 0x01, 0x01]).unwrap();
    assert_eq!(app.link().transport().written, [vec![0xFA, 0x00, 0x01, 0x01]]);
}

#[test]
fn write_failure_leaves_link_idle() {
    let (mut app, _stack) = make_app(EaciConfig::default());
    app.link_mut().transport_mut().fail_writes = true;

    assert_eq!(
        app.send_error(ErrorCode::Length),
        Err(Error::Link(LinkError::Transport))
    );
    assert_eq!(app.link().state(), TxState::Idle);

    app.link_mut().transport_mut().fail_writes = false;
    app.send_error(ErrorCode::Length).unwrap();
    assert_eq!(app.link().transport().written, [vec![0xFA, 0x00, 0x01, 0x03]]);
}

#[test]
fn send_after_failed_drain_does_not_overtake_queue() {
    let (mut app, _stack) = make_app(EaciConfig::default());
    for l in 1..=3 {
        app.handle_stack_event(&level(l)).unwrap();
    }

    app.link_mut().transport_mut().fail_writes = true;
    assert_eq!(app.tx_done(), Err(Error::Link(LinkError::Transport)));
    assert_eq!(app.link().state(), TxState::Idle);
    assert_eq!(app.link().pending(), 1);

    app.link_mut().transport_mut().fail_writes = false;
    app.handle_stack_event(&level(4)).unwrap();

    let levels: Vec<u8> = drain(&mut app).iter().map(|f| f[5]).collect();
    assert_eq!(levels, [1, 3, 4]);
}
