//! Stack events → encoders → host PDUs.

use eaci::app::{Outcome, StackEvent};
use eaci::config::EaciConfig;
use eaci::eaci::message::{EaciMessage, MsgType};
use eaci::eaci::wire::BdAddr;
use eaci::gap::{Connected, GapEvent};
use eaci::profiles::batt::{BattEvent, BattLevel};
use eaci::profiles::{
    EnableCfm, ProfileEvent, ProfileId, an, batt, blp, csc, dis, fm, gl, hrp, htp, pas, prox,
    rsc, scpp, tip,
};

use super::mock_stack::{CONHDL, connect, drain, make_app, with_peer};

fn enable_events() -> Vec<ProfileEvent> {
    let cfm = EnableCfm { status: 0 };
    vec![
        ProfileEvent::Batt(batt::BattEvent::Enable(cfm.clone())),
        ProfileEvent::Dis(dis::DisEvent::Enable(cfm.clone())),
        ProfileEvent::Hrp(hrp::HrpEvent::Enable(cfm.clone())),
        ProfileEvent::Htp(htp::HtpEvent::Enable(cfm.clone())),
        ProfileEvent::Blp(blp::BlpEvent::Enable(cfm.clone())),
        ProfileEvent::Prox(prox::ProxEvent::Enable(cfm.clone())),
        ProfileEvent::Scpp(scpp::ScppEvent::Enable(cfm.clone())),
        ProfileEvent::Tip(tip::TipEvent::Enable(cfm.clone())),
        ProfileEvent::An(an::AnEvent::Enable(cfm.clone())),
        ProfileEvent::Csc(csc::CscEvent::Enable(cfm.clone())),
        ProfileEvent::Pas(pas::PasEvent::Enable(cfm.clone())),
        ProfileEvent::Rsc(rsc::RscEvent::Enable(cfm.clone())),
        ProfileEvent::Gl(gl::GlEvent::Enable(cfm.clone())),
        ProfileEvent::Fm(fm::FmEvent::Enable(cfm)),
    ]
}

#[test]
fn battery_level_indication() {
    let (mut app, _stack) = make_app(EaciConfig::default());

    app.handle_stack_event(&StackEvent::Profile {
        conhdl: CONHDL,
        event: ProfileEvent::Batt(BattEvent::Level(BattLevel { level: 87 })),
    })
    .unwrap();

    assert_eq!(drain(&mut app), [vec![0xEC, 0x02, 0x03, 0x0F, 0x18, 87]]);
}

#[test]
fn every_profile_event_carries_its_uuid() {
    let (mut app, _stack) = make_app(EaciConfig::default());
    let events = enable_events();
    assert_eq!(events.len(), ProfileId::ALL.len());

    for event in &events {
        app.handle_stack_event(&StackEvent::Profile {
            conhdl: CONHDL,
            event: event.clone(),
        })
        .unwrap();
    }

    let written = drain(&mut app);
    assert_eq!(written.len(), events.len());
    for (frame, event) in written.iter().zip(&events) {
        let uuid = event.profile().entry().service_uuid;
        assert_eq!(frame[0], 0xEC, "{:?} must be DATA_IND", event.profile());
        assert_eq!(
            u16::from_le_bytes([frame[3], frame[4]]),
            uuid,
            "{:?} UUID at offsets 3..5",
            event.profile()
        );
        assert_eq!(frame[2] as usize, frame.len() - 3);
    }
}

#[test]
fn enable_confirmation_marks_profile_enabled() {
    let (mut app, _stack) = make_app(EaciConfig::default());
    connect(&mut app);

    for event in enable_events() {
        let id = event.profile();
        app.handle_stack_event(&StackEvent::Profile {
            conhdl: CONHDL,
            event,
        })
        .unwrap();
        assert!(app.profile_env().is_enabled_on(id, CONHDL), "{id:?}");
    }
}

#[test]
fn failed_enable_leaves_profile_disabled() {
    let (mut app, _stack) = make_app(EaciConfig::default());
    app.handle_stack_event(&StackEvent::Profile {
        conhdl: CONHDL,
        event: ProfileEvent::Hrp(hrp::HrpEvent::Enable(EnableCfm { status: 0x41 })),
    })
    .unwrap();

    assert!(!app.profile_env().is_enabled_on(ProfileId::Hrp, CONHDL));
    let written = drain(&mut app);
    assert_eq!(written, [vec![0xEC, 0x01, 0x03, 0x0D, 0x18, 0x41]]);
}

#[test]
fn events_of_unregistered_profiles_are_not_sent() {
    let mut config = EaciConfig::default();
    config.profiles.clear();
    config.profiles.push(ProfileId::Batt).unwrap();
    let (mut app, _stack) = make_app(config);

    app.handle_stack_event(&StackEvent::Profile {
        conhdl: CONHDL,
        event: ProfileEvent::Gl(gl::GlEvent::Enable(EnableCfm { status: 0 })),
    })
    .unwrap();

    assert!(drain(&mut app).is_empty());
}

#[test]
fn failed_enable_on_other_link_keeps_existing_record() {
    let config = EaciConfig {
        max_connections: 2,
        ..EaciConfig::default()
    };
    let (mut app, mut stack) = make_app(config);
    connect(&mut app);
    app.handle_stack_event(&StackEvent::Gap(GapEvent::Connected(Connected {
        status: 0,
        conhdl: 1,
        addr: BdAddr::new([0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6]),
    })))
    .unwrap();

    app.handle_stack_event(&StackEvent::Profile {
        conhdl: CONHDL,
        event: ProfileEvent::Batt(BattEvent::Enable(EnableCfm { status: 0 })),
    })
    .unwrap();
    app.handle_stack_event(&StackEvent::Profile {
        conhdl: 1,
        event: ProfileEvent::Batt(BattEvent::Enable(EnableCfm { status: 0x05 })),
    })
    .unwrap();

    assert!(app.profile_env().is_enabled_on(ProfileId::Batt, CONHDL));
    let read = EaciMessage::new(MsgType::DataReq, 2, &with_peer(&[0x00])).unwrap();
    assert_eq!(app.handle_message(&read, &mut stack), Outcome::Forwarded);
}
