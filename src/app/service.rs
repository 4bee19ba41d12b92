//! Application service: the EACI bridge core.
//!
//! [`EaciApp`] owns the frame decoder, the TX link, the dispatcher and
//! the connection/profile tables. The BLE stack is injected at call
//! sites through [`StackPort`], so the whole bridge runs against mocks.
//!
//! ```text
//!  Transport ──▶ ┌──────────────────────────────┐ ──▶ StackPort
//!                │           EaciApp            │
//!  Transport ◀── │ decoder · dispatcher · link  │ ◀── StackEvent
//!                └──────────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::EaciConfig;
use crate::eaci::codec::{FrameDecoder, FrameEvent};
use crate::eaci::link::EaciLink;
use crate::eaci::message::{EaciMessage, ErrorCode};
use crate::eaci::transport::Transport;
use crate::error::{LinkError, Result};
use crate::gap::GapEvent;
use crate::profiles::{ProfileId, ProfileRegistry, STATUS_OK};

use super::connections::ConnectionTable;
use super::dispatch::{Dispatcher, Outcome};
use super::env::ProfileEnvTable;
use super::events::StackEvent;
use super::ports::StackPort;

/// Bytes pulled from the transport per [`EaciApp::poll`].
const RX_CHUNK: usize = 64;

// ───────────────────────────────────────────────────────────────
// EaciApp
// ───────────────────────────────────────────────────────────────

/// The bridge between the host UART and the BLE stack.
pub struct EaciApp<T: Transport> {
    config: EaciConfig,
    decoder: FrameDecoder,
    link: EaciLink<T>,
    dispatcher: Dispatcher,
    conns: ConnectionTable,
    envs: ProfileEnvTable,
}

impl<T: Transport> EaciApp<T> {
    /// Validate `config`, register its profiles and take ownership of the
    /// transport.
    pub fn new(config: EaciConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let registry = ProfileRegistry::with_profiles(&config.profiles);
        let dispatcher = Dispatcher::new(registry, config.request_profile)?;
        info!(
            "EACI bridge up: {} profiles, requests -> {:?}",
            dispatcher.registry().len(),
            config.request_profile
        );
        Ok(Self {
            decoder: FrameDecoder::with_max_param_len(config.max_param_len as usize),
            link: EaciLink::new(transport),
            dispatcher,
            conns: ConnectionTable::new(config.max_connections as usize),
            envs: ProfileEnvTable::new(),
            config,
        })
    }

    // ── Receive path ──────────────────────────────────────────

    /// Feed raw UART bytes and handle every completed frame.
    pub fn on_rx_bytes(&mut self, data: &[u8], stack: &mut impl StackPort) {
        for &byte in data {
            match self.decoder.push_byte(byte) {
                Some(FrameEvent::Message(msg)) => {
                    self.handle_message(&msg, stack);
                }
                Some(FrameEvent::Error(code)) => self.report_error(code),
                None => {}
            }
        }
    }

    /// Read whatever the transport holds and process it.
    /// Returns the number of bytes consumed.
    pub fn poll(&mut self, stack: &mut impl StackPort) -> Result<usize> {
        let mut buf = [0u8; RX_CHUNK];
        let n = self.link.transport_mut().read(&mut buf).map_err(|e| {
            warn!("EACI rx: transport read failed: {:?}", e);
            LinkError::Transport
        })?;
        self.on_rx_bytes(&buf[..n], stack);
        Ok(n)
    }

    /// Dispatch one decoded host message. A rejection is answered with
    /// a `DATA_ERROR` PDU.
    pub fn handle_message(&mut self, msg: &EaciMessage, stack: &mut impl StackPort) -> Outcome {
        let outcome = self
            .dispatcher
            .dispatch(msg, &self.conns, &mut self.envs, stack);
        if let Outcome::Rejected(code) = outcome {
            self.report_error(code);
        }
        outcome
    }

    // ── Event path ────────────────────────────────────────────

    /// Apply a stack event to the tables, then send it to the host.
    pub fn handle_stack_event(&mut self, event: &StackEvent) -> Result<()> {
        match event {
            StackEvent::Gap(GapEvent::Connected(c)) if c.status == STATUS_OK => {
                self.conns.insert(c.conhdl, c.addr);
                info!("connected {} (conhdl {})", c.addr, c.conhdl);
            }
            StackEvent::Gap(GapEvent::Disconnected(d)) => {
                self.conns.remove(d.conhdl);
                let cleared = self.envs.clear_conhdl(d.conhdl);
                info!(
                    "disconnected conhdl {} reason {:#04x}, {} profile(s) cleared",
                    d.conhdl, d.reason, cleared
                );
            }
            StackEvent::Profile { conhdl, event } => match event.enable_status() {
                Some(STATUS_OK) => self.envs.set_enabled(event.profile(), *conhdl),
                Some(status) => {
                    debug!("{:?} enable failed, status {:#04x}", event.profile(), status);
                    self.envs.disable_on(event.profile(), *conhdl);
                }
                None => {}
            },
            StackEvent::Gap(_) => {}
        }

        match self.dispatcher.encode_event(event) {
            Some(msg) => self.link.send(&msg).map_err(Into::into),
            None => Ok(()),
        }
    }

    // ── Transmit path ─────────────────────────────────────────

    /// UART TX-complete callback.
    pub fn tx_done(&mut self) -> Result<()> {
        self.link.tx_done().map_err(Into::into)
    }

    /// Send a pre-encoded PDU.
    pub fn pdu_send(&mut self, buf: &[u8]) -> Result<()> {
        self.link.pdu_send(buf).map_err(Into::into)
    }

    /// Emit `DATA_ERROR` (`FA 00 01 <code>`).
    pub fn send_error(&mut self, code: ErrorCode) -> Result<()> {
        self.link.send(&EaciMessage::error(code)).map_err(Into::into)
    }

    fn report_error(&mut self, code: ErrorCode) {
        if let Err(e) = self.send_error(code) {
            warn!("EACI: could not report {}: {}", code, e);
        }
    }

    // ── Runtime control ───────────────────────────────────────

    /// Route subsequent `DATA_REQ` messages to `id`.
    pub fn select_request_profile(&mut self, id: ProfileId) -> Result<()> {
        self.dispatcher.select_request_profile(id)?;
        info!("EACI requests -> {:?}", id);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &EaciConfig {
        &self.config
    }

    pub fn request_profile(&self) -> ProfileId {
        self.dispatcher.request_profile()
    }

    pub fn connections(&self) -> &ConnectionTable {
        &self.conns
    }

    pub fn profile_env(&self) -> &ProfileEnvTable {
        &self.envs
    }

    pub fn link(&self) -> &EaciLink<T> {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut EaciLink<T> {
        &mut self.link
    }

    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }
}
