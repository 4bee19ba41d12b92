//! Live connections, keyed by peer address.

use heapless::Vec;
use log::warn;

use crate::eaci::wire::BdAddr;
pub use crate::gap::INVALID_CONHDL;

/// Hard upper bound on simultaneous links.
pub const MAX_CONNECTIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub conhdl: u16,
    pub addr: BdAddr,
}

/// Fixed-capacity table of connections, filled from GAP events.
#[derive(Debug)]
pub struct ConnectionTable {
    entries: Vec<Connection, MAX_CONNECTIONS>,
    capacity: usize,
}

impl ConnectionTable {
    /// Table holding at most `capacity` links (clamped to [`MAX_CONNECTIONS`]).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.min(MAX_CONNECTIONS),
        }
    }

    /// Record a new connection. A previous entry with the same handle or
    /// address is replaced. Returns `false` if the table is full.
    pub fn insert(&mut self, conhdl: u16, addr: BdAddr) -> bool {
        self.entries
            .retain(|c| c.conhdl != conhdl && c.addr != addr);
        if self.entries.len() >= self.capacity {
            warn!("connection table full, dropping {addr} (conhdl {conhdl})");
            return false;
        }
        self.entries.push(Connection { conhdl, addr }).is_ok()
    }

    pub fn remove(&mut self, conhdl: u16) -> Option<Connection> {
        let idx = self.entries.iter().position(|c| c.conhdl == conhdl)?;
        Some(self.entries.swap_remove(idx))
    }

    /// Handle of the link to `addr`, or [`INVALID_CONHDL`].
    pub fn resolve(&self, addr: &BdAddr) -> u16 {
        if *addr == BdAddr::UNRESOLVED {
            return INVALID_CONHDL;
        }
        self.entries
            .iter()
            .find(|c| c.addr == *addr)
            .map_or(INVALID_CONHDL, |c| c.conhdl)
    }

    pub fn addr_of(&self, conhdl: u16) -> Option<BdAddr> {
        self.entries
            .iter()
            .find(|c| c.conhdl == conhdl)
            .map(|c| c.addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self::new(MAX_CONNECTIONS)
    }
}
