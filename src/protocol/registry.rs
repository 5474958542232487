//! Message type registry
//!
//! Maps symbolic message type names to their wire [`TypeId`]. The registry is
//! assembled from per-subsystem tables and is read-only once built.

use std::sync::OnceLock;

use tracing::{debug, trace};

use super::types::{blkif_be, blkif_fe, netif_be, netif_fe, shutdown, Subsystem, TypeId};
use super::{Error, Result};

/// A subsystem's partial name-to-identifier table
pub type SubsystemTable = &'static [(&'static str, TypeId)];

/// Console message types
pub const CONSOLE_FORMATS: SubsystemTable = &[("console_data", Subsystem::Console.op(0))];

/// Block interface message types
pub const BLKIF_FORMATS: SubsystemTable = &[
    ("blkif_be_create_t", Subsystem::BlkifBackend.op(blkif_be::CREATE)),
    ("blkif_be_destroy_t", Subsystem::BlkifBackend.op(blkif_be::DESTROY)),
    ("blkif_be_connect_t", Subsystem::BlkifBackend.op(blkif_be::CONNECT)),
    ("blkif_be_disconnect_t", Subsystem::BlkifBackend.op(blkif_be::DISCONNECT)),
    ("blkif_be_vbd_create_t", Subsystem::BlkifBackend.op(blkif_be::VBD_CREATE)),
    ("blkif_be_vbd_destroy_t", Subsystem::BlkifBackend.op(blkif_be::VBD_DESTROY)),
    ("blkif_be_vbd_grow_t", Subsystem::BlkifBackend.op(blkif_be::VBD_GROW)),
    ("blkif_be_vbd_shrink_t", Subsystem::BlkifBackend.op(blkif_be::VBD_SHRINK)),
    (
        "blkif_be_driver_status_changed_t",
        Subsystem::BlkifBackend.op(blkif_be::DRIVER_STATUS_CHANGED),
    ),
    (
        "blkif_fe_interface_status_changed_t",
        Subsystem::BlkifFrontend.op(blkif_fe::INTERFACE_STATUS_CHANGED),
    ),
    (
        "blkif_fe_driver_status_changed_t",
        Subsystem::BlkifFrontend.op(blkif_fe::DRIVER_STATUS_CHANGED),
    ),
    (
        "blkif_fe_interface_connect_t",
        Subsystem::BlkifFrontend.op(blkif_fe::INTERFACE_CONNECT),
    ),
    (
        "blkif_fe_interface_disconnect_t",
        Subsystem::BlkifFrontend.op(blkif_fe::INTERFACE_DISCONNECT),
    ),
];

/// Network interface message types
pub const NETIF_FORMATS: SubsystemTable = &[
    ("netif_be_create_t", Subsystem::NetifBackend.op(netif_be::CREATE)),
    ("netif_be_destroy_t", Subsystem::NetifBackend.op(netif_be::DESTROY)),
    ("netif_be_connect_t", Subsystem::NetifBackend.op(netif_be::CONNECT)),
    ("netif_be_disconnect_t", Subsystem::NetifBackend.op(netif_be::DISCONNECT)),
    (
        "netif_be_driver_status_changed_t",
        Subsystem::NetifBackend.op(netif_be::DRIVER_STATUS_CHANGED),
    ),
    (
        "netif_fe_interface_status_changed_t",
        Subsystem::NetifFrontend.op(netif_fe::INTERFACE_STATUS_CHANGED),
    ),
    (
        "netif_fe_driver_status_changed_t",
        Subsystem::NetifFrontend.op(netif_fe::DRIVER_STATUS_CHANGED),
    ),
    (
        "netif_fe_interface_connect_t",
        Subsystem::NetifFrontend.op(netif_fe::INTERFACE_CONNECT),
    ),
    (
        "netif_fe_interface_disconnect_t",
        Subsystem::NetifFrontend.op(netif_fe::INTERFACE_DISCONNECT),
    ),
];

/// Domain shutdown message types
pub const SHUTDOWN_FORMATS: SubsystemTable = &[
    ("shutdown_poweroff_t", Subsystem::Shutdown.op(shutdown::POWEROFF)),
    ("shutdown_reboot_t", Subsystem::Shutdown.op(shutdown::REBOOT)),
    ("shutdown_suspend_t", Subsystem::Shutdown.op(shutdown::SUSPEND)),
];

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Name to identifier table.
///
/// Entries keep their first insertion position, so [`Registry::reverse_lookup`]
/// resolves a shared identifier to the earliest registered name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<(&'static str, TypeId)>,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in subsystem table
    #[must_use]
    pub fn seeded() -> Self {
        let mut registry = Self::new();
        for table in [CONSOLE_FORMATS, BLKIF_FORMATS, NETIF_FORMATS, SHUTDOWN_FORMATS] {
            registry.register(table);
        }
        registry
    }

    /// Process-wide seeded registry, built on first use
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::seeded)
    }

    /// Merge a subsystem table.
    ///
    /// A name that is already present takes the new identifier.
    pub fn register(&mut self, table: &[(&'static str, TypeId)]) {
        trace!(entries = table.len(), "merging subsystem table");
        for &(name, type_id) in table {
            match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
                Some(entry) => {
                    debug!(name, old = %entry.1, new = %type_id, "overwriting message type");
                    entry.1 = type_id;
                }
                None => self.entries.push((name, type_id)),
            }
        }
    }

    /// Resolve a type name to its identifier
    pub fn lookup(&self, name: &str) -> Result<TypeId> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|&(_, type_id)| type_id)
            .ok_or_else(|| Error::UnknownType {
                name: name.to_owned(),
            })
    }

    /// Resolve an identifier back to the first name registered for it
    #[must_use]
    pub fn reverse_lookup(&self, type_id: TypeId) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|&&(_, existing)| existing == type_id)
            .map(|&(name, _)| name)
    }

    /// Resolve a raw (major, minor) pair back to a name
    #[must_use]
    pub fn type_name(&self, major: u8, minor: u8) -> Option<&'static str> {
        self.reverse_lookup(TypeId::new(major, minor))
    }

    /// Iterate over registered entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, TypeId)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of registered names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
