//! Control message identifiers and protocol constants

use std::fmt;

/// Console subsystem major
pub const CMSG_CONSOLE: u8 = 0;
/// Block backend subsystem major
pub const CMSG_BLKIF_BE: u8 = 1;
/// Block frontend subsystem major
pub const CMSG_BLKIF_FE: u8 = 2;
/// Network backend subsystem major
pub const CMSG_NETIF_BE: u8 = 3;
/// Network frontend subsystem major
pub const CMSG_NETIF_FE: u8 = 4;
/// Domain shutdown subsystem major
pub const CMSG_SHUTDOWN: u8 = 6;

/// Block backend minors
pub mod blkif_be {
    /// Create interface
    pub const CREATE: u8 = 0;
    /// Destroy interface
    pub const DESTROY: u8 = 1;
    /// Connect interface
    pub const CONNECT: u8 = 2;
    /// Disconnect interface
    pub const DISCONNECT: u8 = 3;
    /// Create virtual block device
    pub const VBD_CREATE: u8 = 4;
    /// Destroy virtual block device
    pub const VBD_DESTROY: u8 = 5;
    /// Grow virtual block device by one extent
    pub const VBD_GROW: u8 = 6;
    /// Shrink virtual block device by one extent
    pub const VBD_SHRINK: u8 = 7;
    /// Driver status changed
    pub const DRIVER_STATUS_CHANGED: u8 = 32;

    /// Request completed
    pub const STATUS_OKAY: u32 = 0;
    /// Unspecified failure
    pub const STATUS_ERROR: u32 = 1;
    /// Interface already exists
    pub const STATUS_INTERFACE_EXISTS: u32 = 2;
    /// Interface does not exist
    pub const STATUS_INTERFACE_NOT_FOUND: u32 = 3;
    /// Interface is already connected
    pub const STATUS_INTERFACE_CONNECTED: u32 = 4;
    /// VBD already exists
    pub const STATUS_VBD_EXISTS: u32 = 5;
    /// VBD does not exist
    pub const STATUS_VBD_NOT_FOUND: u32 = 6;
    /// Backend ran out of memory
    pub const STATUS_OUT_OF_MEMORY: u32 = 7;
    /// Extent does not exist
    pub const STATUS_EXTENT_NOT_FOUND: u32 = 8;
    /// Grant mapping failed
    pub const STATUS_MAPPING_ERROR: u32 = 9;
}

/// Block frontend minors
pub mod blkif_fe {
    /// Interface status changed
    pub const INTERFACE_STATUS_CHANGED: u8 = 0;
    /// Driver status changed
    pub const DRIVER_STATUS_CHANGED: u8 = 32;
    /// Connect interface
    pub const INTERFACE_CONNECT: u8 = 33;
    /// Disconnect interface
    pub const INTERFACE_DISCONNECT: u8 = 34;
}

/// Network backend minors
pub mod netif_be {
    /// Create interface
    pub const CREATE: u8 = 0;
    /// Destroy interface
    pub const DESTROY: u8 = 1;
    /// Connect interface
    pub const CONNECT: u8 = 2;
    /// Disconnect interface
    pub const DISCONNECT: u8 = 3;
    /// Driver status changed
    pub const DRIVER_STATUS_CHANGED: u8 = 32;
}

/// Network frontend minors
pub mod netif_fe {
    /// Interface status changed
    pub const INTERFACE_STATUS_CHANGED: u8 = 0;
    /// Driver status changed
    pub const DRIVER_STATUS_CHANGED: u8 = 32;
    /// Connect interface
    pub const INTERFACE_CONNECT: u8 = 33;
    /// Disconnect interface
    pub const INTERFACE_DISCONNECT: u8 = 34;
}

/// Shutdown minors and stop codes
pub mod shutdown {
    /// Power the domain off
    pub const POWEROFF: u8 = 0;
    /// Reboot the domain
    pub const REBOOT: u8 = 1;
    /// Suspend the domain
    pub const SUSPEND: u8 = 2;

    /// Stop code reported for a shutdown
    pub const STOPCODE_SHUTDOWN: u32 = 0;
    /// Stop code reported for a reboot
    pub const STOPCODE_REBOOT: u32 = 1;
    /// Stop code reported for a suspend
    pub const STOPCODE_SUSPEND: u32 = 2;
}

/// Interface status values shared by block and network frontends.
pub mod interface_status {
    /// Interface doesn't exist
    pub const DESTROYED: u32 = 0;
    /// Exists but is disconnected
    pub const DISCONNECTED: u32 = 1;
    /// Exists and is connected
    pub const CONNECTED: u32 = 2;
    /// A device has been added or removed
    pub const CHANGED: u32 = 3;
}

/// Driver status values shared by block and network drivers.
pub mod driver_status {
    /// Driver is down
    pub const DOWN: u32 = 0;
    /// Driver is up
    pub const UP: u32 = 1;
}

/// Wire identifier of a message shape: subsystem (major) and operation (minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeId {
    major: u8,
    minor: u8,
}

impl TypeId {
    /// Create an identifier
    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Subsystem number
    #[must_use]
    pub const fn major(self) -> u8 {
        self.major
    }

    /// Operation number within the subsystem
    #[must_use]
    pub const fn minor(self) -> u8 {
        self.minor
    }

    /// Subsystem, if the major is a known one
    #[must_use]
    pub fn subsystem(self) -> Option<Subsystem> {
        Subsystem::from_u8(self.major)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major, self.minor)
    }
}

/// Control message subsystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Subsystem {
    /// Console data
    Console = CMSG_CONSOLE,
    /// Block device backend
    BlkifBackend = CMSG_BLKIF_BE,
    /// Block device frontend
    BlkifFrontend = CMSG_BLKIF_FE,
    /// Network device backend
    NetifBackend = CMSG_NETIF_BE,
    /// Network device frontend
    NetifFrontend = CMSG_NETIF_FE,
    /// Domain shutdown
    Shutdown = CMSG_SHUTDOWN,
}

impl Subsystem {
    /// Convert from major number
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            CMSG_CONSOLE => Some(Self::Console),
            CMSG_BLKIF_BE => Some(Self::BlkifBackend),
            CMSG_BLKIF_FE => Some(Self::BlkifFrontend),
            CMSG_NETIF_BE => Some(Self::NetifBackend),
            CMSG_NETIF_FE => Some(Self::NetifFrontend),
            CMSG_SHUTDOWN => Some(Self::Shutdown),
            _ => None,
        }
    }

    /// Convert to major number
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Build the identifier for an operation in this subsystem
    #[must_use]
    pub const fn op(self, minor: u8) -> TypeId {
        TypeId::new(self.as_u8(), minor)
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Console => "console",
            Self::BlkifBackend => "blkif-be",
            Self::BlkifFrontend => "blkif-fe",
            Self::NetifBackend => "netif-be",
            Self::NetifFrontend => "netif-fe",
            Self::Shutdown => "shutdown",
        };
        write!(f, "{name}")
    }
}
