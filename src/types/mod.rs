//! Core type definitions for ports and scan targets.

mod port;
mod target;

pub use port::{parse_ports, Port, PortError, PortRange, PortSpec};
pub use target::{parse_hosts, HostValidator, TargetError, TargetSet};
