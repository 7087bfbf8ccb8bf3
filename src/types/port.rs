//! Port types with validation and parsing.
//!
//! `PortRange` and `PortSpec` handle the comma-separated port grammar
//! accepted on the command line (`"22,80,8000-8010"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A TCP port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Create a new Port.
    #[inline]
    pub const fn new(port: u16) -> Self {
        Self(port)
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (0-65535)")]
    OutOfRange(u64),
    #[error("invalid port number: '{0}'")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("no valid ports specified")]
    Empty,
}

/// A range of ports (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start > end {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Create a range containing a single port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// A valid range always holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A complete port specification that can contain multiple ranges.
///
/// Supports formats like:
/// - Single port: "80"
/// - Comma-separated: "80,443,8080"
/// - Range: "1-1000"
/// - Mixed: "22,80,443,8000-9000"
///
/// Empty tokens (`"80,,443"`) are skipped.
#[derive(Debug, Clone, Default)]
pub struct PortSpec {
    ranges: Vec<PortRange>,
}

impl PortSpec {
    /// Create an empty port specification.
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Add a port range to the specification.
    pub fn add_range(&mut self, range: PortRange) {
        self.ranges.push(range);
    }

    /// Add a single port to the specification.
    pub fn add_port(&mut self, port: Port) {
        self.ranges.push(PortRange::single(port));
    }

    /// Get all ports as a sorted, deduplicated vector.
    pub fn to_ports(&self) -> Vec<Port> {
        let mut ports: Vec<Port> = self.ranges.iter().flat_map(|r| r.iter()).collect();
        ports.sort_unstable();
        ports.dedup();
        ports
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn parse_port(s: &str) -> Result<Port, PortError> {
    let s = s.trim();
    let value: u64 = s
        .parse()
        .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
    u16::try_from(value)
        .map(Port)
        .map_err(|_| PortError::OutOfRange(value))
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut spec = Self::new();

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    let range = PortRange::new(parse_port(start)?, parse_port(end)?)?;
                    spec.add_range(range);
                }
                None => spec.add_port(parse_port(part)?),
            }
        }

        if spec.is_empty() {
            return Err(PortError::Empty);
        }

        Ok(spec)
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Parse a port specification into a sorted, deduplicated list of ports.
pub fn parse_ports(spec: &str) -> Result<Vec<Port>, PortError> {
    Ok(spec.parse::<PortSpec>()?.to_ports())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ports: &[Port]) -> Vec<u16> {
        ports.iter().map(|p| p.as_u16()).collect()
    }

    #[test]
    fn test_parse_range_and_single() {
        assert_eq!(raw(&parse_ports("20-22,80").unwrap()), vec![20, 21, 22, 80]);
    }

    #[test]
    fn test_parse_dedup_and_sort() {
        assert_eq!(raw(&parse_ports("80,22,80").unwrap()), vec![22, 80]);
    }

    #[test]
    fn test_parse_overlapping_ranges() {
        assert_eq!(
            raw(&parse_ports("5-8, 7-9 ,1").unwrap()),
            vec![1, 5, 6, 7, 8, 9]
        );
    }

    #[test]
    fn test_parse_reversed_range() {
        assert_eq!(
            parse_ports("100-99").unwrap_err(),
            PortError::InvalidRange(100, 99)
        );
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!(matches!(
            parse_ports("http"),
            Err(PortError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_ports("80,1-x"),
            Err(PortError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_ports("1-2-3"),
            Err(PortError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(parse_ports("70000").unwrap_err(), PortError::OutOfRange(70000));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_ports("").unwrap_err(), PortError::Empty);
        assert_eq!(parse_ports(" , ,").unwrap_err(), PortError::Empty);
    }

    #[test]
    fn test_full_range_bounds() {
        let spec: PortSpec = "0-65535".parse().unwrap();
        assert_eq!(spec.to_ports().len(), 65536);
    }

    #[test]
    fn test_port_spec_display() {
        let spec: PortSpec = "22, 80-82".parse().unwrap();
        assert_eq!(spec.to_string(), "22,80-82");
    }
}
