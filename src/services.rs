//! Service detection based on well-known port numbers.
//!
//! Provides mapping from port numbers to canonical service names. A port that
//! is not in the table is simply unclassified.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Static map of well-known ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (20, "FTP"),
        (21, "FTP"),
        (22, "SSH"),
        (23, "Telnet"),
        (25, "SMTP"),
        (53, "DNS"),
        (80, "HTTP"),
        (110, "POP3"),
        (143, "IMAP"),
        (443, "HTTPS"),
        (445, "SMB"),
        (3306, "MySQL"),
        (3389, "RDP"),
        (5432, "PostgreSQL"),
        (8080, "HTTP-Proxy"),
    ])
});

/// Placeholder shown for open ports with no known service.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Look up the service name for a given port.
///
/// Returns `None` if the port is not in the well-known services table.
pub fn get_service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_ports() {
        assert_eq!(get_service_name(20), Some("FTP"));
        assert_eq!(get_service_name(22), Some("SSH"));
        assert_eq!(get_service_name(80), Some("HTTP"));
        assert_eq!(get_service_name(443), Some("HTTPS"));
        assert_eq!(get_service_name(3306), Some("MySQL"));
        assert_eq!(get_service_name(8080), Some("HTTP-Proxy"));
    }

    #[test]
    fn test_table_size() {
        assert_eq!(PORT_SERVICES.len(), 15);
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(get_service_name(12345), None);
    }
}
