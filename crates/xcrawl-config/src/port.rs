//! Startup port selection.

use std::net::TcpListener;

use crate::error::ConfigError;

/// First port in `start..start + attempts` that `host` can bind.
///
/// The probe listener is dropped before returning, so another process could still take the
/// port before the server binds it.
pub fn find_available_port(host: &str, start: u16, attempts: u16) -> Result<u16, ConfigError> {
    let end = u32::from(start) + u32::from(attempts);

    for port in (u32::from(start)..end).filter_map(|p| u16::try_from(p).ok()) {
        if TcpListener::bind((host, port)).is_ok() {
            return Ok(port);
        }
    }

    Err(ConfigError::NoAvailablePort {
        host: host.to_string(),
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_start_when_free() {
        let probe = TcpListener::bind("127.0.0.1:0").unwrap();
        let free = probe.local_addr().unwrap().port();
        drop(probe);

        assert_eq!(find_available_port("127.0.0.1", free, 1).unwrap(), free);
    }

    #[test]
    fn test_skips_taken_port() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let found = find_available_port("127.0.0.1", port, 20).unwrap();
        assert_ne!(found, port);
        assert!(found > port && u32::from(found) < u32::from(port) + 20);
    }

    #[test]
    fn test_all_taken() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let err = find_available_port("127.0.0.1", port, 1).unwrap_err();
        assert!(matches!(err, ConfigError::NoAvailablePort { start, .. } if start == port));
    }

    #[test]
    fn test_zero_attempts() {
        assert!(find_available_port("127.0.0.1", 5000, 0).is_err());
    }
}
