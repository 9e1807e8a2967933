//! Resolution requests built from symbolic names.
//!
//! A [`Request`] is the hints structure passed to the resolver together with
//! the host and optional service. [`RequestBuilder`] accumulates it one
//! option at a time:
//!
//! ```
//! use addrinfo::request::{Family, RequestBuilder};
//!
//! let request = RequestBuilder::new()
//!     .family(Family::Inet)
//!     .flag("passive")
//!     .flag("canonname")
//!     .socket_type("stream")
//!     .service("80")
//!     .build("localhost");
//!
//! assert_eq!(request.flags, libc::AI_PASSIVE | libc::AI_CANONNAME);
//! assert_eq!(request.socket_type, libc::SOCK_STREAM);
//! ```

use crate::names::{self, SymbolTable};

/// Address family restriction for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Family {
    /// Any family.
    #[default]
    Unspec,
    /// IPv4 only.
    Inet,
    /// IPv6 only.
    Inet6,
}

impl Family {
    /// The `AF_*` value passed to the resolver.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Unspec => libc::AF_UNSPEC,
            Self::Inet => libc::AF_INET,
            Self::Inet6 => libc::AF_INET6,
        }
    }

    /// Short name used in logs and JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unspec => "unspec",
            Self::Inet => "inet",
            Self::Inet6 => "inet6",
        }
    }
}

/// A single resolution request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Family restriction.
    pub family: Family,
    /// Socket type, `0` for any.
    pub socket_type: i32,
    /// Protocol, `0` for any.
    pub protocol: i32,
    /// OR of `AI_*` flags.
    pub flags: i32,
    /// Port number or service name.
    pub service: Option<String>,
    /// Host to resolve.
    pub host: String,
}

/// Builder for [`Request`].
///
/// Family, socket type, protocol and service keep the last value given.
/// Flags accumulate. Names missing from the tables resolve to `0` and
/// only produce a warning.
#[derive(Debug, Clone, Default)]
#[must_use = "builders do nothing unless built"]
pub struct RequestBuilder {
    family: Family,
    socket_type: i32,
    protocol: i32,
    flags: i32,
    service: Option<String>,
}

impl RequestBuilder {
    /// Create a builder with everything unspecified.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the address family.
    pub fn family(mut self, family: Family) -> Self {
        self.family = family;
        self
    }

    /// OR a flag into the request.
    pub fn flag(mut self, name: &str) -> Self {
        self.flags |= symbol_value(names::FLAGS, "flag", name);
        self
    }

    /// Set the socket type.
    pub fn socket_type(mut self, name: &str) -> Self {
        self.socket_type = symbol_value(names::SOCKET_TYPES, "socket type", name);
        self
    }

    /// Set the protocol.
    pub fn protocol(mut self, name: &str) -> Self {
        self.protocol = symbol_value(names::PROTOCOLS, "protocol", name);
        self
    }

    /// Set the service (port number or service name), passed through verbatim.
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Build the request for `host`.
    pub fn build(self, host: impl Into<String>) -> Request {
        let request = Request {
            family: self.family,
            socket_type: self.socket_type,
            protocol: self.protocol,
            flags: self.flags,
            service: self.service,
            host: host.into(),
        };
        tracing::debug!(?request, "built resolution request");
        request
    }
}

fn symbol_value(table: SymbolTable, kind: &str, name: &str) -> i32 {
    match names::lookup(table, name) {
        Some(value) => value,
        None => {
            tracing::warn!("unknown {} '{}', treating as unspecified", kind, name);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = RequestBuilder::new().build("example.com");
        assert_eq!(request.family, Family::Unspec);
        assert_eq!(request.socket_type, 0);
        assert_eq!(request.protocol, 0);
        assert_eq!(request.flags, 0);
        assert_eq!(request.service, None);
        assert_eq!(request.host, "example.com");
    }

    #[test]
    fn test_flags_accumulate() {
        let request = RequestBuilder::new()
            .flag("PASSIVE")
            .flag("CANONNAME")
            .build("h");
        assert_eq!(request.flags, libc::AI_PASSIVE | libc::AI_CANONNAME);

        let repeated = RequestBuilder::new().flag("ALL").flag("all").build("h");
        assert_eq!(repeated.flags, libc::AI_ALL);
    }

    #[test]
    fn test_last_wins() {
        let request = RequestBuilder::new()
            .family(Family::Inet)
            .family(Family::Inet6)
            .socket_type("STREAM")
            .socket_type("DGRAM")
            .protocol("TCP")
            .protocol("UDP")
            .service("80")
            .service("domain")
            .build("h");
        assert_eq!(request.family, Family::Inet6);
        assert_eq!(request.socket_type, libc::SOCK_DGRAM);
        assert_eq!(request.protocol, libc::IPPROTO_UDP);
        assert_eq!(request.service.as_deref(), Some("domain"));
    }

    #[test]
    fn test_unknown_names_are_unspecified() {
        let request = RequestBuilder::new()
            .flag("PASSIVE")
            .flag("NOPE")
            .socket_type("STREAM")
            .socket_type("NOPE")
            .protocol("NOPE")
            .build("h");
        assert_eq!(request.flags, libc::AI_PASSIVE);
        assert_eq!(request.socket_type, 0);
        assert_eq!(request.protocol, 0);
    }

    #[test]
    fn test_family_raw() {
        assert_eq!(Family::Unspec.as_raw(), libc::AF_UNSPEC);
        assert_eq!(Family::Inet.as_raw(), libc::AF_INET);
        assert_eq!(Family::Inet6.as_raw(), libc::AF_INET6);
    }
}
