//! The resolver seam and the getaddrinfo(3) backed implementation.
//!
//! Resolution itself is delegated to the platform. [`SystemResolver`]
//! issues exactly one blocking `getaddrinfo` call per request and copies
//! each returned entry into an owned [`Candidate`]. The C list is freed
//! when the guard holding it drops, whatever path the copy takes.

use std::ffi::{CStr, CString};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};
use std::ptr;

use crate::error::{Error, Result};
use crate::request::Request;

/// Socket address carried by a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateAddr {
    /// IPv4 address and port.
    V4(SocketAddrV4),
    /// IPv6 address and port.
    V6(SocketAddrV6),
    /// Any other family, with its raw `AF_*` number.
    Other(i32),
}

impl CandidateAddr {
    /// Raw `AF_*` number of this address.
    pub fn family(&self) -> i32 {
        match self {
            Self::V4(_) => libc::AF_INET,
            Self::V6(_) => libc::AF_INET6,
            Self::Other(family) => *family,
        }
    }
}

/// One entry of a resolver result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// `ai_socktype` as returned.
    pub socket_type: i32,
    /// `ai_protocol` as returned.
    pub protocol: i32,
    /// The socket address.
    pub addr: CandidateAddr,
    /// Canonical name, only present when `CANONNAME` was requested.
    pub canonical_name: Option<String>,
}

impl Candidate {
    /// Create a candidate without a canonical name.
    pub fn new(socket_type: i32, protocol: i32, addr: CandidateAddr) -> Self {
        Self {
            socket_type,
            protocol,
            addr,
            canonical_name: None,
        }
    }
}

/// Something that turns a request into candidates.
pub trait Resolver {
    /// Resolve `request`, returning candidates in resolver order.
    fn resolve(&self, request: &Request) -> Result<Vec<Candidate>>;
}

/// Resolver backed by the platform's getaddrinfo(3).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    /// Create a new system resolver.
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for SystemResolver {
    fn resolve(&self, request: &Request) -> Result<Vec<Candidate>> {
        let host = to_cstring("hostname", &request.host)?;
        let service = request
            .service
            .as_deref()
            .map(|s| to_cstring("service", s))
            .transpose()?;

        // SAFETY: addrinfo is a plain C struct; all-zero is its empty hints value.
        let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
        hints.ai_family = request.family.as_raw();
        hints.ai_socktype = request.socket_type;
        hints.ai_protocol = request.protocol;
        hints.ai_flags = request.flags;

        tracing::debug!(
            host = %request.host,
            service = ?request.service,
            family = request.family.name(),
            "calling getaddrinfo"
        );

        let mut head = ptr::null_mut();
        // SAFETY: host/service outlive the call, hints is initialized and
        // head is a valid out pointer.
        let ret = unsafe {
            libc::getaddrinfo(
                host.as_ptr(),
                service.as_ref().map_or(ptr::null(), |s| s.as_ptr()),
                &hints,
                &mut head,
            )
        };
        if ret != 0 {
            let err = Error::from_gai(ret);
            tracing::debug!(code = ret, "getaddrinfo failed: {}", err);
            return Err(err);
        }

        let list = AddrInfoList { head };
        let candidates: Vec<Candidate> = list.iter().map(candidate_from).collect();
        tracing::debug!(count = candidates.len(), "getaddrinfo returned");
        Ok(candidates)
    }
}

fn to_cstring(what: &str, value: &str) -> Result<CString> {
    CString::new(value).map_err(|_| Error::InvalidArgument(format!("{what} contains a NUL byte")))
}

/// Owner of a getaddrinfo result list; frees it on drop.
struct AddrInfoList {
    head: *mut libc::addrinfo,
}

impl AddrInfoList {
    fn iter(&self) -> AddrInfoIter<'_> {
        AddrInfoIter {
            next: self.head,
            _list: self,
        }
    }
}

impl Drop for AddrInfoList {
    fn drop(&mut self) {
        if !self.head.is_null() {
            // SAFETY: head came from a successful getaddrinfo and is freed once.
            unsafe { libc::freeaddrinfo(self.head) };
        }
    }
}

struct AddrInfoIter<'a> {
    next: *const libc::addrinfo,
    _list: &'a AddrInfoList,
}

impl<'a> Iterator for AddrInfoIter<'a> {
    type Item = &'a libc::addrinfo;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: entries stay valid while the owning list is borrowed.
        let entry = unsafe { self.next.as_ref()? };
        self.next = entry.ai_next;
        Some(entry)
    }
}

fn candidate_from(ai: &libc::addrinfo) -> Candidate {
    let canonical_name = if ai.ai_canonname.is_null() {
        None
    } else {
        // SAFETY: a non-null ai_canonname is a NUL-terminated string.
        Some(
            unsafe { CStr::from_ptr(ai.ai_canonname) }
                .to_string_lossy()
                .into_owned(),
        )
    };

    Candidate {
        socket_type: ai.ai_socktype,
        protocol: ai.ai_protocol,
        addr: sockaddr_from(ai),
        canonical_name,
    }
}

fn sockaddr_from(ai: &libc::addrinfo) -> CandidateAddr {
    if ai.ai_addr.is_null() {
        return CandidateAddr::Other(ai.ai_family);
    }

    // SAFETY: ai_addr points to ai_addrlen bytes of socket address; the
    // family is checked against the length before the typed read.
    unsafe {
        let family = i32::from((*ai.ai_addr).sa_family);
        let len = ai.ai_addrlen as usize;
        match family {
            libc::AF_INET if len >= size_of::<libc::sockaddr_in>() => {
                let sin = &*(ai.ai_addr as *const libc::sockaddr_in);
                CandidateAddr::V4(SocketAddrV4::new(
                    Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr)),
                    u16::from_be(sin.sin_port),
                ))
            }
            libc::AF_INET6 if len >= size_of::<libc::sockaddr_in6>() => {
                let sin6 = &*(ai.ai_addr as *const libc::sockaddr_in6);
                CandidateAddr::V6(SocketAddrV6::new(
                    Ipv6Addr::from(sin6.sin6_addr.s6_addr),
                    u16::from_be(sin6.sin6_port),
                    u32::from_be(sin6.sin6_flowinfo),
                    sin6.sin6_scope_id,
                ))
            }
            other => CandidateAddr::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Family, RequestBuilder};

    #[test]
    fn test_numeric_ipv4() {
        let request = RequestBuilder::new()
            .family(Family::Inet)
            .flag("NUMERICHOST")
            .socket_type("STREAM")
            .service("80")
            .build("127.0.0.1");

        let candidates = SystemResolver::new().resolve(&request).unwrap();
        assert!(!candidates.is_empty());
        for c in &candidates {
            assert_eq!(c.socket_type, libc::SOCK_STREAM);
            assert_eq!(
                c.addr,
                CandidateAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 80))
            );
        }
    }

    #[test]
    fn test_numeric_ipv6() {
        let request = RequestBuilder::new()
            .flag("NUMERICHOST")
            .flag("NUMERICSERV")
            .socket_type("DGRAM")
            .service("53")
            .build("2001:db8::1");

        let candidates = SystemResolver::new().resolve(&request).unwrap();
        assert_eq!(candidates.len(), 1);
        match candidates[0].addr {
            CandidateAddr::V6(addr) => {
                assert_eq!(addr.ip().to_string(), "2001:db8::1");
                assert_eq!(addr.port(), 53);
            }
            other => panic!("unexpected address: {other:?}"),
        }
    }

    #[test]
    fn test_numerichost_rejects_names() {
        let request = RequestBuilder::new()
            .flag("NUMERICHOST")
            .build("not-an-address");

        let err = SystemResolver::new().resolve(&request).unwrap_err();
        match err {
            Error::Resolve { code, message } => {
                assert_ne!(code, 0);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_interior_nul() {
        let request = RequestBuilder::new().build("local\0host");
        let err = SystemResolver::new().resolve(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_candidate_family() {
        let v4 = CandidateAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0));
        assert_eq!(v4.family(), libc::AF_INET);
        assert_eq!(CandidateAddr::Other(1).family(), 1);
    }
}
