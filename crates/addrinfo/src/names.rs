//! Name tables for getaddrinfo flags, socket types and protocols.
//!
//! Each table is an ordered slice of [`Symbol`]s. Lookups by name are
//! ASCII case-insensitive and lookups in either direction return the first
//! match in definition order.

/// A named platform constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// Canonical (uppercase) name.
    pub name: &'static str,
    /// Platform value.
    pub value: i32,
}

impl Symbol {
    const fn new(name: &'static str, value: i32) -> Self {
        Self { name, value }
    }
}

/// A static table of symbols.
pub type SymbolTable = &'static [Symbol];

/// Name returned by [`name_of`] for values missing from a table.
pub const UNKNOWN: &str = "UNKNOWN";

/// `ai_flags` bits.
pub static FLAGS: SymbolTable = &[
    Symbol::new("PASSIVE", libc::AI_PASSIVE),
    Symbol::new("CANONNAME", libc::AI_CANONNAME),
    Symbol::new("NUMERICHOST", libc::AI_NUMERICHOST),
    Symbol::new("V4MAPPED", libc::AI_V4MAPPED),
    Symbol::new("ALL", libc::AI_ALL),
    Symbol::new("ADDRCONFIG", libc::AI_ADDRCONFIG),
    Symbol::new("NUMERICSERV", libc::AI_NUMERICSERV),
];

/// `ai_socktype` values.
pub static SOCKET_TYPES: SymbolTable = &[
    Symbol::new("STREAM", libc::SOCK_STREAM),
    Symbol::new("DGRAM", libc::SOCK_DGRAM),
    Symbol::new("RAW", libc::SOCK_RAW),
    Symbol::new("RDM", libc::SOCK_RDM),
    Symbol::new("SEQPACKET", libc::SOCK_SEQPACKET),
    Symbol::new("DCCP", libc::SOCK_DCCP),
    Symbol::new("PACKET", libc::SOCK_PACKET),
    Symbol::new("CLOEXEC", libc::SOCK_CLOEXEC),
    Symbol::new("NONBLOCK", libc::SOCK_NONBLOCK),
];

/// `ai_protocol` values.
pub static PROTOCOLS: SymbolTable = &[
    Symbol::new("IP", libc::IPPROTO_IP),
    Symbol::new("ICMP", libc::IPPROTO_ICMP),
    Symbol::new("IGMP", libc::IPPROTO_IGMP),
    Symbol::new("IPIP", libc::IPPROTO_IPIP),
    Symbol::new("TCP", libc::IPPROTO_TCP),
    Symbol::new("EGP", libc::IPPROTO_EGP),
    Symbol::new("PUP", libc::IPPROTO_PUP),
    Symbol::new("UDP", libc::IPPROTO_UDP),
    Symbol::new("IDP", libc::IPPROTO_IDP),
    Symbol::new("TP", libc::IPPROTO_TP),
    Symbol::new("DCCP", libc::IPPROTO_DCCP),
    Symbol::new("IPV6", libc::IPPROTO_IPV6),
    Symbol::new("RSVP", libc::IPPROTO_RSVP),
    Symbol::new("GRE", libc::IPPROTO_GRE),
    Symbol::new("ESP", libc::IPPROTO_ESP),
    Symbol::new("AH", libc::IPPROTO_AH),
    Symbol::new("MTP", libc::IPPROTO_MTP),
    Symbol::new("BEETPH", libc::IPPROTO_BEETPH),
    Symbol::new("ENCAP", libc::IPPROTO_ENCAP),
    Symbol::new("PIM", libc::IPPROTO_PIM),
    Symbol::new("COMP", libc::IPPROTO_COMP),
    Symbol::new("SCTP", libc::IPPROTO_SCTP),
    Symbol::new("UDPLITE", libc::IPPROTO_UDPLITE),
    Symbol::new("MPLS", libc::IPPROTO_MPLS),
    Symbol::new("RAW", libc::IPPROTO_RAW),
];

/// Find the value registered under `name`, if any.
pub fn lookup(table: SymbolTable, name: &str) -> Option<i32> {
    table
        .iter()
        .find(|sym| sym.name.eq_ignore_ascii_case(name))
        .map(|sym| sym.value)
}

/// Get the value for `name`, or `0` (unspecified) if the table has no such name.
pub fn value_of(table: SymbolTable, name: &str) -> i32 {
    lookup(table, name).unwrap_or(0)
}

/// Get the name for `value`, or [`UNKNOWN`].
pub fn name_of(table: SymbolTable, value: i32) -> &'static str {
    table
        .iter()
        .find(|sym| sym.value == value)
        .map(|sym| sym.name)
        .unwrap_or(UNKNOWN)
}
