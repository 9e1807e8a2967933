//! Rendering resolver candidates.
//!
//! Text output is one line per candidate:
//!
//! ```text
//! STREAM	TCP	80	93.184.215.14
//! ```
//!
//! Socket type and protocol are mapped back through the name tables.
//! Candidates whose family is neither IPv4 nor IPv6 produce a diagnostic
//! on the error stream and are skipped; the rest of the report continues.

use std::io::Write;

use crate::error::{Error, Result};
use crate::names;
use crate::output::{OutputFormat, OutputOptions, Printable, write_json};
use crate::request::Request;
use crate::resolver::{Candidate, CandidateAddr, Resolver};

/// Format a candidate as a tab-separated line, without the newline.
pub fn format_candidate(candidate: &Candidate) -> Result<String> {
    let socket_type = names::name_of(names::SOCKET_TYPES, candidate.socket_type);
    let protocol = names::name_of(names::PROTOCOLS, candidate.protocol);

    match candidate.addr {
        CandidateAddr::V4(addr) => Ok(format!(
            "{}\t{}\t{}\t{}",
            socket_type,
            protocol,
            addr.port(),
            addr.ip()
        )),
        CandidateAddr::V6(addr) => Ok(format!(
            "{}\t{}\t{}\t{}",
            socket_type,
            protocol,
            addr.port(),
            addr.ip()
        )),
        CandidateAddr::Other(family) => Err(Error::UnknownFamily(family)),
    }
}

impl Printable for Candidate {
    fn print_text<W: Write>(&self, w: &mut W) -> Result<()> {
        let line = format_candidate(self)?;
        writeln!(w, "{}", line)?;
        Ok(())
    }

    fn to_json(&self) -> Result<serde_json::Value> {
        let (family, port, address) = match self.addr {
            CandidateAddr::V4(addr) => ("inet", addr.port(), addr.ip().to_string()),
            CandidateAddr::V6(addr) => ("inet6", addr.port(), addr.ip().to_string()),
            CandidateAddr::Other(family) => return Err(Error::UnknownFamily(family)),
        };

        let mut obj = serde_json::json!({
            "socktype": names::name_of(names::SOCKET_TYPES, self.socket_type),
            "protocol": names::name_of(names::PROTOCOLS, self.protocol),
            "family": family,
            "port": port,
            "address": address,
        });

        if let Some(ref canonname) = self.canonical_name {
            obj["canonname"] = serde_json::json!(canonname);
        }

        Ok(obj)
    }
}

/// A list of candidates ready to be written.
#[derive(Debug)]
pub struct Report<'a> {
    candidates: &'a [Candidate],
    format: OutputFormat,
    opts: OutputOptions,
}

impl<'a> Report<'a> {
    /// Create a text report.
    pub fn new(candidates: &'a [Candidate]) -> Self {
        Self {
            candidates,
            format: OutputFormat::Text,
            opts: OutputOptions::default(),
        }
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set output options.
    pub fn with_options(mut self, opts: OutputOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Write the report, in resolver order.
    ///
    /// Report entries go to `out`, per-candidate diagnostics to `err`.
    /// Returns the number of candidates written to `out`.
    pub fn write<W: Write, E: Write>(&self, out: &mut W, err: &mut E) -> Result<usize> {
        let mut written = 0;
        let mut json = Vec::new();

        for candidate in self.candidates {
            let result = match self.format {
                OutputFormat::Text => candidate.print_text(out),
                OutputFormat::Json => candidate.to_json().map(|value| json.push(value)),
            };

            match result {
                Ok(()) => written += 1,
                Err(e) if e.is_per_candidate() => {
                    tracing::debug!(?candidate, "skipping candidate");
                    writeln!(err, "{}", e)?;
                }
                Err(e) => return Err(e),
            }
        }

        if self.format == OutputFormat::Json {
            write_json(out, &serde_json::Value::Array(json), &self.opts)?;
        }

        out.flush()?;
        Ok(written)
    }
}

/// Resolve `request` and write the report.
///
/// Resolution errors are returned before anything is written to `out`.
pub fn run<R, W, E>(
    resolver: &R,
    request: &Request,
    format: OutputFormat,
    opts: OutputOptions,
    out: &mut W,
    err: &mut E,
) -> Result<usize>
where
    R: Resolver + ?Sized,
    W: Write,
    E: Write,
{
    let candidates = resolver.resolve(request)?;
    Report::new(&candidates)
        .with_format(format)
        .with_options(opts)
        .write(out, err)
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};

    use super::*;

    fn v4(a: u8, b: u8, c: u8, d: u8, port: u16) -> CandidateAddr {
        CandidateAddr::V4(SocketAddrV4::new(Ipv4Addr::new(a, b, c, d), port))
    }

    #[test]
    fn test_format_ipv4() {
        let c = Candidate::new(libc::SOCK_STREAM, libc::IPPROTO_TCP, v4(192, 0, 2, 7, 80));
        assert_eq!(format_candidate(&c).unwrap(), "STREAM\tTCP\t80\t192.0.2.7");
    }

    #[test]
    fn test_format_ipv6_compressed() {
        let addr = SocketAddrV6::new(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1), 443, 0, 0);
        let c = Candidate::new(libc::SOCK_DGRAM, libc::IPPROTO_UDP, CandidateAddr::V6(addr));
        assert_eq!(format_candidate(&c).unwrap(), "DGRAM\tUDP\t443\t2001:db8::1");
    }

    #[test]
    fn test_format_unknown_names() {
        let c = Candidate::new(0, 250, v4(10, 0, 0, 1, 0));
        assert_eq!(format_candidate(&c).unwrap(), "UNKNOWN\tUNKNOWN\t0\t10.0.0.1");
    }

    #[test]
    fn test_format_ip_protocol() {
        let c = Candidate::new(libc::SOCK_RAW, libc::IPPROTO_IP, v4(127, 0, 0, 1, 0));
        assert_eq!(format_candidate(&c).unwrap(), "RAW\tIP\t0\t127.0.0.1");
    }

    #[test]
    fn test_format_unknown_family() {
        let c = Candidate::new(libc::SOCK_STREAM, 0, CandidateAddr::Other(1));
        assert!(matches!(format_candidate(&c), Err(Error::UnknownFamily(1))));
    }

    #[test]
    fn test_report_skips_unknown_family() {
        let candidates = vec![
            Candidate::new(libc::SOCK_STREAM, libc::IPPROTO_TCP, v4(192, 0, 2, 1, 80)),
            Candidate::new(libc::SOCK_STREAM, libc::IPPROTO_TCP, CandidateAddr::Other(17)),
            Candidate::new(libc::SOCK_DGRAM, libc::IPPROTO_UDP, v4(192, 0, 2, 2, 80)),
        ];

        let mut out = Vec::new();
        let mut err = Vec::new();
        let written = Report::new(&candidates).write(&mut out, &mut err).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "STREAM\tTCP\t80\t192.0.2.1\nDGRAM\tUDP\t80\t192.0.2.2\n"
        );
        assert_eq!(String::from_utf8(err).unwrap(), "Unknown address family 17\n");
    }

    #[test]
    fn test_report_empty() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let written = Report::new(&[]).write(&mut out, &mut err).unwrap();
        assert_eq!(written, 0);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_report_json() {
        let mut with_name =
            Candidate::new(libc::SOCK_STREAM, libc::IPPROTO_TCP, v4(192, 0, 2, 1, 22));
        with_name.canonical_name = Some("host.example".to_string());
        let candidates = vec![
            with_name,
            Candidate::new(libc::SOCK_STREAM, 0, CandidateAddr::Other(1)),
        ];

        let mut out = Vec::new();
        let mut err = Vec::new();
        let written = Report::new(&candidates)
            .with_format(OutputFormat::Json)
            .write(&mut out, &mut err)
            .unwrap();

        assert_eq!(written, 1);
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "socktype": "STREAM",
                "protocol": "TCP",
                "family": "inet",
                "port": 22,
                "address": "192.0.2.1",
                "canonname": "host.example",
            }])
        );
        assert_eq!(String::from_utf8(err).unwrap(), "Unknown address family 1\n");
    }
}
