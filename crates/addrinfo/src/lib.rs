//! Symbolic getaddrinfo(3) requests and candidate reports.
//!
//! This crate maps symbolic names such as `STREAM`, `TCP` or `V4MAPPED`
//! to the platform constants used by `getaddrinfo`, builds a request from
//! them, hands it to a [`Resolver`] and renders the returned candidates.
//!
//! # Example
//!
//! ```no_run
//! use addrinfo::output::{OutputFormat, OutputOptions};
//! use addrinfo::request::{Family, RequestBuilder};
//! use addrinfo::{SystemResolver, report};
//!
//! fn main() -> addrinfo::Result<()> {
//!     let request = RequestBuilder::new()
//!         .family(Family::Inet)
//!         .socket_type("stream")
//!         .service("http")
//!         .build("example.com");
//!
//!     report::run(
//!         &SystemResolver::new(),
//!         &request,
//!         OutputFormat::Text,
//!         OutputOptions::default(),
//!         &mut std::io::stdout().lock(),
//!         &mut std::io::stderr().lock(),
//!     )?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod names;
pub mod output;
pub mod report;
pub mod request;
pub mod resolver;

// Re-export common types at crate root for convenience
pub use error::{Error, Result};
pub use request::{Family, Request, RequestBuilder};
pub use resolver::{Candidate, CandidateAddr, Resolver, SystemResolver};
