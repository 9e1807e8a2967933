//! Command-line options.

use addrinfo::output::{OutputFormat, OutputOptions};
use addrinfo::{Family, Request, RequestBuilder};
use clap::{ArgAction, Parser};

/// Resolve a host (and optional service) with getaddrinfo(3).
#[derive(Parser, Debug)]
#[command(name = "getaddrinfo", version)]
#[command(about = "Resolve a host into socket address candidates")]
#[command(args_override_self = true)]
pub struct Cli {
    /// IPv4 results only.
    #[arg(short = '4', overrides_with = "ipv6")]
    pub ipv4: bool,

    /// IPv6 results only.
    #[arg(short = '6', overrides_with = "ipv4")]
    pub ipv6: bool,

    /// AI_* flag name, can be used multiple times.
    #[arg(short = 'f', value_name = "AI_FLAGS", action = ArgAction::Append)]
    pub flags: Vec<String>,

    /// Socket type name (STREAM, DGRAM, ...).
    #[arg(short = 't', value_name = "AI_SOCKTYPE")]
    pub socktype: Option<String>,

    /// Port number or service name.
    #[arg(short = 'p', value_name = "PORT")]
    pub service: Option<String>,

    /// Protocol name (TCP, UDP, ...).
    #[arg(short = 'P', value_name = "AI_PROTOCOL")]
    pub protocol: Option<String>,

    /// Output JSON.
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Pretty print JSON output.
    #[arg(long, requires = "json")]
    pub pretty: bool,

    /// Verbose logging.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Host to resolve.
    pub host: String,
}

impl Cli {
    /// Build the resolution request from the parsed options.
    pub fn request(&self) -> Request {
        let mut builder = RequestBuilder::new();

        if self.ipv4 {
            builder = builder.family(Family::Inet);
        } else if self.ipv6 {
            builder = builder.family(Family::Inet6);
        }

        for flag in &self.flags {
            builder = builder.flag(flag);
        }
        if let Some(ref socktype) = self.socktype {
            builder = builder.socket_type(socktype);
        }
        if let Some(ref protocol) = self.protocol {
            builder = builder.protocol(protocol);
        }
        if let Some(ref service) = self.service {
            builder = builder.service(service);
        }

        builder.build(&self.host)
    }

    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            pretty: self.pretty,
        }
    }
}
