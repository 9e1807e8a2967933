//! Output formatting (text/JSON).

use std::io::Write;

use crate::error::Result;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tab-separated text, one line per item.
    #[default]
    Text,
    /// JSON array.
    Json,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Pretty print (for JSON).
    pub pretty: bool,
}

/// Trait for types that can be printed.
///
/// Both methods fail for items that have no representation, such as a
/// candidate with an unsupported address family.
pub trait Printable {
    /// Print as a single text line.
    fn print_text<W: Write>(&self, w: &mut W) -> Result<()>;

    /// Convert to JSON value.
    fn to_json(&self) -> Result<serde_json::Value>;
}

/// Write a JSON value followed by a newline.
pub fn write_json<W: Write>(
    w: &mut W,
    value: &serde_json::Value,
    opts: &OutputOptions,
) -> Result<()> {
    if opts.pretty {
        serde_json::to_writer_pretty(&mut *w, value)?;
    } else {
        serde_json::to_writer(&mut *w, value)?;
    }
    writeln!(w)?;
    Ok(())
}
