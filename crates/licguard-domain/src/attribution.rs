//! Attribution report rendering.
//!
//! The report is a fixed header followed by one notice per dependency, in audit order.
//! Every dependency gets a notice regardless of its verdict.

use crate::model::DependencyId;
use std::io::{self, Write};

pub const ATTRIBUTION_HEADER: &str = "THE FOLLOWING SETS FORTH ATTRIBUTION NOTICES FOR THIRD PARTY SOFTWARE THAT MAY BE CONTAINED IN PORTIONS OF THIS PRODUCT";

pub fn render_header() -> Vec<u8> {
    ATTRIBUTION_HEADER.as_bytes().to_vec()
}

pub fn render_entry(dep: &DependencyId, license_text: &str) -> Vec<u8> {
    format!(
        "\n\n---\n\nThe following software may be included in this product: {dep}. \
         This software contains the following license and notice below:\n\n{license_text}\n"
    )
    .into_bytes()
}

/// Streams attribution output into a caller-owned sink.
///
/// The header is written lazily, right before the first entry, or by [`AttributionWriter::finish`]
/// when there were no entries at all.
pub struct AttributionWriter<'a> {
    sink: &'a mut dyn Write,
    header_written: bool,
    entries: usize,
}

impl<'a> AttributionWriter<'a> {
    pub fn new(sink: &'a mut dyn Write) -> Self {
        Self {
            sink,
            header_written: false,
            entries: 0,
        }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        if !self.header_written {
            self.sink.write_all(&render_header())?;
            self.header_written = true;
        }
        Ok(())
    }

    pub fn write_entry(&mut self, dep: &DependencyId, license_text: &str) -> io::Result<()> {
        self.write_header()?;
        self.sink.write_all(&render_entry(dep, license_text))?;
        self.entries += 1;
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<usize> {
        self.write_header()?;
        self.sink.flush()?;
        Ok(self.entries)
    }
}
