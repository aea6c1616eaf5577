use crate::model::{DependencyId, LicenseClassification, LicenseInventory};
use crate::policy::LicensePolicy;
use std::io::{self, Write};

/// Build an inventory from `(dependency, license type)` pairs. Text is derived from the type.
pub fn inventory(entries: &[(&str, &str)]) -> LicenseInventory {
    entries
        .iter()
        .map(|(dep, ty)| {
            let text = if ty.is_empty() {
                String::new()
            } else {
                format!("{ty} license text")
            };
            (DependencyId::from(*dep), LicenseClassification::new(*ty, text))
        })
        .collect()
}

pub fn policy(whitelist: &[&str], blacklist: &[&str], exceptions: &[&str]) -> LicensePolicy {
    LicensePolicy::build(whitelist, blacklist, exceptions)
}

/// A sink that accepts `ok_writes` calls to `write` and fails every call after that.
pub struct FailingSink {
    ok_writes: usize,
    writes: usize,
}

impl FailingSink {
    pub fn after_writes(ok_writes: usize) -> Self {
        Self {
            ok_writes,
            writes: 0,
        }
    }
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.writes >= self.ok_writes {
            return Err(io::Error::other("sink closed"));
        }
        self.writes += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
