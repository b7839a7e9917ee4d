//! Profile serialization and parsing.
//!
//! The emitted format is one line per registered block, in discovery order:
//! the entry address in lowercase hex (no prefix), a single space, and the
//! execution count in decimal. Example: `401020 153`.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::registry::BlockRecord;

/// Write the execution profile for `records` to `w`, in the order given.
///
/// Counts are read with relaxed loads; callers emit after instrumentation
/// has ceased, so the values are final.
///
/// # Errors
/// Propagates any write or flush failure from the sink.
pub fn write_report<W: Write>(records: &[Arc<BlockRecord>], w: &mut W) -> io::Result<()> {
    for record in records {
        writeln!(w, "{:x} {}", record.addr, record.count.get())?;
    }
    w.flush()
}

/// One parsed profile line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileEntry {
    pub addr: u64,
    pub count: u64,
}

impl ProfileEntry {
    /// Parse a `<hex-addr> <decimal-count>` line.
    ///
    /// Returns `None` for anything that does not match the format exactly:
    /// a `0x` prefix, a third field, or a missing count all reject the line.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.trim_end_matches('\n').split(' ');
        let addr = u64::from_str_radix(fields.next()?, 16).ok()?;
        let count = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self { addr, count })
    }
}

/// Parse a whole profile, preserving emission order. Lines that do not match
/// the profile format are skipped.
///
/// # Errors
/// Propagates read failures from the underlying reader.
pub fn parse_profile<R: BufRead>(reader: R) -> io::Result<Vec<ProfileEntry>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(entry) = ProfileEntry::parse(&line) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BlockRegistry;

    #[test]
    fn test_report_format_exact() {
        let registry = BlockRegistry::new();
        let handle = registry.register(0x0040_1020);
        for _ in 0..153 {
            handle.hit();
        }

        let mut out = Vec::new();
        write_report(&registry.snapshot(), &mut out).unwrap();
        assert_eq!(out, b"401020 153\n");
    }

    #[test]
    fn test_zero_execution_block_is_reported() {
        let registry = BlockRegistry::new();
        registry.register(0xdead);

        let mut out = Vec::new();
        write_report(&registry.snapshot(), &mut out).unwrap();
        assert_eq!(out, b"dead 0\n");
    }

    #[test]
    fn test_report_discovery_order() {
        let registry = BlockRegistry::new();
        let a = registry.register(0xb000);
        let b = registry.register(0xa000);
        // Execution frequency must not affect line order.
        b.hit();
        b.hit();
        a.hit();

        let mut out = Vec::new();
        write_report(&registry.snapshot(), &mut out).unwrap();
        assert_eq!(out, b"b000 1\na000 2\n");
    }

    #[test]
    fn test_parse_entry() {
        let entry = ProfileEntry::parse("401020 153").unwrap();
        assert_eq!(
            entry,
            ProfileEntry {
                addr: 0x0040_1020,
                count: 153
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(ProfileEntry::parse("401020").is_none());
        assert!(ProfileEntry::parse("0x401020 153").is_none());
        assert!(ProfileEntry::parse("401020 153 7").is_none());
        assert!(ProfileEntry::parse("401020 -1").is_none());
        assert!(ProfileEntry::parse("").is_none());
    }

    #[test]
    fn test_parse_profile_preserves_order() {
        let input = "b000 1\na000 2\n";
        let entries = parse_profile(input.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].addr, 0xb000);
        assert_eq!(entries[1].addr, 0xa000);
    }
}
