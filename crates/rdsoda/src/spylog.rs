//! RDS Spy log reader
//!
//! Parses the plain-text group logs written by the RDS Spy analyzer
//! so recorded broadcasts can be replayed through the decoders. A
//! group line carries four 4-hex-digit block fields and a timestamp:
//!
//! ```txt
//! F202 2410 4652 414E @2019/05/04 02:29:17.940
//! ```
//!
//! A field of `----` marks a block the analyzer could not recover.
//! Anything that is not a group line — headers, blank lines, chatter
//! — is skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

#[cfg(not(test))]
use log::trace;

#[cfg(test)]
use std::println as trace;

use crate::block::{Block, Blocks, ErrorLevel};

/// Error reading an RDS Spy log
#[derive(Error, Debug)]
pub enum SpyLogError {
    /// The file could not be opened or read
    #[error("unable to read RDS Spy log: {0}")]
    Io(#[from] io::Error),

    /// The file was read but no line parsed as a group
    #[error("RDS Spy log contains no decodable groups")]
    EmptyInput,
}

/// Read every group from an RDS Spy log file
///
/// Groups are returned in file order. Lines that do not parse are
/// skipped; a file with no parseable groups at all is an
/// [`EmptyInput`](SpyLogError::EmptyInput) error.
pub fn read_spy_log<P: AsRef<Path>>(path: P) -> Result<Vec<Blocks>, SpyLogError> {
    read_spy_lines(BufReader::new(File::open(path)?))
}

/// Read every group from any line source
///
/// The seam behind [`read_spy_log`]; useful for replaying logs held
/// in memory or arriving over a pipe.
pub fn read_spy_lines<R: BufRead>(reader: R) -> Result<Vec<Blocks>, SpyLogError> {
    let mut groups = Vec::new();
    for line in reader.lines() {
        let line = line?;
        match parse_group_line(line.trim_end()) {
            Some(blocks) => groups.push(blocks),
            None => trace!("skipping non-group line: {:?}", line),
        }
    }

    if groups.is_empty() {
        return Err(SpyLogError::EmptyInput);
    }
    Ok(groups)
}

/// Parse one (already right-trimmed) log line as a group record
///
/// Returns `None` unless the line has the group shape: at least 22
/// characters, spaces between the four block fields, and `@` ahead
/// of the timestamp.
pub fn parse_group_line(line: &str) -> Option<Blocks> {
    let bytes = line.as_bytes();
    if bytes.len() < 22 {
        return None;
    }
    if bytes[4] != b' ' || bytes[9] != b' ' || bytes[14] != b' ' || bytes[19] != b' ' {
        return None;
    }
    if bytes[20] != b'@' {
        return None;
    }

    Some(Blocks {
        a: parse_block(&bytes[0..4])?,
        b: parse_block(&bytes[5..9])?,
        c: parse_block(&bytes[10..14])?,
        d: parse_block(&bytes[15..19])?,
    })
}

// A block field is either "----" (missing) or four hex digits.
fn parse_block(field: &[u8]) -> Option<Block> {
    if field == b"----" {
        return Some(Block::missing());
    }
    if !field.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let text = std::str::from_utf8(field).ok()?;
    let value = u16::from_str_radix(text, 16).ok()?;
    Some(Block::new(value, ErrorLevel::None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_group_line() {
        let blocks = parse_group_line("F202 2410 4652 414E @2019/05/04 02:29:17.940")
            .expect("valid group line");

        assert_eq!(0xF202, blocks.a.value);
        assert_eq!(0x2410, blocks.b.value);
        assert_eq!(0x4652, blocks.c.value);
        assert_eq!(0x414E, blocks.d.value);
        for blk in [blocks.a, blocks.b, blocks.c, blocks.d] {
            assert_eq!(ErrorLevel::None, blk.errors);
        }

        // short-form timestamps are also long enough
        assert!(parse_group_line("F202 2410 4652 414E @2019/05/04 02:29:17.94").is_some());
    }

    #[test]
    fn test_parse_missing_block() {
        let blocks = parse_group_line("---- 2410 4652 414E @2019/05/04 02:29:17.940")
            .expect("valid group line");

        assert_eq!(0, blocks.a.value);
        assert_eq!(ErrorLevel::Unrecoverable, blocks.a.errors);
        assert_eq!(ErrorLevel::None, blocks.b.errors);

        let blocks =
            parse_group_line("---- ---- ---- ---- @2019/05/04 02:29:17.940").expect("all missing");
        assert_eq!(ErrorLevel::Unrecoverable, blocks.d.errors);
    }

    #[test]
    fn test_reject_malformed_lines() {
        // too short
        assert!(parse_group_line("").is_none());
        assert!(parse_group_line("F202 2410 4652 414E @").is_none());
        // separators out of place
        assert!(parse_group_line("F2022 410 4652 414E @2019/05/04 02:29:17.940").is_none());
        // no timestamp marker
        assert!(parse_group_line("F202 2410 4652 414E  2019/05/04 02:29:17.940").is_none());
        // non-hex block field
        assert!(parse_group_line("F2XX 2410 4652 414E @2019/05/04 02:29:17.940").is_none());
        // header chatter
        assert!(parse_group_line("<recorder app=\"RDS Spy\" version=\"1.20\">").is_none());
    }

    #[test]
    fn test_read_lines_skips_and_trims() {
        let log = "\
<recorder>
F202 2410 4652 414E @2019/05/04 02:29:17.940

---- 2410 4652 414E @2019/05/04 02:29:18.125
F202 0408 A93B 5435 @2019/05/04 02:29:18.310 \t
";
        let groups = read_spy_lines(Cursor::new(log)).expect("log with groups");
        assert_eq!(3, groups.len());
        assert_eq!(0xF202, groups[0].a.value);
        assert_eq!(ErrorLevel::Unrecoverable, groups[1].a.errors);
        assert_eq!(0x5435, groups[2].d.value);
    }

    #[test]
    fn test_empty_input() {
        match read_spy_lines(Cursor::new("no groups here\nat all\n")) {
            Err(SpyLogError::EmptyInput) => {}
            other => panic!("expected EmptyInput, got {:?}", other),
        }

        match read_spy_lines(Cursor::new("")) {
            Err(SpyLogError::EmptyInput) => {}
            other => panic!("expected EmptyInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        match read_spy_log("/nonexistent/rds-spy.log") {
            Err(SpyLogError::Io(_)) => {}
            other => panic!("expected Io, got {:?}", other),
        }
    }
}
