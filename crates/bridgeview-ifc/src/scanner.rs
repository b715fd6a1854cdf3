// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP record scanner
//!
//! Walks the DATA section of a STEP physical file and yields one record at a
//! time as borrowed slices, without allocating per record. Quoted strings are
//! tracked so `;` and `(` inside names never split a record.

use memchr::{memchr, memmem};

/// One `#id = TYPE(args);` record, borrowed from the source buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record<'a> {
    pub id: u64,
    pub type_name: &'a str,
    /// Raw text between the outermost parentheses, untrimmed.
    pub args: &'a str,
}

/// Streaming scanner over the DATA section.
pub struct RecordScanner<'a> {
    content: &'a str,
    pos: usize,
}

impl<'a> RecordScanner<'a> {
    /// Position the scanner just past the `DATA;` marker. Returns `None`
    /// when the buffer has no DATA section.
    pub fn new(content: &'a str) -> Option<Self> {
        let data = memmem::find(content.as_bytes(), b"DATA;")?;
        Some(Self {
            content,
            pos: data + 5,
        })
    }

    fn next_record(&mut self) -> Option<Record<'a>> {
        let bytes = self.content.as_bytes();

        loop {
            // Next record starts at '#'
            let hash = memchr(b'#', &bytes[self.pos..])? + self.pos;

            // Id digits
            let mut cursor = hash + 1;
            let id_start = cursor;
            while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
                cursor += 1;
            }
            if cursor == id_start {
                // '#' inside an argument list, keep going
                self.pos = hash + 1;
                continue;
            }
            let id: u64 = match self.content[id_start..cursor].parse() {
                Ok(id) => id,
                Err(_) => {
                    self.pos = cursor;
                    continue;
                }
            };

            // '=' with optional whitespace on either side
            while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
                cursor += 1;
            }
            if cursor >= bytes.len() || bytes[cursor] != b'=' {
                // A reference like '#12,' rather than a definition
                self.pos = cursor;
                continue;
            }
            cursor += 1;
            while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
                cursor += 1;
            }

            // Type keyword up to '('
            let type_start = cursor;
            while cursor < bytes.len()
                && (bytes[cursor].is_ascii_alphanumeric() || bytes[cursor] == b'_')
            {
                cursor += 1;
            }
            if cursor >= bytes.len() || bytes[cursor] != b'(' || cursor == type_start {
                self.pos = cursor.max(hash + 1);
                continue;
            }
            let type_name = &self.content[type_start..cursor];

            let args_start = cursor + 1;
            let args_end = match find_args_end(bytes, args_start) {
                Some(end) => end,
                None => {
                    // Unterminated record, stop scanning
                    self.pos = bytes.len();
                    return None;
                }
            };
            self.pos = args_end + 1;

            return Some(Record {
                id,
                type_name,
                args: &self.content[args_start..args_end],
            });
        }
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        self.next_record()
    }
}

/// Find the closing paren of the argument list opened just before `start`.
/// Tracks nesting depth and single-quoted strings ('' escapes a quote).
fn find_args_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut in_string = false;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if b == b'\'' {
                if i + 1 < bytes.len() && bytes[i + 1] == b'\'' {
                    i += 1; // escaped quote
                } else {
                    in_string = false;
                }
            }
        } else {
            match b {
                b'\'' => in_string = true,
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_STEP: &str = r#"ISO-10303-21;
HEADER;
FILE_DESCRIPTION((''),'2;1');
ENDSEC;
DATA;
#1=IFCBEAM('2O2Fr$t4X7Zf8NOew3FLOH',#2,'Main Girder',$,$,#20,#30,$,.BEAM.);
#2= IFCOWNERHISTORY($,$,$,.ADDED.,$,$,$,0);
#3=IFCCARTESIANPOINTLIST3D(((0.,0.,0.),(1.,0.,0.),(0.,1.,0.)));
#4=IFCTRIANGULATEDFACESET(#3,$,.T.,((1,2,3)),$);
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_scans_all_records() {
        let records: Vec<_> = RecordScanner::new(TEST_STEP).unwrap().collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].type_name, "IFCBEAM");
        assert_eq!(records[3].type_name, "IFCTRIANGULATEDFACESET");
    }

    #[test]
    fn test_tolerates_space_around_equals() {
        let records: Vec<_> = RecordScanner::new(TEST_STEP).unwrap().collect();
        assert_eq!(records[1].type_name, "IFCOWNERHISTORY");
    }

    #[test]
    fn test_string_with_semicolon_and_paren() {
        let step = "DATA;\n#7=IFCWALL('id',$,'name ;) with '' quote',$);\n";
        let records: Vec<_> = RecordScanner::new(step).unwrap().collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].args.contains("with '' quote"));
    }

    #[test]
    fn test_missing_data_section() {
        assert!(RecordScanner::new("ISO-10303-21;\nHEADER;\nENDSEC;").is_none());
    }

    #[test]
    fn test_skips_header_records() {
        let records: Vec<_> = RecordScanner::new(TEST_STEP).unwrap().collect();
        assert!(records.iter().all(|r| r.id >= 1));
        assert_eq!(records[2].id, 3);
    }
}
