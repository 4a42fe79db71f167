//! Line reader with a hard cap on buffered bytes.
//!
//! A line longer than the cap is consumed through to its newline without
//! being buffered and reported as [`Line::TooLong`].

use std::io::{self, BufRead, ErrorKind};

/// Default line cap: 16 MiB.
pub const MAX_LINE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// Line content without the trailing `\n` or `\r\n`
    Text(&'a [u8]),
    /// Line was discarded; holds its length in bytes
    TooLong(usize),
}

pub struct BoundedLines<R> {
    reader: R,
    buf: Vec<u8>,
    max_len: usize,
}

impl<R: BufRead> BoundedLines<R> {
    pub fn new(reader: R, max_len: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            max_len,
        }
    }

    /// Read the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<Line<'_>>> {
        self.buf.clear();
        let mut total = 0usize;
        let mut overflow = false;
        let mut read_any = false;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            read_any = true;

            let newline = available.iter().position(|&b| b == b'\n');
            let chunk = &available[..newline.unwrap_or(available.len())];
            total += chunk.len();

            if !overflow {
                if total > self.max_len {
                    overflow = true;
                    self.buf = Vec::new();
                } else {
                    self.buf.extend_from_slice(chunk);
                }
            }

            let used = chunk.len() + usize::from(newline.is_some());
            self.reader.consume(used);
            if newline.is_some() {
                break;
            }
        }

        if !read_any {
            return Ok(None);
        }
        if overflow {
            return Ok(Some(Line::TooLong(total)));
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        Ok(Some(Line::Text(&self.buf)))
    }
}
