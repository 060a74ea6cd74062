use std::collections::VecDeque;
use std::io::Read;

use super::Source;
use crate::error::SourceError;
use crate::Mark;

const RAW_BUFFER_SIZE: usize = 4096;

/// A `Source` that incrementally decodes UTF-8 from any `std::io::Read`,
/// buffering just enough raw bytes to keep lookahead cheap. Mirrors the
/// teacher's `reader` module's raw-buffer refill loop, but at `char`
/// granularity rather than the teacher's encoding-agnostic byte buffer,
/// since this crate assumes UTF-8 (see §6).
pub struct ReadSource<R> {
    reader: R,
    raw: VecDeque<u8>,
    decoded: VecDeque<char>,
    eof: bool,
    pos: usize,
    line: u64,
    line_start: usize,
    line_buffer: VecDeque<char>,
    bom_checked: bool,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            raw: VecDeque::new(),
            decoded: VecDeque::new(),
            eof: false,
            pos: 0,
            line: 1,
            line_start: 0,
            line_buffer: VecDeque::new(),
            bom_checked: false,
        }
    }

    fn fill_raw(&mut self) -> Result<(), SourceError> {
        if self.eof || self.raw.len() >= RAW_BUFFER_SIZE {
            return Ok(());
        }
        let mut buf = [0u8; RAW_BUFFER_SIZE];
        let n = self.reader.read(&mut buf)?;
        if n == 0 {
            self.eof = true;
        } else {
            self.raw.extend(buf[..n].iter().copied());
        }
        Ok(())
    }

    fn strip_bom(&mut self) {
        if self.bom_checked {
            return;
        }
        self.bom_checked = true;
        const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
        if self.raw.len() >= 3 && self.raw.iter().take(3).copied().eq(BOM) {
            self.raw.drain(0..3);
        }
    }

    /// Ensure at least `n + 1` decoded characters are buffered (or EOF).
    fn ensure(&mut self, n: usize) -> Result<(), SourceError> {
        while self.decoded.len() <= n {
            self.fill_raw()?;
            self.strip_bom();
            let bytes: Vec<u8> = self.raw.iter().copied().collect();
            match std::str::from_utf8(&bytes) {
                Ok(s) => {
                    let consumed = bytes.len();
                    self.decoded.extend(s.chars());
                    self.raw.drain(0..consumed);
                }
                Err(e) => {
                    let valid_len = e.valid_up_to();
                    if valid_len > 0 {
                        let s = std::str::from_utf8(&bytes[..valid_len]).unwrap();
                        self.decoded.extend(s.chars());
                        self.raw.drain(0..valid_len);
                    }
                    if e.error_len().is_some() {
                        return Err(SourceError::InvalidUtf8 {
                            offset: self.pos as u64,
                        });
                    }
                    // Incomplete sequence at the tail: wait for more bytes.
                    if self.eof {
                        return Err(SourceError::InvalidUtf8 {
                            offset: self.pos as u64,
                        });
                    }
                    break;
                }
            }
            if self.eof && self.raw.is_empty() {
                break;
            }
        }
        Ok(())
    }
}

impl<R: Read> Source for ReadSource<R> {
    fn peek(&mut self) -> Result<Option<char>, SourceError> {
        self.peek_at(0)
    }

    fn peek_at(&mut self, n: usize) -> Result<Option<char>, SourceError> {
        self.ensure(n)?;
        Ok(self.decoded.get(n).copied())
    }

    fn advance(&mut self) -> Result<Option<char>, SourceError> {
        self.ensure(0)?;
        let ch = self.decoded.pop_front();
        if let Some(ch) = ch {
            self.pos += 1;
            if ch == '\n' {
                self.line += 1;
                self.line_start = self.pos;
                self.line_buffer.clear();
            } else {
                self.line_buffer.push_back(ch);
            }
        }
        Ok(ch)
    }

    fn mark(&self) -> Mark {
        Mark::new(self.line, (self.pos - self.line_start + 1) as u64)
    }

    fn current_line_text(&mut self) -> Result<String, SourceError> {
        // Best effort: only characters already consumed on this line plus
        // whatever is currently buffered ahead are visible.
        let mut text: String = self.line_buffer.iter().collect();
        for &ch in self.decoded.iter() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
        }
        Ok(text)
    }
}
