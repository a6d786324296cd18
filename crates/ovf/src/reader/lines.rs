// standard library
use std::io::BufRead;

// crate modules
use crate::error::Result;

/// Line-by-line reader over raw bytes
///
/// OVF files from some writers contain stray non-UTF-8 bytes in comments, so
/// every line is decoded lossily rather than rejected. Only the current line
/// is held in memory.
#[derive(Debug)]
pub(crate) struct LineReader<R> {
    inner: R,
    buffer: Vec<u8>,
    cached_line: String,
    number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            cached_line: String::new(),
            number: 0,
        }
    }

    /// Advances to the next line, saving it to the cache
    ///
    /// Returns `false` at the end of the stream. Line endings are removed.
    pub(crate) fn advance(&mut self) -> Result<bool> {
        self.buffer.clear();
        if self.inner.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(false);
        }

        self.number += 1;
        self.cached_line = String::from_utf8_lossy(&self.buffer)
            .trim_end_matches(['\n', '\r'])
            .to_string();

        Ok(true)
    }

    /// The last line read
    pub(crate) fn line(&self) -> &str {
        &self.cached_line
    }

    /// Advances and returns the new line, `None` at the end of the stream
    #[cfg(test)]
    pub(crate) fn next_line(&mut self) -> Result<Option<&str>> {
        Ok(self.advance()?.then(|| self.line()))
    }

    /// 1-based number of the last line read
    pub(crate) fn line_number(&self) -> usize {
        self.number
    }
}
