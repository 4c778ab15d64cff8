use std::io::Read;

use crate::EOF;

/// Where the source bytes come from. `Bytes` exists so the pipeline can be
/// driven from memory (tests, embedding) without touching the filesystem.
pub enum InputRead {
    File(std::fs::File),
    Bytes(std::io::Cursor<Vec<u8>>),
}

/// Forward-only byte cursor over one source, with a single-slot pushback
/// buffer. The grammar needs exactly one byte of pushback, so the slot is
/// an `Option` rather than a growable buffer, and the cursor works over
/// non-seekable streams.
pub struct Input {
    input: InputRead,
    pushback: Option<u8>,
    pub line_number: usize,
}

impl Input {
    pub fn new(input: InputRead) -> Self {
        Self {
            input,
            pushback: None,
            line_number: 1,
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(InputRead::Bytes(std::io::Cursor::new(bytes.into())))
    }

    /// Get the next byte to be scanned. First tries the pushback slot,
    /// otherwise reads one byte from the underlying source. Returns the
    /// [`EOF`] sentinel once the source is exhausted.
    pub fn get_next_character(&mut self) -> std::io::Result<u8> {
        if let Some(c) = self.pushback.take() {
            return Ok(c);
        }

        let mut buf: [u8; 1] = [0; 1];
        let n = match &mut self.input {
            InputRead::File(file) => file.read(&mut buf),
            InputRead::Bytes(cursor) => cursor.read(&mut buf),
        }?;

        if n == 0 {
            return Ok(EOF);
        }

        let c = buf[0];
        if c == b'\n' {
            self.line_number += 1;
        }

        Ok(c)
    }

    /// Return a just-read byte to the cursor so the next
    /// [`get_next_character`](Self::get_next_character) re-reads it.
    /// At most one byte may be pending at a time.
    pub fn pushback_character(&mut self, c: u8) {
        debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
        self.pushback = Some(c);
    }

    /// One byte of lookahead without consuming it.
    pub fn peek(&mut self) -> std::io::Result<u8> {
        let c = self.get_next_character()?;
        if c != EOF {
            self.pushback_character(c);
        }
        Ok(c)
    }

    /// Consume the remainder of the current physical line, excluding the
    /// terminating newline (which is consumed). Used for the raw,
    /// untokenized capture of a `#define` replacement value.
    pub fn next_line(&mut self) -> std::io::Result<Vec<u8>> {
        let mut line = Vec::new();
        loop {
            let c = self.get_next_character()?;
            if c == b'\n' || c == EOF {
                return Ok(line);
            }
            line.push(c);
        }
    }
}
