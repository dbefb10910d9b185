// SPDX-License-Identifier: MIT
//
// Frame composition — a byte buffer the application paints into.
//
// The picker's UI is a handful of rows, so every frame is repainted
// from scratch: no cell grid, no diffing. A `Screen` accumulates all
// ANSI bytes for one frame in memory and flushes them to stdout in a
// single `write()` syscall, which is what keeps the repaint tear-free
// without synchronized-output tricks.
//
// All writes into the buffer are infallible (`Vec` backing); the only
// fallible operation is [`Screen::present`].

use std::io::{self, Write};

use crate::ansi::{self, Style};

/// Default buffer capacity. A full picker frame is well under 4 KB.
const DEFAULT_CAPACITY: usize = 4096;

/// A per-frame byte buffer with styled-text helpers.
///
/// Build a frame with the positioning and styling methods, then call
/// [`present`](Self::present) to write it to the terminal at once.
pub struct Screen {
    buf: Vec<u8>,
}

impl Screen {
    /// Create an empty screen buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Start a new frame: clear the buffer and emit a full-screen clear.
    pub fn begin_frame(&mut self) {
        self.buf.clear();
        // Vec writes cannot fail.
        let _ = ansi::clear_screen(&mut self.buf);
        let _ = ansi::cursor_to(&mut self.buf, 0, 0);
    }

    /// Move the drawing position to `(x, y)` (0-indexed).
    pub fn move_to(&mut self, x: u16, y: u16) {
        let _ = ansi::cursor_to(&mut self.buf, x, y);
    }

    /// Set the foreground color for subsequent text.
    pub fn set_fg(&mut self, r: u8, g: u8, b: u8) {
        let _ = ansi::fg_rgb(&mut self.buf, r, g, b);
    }

    /// Set the background color for subsequent text.
    pub fn set_bg(&mut self, r: u8, g: u8, b: u8) {
        let _ = ansi::bg_rgb(&mut self.buf, r, g, b);
    }

    /// Reset the foreground to the terminal default, keeping other
    /// attributes.
    pub fn reset_fg(&mut self) {
        let _ = ansi::fg_default(&mut self.buf);
    }

    /// Reset the background to the terminal default, keeping other
    /// attributes.
    pub fn reset_bg(&mut self) {
        let _ = ansi::bg_default(&mut self.buf);
    }

    /// Apply text attributes for subsequent text.
    pub fn set_style(&mut self, style: Style) {
        let _ = ansi::style(&mut self.buf, style);
    }

    /// Reset colors and attributes to terminal defaults.
    pub fn reset_style(&mut self) {
        let _ = ansi::reset(&mut self.buf);
    }

    /// Append literal text at the current position.
    pub fn print(&mut self, text: &str) {
        self.buf.extend_from_slice(text.as_bytes());
    }

    /// Number of bytes accumulated for this frame.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the frame buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Write the frame to stdout in one syscall and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn present(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&self.buf)?;
            stdout.flush()?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Write the frame to an arbitrary writer and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn present_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
