// SPDX-License-Identifier: MIT
//
// tint-term — Minimal terminal backend for the tint color picker.
//
// Direct terminal control via ANSI escape sequences and raw termios:
// no crossterm, no TUI framework. The picker redraws a single small
// screen per frame, so there is no cell grid and no diff renderer —
// just a byte-buffer frame composer flushed in one write.
//
// Layers, bottom to top:
//
//   ansi        escape sequence encoding (pure writers)
//   terminal    raw mode, alternate screen, RAII + panic-safe restore
//   reader      background stdin thread feeding a channel
//   input       byte stream → key / paste events
//   screen      per-frame byte buffer with truecolor styling
//   event_loop  the heartbeat: recv_timeout, resize, paint

pub mod ansi;
pub mod event_loop;
pub mod input;
pub mod reader;
pub mod screen;
pub mod terminal;
