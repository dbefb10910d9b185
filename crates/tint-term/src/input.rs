// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into structured events: keys and paste
// content. Handles the protocols the picker enables in `terminal.rs`:
//
// - Legacy CSI sequences (arrows, editing keys, Shift+Tab)
// - SS3 sequences (arrow alternate encoding from some terminals)
// - Bracketed paste (accumulates pasted text between delimiters)
// - Alt+key (ESC followed by printable character)
// - UTF-8 multi-byte characters
//
// # Design
//
// The parser maintains a small internal byte buffer because escape
// sequences can span multiple `read()` calls. Feed bytes with
// [`Parser::advance`], retrieve events from the returned `Vec`.
// After a timeout with no new bytes, call [`Parser::flush`] to
// emit any pending lone ESC as a real Escape keypress.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A parsed terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// Bracketed paste content.
    ///
    /// The terminal wraps clipboard paste with `CSI 200~` / `CSI 201~`
    /// delimiters. We accumulate the raw bytes between them and deliver
    /// the result as a single event, so a pasted palette reaches the
    /// color scanner intact instead of arriving as keystrokes.
    Paste(String),
}

/// A keyboard event with key identity and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys (Shift, Alt, Ctrl).
    pub modifiers: Modifiers,
}

/// Identity of a key.
///
/// Named keys have dedicated variants; printable characters use
/// [`Char`](KeyCode::Char).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character (printable).
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Matches the xterm CSI modifier encoding (`param = 1 + bitmask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Bracketed paste opening delimiter: `ESC [ 200 ~`
const PASTE_START: &[u8] = b"\x1b[200~";
/// Bracketed paste closing delimiter: `ESC [ 201 ~`
const PASTE_END: &[u8] = b"\x1b[201~";

/// Terminal input parser.
///
/// Feed raw bytes via [`advance`](Parser::advance) and collect
/// structured [`Event`]s. The parser buffers incomplete sequences
/// internally and resumes parsing when more bytes arrive.
///
/// # Escape vs escape-sequence ambiguity
///
/// A bare `ESC` byte (0x1B) could be either a standalone Escape
/// keypress or the start of a multi-byte escape sequence. The parser
/// holds a lone ESC as pending. The caller should wait a short timeout
/// and then call [`flush`](Parser::flush) to emit the pending ESC as a
/// real Escape key event.
pub struct Parser {
    /// Accumulated raw bytes waiting to be parsed.
    buf: Vec<u8>,
    /// When `true`, we're inside a bracketed paste and accumulating
    /// raw bytes until the closing delimiter arrives.
    in_paste: bool,
}

impl Parser {
    /// Create a new parser with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
            in_paste: false,
        }
    }

    /// Feed raw bytes from stdin and return all events that can be parsed.
    ///
    /// Bytes that form an incomplete sequence are kept in the internal
    /// buffer and will be combined with future calls. Call
    /// [`flush`](Parser::flush) after a timeout to emit any pending
    /// lone ESC.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            // ── Paste mode: scan for closing delimiter ──────────────
            if self.in_paste {
                let remaining = &self.buf[pos..];
                if let Some(end_offset) = find_subsequence(remaining, PASTE_END) {
                    // Everything before the delimiter is paste content.
                    let text = String::from_utf8_lossy(&remaining[..end_offset]).into_owned();
                    events.push(Event::Paste(text));
                    pos += end_offset + PASTE_END.len();
                    self.in_paste = false;
                } else {
                    // Delimiter not yet found — keep all bytes pending.
                    break;
                }
                continue;
            }

            // ── Paste start: check before general parsing ───────────
            // We detect `CSI 200~` here so `parse_csi` never sees it.
            let remaining = &self.buf[pos..];
            if remaining.len() >= PASTE_START.len()
                && remaining[..PASTE_START.len()] == *PASTE_START
            {
                self.in_paste = true;
                pos += PASTE_START.len();
                continue;
            }
            // A shorter buffer that is a strict prefix of `CSI 200~`
            // might still become a paste start — wait for more data.
            if remaining.len() < PASTE_START.len()
                && PASTE_START.starts_with(remaining)
                && remaining.starts_with(b"\x1b[")
            {
                break;
            }

            // ── Normal parsing ──────────────────────────────────────
            match try_parse(&self.buf, pos) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        // Compact: remove consumed bytes, keep unconsumed remainder.
        if pos > 0 {
            self.buf.drain(..pos);
        }

        events
    }

    /// Are there unconsumed bytes that might complete with more data?
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Flush pending bytes as literal key events.
    ///
    /// Called after a timeout to resolve the ESC ambiguity: a lone ESC
    /// byte becomes an Escape key event, and any other leftover bytes
    /// become `Char` events. Mid-paste this is a no-op: the buffered
    /// bytes are paste content waiting for the closing delimiter, and a
    /// slow terminal may well pause between paste chunks.
    pub fn flush(&mut self) -> Vec<Event> {
        if self.in_paste {
            return Vec::new();
        }
        let mut events = Vec::new();
        for &byte in &self.buf {
            let code = match byte {
                0x1B => KeyCode::Escape,
                b @ 0x01..=0x1A => KeyCode::Char((b + b'a' - 1) as char),
                0x7F => KeyCode::Backspace,
                b @ 0x20..=0x7E => KeyCode::Char(b as char),
                _ => continue,
            };
            let modifiers = match byte {
                0x01..=0x1A => Modifiers::CTRL,
                _ => Modifiers::empty(),
            };
            events.push(Event::Key(KeyEvent { code, modifiers }));
        }
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing Functions ────────────────────────────────────────────
//
// All parse functions are pure — they read from `buf[pos..]` and return
// what they found plus how many bytes to consume.

/// Result of trying to parse one event from the buffer.
enum Parsed {
    /// Successfully parsed an event, consuming `usize` bytes.
    Event(Event, usize),
    /// Sequence is incomplete — need more bytes.
    Incomplete,
    /// Unrecognized byte(s), skip `usize` bytes.
    Skip(usize),
}

/// Try to parse a single event starting at `buf[pos]`.
fn try_parse(buf: &[u8], pos: usize) -> Parsed {
    let remaining = &buf[pos..];
    if remaining.is_empty() {
        return Parsed::Skip(0);
    }

    match remaining[0] {
        // ESC — could be escape sequence or standalone Escape key.
        0x1B => parse_escape(remaining),
        // Control characters.
        b @ (0x01..=0x07 | 0x0B..=0x0C | 0x0E..=0x1A) => {
            Parsed::Event(ctrl_key(KeyCode::Char((b + b'a' - 1) as char)), 1)
        }
        0x08 | 0x7F => Parsed::Event(press(KeyCode::Backspace), 1),
        0x09 => Parsed::Event(press(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Event(press(KeyCode::Enter), 1),
        // ASCII printable.
        b @ 0x20..=0x7E => Parsed::Event(press(KeyCode::Char(b as char)), 1),
        // UTF-8 multi-byte.
        0xC0..=0xFF => parse_utf8(remaining),
        // NUL and bare continuation bytes — skip.
        _ => Parsed::Skip(1),
    }
}

// ── Escape sequences ────────────────────────────────────────────────────────

fn parse_escape(buf: &[u8]) -> Parsed {
    debug_assert_eq!(buf[0], 0x1B);

    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        // CSI: ESC [
        b'[' => parse_csi(buf),
        // SS3: ESC O
        b'O' => parse_ss3(buf),
        // Alt+ESC.
        0x1B => Parsed::Event(
            Event::Key(KeyEvent {
                code: KeyCode::Escape,
                modifiers: Modifiers::ALT,
            }),
            2,
        ),
        // Alt+printable character.
        b @ 0x20..=0x7E => Parsed::Event(
            Event::Key(KeyEvent {
                code: KeyCode::Char(b as char),
                modifiers: Modifiers::ALT,
            }),
            2,
        ),
        // Unknown byte after ESC — emit standalone Escape.
        _ => Parsed::Event(press(KeyCode::Escape), 1),
    }
}

// ── CSI (Control Sequence Introducer) ───────────────────────────────────────

fn parse_csi(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[0] == 0x1B && buf[1] == b'[');

    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    // Scan for the final byte (0x40..=0x7E).
    // CSI parameter bytes are in 0x30..=0x3F, intermediate in 0x20..=0x2F.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            // Invalid byte in CSI sequence — abort.
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }

    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_csi_params(&buf[2..end]);
    let consumed = end + 1;

    // ── Tilde-terminated sequences (editing keys) ───────────────────
    if final_byte == b'~' {
        let first = params.first().copied().unwrap_or(0);
        let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

        return match first {
            1 | 7 => Parsed::Event(key_with(KeyCode::Home, modifiers), consumed),
            3 => Parsed::Event(key_with(KeyCode::Delete, modifiers), consumed),
            4 | 8 => Parsed::Event(key_with(KeyCode::End, modifiers), consumed),
            _ => Parsed::Skip(consumed),
        };
    }

    // ── Standard CSI sequences with letter final bytes ──────────────
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    let event = match final_byte {
        b'A' => key_with(KeyCode::Up, modifiers),
        b'B' => key_with(KeyCode::Down, modifiers),
        b'C' => key_with(KeyCode::Right, modifiers),
        b'D' => key_with(KeyCode::Left, modifiers),
        b'H' => key_with(KeyCode::Home, modifiers),
        b'F' => key_with(KeyCode::End, modifiers),
        b'Z' => Event::Key(KeyEvent {
            code: KeyCode::Tab,
            modifiers: Modifiers::SHIFT,
        }),
        _ => return Parsed::Skip(consumed),
    };

    Parsed::Event(event, consumed)
}

// ── SS3 (Single Shift 3) ───────────────────────────────────────────────────

fn parse_ss3(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[0] == 0x1B && buf[1] == b'O');

    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    let event = match buf[2] {
        b'A' => press(KeyCode::Up),
        b'B' => press(KeyCode::Down),
        b'C' => press(KeyCode::Right),
        b'D' => press(KeyCode::Left),
        b'H' => press(KeyCode::Home),
        b'F' => press(KeyCode::End),
        _ => return Parsed::Skip(3),
    };

    Parsed::Event(event, 3)
}

// ── UTF-8 ──────────────────────────────────────────────────────────────────

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = utf8_char_len(buf[0]);

    if expected == 0 {
        return Parsed::Skip(1);
    }
    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    // Validate continuation bytes (must start with 0b10xxxxxx).
    for &b in &buf[1..expected] {
        if b & 0xC0 != 0x80 {
            return Parsed::Skip(1);
        }
    }

    std::str::from_utf8(&buf[..expected]).map_or(Parsed::Skip(1), |s| {
        s.chars().next().map_or(Parsed::Skip(expected), |ch| {
            Parsed::Event(press(KeyCode::Char(ch)), expected)
        })
    })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Create a simple key press event with no modifiers.
const fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::empty(),
    })
}

/// Create a key press event with Ctrl held.
const fn ctrl_key(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::CTRL,
    })
}

/// Create a key press event with the given modifiers.
const fn key_with(code: KeyCode, modifiers: Modifiers) -> Event {
    Event::Key(KeyEvent { code, modifiers })
}

/// Decode xterm-style CSI modifier parameter (`param = 1 + bitmask`).
#[allow(clippy::cast_possible_truncation)] // Only the low 3 bits are meaningful.
fn decode_modifiers(param: u16) -> Modifiers {
    let bits = param.saturating_sub(1);
    Modifiers::from_bits_truncate((bits & 0x07) as u8)
}

/// Parse semicolon-separated decimal parameters from a CSI body.
///
/// Colon sub-parameters (used by some protocols) are ignored past the
/// first value. Missing or empty parameters decode as 0.
fn parse_csi_params(raw: &[u8]) -> Vec<u16> {
    raw.split(|&b| b == b';')
        .map(|part| {
            part.iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// Expected byte length of a UTF-8 character from its lead byte.
/// Returns 0 for invalid lead bytes.
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

/// Find the first occurrence of `needle` in `haystack`.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: Modifiers::empty(),
        })
    }

    fn key_mod(code: KeyCode, modifiers: Modifiers) -> Event {
        Event::Key(KeyEvent { code, modifiers })
    }

    // ── Plain characters ────────────────────────────────────────────────

    #[test]
    fn ascii_characters() {
        let mut p = Parser::new();
        let events = p.advance(b"nq");
        assert_eq!(
            events,
            vec![key(KeyCode::Char('n')), key(KeyCode::Char('q'))]
        );
    }

    #[test]
    fn enter_tab_backspace() {
        let mut p = Parser::new();
        assert_eq!(p.advance(b"\r"), vec![key(KeyCode::Enter)]);
        assert_eq!(p.advance(b"\n"), vec![key(KeyCode::Enter)]);
        assert_eq!(p.advance(b"\t"), vec![key(KeyCode::Tab)]);
        assert_eq!(p.advance(b"\x7f"), vec![key(KeyCode::Backspace)]);
    }

    #[test]
    fn ctrl_characters() {
        let mut p = Parser::new();
        // Ctrl+C is 0x03.
        assert_eq!(
            p.advance(b"\x03"),
            vec![key_mod(KeyCode::Char('c'), Modifiers::CTRL)]
        );
    }

    #[test]
    fn utf8_character() {
        let mut p = Parser::new();
        assert_eq!(p.advance("é".as_bytes()), vec![key(KeyCode::Char('é'))]);
    }

    #[test]
    fn utf8_split_across_chunks() {
        let mut p = Parser::new();
        let bytes = "→".as_bytes();
        assert!(p.advance(&bytes[..1]).is_empty());
        assert!(p.has_pending());
        assert_eq!(p.advance(&bytes[1..]), vec![key(KeyCode::Char('→'))]);
    }

    // ── CSI sequences ───────────────────────────────────────────────────

    #[test]
    fn arrow_keys() {
        let mut p = Parser::new();
        assert_eq!(p.advance(b"\x1b[A"), vec![key(KeyCode::Up)]);
        assert_eq!(p.advance(b"\x1b[B"), vec![key(KeyCode::Down)]);
        assert_eq!(p.advance(b"\x1b[C"), vec![key(KeyCode::Right)]);
        assert_eq!(p.advance(b"\x1b[D"), vec![key(KeyCode::Left)]);
    }

    #[test]
    fn shift_arrow() {
        let mut p = Parser::new();
        // xterm: CSI 1;2 C is Shift+Right (modifier param 2 = 1 + SHIFT).
        assert_eq!(
            p.advance(b"\x1b[1;2C"),
            vec![key_mod(KeyCode::Right, Modifiers::SHIFT)]
        );
    }

    #[test]
    fn ctrl_arrow() {
        let mut p = Parser::new();
        assert_eq!(
            p.advance(b"\x1b[1;5D"),
            vec![key_mod(KeyCode::Left, Modifiers::CTRL)]
        );
    }

    #[test]
    fn shift_tab_backtab() {
        let mut p = Parser::new();
        assert_eq!(
            p.advance(b"\x1b[Z"),
            vec![key_mod(KeyCode::Tab, Modifiers::SHIFT)]
        );
    }

    #[test]
    fn delete_key() {
        let mut p = Parser::new();
        assert_eq!(p.advance(b"\x1b[3~"), vec![key(KeyCode::Delete)]);
    }

    #[test]
    fn home_end_variants() {
        let mut p = Parser::new();
        assert_eq!(p.advance(b"\x1b[H"), vec![key(KeyCode::Home)]);
        assert_eq!(p.advance(b"\x1b[F"), vec![key(KeyCode::End)]);
        assert_eq!(p.advance(b"\x1b[1~"), vec![key(KeyCode::Home)]);
        assert_eq!(p.advance(b"\x1b[4~"), vec![key(KeyCode::End)]);
    }

    #[test]
    fn ss3_arrows() {
        let mut p = Parser::new();
        assert_eq!(p.advance(b"\x1bOA"), vec![key(KeyCode::Up)]);
        assert_eq!(p.advance(b"\x1bOD"), vec![key(KeyCode::Left)]);
    }

    #[test]
    fn csi_split_across_chunks() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[").is_empty());
        assert!(p.has_pending());
        assert_eq!(p.advance(b"A"), vec![key(KeyCode::Up)]);
    }

    // ── Alt ─────────────────────────────────────────────────────────────

    #[test]
    fn alt_character() {
        let mut p = Parser::new();
        assert_eq!(
            p.advance(b"\x1bn"),
            vec![key_mod(KeyCode::Char('n'), Modifiers::ALT)]
        );
    }

    // ── Escape ambiguity ────────────────────────────────────────────────

    #[test]
    fn lone_esc_is_pending_until_flush() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b").is_empty());
        assert!(p.has_pending());
        assert_eq!(p.flush(), vec![key(KeyCode::Escape)]);
        assert!(!p.has_pending());
    }

    #[test]
    fn esc_followed_by_sequence_is_not_escape() {
        let mut p = Parser::new();
        p.advance(b"\x1b");
        // Sequence continuation arrives before the timeout.
        assert_eq!(p.advance(b"[A"), vec![key(KeyCode::Up)]);
    }

    // ── Bracketed paste ─────────────────────────────────────────────────

    #[test]
    fn paste_in_one_chunk() {
        let mut p = Parser::new();
        let events = p.advance(b"\x1b[200~#ff0000 #00ff00\x1b[201~");
        assert_eq!(events, vec![Event::Paste("#ff0000 #00ff00".into())]);
    }

    #[test]
    fn paste_split_across_chunks() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[200~#ff").is_empty());
        assert!(p.advance(b"0000").is_empty());
        let events = p.advance(b"\x1b[201~");
        assert_eq!(events, vec![Event::Paste("#ff0000".into())]);
    }

    #[test]
    fn paste_delimiter_split_mid_sequence() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[20").is_empty());
        let events = p.advance(b"0~abc\x1b[201~");
        assert_eq!(events, vec![Event::Paste("abc".into())]);
    }

    #[test]
    fn flush_mid_paste_holds_content() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[200~#ff00").is_empty());
        // A timeout between paste chunks must not leak content as keys.
        assert!(p.flush().is_empty());
        assert!(p.has_pending());
        let events = p.advance(b"00\x1b[201~");
        assert_eq!(events, vec![Event::Paste("#ff0000".into())]);
    }

    #[test]
    fn empty_paste() {
        let mut p = Parser::new();
        let events = p.advance(b"\x1b[200~\x1b[201~");
        assert_eq!(events, vec![Event::Paste(String::new())]);
    }

    #[test]
    fn keys_around_paste() {
        let mut p = Parser::new();
        let events = p.advance(b"a\x1b[200~#abc\x1b[201~b");
        assert_eq!(
            events,
            vec![
                key(KeyCode::Char('a')),
                Event::Paste("#abc".into()),
                key(KeyCode::Char('b')),
            ]
        );
    }

    // ── Robustness ──────────────────────────────────────────────────────

    #[test]
    fn unknown_csi_is_skipped() {
        let mut p = Parser::new();
        // CSI 99~ maps to nothing the picker knows; following key parses.
        let events = p.advance(b"\x1b[99~x");
        assert_eq!(events, vec![key(KeyCode::Char('x'))]);
    }

    #[test]
    fn stray_continuation_byte_is_skipped() {
        let mut p = Parser::new();
        let events = p.advance(b"\x80a");
        assert_eq!(events, vec![key(KeyCode::Char('a'))]);
    }

    #[test]
    fn empty_input_no_events() {
        let mut p = Parser::new();
        assert!(p.advance(b"").is_empty());
        assert!(!p.has_pending());
    }
}
