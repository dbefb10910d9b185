// SPDX-License-Identifier: MIT
//
// tint — an interactive terminal HSL color picker.
//
// This is the main binary that wires together the crates:
//
//   tint-term  → terminal control, ANSI output, input parsing, event loop
//   tint-color → color model, hex codec, scanner, set ops, sorter
//
// The Picker struct implements tint-term's App trait, connecting the
// event loop to the picker's state. Each keypress flows through:
//
//   stdin → parser → on_event → mode dispatch → color list mutation
//   paint → screen composer → single flush to the terminal
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ title                        │
//   │ one row per color control    │  ← swatch, hex, hsl()
//   │ H / S / L gauges             │  ← for the selected control
//   │ status / help line           │
//   │ hex input prompt             │  ← hex-edit mode only
//   └──────────────────────────────┘

use std::process;

use tint_color::{
    Hsl, Xorshift32, find_colors, remove_duplicate_colors, sort_similar_colors,
};

use tint_term::ansi::Style;
use tint_term::event_loop::{Action, App, EventLoop};
use tint_term::input::{Event, KeyCode, KeyEvent, Modifiers};
use tint_term::screen::Screen;
use tint_term::terminal::{self, Size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ─── Channel focus ──────────────────────────────────────────────────────────

/// Which HSL channel the adjustment keys act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Hue,
    Saturation,
    Lightness,
}

impl Channel {
    /// The channel below this one in the gauge stack (wraps).
    const fn next(self) -> Self {
        match self {
            Self::Hue => Self::Saturation,
            Self::Saturation => Self::Lightness,
            Self::Lightness => Self::Hue,
        }
    }

    /// The channel above this one in the gauge stack (wraps).
    const fn prev(self) -> Self {
        match self {
            Self::Hue => Self::Lightness,
            Self::Saturation => Self::Hue,
            Self::Lightness => Self::Saturation,
        }
    }

    /// One-letter gauge label.
    const fn label(self) -> &'static str {
        match self {
            Self::Hue => "H",
            Self::Saturation => "S",
            Self::Lightness => "L",
        }
    }
}

// ─── Mode ───────────────────────────────────────────────────────────────────

/// Input mode. Pick mode drives the sliders; hex-edit mode collects a
/// hex string for the selected control.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Pick,
    HexEdit { input: String },
}

// ─── Picker ─────────────────────────────────────────────────────────────────

/// Coarse step for Shift-modified adjustments.
const COARSE_STEP: i32 = 10;

/// Gauge bar width in cells.
const GAUGE_WIDTH: u16 = 24;

/// The picker application state.
///
/// The color list is always non-empty: the last control cannot be
/// deleted, and a paste only replaces the list when the scanner found
/// at least one color.
struct Picker {
    colors: Vec<Hsl>,
    selected: usize,
    channel: Channel,
    mode: Mode,
    rng: Xorshift32,
    /// One-shot message shown on the status line instead of key help.
    status: Option<String>,
}

impl Picker {
    fn new(rng: Xorshift32) -> Self {
        Self {
            colors: vec![Hsl::new(220, 60, 50)],
            selected: 0,
            channel: Channel::Hue,
            mode: Mode::Pick,
            rng,
            status: None,
        }
    }

    /// The currently selected color.
    fn current(&self) -> Hsl {
        self.colors[self.selected]
    }

    // ── State updates ───────────────────────────────────────────────

    /// Adjust the focused channel of the selected color by `delta`.
    ///
    /// Hue wraps around the color wheel; saturation and lightness clamp
    /// to [0, 100].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Ranges proven by rem_euclid/clamp.
    fn adjust(&mut self, delta: i32) {
        let c = &mut self.colors[self.selected];
        match self.channel {
            Channel::Hue => {
                c.h = (i32::from(c.h) + delta).rem_euclid(360) as u16;
            }
            Channel::Saturation => {
                c.s = (i32::from(c.s) + delta).clamp(0, 100) as u8;
            }
            Channel::Lightness => {
                c.l = (i32::from(c.l) + delta).clamp(0, 100) as u8;
            }
        }
    }

    /// Select the next control (wraps).
    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.colors.len();
    }

    /// Select the previous control (wraps).
    fn select_prev(&mut self) {
        self.selected = (self.selected + self.colors.len() - 1) % self.colors.len();
    }

    /// Append a random color and select it.
    fn add_random(&mut self) {
        self.colors.push(tint_color::random_hsl_color(&mut self.rng));
        self.selected = self.colors.len() - 1;
    }

    /// Delete the selected control. The last control stays.
    fn delete_selected(&mut self) {
        if self.colors.len() == 1 {
            self.status = Some("cannot delete the last color".into());
            return;
        }
        self.colors.remove(self.selected);
        if self.selected >= self.colors.len() {
            self.selected = self.colors.len() - 1;
        }
    }

    /// Re-sort the list by similarity, keeping the selection on the
    /// same color value.
    fn resort(&mut self) {
        let keep = self.current();
        self.colors = sort_similar_colors(&self.colors);
        // `keep` came from the list, so position() always finds it.
        self.selected = self.colors.iter().position(|&c| c == keep).unwrap_or(0);
    }

    /// Run pasted text through the scanner pipeline. A non-empty result
    /// replaces the color list; an empty one leaves it untouched.
    fn apply_paste(&mut self, text: &str) {
        let found = find_colors(text);
        if found.is_empty() {
            self.status = Some("no colors found in paste".into());
            return;
        }
        let unique = remove_duplicate_colors(&found);
        self.colors = sort_similar_colors(&unique);
        self.selected = 0;
        self.status = Some(format!("loaded {} color(s)", self.colors.len()));
    }

    /// Commit the hex-edit input to the selected control.
    fn commit_hex(&mut self, input: &str) {
        match Hsl::from_hex(input.trim()) {
            Ok(color) => {
                self.colors[self.selected] = color;
            }
            Err(err) => {
                self.status = Some(err.to_string());
            }
        }
        self.mode = Mode::Pick;
    }

    // ── Key dispatch ────────────────────────────────────────────────

    fn on_pick_key(&mut self, key: KeyEvent) -> Action {
        let step = if key.modifiers.contains(Modifiers::SHIFT) {
            COARSE_STEP
        } else {
            1
        };

        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(Modifiers::CTRL) => {
                return Action::Quit;
            }

            // Channel adjustment. Uppercase letters are the coarse step
            // (terminals report Shift+h as 'H', not a modifier flag).
            KeyCode::Left | KeyCode::Char('h') => self.adjust(-step),
            KeyCode::Right | KeyCode::Char('l') => self.adjust(step),
            KeyCode::Char('H') => self.adjust(-COARSE_STEP),
            KeyCode::Char('L') => self.adjust(COARSE_STEP),

            // Channel focus.
            KeyCode::Up | KeyCode::Char('k') => self.channel = self.channel.prev(),
            KeyCode::Down | KeyCode::Char('j') => self.channel = self.channel.next(),

            // Control selection.
            KeyCode::Tab if key.modifiers.contains(Modifiers::SHIFT) => self.select_prev(),
            KeyCode::Tab => self.select_next(),

            // List operations.
            KeyCode::Char('n') => self.add_random(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('s') => self.resort(),
            KeyCode::Char('e') => {
                self.mode = Mode::HexEdit {
                    input: format!("#{}", self.current().to_hex()),
                };
            }

            _ => {}
        }
        Action::Continue
    }

    fn on_hex_edit_key(&mut self, key: KeyEvent) -> Action {
        let Mode::HexEdit { ref mut input } = self.mode else {
            return Action::Continue;
        };

        match key.code {
            KeyCode::Enter => {
                let text = input.clone();
                self.commit_hex(&text);
            }
            KeyCode::Escape => self.mode = Mode::Pick,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() && input.len() < 16 => {
                input.push(ch);
            }
            _ => {}
        }
        Action::Continue
    }

    // ── Painting ────────────────────────────────────────────────────

    fn paint_color_row(&self, screen: &mut Screen, row: u16, index: usize) {
        let color = self.colors[index];
        let rgb = color.to_rgb();
        let selected = index == self.selected;

        screen.move_to(1, row);
        if selected {
            screen.set_style(Style::BOLD);
            screen.print("> ");
        } else {
            screen.print("  ");
        }

        screen.set_bg(rgb.r, rgb.g, rgb.b);
        screen.print("      ");
        // End the swatch only; bold on a selected row carries through.
        screen.reset_bg();
        screen.print(&format!("  #{}  {}", color.to_hex(), color));
        screen.reset_style();
    }

    fn paint_gauge(&self, screen: &mut Screen, row: u16, channel: Channel) {
        let color = self.current();
        let (value, max) = match channel {
            Channel::Hue => (u32::from(color.h), 360),
            Channel::Saturation => (u32::from(color.s), 100),
            Channel::Lightness => (u32::from(color.l), 100),
        };
        let filled = (value * u32::from(GAUGE_WIDTH) / max).min(u32::from(GAUGE_WIDTH)) as usize;
        let focused = channel == self.channel;

        screen.move_to(1, row);
        if focused {
            screen.set_style(Style::BOLD | Style::INVERSE);
        } else {
            screen.set_style(Style::DIM);
        }
        screen.print(channel.label());
        screen.reset_style();

        let bar: String = "█".repeat(filled) + &"░".repeat(GAUGE_WIDTH as usize - filled);
        screen.print(&format!(" {bar} {value:>3}"));
    }

    fn status_text(&self) -> String {
        if let Some(ref message) = self.status {
            return message.clone();
        }
        match self.mode {
            Mode::Pick => {
                "h/l adjust  H/L ±10  j/k channel  Tab select  n new  d delete  \
                 s sort  e hex  q quit  (paste replaces the list)"
                    .into()
            }
            Mode::HexEdit { .. } => "Enter apply  Escape cancel".into(),
        }
    }
}

impl App for Picker {
    fn on_event(&mut self, event: &Event) -> Action {
        // A new event replaces any one-shot status message.
        self.status = None;

        match event {
            Event::Key(key) => match self.mode {
                Mode::Pick => self.on_pick_key(*key),
                Mode::HexEdit { .. } => self.on_hex_edit_key(*key),
            },
            Event::Paste(text) => {
                self.apply_paste(text);
                Action::Continue
            }
        }
    }

    fn paint(&mut self, screen: &mut Screen, size: Size) {
        let rows = size.rows;

        screen.move_to(1, 0);
        screen.set_style(Style::BOLD);
        screen.print("tint");
        screen.reset_style();
        screen.set_style(Style::DIM);
        screen.print(" · HSL color picker");
        screen.reset_style();

        // Color rows, capped so the gauges and status always fit.
        let gauge_top = rows.saturating_sub(6);
        let visible = usize::from(gauge_top.saturating_sub(2));
        for (i, row) in (0..self.colors.len().min(visible)).zip(2u16..) {
            self.paint_color_row(screen, row, i);
        }

        self.paint_gauge(screen, gauge_top, Channel::Hue);
        self.paint_gauge(screen, gauge_top + 1, Channel::Saturation);
        self.paint_gauge(screen, gauge_top + 2, Channel::Lightness);

        screen.move_to(1, rows.saturating_sub(2));
        screen.set_style(Style::DIM);
        screen.print(&truncate_to_width(
            &self.status_text(),
            usize::from(size.cols.saturating_sub(2)),
        ));
        screen.reset_style();

        if let Mode::HexEdit { ref input } = self.mode {
            screen.move_to(1, rows.saturating_sub(1));
            screen.set_style(Style::BOLD);
            screen.print("hex> ");
            screen.reset_style();
            screen.print(input);
            screen.set_style(Style::INVERSE);
            screen.print(" ");
            screen.reset_style();
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Truncate a string to at most `max` display columns.
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    if !terminal::is_tty() {
        eprintln!("tint: stdin is not a terminal");
        process::exit(1);
    }

    let mut picker = Picker::new(Xorshift32::from_entropy());

    let run = EventLoop::new().and_then(|mut event_loop| event_loop.run(&mut picker));
    if let Err(err) = run {
        eprintln!("tint: {err}");
        process::exit(1);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
