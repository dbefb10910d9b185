//! # tint-color — color math for the tint picker
//!
//! Pure functions over two small value types. No I/O, no global state:
//! every transformation takes values in and hands new values back.
//!
//! # Architecture
//!
//! ```text
//! free text
//!     │
//!     ▼
//! scan.rs:   regex scan for hex tokens → Vec<Hsl>
//!     │
//!     ▼
//! ops.rs:    remove_duplicate_colors, sort_similar_colors
//!     │
//!     ▼
//! UI renders one control per color; every swatch and hex field
//! round-trips through codec.rs (hex ↔ RGB ↔ HSL).
//! ```
//!
//! # Color Space
//!
//! Everything is integer HSL over sRGB: `h ∈ [0, 360]`, `s, l ∈ [0, 100]`.
//! Conversions round each channel to the nearest integer independently,
//! so a double conversion (hex → HSL → hex) lands within ±1 per RGB
//! channel of the input.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]
// Conversion math runs in f64 and rounds into u8/u16 ranges proven
// in-bounds by the channel domains.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod codec;
pub mod model;
pub mod ops;
pub mod rng;
pub mod scan;

pub use model::{Hsl, ParseColorError, Rgb};
pub use ops::{random_hsl_color, remove_duplicate_colors, sort_similar_colors};
pub use rng::Xorshift32;
pub use scan::find_colors;
