//! Stateless display helpers
//!
//! Small pure functions the UI uses to present documents: unit conversion,
//! page-size names, byte counts, filenames, dates, colors and shortcuts.

pub mod bytes;
pub mod color;
pub mod date;
pub mod filename;
pub mod shortcut;
pub mod units;

pub use bytes::{format_bytes, format_stars};
pub use color::{hex_to_rgb, Rgb};
pub use date::format_iso_date;
pub use filename::truncate_filename;
pub use shortcut::format_shortcut_display;
pub use units::{convert_points, standard_page_name, to_points, Unit};
