//! Reversible mosaic brush: pixelate parts of an RGBA image by brushing over it,
//! paint the original back with an eraser, and step through a bounded undo history.
//!
//! The core (`types`, `mosaic`, `stroke`, `history`, `editor`) is plain data and
//! has no window or file dependencies; `loader` and `draw` are the thin I/O shell
//! used by the `mosaic-brush` binary.

pub mod cli;
pub mod draw;
pub mod editor;
pub mod error;
pub mod history;
pub mod loader;
pub mod logging;
pub mod mosaic;
pub mod stroke;
pub mod types;

pub use editor::Editor;
pub use error::{Error, Result};
pub use history::History;
pub use mosaic::{apply_mosaic, restore_original};
pub use types::{BrushMode, BrushSettings, PixelBuffer, Point, Region};
