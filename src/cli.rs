// Command-line flags for the window app.
//
//   mosaic-brush photo.jpg
//   mosaic-brush photo.png --block-size 16 --brush-size 40 --output-dir out/

use std::path::PathBuf;

use clap::Parser;

use crate::history::DEFAULT_CAPACITY;
use crate::types::{BrushMode, BrushSettings, MAX_BRUSH_VALUE, MIN_BRUSH_VALUE};

/// Paint a pixel mosaic over parts of a photo, erase it back, export as PNG.
#[derive(Parser, Debug)]
#[command(name = "mosaic-brush", version)]
pub struct CliArgs {
    /// Photo to edit (JPEG, PNG or WebP, at most 50 MiB).
    #[arg(value_name = "IMAGE")]
    pub input: PathBuf,

    /// Mosaic block size in pixels (clamped to 1-100).
    #[arg(short, long, default_value_t = 10, value_name = "PX")]
    pub block_size: u32,

    /// Brush diameter in pixels (clamped to 1-100).
    #[arg(short = 's', long, default_value_t = 20, value_name = "PX")]
    pub brush_size: u32,

    /// Start in eraser mode instead of mosaic mode.
    #[arg(long)]
    pub eraser: bool,

    /// Number of undo snapshots kept.
    #[arg(long, default_value_t = DEFAULT_CAPACITY, value_name = "N")]
    pub history: usize,

    /// Where `<name>_mosa.png` is written. Defaults to the input's folder.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Verbose logging (honours RUST_LOG).
    #[arg(short, long)]
    pub debug: bool,
}

impl CliArgs {
    /// Brush settings with every value pulled into the UI range.
    pub fn brush_settings(&self) -> BrushSettings {
        let mut settings = BrushSettings {
            block_size: MIN_BRUSH_VALUE,
            brush_diameter: MIN_BRUSH_VALUE,
            mode: if self.eraser { BrushMode::Eraser } else { BrushMode::Mosaic },
        };
        settings.set_block_size(self.block_size);
        settings.set_brush_diameter(self.brush_size);
        settings
    }

    pub fn export_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_defaults() {
        let args = CliArgs::parse_from(["mosaic-brush", "pic.jpg"]);
        assert_eq!(args.brush_settings(), BrushSettings::default());
        assert_eq!(args.history, DEFAULT_CAPACITY);
        assert_eq!(args.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn values_are_clamped() {
        let args = CliArgs::parse_from(["mosaic-brush", "a/b.png", "-b", "0", "-s", "500", "--eraser"]);
        let s = args.brush_settings();
        assert_eq!(s.block_size, MIN_BRUSH_VALUE);
        assert_eq!(s.brush_diameter, MAX_BRUSH_VALUE);
        assert_eq!(s.mode, BrushMode::Eraser);
        assert_eq!(args.export_dir(), PathBuf::from("a"));
    }

    #[test]
    fn output_dir_wins() {
        let args = CliArgs::parse_from(["mosaic-brush", "a/b.png", "--output-dir", "out"]);
        assert_eq!(args.export_dir(), PathBuf::from("out"));
    }
}
