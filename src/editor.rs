// One editing session: the untouched photo, the working copy, brush settings,
// the stroke in progress and the undo history.
// Visual: whatever `current()` holds is what the window shows.
use tracing::{debug, info};

use crate::error::Result;
use crate::history::History;
use crate::mosaic;
use crate::stroke::Stroke;
use crate::types::{BrushMode, BrushSettings, PixelBuffer, Point, Region};

pub struct Editor {
    original: PixelBuffer, // never written after load
    current: PixelBuffer,
    settings: BrushSettings,
    stroke: Stroke,
    history: History,
}

impl Editor {
    /// Start a session on `image`. History is seeded with the untouched state.
    pub fn new(image: PixelBuffer, settings: BrushSettings, capacity: usize) -> Result<Self> {
        let mut editor = Self {
            original: image.clone(),
            current: image,
            settings,
            stroke: Stroke::new(),
            history: History::new(capacity),
        };
        editor.history.save(&editor.current)?;
        info!(
            width = editor.original.width(),
            height = editor.original.height(),
            capacity = editor.history.capacity(),
            "editor: session started"
        );
        Ok(editor)
    }

    /// Replace the whole session with a new image. Nothing carries over
    /// except the brush settings.
    pub fn load(&mut self, image: PixelBuffer) -> Result<()> {
        self.original = image.clone();
        self.current = image;
        self.stroke.cancel();
        self.history.clear();
        self.history.save(&self.current)?;
        info!(width = self.original.width(), height = self.original.height(), "editor: image loaded");
        Ok(())
    }

    /* ---------- region operations ---------- */

    pub fn apply_mosaic(&mut self, region: Region) {
        mosaic::apply_mosaic(&mut self.current, region, self.settings.block_size);
    }

    pub fn restore_original(&mut self, region: Region) -> Result<()> {
        mosaic::restore_original(&mut self.current, &self.original, region)
    }

    /// Apply the active mode on the brush square centred at `point`.
    pub fn dab(&mut self, point: Point) -> Result<()> {
        let region = Region::brush_square(point, self.settings.brush_diameter, self.current.width(), self.current.height());
        match self.settings.mode {
            BrushMode::Mosaic => {
                self.apply_mosaic(region);
                Ok(())
            }
            BrushMode::Eraser => self.restore_original(region),
        }
    }

    /* ---------- strokes ---------- */

    /// Pointer down: open a stroke and paint the first dab.
    pub fn begin_stroke(&mut self, point: Point) -> Result<()> {
        let first = self.stroke.begin(point);
        self.dab(first)
    }

    /// Pointer moved: paint every dab between the last point and `point`.
    /// Ignored while no stroke is open.
    pub fn continue_stroke(&mut self, point: Point) -> Result<()> {
        for p in self.stroke.extend(point) {
            self.dab(p)?;
        }
        Ok(())
    }

    /// Pointer up: close the stroke and snapshot the result.
    /// Returns `false` (and saves nothing) if no stroke was open.
    pub fn end_stroke(&mut self) -> Result<bool> {
        if !self.stroke.end() {
            return Ok(false);
        }
        self.history.save(&self.current)?;
        debug!(
            entries = self.history.len(),
            bytes = self.history.memory_size(),
            mode = self.settings.mode.label(),
            "editor: stroke committed"
        );
        Ok(true)
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    /* ---------- history ---------- */

    /// `false` means there was nothing to undo, or a stroke is still open;
    /// either way the caller should not redraw.
    pub fn undo(&mut self) -> bool {
        if self.stroke.is_drawing() {
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.current = snapshot.clone();
                debug!(cursor = ?self.history.cursor(), "editor: undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.stroke.is_drawing() {
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.current = snapshot.clone();
                debug!(cursor = ?self.history.cursor(), "editor: redo");
                true
            }
            None => false,
        }
    }

    /* ---------- accessors ---------- */

    pub fn current(&self) -> &PixelBuffer {
        &self.current
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut BrushSettings {
        &mut self.settings
    }

    pub fn set_mode(&mut self, mode: BrushMode) {
        if self.settings.mode != mode {
            debug!(mode = mode.label(), "editor: mode changed");
        }
        self.settings.mode = mode;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.original.dimensions()
    }
}
