// What you SEE:
// • The photo you passed on the command line, fitted to the window.
// • Hold Left Mouse: pixelate (MOSAIC) or paint the original back (ERASER).
// • M / E switch mode, [ ] brush size, - = block size (Shift = x10).
// • Ctrl+Z undo, Ctrl+Y or Ctrl+Shift+Z redo, S saves <name>_mosa.png. ESC quits.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info, warn};

use mosaic_brush::cli::CliArgs;
use mosaic_brush::draw::{
    Drawer, FrameBuffer, ViewLayout, draw_brush_outline, draw_crosshair, draw_text_5x7, shade_strip,
};
use mosaic_brush::loader::{export_png, load_image};
use mosaic_brush::{BrushMode, Editor, Result, logging};

/// Largest window we open before scaling the photo down.
const MAX_VIEW_W: usize = 1280;
const MAX_VIEW_H: usize = 860;

/// How long a HUD status message stays up.
const STATUS_TTL: Duration = Duration::from_secs(3);

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<()> {
    /* --- Load the photo + start the session ---
       Visual: nothing on screen yet; original and working copy are identical. */
    let loaded = load_image(&args.input)?;
    let export_dir = args.export_dir();
    let mut editor = Editor::new(loaded.buffer, args.brush_settings(), args.history)?;

    /* --- Window sized to the fitted view --- */
    let (w, h) = editor.dimensions();
    let view = ViewLayout::fit(w, h, MAX_VIEW_W, MAX_VIEW_H);
    let mut drawer = Drawer::new(&format!("Mosaic Brush - {}", loaded.stem), view.view_w, view.view_h)?;
    let mut screen = FrameBuffer::new(view.view_w, view.view_h);

    /* --- HUD status (the toast line) --- */
    let mut status: Option<(String, Instant)> = None;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Keyboard: modes, sizes, history, export. */
        let keys = drawer.key_actions();
        if keys.mosaic_mode { editor.set_mode(BrushMode::Mosaic); }
        if keys.eraser_mode { editor.set_mode(BrushMode::Eraser); }
        if keys.brush_delta != 0 { editor.settings_mut().adjust_brush_diameter(keys.brush_delta); }
        if keys.block_delta != 0 { editor.settings_mut().adjust_block_size(keys.block_delta); }

        if keys.undo && !editor.is_drawing() && !editor.undo() {
            set_status(&mut status, "nothing to undo");
        }
        if keys.redo && !editor.is_drawing() && !editor.redo() {
            set_status(&mut status, "nothing to redo");
        }

        if keys.export {
            match export_png(editor.current(), &export_dir, &loaded.stem) {
                Ok(path) => {
                    info!(path = %path.display(), "saved");
                    set_status(&mut status, "saved");
                }
                Err(e) => {
                    warn!("export failed: {e}");
                    set_status(&mut status, "save failed");
                }
            }
        }

        /* 2) Mouse: press starts a stroke, drag extends it, release (or leaving
              the window) ends it and snapshots history. */
        let mouse = drawer.mouse_pos();
        match (drawer.left_mouse_down(), mouse) {
            (true, Some((mx, my))) => {
                let p = view.to_image(mx, my);
                if editor.is_drawing() {
                    editor.continue_stroke(p)?;
                } else {
                    editor.begin_stroke(p)?;
                }
            }
            _ => {
                editor.end_stroke()?;
            }
        }

        /* 3) Base image: the working copy, scaled into the window. */
        view.render(editor.current(), &mut screen);

        /* 4) Overlay: brush footprint + crosshair at the cursor. */
        if let Some((mx, my)) = mouse {
            let side = (editor.settings().brush_diameter as f32 / view.scale()).round() as i32;
            let color = match editor.settings().mode {
                BrushMode::Mosaic => 0x00_FF_CC_33,
                BrushMode::Eraser => 0x00_33_CC_FF,
            };
            draw_brush_outline(&mut screen, mx as i32, my as i32, side, color);
            draw_crosshair(&mut screen, mx as i32, my as i32, 6, color);
        }

        /* 5) HUD text. */
        let s = editor.settings();
        let hist = editor.history();
        let hud = format!(
            "{} | BLOCK {} | BRUSH {} | UNDO {} | REDO {}",
            s.mode.label(),
            s.block_size,
            s.brush_diameter,
            if hist.can_undo() { "Y" } else { "-" },
            if hist.can_redo() { "Y" } else { "-" },
        );
        shade_strip(&mut screen, 4, 12);
        draw_text_5x7(&mut screen, 8, 6, &hud, 0x00_FF_FF_FF);

        if status.as_ref().is_some_and(|(_, at)| at.elapsed() >= STATUS_TTL) {
            status = None;
        }
        if let Some((msg, _)) = &status {
            let y = screen.height.saturating_sub(16);
            shade_strip(&mut screen, y, 12);
            draw_text_5x7(&mut screen, 8, y as i32 + 2, msg, 0x00_FF_FF_FF);
        }

        /* 6) Present to the window. */
        drawer.present(&screen)?;
    }

    // Closing mid-drag still keeps the last stroke in history.
    editor.end_stroke()?;
    info!(entries = editor.history().len(), "session closed");
    Ok(())
}

fn set_status(slot: &mut Option<(String, Instant)>, msg: &str) {
    *slot = Some((msg.to_string(), Instant::now()));
}
