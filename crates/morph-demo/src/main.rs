//! Headless morph demo: cycles through the configured phrases and prints
//! every frame as a strip of character cells.
//!
//! Settings come from `morph.toml` and `MORPH_*` environment variables.
//! Pass `--align` to finish by sliding the last phrase through every
//! alignment.

use anyhow::Result;
use rune_config::MorphConfig;
use rune_morph::{Alignment, Frame, Millis, MorphEngine};

/// Glyphs fainter than this are left out of the strip.
const VISIBLE_ALPHA: f32 = 0.5;

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let config = MorphConfig::load();
    let mut engine = MorphEngine::from_config(&config)?;
    let interval = config.demo.frame_interval_ms.max(1);
    let cell_width = config.demo.cell_width.max(1.0);
    let columns = (engine.viewport().width / cell_width).ceil() as usize;

    log::info!(
        "morph-demo: {} phrases, {}ms frames, {} columns",
        config.demo.phrases.len(),
        interval,
        columns
    );

    let mut now: Millis = 0;
    for phrase in &config.demo.phrases {
        println!("-> {:?}", phrase);
        engine.set_target_sequence(phrase.as_str(), now);
        now = run(&mut engine, now, interval, cell_width, columns);
    }

    if std::env::args().any(|a| a == "--align") {
        for alignment in [Alignment::End, Alignment::Center, Alignment::Start] {
            println!("-> {:?}", alignment);
            engine.set_alignment(alignment, now);
            now = run(&mut engine, now, interval, cell_width, columns);
        }
    }

    Ok(())
}

/// Render frames until the engine stops asking for more. Returns the time of
/// the frame after the last one drawn.
fn run(engine: &mut MorphEngine, mut now: Millis, interval: Millis, cell_width: f32, columns: usize) -> Millis {
    loop {
        let frame = engine.render_frame(now);
        println!("{:>7}ms |{}|", now, strip(&frame, cell_width, columns));
        now += interval;
        if !frame.request_next_frame {
            return now;
        }
    }
}

fn strip(frame: &Frame, cell_width: f32, columns: usize) -> String {
    let mut cells = vec![' '; columns];
    // Later glyphs in a frame are incoming ones and win their cell.
    for glyph in frame.glyphs.iter().filter(|g| g.color.a >= VISIBLE_ALPHA) {
        let column = (glyph.x / cell_width).round();
        if column >= 0.0 && (column as usize) < columns {
            cells[column as usize] = glyph.ch;
        }
    }
    cells.into_iter().collect()
}
