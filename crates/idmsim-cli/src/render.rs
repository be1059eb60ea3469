//! Terminal playback of a recorded simulation trace.
//!
//! The road is drawn as a shaded strip scaled to the terminal width,
//! vehicles as solid blocks on the centre row, with one speed label per
//! vehicle underneath. Frames are paced at `dt * frame_skip` of wall
//! time, divided by the playback speed multiplier.

use std::fmt::Write as _;
use std::time::Duration;

use console::{style, Style, Term};
use tokio::time::sleep;
use tracing::debug;

use idmsim_core::config::{SimulationConfig, VisualConfig};
use idmsim_core::error::SimResult;
use idmsim_core::trace::TraceRow;

const ROAD_CELL: char = '░';
const CAR_CELL: char = '█';
const MIN_TRACK_WIDTH: usize = 40;
const MAX_LABEL_LINES: usize = 16;

struct Track {
    width: usize,
    glyph_width: usize,
    road_rows: usize,
}

impl Track {
    fn new(term: &Term, config: &SimulationConfig, visual: &VisualConfig) -> Self {
        let (_, cols) = term.size();
        let width = (cols as usize).saturating_sub(2).max(MIN_TRACK_WIDTH);
        let glyph_width = ((visual.car_length / config.road_length) * width as f64)
            .round()
            .max(1.0) as usize;
        let road_rows = ((visual.lane_width / visual.car_width).round() as usize).clamp(1, 3);
        Self {
            width,
            glyph_width,
            road_rows,
        }
    }

    fn column(&self, x: f64, road_length: f64) -> usize {
        let col = (x / road_length * self.width as f64) as usize;
        col.min(self.width - 1)
    }
}

/// Play the trace back on stdout.
pub async fn play(
    rows: &[TraceRow],
    config: &SimulationConfig,
    visual: &VisualConfig,
) -> SimResult<()> {
    let term = Term::stdout();
    let track = Track::new(&term, config, visual);

    let road_style = Style::new().color256(visual.road_color.to_ansi256());
    let car_style = Style::new().color256(visual.car_color.to_ansi256());
    let label_style = Style::new().color256(visual.label_color.to_ansi256());

    let frame_time =
        Duration::from_secs_f64(config.dt * visual.frame_skip as f64 / visual.playback_speed);
    let frames = rows
        .chunks(config.num_vehicles)
        .step_by(visual.frame_skip);
    debug!(
        width = track.width,
        frame_ms = frame_time.as_millis() as u64,
        "starting playback"
    );

    term.hide_cursor()?;
    let result: SimResult<()> = async {
        for frame in frames {
            let t = frame.first().map(|r| r.time).unwrap_or_default();
            term.clear_screen()?;
            term.write_line(&format!(
                "{}",
                style(format!("IDM Traffic Simulation   t = {t:.2} s")).bold()
            ))?;
            term.write_line("")?;

            // Which cells the vehicle glyphs cover on the centre row
            let mut occupied = vec![false; track.width];
            for row in frame {
                let col = track.column(row.x, config.road_length);
                for cell in occupied
                    .iter_mut()
                    .skip(col.saturating_sub(track.glyph_width - 1))
                    .take(track.glyph_width)
                {
                    *cell = true;
                }
            }

            let centre = track.road_rows / 2;
            for road_row in 0..track.road_rows {
                let mut line = String::with_capacity(track.width * 8);
                if road_row == centre {
                    for &car in &occupied {
                        if car {
                            let _ = write!(line, "{}", car_style.apply_to(CAR_CELL));
                        } else {
                            let _ = write!(line, "{}", road_style.apply_to(ROAD_CELL));
                        }
                    }
                } else {
                    let strip: String = std::iter::repeat(ROAD_CELL).take(track.width).collect();
                    let _ = write!(line, "{}", road_style.apply_to(strip));
                }
                term.write_line(&line)?;
            }

            // Position axis under the strip
            let right = format!("{} m", config.road_length);
            term.write_line(&format!("0{right:>width$}", width = track.width - 1))?;
            term.write_line("")?;

            for row in frame.iter().take(MAX_LABEL_LINES) {
                term.write_line(&format!(
                    "{}",
                    label_style.apply_to(format!(
                        "ID:{:<3} v={:6.1} m/s  x={:8.1} m",
                        row.id, row.v, row.x
                    ))
                ))?;
            }
            if frame.len() > MAX_LABEL_LINES {
                term.write_line(&format!("... {} more", frame.len() - MAX_LABEL_LINES))?;
            }

            sleep(frame_time).await;
        }
        Ok(())
    }
    .await;
    term.show_cursor()?;
    result?;

    println!("{}", style("Playback finished.").green());
    Ok(())
}
