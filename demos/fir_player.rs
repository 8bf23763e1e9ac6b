//! Interactive FIR filter player.
//!
//! Loads an MP3, WAV or FLAC file, filters it with the six filters of the bank
//! and lets you listen to the original and each filtered version. Every signal
//! is drawn as an envelope row so the filters can be compared at a glance.
//!
//! Controls:
//! - UP/DOWN arrows: Select a signal
//! - SPACE/ENTER: Play the selected signal from the start
//! - S: Stop playback
//! - Q or ESC: Quit
//!
//! Usage:
//!   cargo run --example fir_player -- speech.flac
//!   cargo run --example fir_player -- speech.wav --export out/

mod common;

use anyhow::{Context, Result};
use clap::Parser;
use common::{DemoAudioState, KeyAction, is_quit_key, run_interactive_demo};
use crossterm::{
    ExecutableCommand,
    event::{KeyCode, KeyEvent},
};
use firbank::{
    FilterBank, SAMPLE_RATE, Session, Signal, SignalSelection, SignalSummary, signal::resample,
};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};

/// Number of columns in each envelope row.
const ENVELOPE_WIDTH: usize = 48;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Parser, Debug)]
#[command(about = "Filter an audio file with Hamming and Blackman FIR filters and play the results")]
struct Args {
    /// Audio file to load (MP3, WAV or FLAC)
    file: PathBuf,

    /// Write the original and all filtered signals as WAV files to this directory
    #[arg(long)]
    export: Option<PathBuf>,
}

struct PlayerState {
    session: Session<SAMPLE_RATE>,
    selections: Vec<SignalSelection>,
    summaries: Vec<SignalSummary>,
    sparklines: Vec<String>,
    end_time: f64,
    cursor: usize,
    /// Every selectable signal at the output device rate, in `selections` order
    buffers: Vec<Vec<f64>>,
    position: usize,
    playing: Option<usize>,
    status: String,
}

impl PlayerState {
    fn new(session: Session<SAMPLE_RATE>) -> Self {
        let selections: Vec<SignalSelection> = SignalSelection::all().collect();
        let summaries = session.summaries();
        let scale = summaries
            .iter()
            .fold(0.0_f64, |peak, summary| peak.max(summary.peak));
        let sparklines = selections
            .iter()
            .map(|&selection| sparkline(&session.get(selection).envelope(ENVELOPE_WIDTH), scale))
            .collect();
        let end_time = session
            .original()
            .time_axis()
            .last()
            .copied()
            .unwrap_or(0.0);

        Self {
            session,
            selections,
            summaries,
            sparklines,
            end_time,
            cursor: 0,
            buffers: Vec::new(),
            position: 0,
            playing: None,
            status: "Filtering complete! You can now play the signals.".to_string(),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.selections.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    fn play_selected(&mut self) {
        let name = self.selections[self.cursor].name();
        match self.session.select(name) {
            Ok((selection, _)) => {
                self.position = 0;
                self.playing = Some(self.cursor);
                self.status = format!("Playing: {}", selection);
            }
            Err(e) => self.status = format!("Invalid selection: {}", e),
        }
    }

    fn stop(&mut self) {
        self.playing = None;
        self.status = "Stopped.".to_string();
    }
}

impl DemoAudioState for PlayerState {
    fn set_output_rate(&mut self, sample_rate: u32) -> Result<()> {
        log::info!(
            "Preparing {} playback buffers at {} Hz",
            self.selections.len(),
            sample_rate
        );
        let session = &self.session;
        self.buffers = self
            .selections
            .iter()
            .map(|&selection| resample(session.get(selection).samples(), SAMPLE_RATE, sample_rate))
            .collect::<firbank::Result<Vec<_>>>()?;
        Ok(())
    }

    fn next_sample(&mut self) -> f64 {
        let Some(index) = self.playing else {
            return 0.0;
        };
        match self.buffers.get(index).and_then(|b| b.get(self.position)) {
            Some(&sample) => {
                self.position += 1;
                sample
            }
            None => {
                self.playing = None;
                0.0
            }
        }
    }
}

/// Renders envelope values as block characters, full height at `scale`.
fn sparkline(envelope: &[f64], scale: f64) -> String {
    let top = BARS.len() - 1;
    envelope
        .iter()
        .map(|&value| {
            if scale <= 0.0 {
                return BARS[0];
            }
            let level = (value / scale * top as f64).round() as usize;
            BARS[level.min(top)]
        })
        .collect()
}

fn draw_ui(state: &PlayerState) -> Result<()> {
    let mut stdout = stdout();
    stdout.execute(crossterm::terminal::Clear(
        crossterm::terminal::ClearType::All,
    ))?;
    stdout.execute(crossterm::cursor::MoveTo(0, 0))?;

    write!(stdout, "=== FIR Audio Filter ===\r\n")?;
    write!(stdout, "Hamming & Blackman Windows | Low, Band, High-pass\r\n")?;
    write!(stdout, "\r\n")?;
    write!(
        stdout,
        "    {:<16} {:>9} {:>8} {:>8}  Envelope (0.00 s to {:.2} s)\r\n",
        "Signal", "Duration", "Peak", "RMS", state.end_time
    )?;

    for (i, summary) in state.summaries.iter().enumerate() {
        let marker = if i == state.cursor { ">" } else { " " };
        let playing = if state.playing == Some(i) {
            "▶"
        } else {
            " "
        };
        write!(
            stdout,
            "{} {} {:<16} {:>8.2}s {:>8.3} {:>8.3}  {}\r\n",
            marker,
            playing,
            summary.selection.name(),
            summary.duration,
            summary.peak,
            summary.rms,
            state.sparklines[i]
        )?;
    }

    write!(stdout, "\r\n")?;
    write!(stdout, "Status: {}\r\n", state.status)?;
    write!(stdout, "\r\n")?;
    write!(stdout, "Controls:\r\n")?;
    write!(stdout, "  UP/DOWN     - Select signal\r\n")?;
    write!(stdout, "  SPACE/ENTER - Play selected signal\r\n")?;
    write!(stdout, "  S           - Stop\r\n")?;
    write!(stdout, "  Q/ESC       - Quit\r\n")?;

    stdout.flush()?;
    Ok(())
}

fn export(session: &Session<SAMPLE_RATE>, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for selection in SignalSelection::all() {
        let file_name = selection.name().replace(' ', "_") + ".wav";
        let path = dir.join(file_name);
        session
            .get(selection)
            .write_wav(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let bank = FilterBank::<SAMPLE_RATE>::design()?;

    println!("Processing audio... please wait.");
    let signal = Signal::<SAMPLE_RATE>::from_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let session = Session::load(signal, &bank)?;

    if let Some(dir) = &args.export {
        return export(&session, dir);
    }

    run_interactive_demo(
        PlayerState::new(session),
        |state| {
            let state = state.lock().unwrap();
            draw_ui(&state)
        },
        |state, key_event: &KeyEvent| {
            let mut s = state.lock().unwrap();
            let action = match key_event.code {
                KeyCode::Up => {
                    s.move_cursor(-1);
                    KeyAction::Continue
                }
                KeyCode::Down => {
                    s.move_cursor(1);
                    KeyAction::Continue
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    s.play_selected();
                    KeyAction::Continue
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    s.stop();
                    KeyAction::Continue
                }
                code if is_quit_key(code) => KeyAction::Exit,
                _ => KeyAction::Continue,
            };

            if let KeyAction::Continue = action {
                draw_ui(&s)?;
            }
            Ok(action)
        },
    )
}
