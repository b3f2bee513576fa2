//! Command line front end.
//!
//! ```bash
//! starchart auto <image> [config.yaml]
//! starchart manual <request.json> [config.yaml]
//! ```
//!
//! After the chart is built, editor events are read from stdin, one per line:
//! `move X Y`, `click X Y`, `title TEXT`, `scene`, `stars`, `quit`.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use common::serde::serialize;
use common::FileFormat;
use starchart::scene::TITLE_PROMPT;
use starchart::{
    auto_chart, manual_chart, ChartConfig, ChartScene, EditorState, HoverTarget, ManualChartRequest,
};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    common::log_setup::setup_logging("info")?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} auto <image_path> [config]", args[0]);
        eprintln!("       {} manual <request_path> [config]", args[0]);
        std::process::exit(1);
    }

    let config = match args.get(3) {
        Some(path) => ChartConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => ChartConfig::default(),
    };

    let input = Path::new(&args[2]);
    let mut editor = match args[1].as_str() {
        "auto" => auto_chart(input, &config, &mut config.rng())?,
        "manual" => {
            let request = ManualChartRequest::load(input)
                .with_context(|| format!("Failed to load request {}", input.display()))?;
            manual_chart(&request, &config)?
        }
        mode => bail!("Unknown mode '{}', expected 'auto' or 'manual'", mode),
    };

    print!("{}", editor.stars().listing());
    println!("Rename the chart with: title {}", TITLE_PROMPT);

    run_events(&mut editor)
}

fn run_events(editor: &mut EditorState) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut hover = HoverTarget::None;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "move" => match parse_point(rest) {
                Some((x, y)) => {
                    hover = editor.on_pointer_move(x, y);
                    writeln!(stdout, "{}", serde_json::to_string(&hover)?)?;
                }
                None => warn!("Expected 'move X Y', got '{}'", line),
            },
            "click" => match parse_point(rest) {
                Some((x, y)) => {
                    let outcome = editor.on_click(x, y);
                    if outcome.needs_redraw() {
                        hover = editor.on_pointer_move(x, y);
                    }
                    writeln!(stdout, "{}", serde_json::to_string(&outcome)?)?;
                }
                None => warn!("Expected 'click X Y', got '{}'", line),
            },
            "title" => {
                editor.rename_title(rest.trim());
                info!("Chart renamed to '{}'", editor.title());
            }
            "scene" => {
                let scene = ChartScene::from_editor(editor, hover);
                writeln!(stdout, "{}", serialize(&scene, FileFormat::Json)?)?;
            }
            "stars" => {
                writeln!(stdout, "{}", serialize(editor.stars(), FileFormat::Json)?)?;
            }
            _ => warn!("Unknown command '{}'", command),
        }
        stdout.flush()?;
    }

    Ok(())
}

fn parse_point(text: &str) -> Option<(f32, f32)> {
    let mut parts = text.split_whitespace().map(str::parse::<f32>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Some((x, y)),
        _ => None,
    }
}
