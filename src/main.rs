use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tracing::{info, warn};

mod app;
mod config;
mod console;
mod input;
mod render;
mod scripting;
mod theme;
mod view;

use app::App;
use config::{ConfigEngine, Settings};
use render::Renderer;

/// Interactive Rhai console
#[derive(Parser)]
#[command(name = "lark-console", version)]
struct Args {
    /// Script submitted line by line before the prompt opens
    script: Option<PathBuf>,

    /// Config file instead of ~/.config/lark/console.rhai
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip loading any config file
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Log file instead of ~/.config/lark/console.log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Code submitted at startup, after SCRIPT; may be repeated
    #[arg(short = 'e', long = "eval")]
    eval: Vec<String>,
}

/// Log to a file; the terminal belongs to the console
fn init_logging(path: Option<PathBuf>) -> std::io::Result<()> {
    let Some(path) = path.or_else(ConfigEngine::log_file) else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let log_file = std::fs::File::create(&path)?;

    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("LARK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_settings(args: &Args) -> Settings {
    if args.no_config {
        return Settings::default();
    }

    let mut config = ConfigEngine::new();
    let loaded = match &args.config {
        Some(path) => config.load_file(path),
        None => config.load_default(),
    };
    // A broken config should not keep the console from starting
    if let Err(err) = loaded {
        warn!(%err, "using default settings");
        return Settings::default();
    }
    config.settings()
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.clone())?;

    let settings = load_settings(&args);
    let mut app = App::new(&settings).map_err(std::io::Error::other)?;

    if let Some(path) = &args.script {
        let script = std::fs::read_to_string(path)?;
        info!(path = %path.display(), "running startup script");
        app.session.submit_script(&script);
    }
    for code in &args.eval {
        app.session.submit_script(code);
    }

    // Set up terminal
    Renderer::setup()?;
    let mut renderer = Renderer::new()?;

    // Initial render
    app.clamp_scroll(renderer.transcript_height(&app));
    renderer.render(&app)?;

    // Event stream for async key reading
    let mut event_stream = EventStream::new();

    // Main loop
    while app.running {
        tokio::select! {
            Some(Ok(event)) = event_stream.next() => {
                if let Event::Resize(width, height) = event {
                    renderer.resize(width, height);
                }
                input::handle_event(&mut app, event);
                app.clamp_scroll(renderer.transcript_height(&app));
                renderer.render(&app)?;
            }
            else => break,
        }
    }

    // Cleanup
    Renderer::teardown()?;

    Ok(())
}
