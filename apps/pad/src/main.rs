use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use grid_core::{CanvasLayout, GridInteractionController, HttpPredictionClient};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    task::JoinSet,
};
use tracing::{info, warn};

mod config;
mod script;
mod terminal;

use config::{load_settings, Settings, DEFAULT_CONFIG_PATH};
use script::{parse_line, PadCommand};
use terminal::TerminalDisplay;

/// Paint a digit on a pixel grid and ask a classifier service what it is.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    grid_size: Option<usize>,
    #[arg(long)]
    cell_size_px: Option<f64>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Read commands from this file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.server_url {
            settings.server_url = v.clone();
        }
        if let Some(v) = self.grid_size {
            settings.grid_size = v;
        }
        if let Some(v) = self.cell_size_px {
            settings.cell_size_px = v;
        }
        if let Some(v) = self.timeout_ms {
            settings.request_timeout_ms = v;
        }
    }
}

struct Pad {
    controller: GridInteractionController,
    display: Arc<TerminalDisplay>,
    layout: CanvasLayout,
    pending: JoinSet<()>,
}

impl Pad {
    fn new(settings: &Settings) -> Result<Self> {
        let client = HttpPredictionClient::new(&settings.server_url, settings.request_timeout())
            .context("failed to build prediction client")?;
        info!(endpoint = %client.endpoint(), grid_size = settings.grid_size, "pad ready");

        let display = Arc::new(TerminalDisplay::new(settings.grid_size));
        let controller =
            GridInteractionController::new(settings.grid_size, display.clone(), Arc::new(client));
        Ok(Self {
            controller,
            display,
            layout: CanvasLayout::square(settings.grid_size, settings.cell_size_px),
            pending: JoinSet::new(),
        })
    }

    /// Returns `false` once the session should stop.
    fn handle(&mut self, command: PadCommand) -> Result<bool> {
        match command {
            PadCommand::Press { x, y } => {
                self.controller.pointer_pressed(&self.layout.hit_test(x, y))?;
            }
            PadCommand::Move { x, y } => {
                self.controller.pointer_moved(&self.layout.hit_test(x, y))?;
            }
            PadCommand::Release => self.controller.pointer_released(),
            PadCommand::Predict => {
                let prediction = self.controller.predict();
                self.pending.spawn(async move {
                    // Outcome is already on the display; nothing left to do here.
                    let _ = prediction.await;
                });
            }
            PadCommand::Reset => self.controller.reset(),
            PadCommand::Show => println!("{}", self.display.render()),
            PadCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn run(&mut self, input: impl AsyncBufRead + Unpin) -> Result<()> {
        let mut lines = input.lines();
        let mut line_no = 0usize;
        while let Some(line) = lines.next_line().await.context("failed to read command")? {
            line_no += 1;
            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    warn!(line = line_no, error = %err, "skipping command");
                    continue;
                }
            };
            if !self.handle(command)? {
                break;
            }
            self.reap_finished();
        }
        self.drain().await;
        Ok(())
    }

    fn reap_finished(&mut self) {
        while let Some(joined) = self.pending.try_join_next() {
            if let Err(err) = joined {
                warn!(error = %err, "prediction task aborted");
            }
        }
    }

    async fn drain(&mut self) {
        while let Some(joined) = self.pending.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "prediction task aborted");
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    args.apply(&mut settings);
    settings.validate().context("invalid pad settings")?;

    let mut pad = Pad::new(&settings)?;
    match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open script '{}'", path.display()))?;
            pad.run(BufReader::new(file)).await?;
        }
        None => pad.run(BufReader::new(tokio::io::stdin())).await?,
    }

    println!("{}", pad.display.render());
    Ok(())
}
