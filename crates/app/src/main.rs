use std::{collections::VecDeque, path::PathBuf};

use clap::Parser;
use studio_shell_core::{
    DirStorage, FrameContext, HeadlessHost, InputState, Mode, ProjectRuntime, Screen, Screens,
    ShellRequest, Storage, Studio, StudioConfig, StudioError,
};
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "config.json";
const START_FRAMES: u32 = 60;

fn main() -> studio_shell_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let fs = match &cli.fs {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let storage = DirStorage::open(&fs)?;

    let config_path = cli.config.clone().unwrap_or_else(|| fs.join(CONFIG_FILE));
    let mut config = StudioConfig::load(&config_path)?;
    config.no_sound |= cli.nosound;
    config.fullscreen |= cli.fullscreen;
    if let Some(scale) = cli.scale {
        config.ui_scale = scale;
    }

    let cart = match &cli.cart {
        Some(name) => {
            let bytes = storage
                .load(name)
                .ok_or_else(|| StudioError::msg(format!("unable to load {name}")))?;
            let mdate = storage.modified(name);
            Some((name.clone(), bytes, mdate))
        }
        None => None,
    };

    let commands = cli
        .cmd
        .as_deref()
        .map(|cmd| cmd.split('&').map(|line| line.trim().to_string()).collect())
        .unwrap_or_default();

    let mut screens = Screens::new();
    screens.insert(Mode::Start, Box::new(StartScreen::new(cli.skip)));
    screens.insert(Mode::Console, Box::new(ConsoleScreen { commands }));

    let mut studio = Studio::new(config, screens, LoggingRuntime, HeadlessHost::new(), storage);

    if let Some((name, bytes, mdate)) = cart {
        studio.project_loaded(bytes, &name, mdate);
    }

    tracing::info!(
        frames = cli.frames,
        root = ?studio.storage().root(),
        "starting headless session"
    );

    let mut input = InputState::new();
    for _ in 0..cli.frames {
        studio.tick(&mut input);
        input.end_frame();

        let name = studio.project().name.clone();
        if !name.is_empty() {
            let mdate = studio.storage().modified(&name);
            studio.check_external_change(mdate);

            if studio.take_reload_request() {
                if let Some(bytes) = studio.storage().load(&name) {
                    studio.project_loaded(bytes, &name, mdate);
                }
            }
        }

        if studio.should_quit() {
            break;
        }
    }

    tracing::info!(mode = ?studio.mode(), "session finished");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Fantasy console studio shell", long_about = None)]
struct Cli {
    /// Cart to load, relative to the file system folder.
    cart: Option<String>,
    /// Skip the startup animation.
    #[arg(long)]
    skip: bool,
    /// Disable sound output.
    #[arg(long)]
    nosound: bool,
    /// Enable fullscreen mode.
    #[arg(long)]
    fullscreen: bool,
    /// Path to the file system folder.
    #[arg(long)]
    fs: Option<PathBuf>,
    /// Main window scale.
    #[arg(long)]
    scale: Option<u32>,
    /// Run commands in the console, separated by `&`.
    #[arg(long)]
    cmd: Option<String>,
    /// Configuration file, defaults to config.json in the file system folder.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of frames to run before exiting.
    #[arg(long, default_value_t = 600)]
    frames: u64,
}

/// Runtime stand-in that only logs what the shell asks of it.
struct LoggingRuntime;

impl ProjectRuntime for LoggingRuntime {
    fn pause(&mut self) {
        tracing::debug!("runtime paused");
    }

    fn resume(&mut self) {
        tracing::debug!("runtime resumed");
    }

    fn reset(&mut self) {
        tracing::debug!("runtime reset");
    }

    fn init_run(&mut self) {
        tracing::info!("project started");
    }
}

/// Startup screen; hands over to the console after a second.
struct StartScreen {
    remaining: u32,
}

impl StartScreen {
    fn new(skip: bool) -> Self {
        Self {
            remaining: if skip { 0 } else { START_FRAMES },
        }
    }
}

impl Screen for StartScreen {
    fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        if self.remaining == 0 || ctx.input.any_key_pressed() {
            ctx.request(ShellRequest::SetMode(Mode::Console));
        } else {
            self.remaining -= 1;
        }
    }
}

/// Console that replays the commands given on the command line, one per frame.
struct ConsoleScreen {
    commands: VecDeque<String>,
}

impl Screen for ConsoleScreen {
    fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(command) = self.commands.pop_front() else {
            return;
        };

        tracing::info!(%command, "console command");
        let request = match command.as_str() {
            "" => return,
            "run" => ShellRequest::RunProject,
            "save" => ShellRequest::SaveProject,
            "exit" | "quit" => ShellRequest::Exit,
            "surf" => ShellRequest::SetMode(Mode::Surf),
            "code" => ShellRequest::SetMode(Mode::Code),
            "sprite" => ShellRequest::SetMode(Mode::Sprite),
            "map" => ShellRequest::SetMode(Mode::Map),
            "sfx" => ShellRequest::SetMode(Mode::Sfx),
            "music" => ShellRequest::SetMode(Mode::Music),
            other => ShellRequest::ShowPopup(format!("unknown command: {other}")),
        };
        ctx.request(request);
    }
}
