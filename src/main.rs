mod display;

use std::path::PathBuf;

use display::{Display, RenderTarget};
use log::{info, warn};
use rasterpaint::app::{App, Control};
use rasterpaint::config::{Config, DEFAULT_CONFIG_PATH};
use rasterpaint::toolbar::Toolbar;
use rasterpaint::util::{FpsCounter, Rng};

/// Command line overrides applied on top of the config file
#[derive(Default)]
struct Args {
    config: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    no_vsync: bool,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => parsed.no_vsync = true,
            "--config" => {
                if i + 1 < args.len() {
                    parsed.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        parsed.width = Some(w);
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        parsed.height = Some(h);
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // WxH, e.g. 1024x768
                    if let Some((w, h)) = args[i + 1].split_once('x') {
                        if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                            parsed.width = Some(w);
                            parsed.height = Some(h);
                        }
                    }
                    i += 1;
                }
            },
            "--help" => {
                let defaults = Config::default();
                println!("Usage: rasterpaint [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --config PATH         Settings file (default: {})",
                    DEFAULT_CONFIG_PATH
                );
                println!(
                    "  --width W, -w W       Set canvas width (default: {})",
                    defaults.width
                );
                println!(
                    "  --height H, -h H      Set canvas height (default: {})",
                    defaults.height
                );
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1024x768)");
                println!("  --no-vsync            Disable VSync for uncapped framerate");
                println!("  --help                Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    parsed
}

fn load_config(args: &Args) -> Config {
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = match Config::load(&path) {
        Ok(config) => {
            info!("Loaded settings from {}", path.display());
            config
        },
        // A missing default file is the normal case; only complain about explicit paths
        Err(e) if args.config.is_some() || path.exists() => {
            warn!("Using default settings: {}", e);
            Config::default()
        },
        Err(_) => Config::default(),
    };

    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if args.no_vsync {
        config.vsync = false;
    }
    config
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let config = load_config(&args);
    let (width, height) = (config.width, config.height);

    let (mut display, texture_creator) =
        Display::with_options("rasterpaint", width, height, config.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;

    let toolbar = Toolbar::load(&config.icon_dir);
    info!("=== rasterpaint ===");
    info!("Resolution: {}x{}", width, height);
    if config.vsync {
        info!("VSync: ON. Use --no-vsync for uncapped.");
    } else {
        info!("VSync: OFF (uncapped framerate)");
    }
    info!("Controls:");
    info!("  1-4        - Line, Rectangle, Circle, Triangle");
    info!("  5          - Eraser");
    info!("  6          - Particle demo");
    info!("  F          - Toggle fill");
    info!("  +/-, wheel - Border width");
    info!("  C          - Clear canvas");
    info!("  S          - Save to {}", config.output_path.display());
    info!("  L          - Load {}", config.image_path.display());
    info!("  Escape     - Quit");

    let mut app = App::new(config, toolbar, Rng::from_time());

    // FPS counter with 60 sample rolling average
    let mut fps_counter = FpsCounter::new(60);
    let mut frame_count: u32 = 0;

    'main: loop {
        let (dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            if app.handle_event(&event) == Control::Quit {
                break 'main;
            }
        }

        app.update(dt);
        display.present(&mut target, app.render())?;

        frame_count = frame_count.wrapping_add(1);
        if frame_count % 30 == 0 {
            display.set_title(&format!("rasterpaint - {} fps", avg_fps as u32));
        }
    }

    Ok(())
}
