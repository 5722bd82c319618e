//! Chaos Game - Rust Implementation
//!
//! CLI commands:
//! - list: List built-in and custom fractals
//! - show: Print a fractal description in file format
//! - run: Play the chaos game and print the canvas
//! - export: Write a fractal description to a file
//! - import: Copy a description file into the fractal directory
//! - new: Build a custom fractal from bounds and transform rows

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use chaos_game::config::{Config, Overrides};
use chaos_game::file_handler::{self, parse_numbers};
use chaos_game::{
    log_error, logging, BuiltinFractal, ChaosGame, ChaosGameDescription, Complex, DescriptionFactory, Vector2d,
};

#[derive(Parser)]
#[command(name = "chaos_game")]
#[command(about = "Chaos game simulator for iterated function systems")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to chaos_game.yaml config
    #[arg(short, long, default_value = "chaos_game.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in and custom fractals
    List,

    /// Print a fractal description in file format
    Show {
        /// Built-in or custom fractal name
        name: String,
    },

    /// Play the chaos game and print the canvas
    Run {
        /// Built-in or custom fractal name
        #[arg(short, long, conflicts_with = "file")]
        fractal: Option<String>,

        /// Description file to load instead of a named fractal
        #[arg(long)]
        file: Option<PathBuf>,

        /// Steps to run (negative clears the canvas)
        #[arg(short, long, allow_hyphen_values = true)]
        steps: Option<i32>,

        #[arg(long)]
        width: Option<usize>,

        #[arg(long)]
        height: Option<usize>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Move the Julia center after running and replay the steps
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        center: Option<Vector2d>,

        /// Write the canvas here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a fractal description to a file
    Export {
        name: String,
        path: PathBuf,
    },

    /// Copy a description file into the fractal directory
    Import {
        path: PathBuf,

        /// Store under this name instead of the file stem
        #[arg(long)]
        name: Option<String>,
    },

    /// Build a custom fractal from bounds and transform rows
    New {
        name: String,

        /// Lower-left corner as X,Y
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        min: Vector2d,

        /// Upper-right corner as X,Y
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        max: Vector2d,

        /// Affine map as a00,a01,a10,a11,b0,b1 (repeatable)
        #[arg(long, value_parser = parse_affine_row, allow_hyphen_values = true, conflicts_with = "julia")]
        affine: Vec<[f64; 6]>,

        /// Julia center as RE,IM
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        julia: Option<Vector2d>,

        /// Replace an existing custom fractal
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let overrides = Overrides::load();

    // Initialize logging first
    logging::init_logging(&overrides.log_dir)?;
    tracing::info!("Chaos Game starting up");

    let cli = Cli::parse();
    tracing::debug!("CLI args parsed: config={:?}", cli.config);

    let mut config = Config::load_or_default(&cli.config)?;
    config.apply(&overrides);
    tracing::info!(
        "Config loaded: canvas {}x{}, fractal dir {:?}",
        config.canvas.width,
        config.canvas.height,
        config.fractal_dir
    );

    let factory = DescriptionFactory::new(&config.fractal_dir);

    let result = run_command(cli.command, &config, &factory);
    if let Err(e) = &result {
        log_error!(e);
    }
    result
}

fn run_command(command: Commands, config: &Config, factory: &DescriptionFactory) -> anyhow::Result<()> {
    match command {
        Commands::List => list_fractals(factory),
        Commands::Show { name } => show_fractal(factory, &name),
        Commands::Run {
            fractal,
            file,
            steps,
            width,
            height,
            seed,
            center,
            output,
        } => {
            let (description, name) = match file {
                Some(path) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("file")
                        .to_string();
                    (file_handler::read_from_file(&path)?, name)
                }
                None => {
                    let name = fractal.unwrap_or_else(|| config.default_fractal.clone());
                    (factory.get(&name)?, name)
                }
            };
            let run = RunOptions {
                steps: steps.unwrap_or(config.steps),
                width: width.unwrap_or(config.canvas.width),
                height: height.unwrap_or(config.canvas.height),
                seed: seed.or(config.seed),
                center: center.map(Complex::from),
            };
            run_game(description, &name, &run, output.as_deref())
        }
        Commands::Export { name, path } => export_fractal(factory, &name, &path),
        Commands::Import { path, name } => {
            let stored = factory.import_file(&path, name.as_deref())?;
            println!("Imported {:?} as '{}'", path, stored);
            Ok(())
        }
        Commands::New {
            name,
            min,
            max,
            affine,
            julia,
            force,
        } => {
            let rows = match julia {
                Some(c) => vec![c.coords().to_vec()],
                None => affine.iter().map(|row| row.to_vec()).collect(),
            };
            new_fractal(factory, &name, min, max, &rows, force)
        }
    }
}

struct RunOptions {
    steps: i32,
    width: usize,
    height: usize,
    seed: Option<u64>,
    center: Option<Complex>,
}

/// Run the game and print or save the canvas
fn run_game(
    description: ChaosGameDescription,
    name: &str,
    opts: &RunOptions,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    if opts.width == 0 || opts.height == 0 {
        anyhow::bail!("Canvas must be at least 1x1, got {}x{}", opts.width, opts.height);
    }

    let mut game = match opts.seed {
        Some(seed) => ChaosGame::with_seed(description, opts.width, opts.height, seed),
        None => ChaosGame::new(description, opts.width, opts.height),
    };
    game.set_description_name(name);

    let updates = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&updates);
    game.register_observer(move || counter.set(counter.get() + 1));

    tracing::info!("Running '{}' for {} steps on {}x{}", name, opts.steps, opts.width, opts.height);
    game.run_steps(opts.steps);

    if let Some(center) = opts.center {
        game.move_julia_center(center)
            .with_context(|| format!("Cannot move center of '{}'", name))?;
        tracing::info!("Moved Julia center to {}", center);
    }
    tracing::debug!("Observer notified {} times", updates.get());

    let canvas = game.canvas();
    let art = canvas.render_ascii();
    match output {
        Some(path) => {
            std::fs::write(path, &art)?;
            println!("Canvas written to {:?}", path);
        }
        None => print!("{}", art),
    }
    println!(
        "{}: {} total steps, {} of {} pixels set",
        game.description_name(),
        game.total_steps(),
        canvas.count_set(),
        canvas.width() * canvas.height()
    );
    Ok(())
}

/// List built-in and custom fractals
fn list_fractals(factory: &DescriptionFactory) -> anyhow::Result<()> {
    println!("Built-in fractals ({}):", BuiltinFractal::ALL.len());
    for builtin in BuiltinFractal::ALL {
        let d = builtin.description();
        println!("  - {} [{}] ({}, {} transforms)", builtin.display_name(), builtin.name(), d.kind(), d.transforms().len());
    }

    let custom = factory.custom_names()?;
    println!();
    println!("Custom fractals in {:?} ({}):", factory.fractal_dir(), custom.len());
    for name in custom {
        match factory.load_custom(&name) {
            Ok(d) => println!("  - {} ({}, {} transforms)", name, d.kind(), d.transforms().len()),
            Err(e) => println!("  - {} [unreadable: {}]", name, e),
        }
    }
    Ok(())
}

fn show_fractal(factory: &DescriptionFactory, name: &str) -> anyhow::Result<()> {
    let description = factory.get(name)?;
    print!("{}", description);
    Ok(())
}

fn export_fractal(factory: &DescriptionFactory, name: &str, path: &Path) -> anyhow::Result<()> {
    let description = factory.get(name)?;
    file_handler::write_to_file(&description, path)?;
    println!("Exported '{}' to {:?}", name, path);
    Ok(())
}

fn new_fractal(
    factory: &DescriptionFactory,
    name: &str,
    min: Vector2d,
    max: Vector2d,
    rows: &[Vec<f64>],
    force: bool,
) -> anyhow::Result<()> {
    if BuiltinFractal::from_name(name).is_some() {
        anyhow::bail!("'{}' is a built-in fractal name", name);
    }
    if factory.custom_exists(name) && !force {
        anyhow::bail!("Custom fractal '{}' already exists (use --force to replace)", name);
    }

    let description = ChaosGameDescription::from_rows(min, max, rows)?;
    let path = factory.store_custom(name, &description)?;
    println!("Saved '{}' ({}) to {:?}", name, description.kind(), path);
    Ok(())
}

fn parse_vector(s: &str) -> Result<Vector2d, String> {
    let [x0, x1] = parse_numbers::<2>(s, 1).map_err(|e| e.to_string())?;
    Ok(Vector2d::new(x0, x1))
}

fn parse_affine_row(s: &str) -> Result<[f64; 6], String> {
    parse_numbers::<6>(s, 1).map_err(|e| e.to_string())
}
