//! Command line entry point for the Game of Life runner

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use conway_life::{
    analysis::StabilityExperiment,
    app::{board_from_config, run_interactive},
    config::{CliOverrides, Settings},
    game_of_life::{create_example_patterns, load_state, save_state},
    utils::{BoardFormatter, ColorOutput},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "conway_life")]
#[command(about = "Conway's Game of Life on a wrap-around board")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Board options shared by every subcommand
#[derive(Args, Debug, Clone)]
struct BoardArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Board width (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Board height (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Cell size (overrides config)
    #[arg(long)]
    cell_size: Option<usize>,

    /// Initial live density (overrides config)
    #[arg(short, long)]
    density: Option<f64>,

    /// Random seed (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive keyboard-driven loop
    Run {
        #[command(flatten)]
        board: BoardArgs,

        /// Frame file used by the save/load keys (overrides config)
        #[arg(short, long)]
        frame: Option<PathBuf>,
    },

    /// Load a frame, advance it, and print the result
    Step {
        #[command(flatten)]
        board: BoardArgs,

        /// Frame to start from
        #[arg(short, long)]
        input: PathBuf,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: usize,

        /// Save the final frame here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print live-cell and symmetry counts for a frame
    Stats {
        #[command(flatten)]
        board: BoardArgs,

        /// Frame to inspect
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Time how long random boards take to stabilize
    Stability {
        #[command(flatten)]
        board: BoardArgs,

        /// Number of trials (overrides config)
        #[arg(short, long)]
        trials: Option<usize>,

        /// Generation cutoff per trial (overrides config)
        #[arg(short, long)]
        max_generations: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a default configuration and the example pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { board, frame } => {
            let mut settings = load_settings(&board)?;
            settings.merge_with_cli(&CliOverrides {
                frame_path: frame,
                ..Default::default()
            });
            run_interactive(settings)
        }
        Commands::Step {
            board,
            input,
            generations,
            output,
        } => step_command(board, input, generations, output),
        Commands::Stats { board, input } => stats_command(board, input),
        Commands::Stability {
            board,
            trials,
            max_generations,
            json,
        } => stability_command(board, trials, max_generations, json),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Config file (or defaults) with command line overrides applied
fn load_settings(args: &BoardArgs) -> Result<Settings> {
    let mut settings = if args.config.exists() {
        Settings::from_file(&args.config)
            .with_context(|| format!("Failed to load config from {}", args.config.display()))?
    } else {
        tracing::warn!("config file {} not found, using defaults", args.config.display());
        Settings::default()
    };

    settings.merge_with_cli(&CliOverrides {
        width: args.width,
        height: args.height,
        cell_size: args.cell_size,
        live_density: args.density,
        seed: args.seed,
        frame_path: None,
    });

    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn step_command(
    args: BoardArgs,
    input: PathBuf,
    generations: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(&args)?;
    let mut board = board_from_config(&settings.board);
    board.clear();
    load_state(&mut board, &input)
        .with_context(|| format!("Failed to load frame from {}", input.display()))?;

    for _ in 0..generations {
        board.advance();
    }

    println!("Generation {}:", generations);
    print!("{}", BoardFormatter::format_board(&board));
    print!("{}", BoardFormatter::format_status(&board));

    if let Some(output) = output {
        save_state(&board, &output)
            .with_context(|| format!("Failed to save frame to {}", output.display()))?;
        println!("{}", ColorOutput::success(&format!("Saved to {}", output.display())));
    }

    Ok(())
}

fn stats_command(args: BoardArgs, input: PathBuf) -> Result<()> {
    let settings = load_settings(&args)?;
    let mut board = board_from_config(&settings.board);
    board.clear();
    load_state(&mut board, &input)
        .with_context(|| format!("Failed to load frame from {}", input.display()))?;

    println!("Board ({}x{}):", board.columns(), board.rows());
    print!("{}", BoardFormatter::format_board_with_coords(&board));
    println!("Elements: {}", board.count_elements());
    print!("{}", BoardFormatter::format_status(&board));

    Ok(())
}

fn stability_command(
    args: BoardArgs,
    trials: Option<usize>,
    max_generations: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut settings = load_settings(&args)?;
    if let Some(trials) = trials {
        settings.stability.trials = trials;
    }
    if let Some(max_generations) = max_generations {
        settings.stability.max_generations = max_generations;
    }
    settings.validate().context("Configuration validation failed")?;

    let start_time = Instant::now();
    let report = StabilityExperiment::from_settings(&settings).run();

    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        print!("{}", report);
        println!(
            "{}",
            ColorOutput::info(&format!("Finished in {:.3}s", start_time.elapsed().as_secs_f64()))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config/default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let patterns_dir = directory.join("patterns");
    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("Run: cargo run -- run --config {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "conway_life",
            "step",
            "--input",
            "frame.txt",
            "--generations",
            "5",
            "--width",
            "12",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["conway_life", "stability", "--json", "--trials", "3"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config_path = temp_dir.path().join("config/default.yaml");
        assert!(config_path.exists());
        assert!(Settings::from_file(&config_path).is_ok());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());
    }

    #[test]
    fn test_step_command_writes_output() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        let output = temp_dir.path().join("out/blinker.txt");

        let args = BoardArgs {
            config: temp_dir.path().join("config/default.yaml"),
            width: Some(5),
            height: Some(5),
            cell_size: None,
            density: None,
            seed: Some(1),
        };
        step_command(
            args,
            temp_dir.path().join("patterns/blinker.txt"),
            1,
            Some(output.clone()),
        )
        .unwrap();

        // Horizontal blinker in row 2 turns vertical in column 3
        let content = std::fs::read_to_string(output).unwrap();
        assert_eq!(content, "     \n   * \n   * \n   * \n     \n");
    }
}
