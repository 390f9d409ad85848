use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nutrify-cli", version, about = "Nutrify CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diet tracking: nutrient totals and streak
    Diet {
        #[command(subcommand)]
        action: commands::diet::DietAction,
    },
    /// Exercise tracking: daily completion flags and streak
    Exercise {
        #[command(subcommand)]
        action: commands::exercise::ExerciseAction,
    },
    /// Sleep tracking: last night's record and streak
    Sleep {
        #[command(subcommand)]
        action: commands::sleep::SleepAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Diet { action } => commands::diet::run(action),
        Commands::Exercise { action } => commands::exercise::run(action),
        Commands::Sleep { action } => commands::sleep::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
