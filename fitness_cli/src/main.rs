mod display;
mod interactive;

use clap::{Parser, Subcommand};
use fitness_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fitrack")]
#[command(about = "Workout set tracker with a rest timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable the wall clock - the rest timer only advances with `wait <secs>`
    #[arg(long, global = true)]
    no_clock: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available routines
    Routines,

    /// Show the exercises of a routine
    Show {
        /// Routine (upper, lower)
        routine: RoutineKind,
    },

    /// Show the warm-up for a routine
    Warmup {
        /// Routine (upper, lower)
        routine: RoutineKind,
    },

    /// Start a workout directly, skipping the selection screen
    Start {
        /// Routine (upper, lower)
        routine: RoutineKind,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fitness_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        Some(Commands::Routines) => {
            for routine in &catalog.routines {
                println!("{:<6} {} ({})", routine.kind, routine.title, routine.focus);
                println!("       {}", display::routine_stats(routine));
            }
            Ok(())
        }
        Some(Commands::Show { routine }) => {
            let routine = find_routine(catalog, routine)?;
            let abs_rule = AbsLimitRule::from_config(routine, &config.abs_limit);
            display::print_routine(routine, abs_rule.as_ref());
            Ok(())
        }
        Some(Commands::Warmup { routine }) => {
            display::print_warm_up(find_routine(catalog, routine)?);
            Ok(())
        }
        Some(Commands::Start { routine }) => {
            let mut nav = Navigator::new(catalog, config);
            nav.select(routine)?;
            interactive::run(nav, !cli.no_clock)
        }
        None => {
            // Default to the selection screen
            let nav = Navigator::new(catalog, config);
            interactive::run(nav, !cli.no_clock)
        }
    }
}

fn find_routine(catalog: &Catalog, kind: RoutineKind) -> Result<&Routine> {
    catalog
        .routine(kind)
        .ok_or_else(|| Error::UnknownRoutine(kind.to_string()))
}
