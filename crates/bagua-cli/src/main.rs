//! CLI frontend for the Bagua hexagram engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "bagua",
    about = "Bagua: hexagram transformations, casting, and readings",
    version,
    propagate_version = true
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the casting commands.
#[derive(Args)]
struct CastOptions {
    /// RNG seed for reproducible casts
    #[arg(short, long)]
    seed: Option<u64>,

    /// Line draw method: uniform or coins
    #[arg(short, long, default_value = "uniform")]
    method: String,

    /// Fresh-cast attempts before falling back
    #[arg(long, default_value = "10")]
    attempts: u32,

    /// JSON file with hexagram content records
    #[arg(short, long)]
    content: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a hexagram by number or name
    Show {
        /// Hexagram number (1-64) or name
        hexagram: String,

        /// JSON file with hexagram content records
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the single-line transformation table
    Table {
        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Only verify the table and report
        #[arg(long)]
        check: bool,
    },

    /// List the eight trigrams under a mathematical model
    Trigrams {
        /// Model: abstract or concrete
        #[arg(short, long, default_value = "abstract")]
        model: String,

        /// Also show which upper/lower pairs have a meaning
        #[arg(short, long)]
        analysis: bool,

        /// Print the pair analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flip chosen lines of a hexagram and read the result
    Transform {
        /// Base hexagram (number or name)
        #[arg(required_unless_present = "upper", conflicts_with_all = ["upper", "lower"])]
        hexagram: Option<String>,

        /// Upper trigram: name, image, symbol, or 1-8
        #[arg(long, requires = "lower")]
        upper: Option<String>,

        /// Lower trigram: name, image, symbol, or 1-8
        #[arg(long, requires = "upper")]
        lower: Option<String>,

        /// Changing lines counted from the bottom, e.g. 1,3
        #[arg(short, long, value_delimiter = ',', conflicts_with = "to")]
        lines: Vec<u8>,

        /// Change exactly the lines that lead to this hexagram
        #[arg(long)]
        to: Option<String>,

        /// Print each single-line flip in order
        #[arg(long)]
        steps: bool,

        /// RNG seed for the order of related suggestions
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON file with hexagram content records
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Print the interpreter prompt
        #[arg(long)]
        prompt: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show topical links between hexagrams
    Links {
        /// Only this hexagram (number or name)
        hexagram: Option<String>,

        /// JSON file replacing the built-in link table
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show the interpretation guideline for a changing-line count
    Policy {
        /// Number of changing lines (0-6); all when omitted
        count: Option<usize>,
    },

    /// Cast hexagrams; casts after the first chain from the previous result
    Cast {
        /// Number of casts
        #[arg(
            short = 'n',
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        count: u32,

        #[command(flatten)]
        options: CastOptions,

        /// Print the interpreter prompt for each cast
        #[arg(long)]
        prompt: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive divination session
    Session {
        #[command(flatten)]
        options: CastOptions,
    },

    /// Search content records by keyword
    Search {
        /// Keyword to look for
        keyword: String,

        /// JSON file with hexagram content records
        #[arg(short, long)]
        content: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = commands::startup_check().and_then(|()| match cli.command {
        Commands::Show {
            hexagram,
            content,
            json,
        } => commands::show::run(&hexagram, content.as_deref(), json),
        Commands::Table { json, check } => commands::table::run(json, check),
        Commands::Trigrams {
            model,
            analysis,
            json,
        } => commands::trigrams::run(&model, analysis, json),
        Commands::Transform {
            hexagram,
            upper,
            lower,
            lines,
            to,
            steps,
            seed,
            content,
            prompt,
            json,
        } => commands::transform::run(&commands::transform::TransformRequest {
            hexagram,
            upper,
            lower,
            lines,
            to,
            steps,
            seed,
            content,
            prompt,
            json,
        }),
        Commands::Links { hexagram, file } => {
            commands::links::run(hexagram.as_deref(), file.as_deref())
        }
        Commands::Policy { count } => commands::policy::run(count),
        Commands::Cast {
            count,
            options,
            prompt,
            json,
        } => commands::cast::run(&options.into(), count, prompt, json),
        Commands::Session { options } => commands::session::run(&options.into()),
        Commands::Search { keyword, content } => commands::search::run(&keyword, &content),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

impl From<CastOptions> for commands::CastSettings {
    fn from(options: CastOptions) -> Self {
        Self {
            seed: options.seed,
            method: options.method,
            attempts: options.attempts,
            content: options.content,
        }
    }
}
