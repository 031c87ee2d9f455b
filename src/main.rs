//! Opencross - CLI
//!
//! Themed crossword generator with a playable TUI and batch commands.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use opencross::{
    commands::{GenerateRequest, generate_puzzle, run_benchmark},
    config::{DEFAULT_ATTEMPTS, GeneratorConfig, SizeClass},
    generator::{Generator, StrategyType},
    lexicon::{EmbeddedLexicon, FileLexicon, Lexicon, ThemeBank},
    logging,
    output::{print_benchmark_result, print_puzzle, print_themes},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "opencross",
    about = "Themed crossword generator with an interactive player",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Puzzle size: tiny, bite (default), normal, large, massive
    #[arg(short = 'z', long, global = true, default_value = "bite")]
    size: SizeClass,

    /// Built-in theme to draw words from (see `themes`)
    #[arg(short, long, global = true, conflicts_with = "topic")]
    theme: Option<String>,

    /// Free-text topic matched against theme names, keywords and clues
    #[arg(long, global = true)]
    topic: Option<String>,

    /// Placement strategy: grid-scan (default) or anchor
    #[arg(short, long, global = true, default_value = "grid-scan")]
    strategy: String,

    /// Layout attempts per puzzle; the densest wins
    #[arg(short, long, global = true, default_value_t = DEFAULT_ATTEMPTS)]
    attempts: usize,

    /// Seed for reproducible word selection and layouts
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Word list file (WORD<TAB>clue lines, optional `# name:` sections)
    #[arg(short = 'l', long, global = true)]
    lexicon: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Generate one puzzle and print it
    Generate {
        /// Print the answers in the grid
        #[arg(long)]
        solution: bool,
    },

    /// Generate many puzzles and report yield and density
    Benchmark {
        /// Number of puzzles to generate
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// List the built-in themes
    Themes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.as_ref().unwrap_or(&Commands::Play);

    if matches!(command, Commands::Play) {
        logging::init_quiet_logger();
    } else {
        logging::init_logger(cli.verbose);
    }

    let (lexicon, bank) = load_lexicon(&cli)?;
    let config = GeneratorConfig::default()
        .with_attempts(cli.attempts)
        .with_seed(cli.seed);
    let generator = Generator::new(
        StrategyType::from_name(&cli.strategy, config.growth_cycles),
        config,
    );

    match command {
        Commands::Play => run_play_command(lexicon.as_ref(), &bank, generator, cli.size),
        Commands::Generate { solution } => {
            let topic = resolve_topic(&cli, &bank)?;
            let result = generate_puzzle(
                GenerateRequest::new(topic, cli.size),
                &generator,
                lexicon.as_ref(),
            )?;
            print_puzzle(&result, *solution);
            Ok(())
        }
        Commands::Benchmark { count } => {
            let topics = match (&cli.theme, &cli.topic) {
                (None, None) => bank.themes().iter().map(|t| t.name().to_string()).collect(),
                _ => vec![resolve_topic(&cli, &bank)?],
            };
            println!(
                "Generating {count} {} puzzles across {} topic(s)...",
                cli.size.name(),
                topics.len()
            );
            let result = run_benchmark(
                &generator,
                lexicon.as_ref(),
                &topics,
                cli.size,
                *count,
                true,
            );
            print_benchmark_result(&result);
            Ok(())
        }
        Commands::Themes => {
            print_themes(&bank);
            Ok(())
        }
    }
}

/// Load the word source selected by `--lexicon`
///
/// Returns the lexicon plus a copy of its theme bank for topic lookups.
fn load_lexicon(cli: &Cli) -> Result<(Box<dyn Lexicon>, ThemeBank)> {
    if let Some(path) = &cli.lexicon {
        let lexicon = FileLexicon::load(path)
            .with_context(|| format!("loading lexicon {}", path.display()))?
            .with_seed(cli.seed);
        let bank = lexicon.bank().clone();
        Ok((Box::new(lexicon), bank))
    } else {
        let lexicon = EmbeddedLexicon::new().with_seed(cli.seed);
        let bank = lexicon.bank().clone();
        Ok((Box::new(lexicon), bank))
    }
}

/// Topic for a single puzzle: `--theme`, then `--topic`, then a random theme
fn resolve_topic(cli: &Cli, bank: &ThemeBank) -> Result<String> {
    if let Some(name) = &cli.theme {
        return Ok(bank.theme(name)?.name().to_string());
    }
    if let Some(topic) = &cli.topic {
        if topic.trim().is_empty() {
            bail!("topic must not be empty");
        }
        return Ok(topic.trim().to_string());
    }
    bank.random_theme(&mut rand::rng())
        .map(|theme| theme.name().to_string())
        .context("the word list has no themes")
}

fn run_play_command(
    lexicon: &dyn Lexicon,
    bank: &ThemeBank,
    generator: Generator<StrategyType>,
    size: SizeClass,
) -> Result<()> {
    use opencross::interactive::{App, run_tui};

    let app = App::new(lexicon, bank, generator, size);
    run_tui(app)
}
