use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use file_pattern::{find_numeric_pattern, format, parse, verify_round_trip, FilePattern};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "file-pattern")]
#[command(about = "Expand and synthesize file patterns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Debug,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pattern
    Validate {
        /// Pattern to validate
        pattern: String,
    },
    /// Print a pattern in canonical form
    Fmt {
        /// Pattern to format
        pattern: String,
    },
    /// Generate AST for a pattern
    Ast {
        /// Pattern to parse
        pattern: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "debug")]
        output_format: OutputFormat,
    },
    /// List the filenames a pattern denotes
    Expand {
        /// Pattern to expand
        pattern: String,

        /// Stop after this many names
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only print how many names the pattern denotes
        #[arg(short, long)]
        count: bool,
    },
    /// Build a pattern from a list of names
    Synthesize {
        /// Names to compress (read from --file or stdin when empty)
        names: Vec<String>,

        /// Read names from a file, one per line
        #[arg(short, long, conflicts_with = "names")]
        file: Option<PathBuf>,

        /// Template name (default: the first name)
        #[arg(short, long)]
        base: Option<String>,

        /// Skip checking that the pattern expands back to the names
        #[arg(long)]
        no_verify: bool,
    },
}

fn read_names(names: Vec<String>, file: Option<PathBuf>) -> Result<Vec<String>> {
    if let Some(path) = file {
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file '{}'", path.display()))?;
        return Ok(source
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect());
    }
    if !names.is_empty() {
        return Ok(names);
    }
    let mut names = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read names from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            names.push(line.to_string());
        }
    }
    Ok(names)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { pattern } => match FilePattern::new(pattern.as_str()) {
            Ok(parsed) => {
                match parsed.count() {
                    Some(n) => println!("✓ Pattern is valid ({} names)", n),
                    None => println!("✓ Pattern is valid"),
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("✗ Invalid pattern: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Fmt { pattern } => {
            let ast = parse(&pattern)?;
            println!("{}", format(&ast));
            Ok(())
        }
        Commands::Ast {
            pattern,
            output_format,
        } => {
            let ast = parse(&pattern)?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ast)?),
                OutputFormat::Debug => println!("{:#?}", ast),
            }
            Ok(())
        }
        Commands::Expand {
            pattern,
            limit,
            count,
        } => {
            let pattern = FilePattern::new(pattern)?;
            if count {
                match pattern.count() {
                    Some(n) => println!("{}", n),
                    None => anyhow::bail!("Pattern denotes more than {} names", u64::MAX),
                }
                return Ok(());
            }
            let names = pattern.filenames().take(limit.unwrap_or(usize::MAX));
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for name in names {
                writeln!(out, "{}", name)?;
            }
            Ok(())
        }
        Commands::Synthesize {
            names,
            file,
            base,
            no_verify,
        } => {
            let names = read_names(names, file)?;
            let Some(base) = base.or_else(|| names.first().cloned()) else {
                anyhow::bail!("No names given");
            };
            let pattern = find_numeric_pattern(&names, &base)?;
            if !no_verify {
                verify_round_trip(&pattern, &names)
                    .with_context(|| format!("Pattern '{}' does not cover the names", pattern))?;
            }
            println!("{}", pattern);
            Ok(())
        }
    }
}
