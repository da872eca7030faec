use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use irs_core::config::{CONSULTANT_STOPWORDS, DEFAULT_TOP_N};
use irs_core::corpus::load_dir;
use irs_core::present::present;
use irs_core::{IrConfig, IrSystem, Scoring};
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "irs-consultant")]
#[command(about = "Answer questions from a directory of text files (e.g. man pages)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Directory of documents; the first line of each file is its title
    #[arg(long)]
    corpus: String,
    /// File extension to index
    #[arg(long, default_value = "txt")]
    ext: String,
    /// Ranking function: tf or bm25
    #[arg(long, default_value_t = Scoring::TermFrequency)]
    scoring: Scoring,
    /// Whitespace-separated stopwords
    #[arg(long, default_value = CONSULTANT_STOPWORDS)]
    stopwords: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents for a query; reads one query per line from stdin when none is given
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Number of results to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
        query: Vec<String>,
    },
    /// Print index statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { corpus, top, query } => {
            let system = build_system(&corpus)?;
            if query.is_empty() {
                answer_stdin(&system, top)
            } else {
                answer(&system, &query.join(" "), top, &mut io::stdout().lock())
            }
        }
        Commands::Stats { corpus } => {
            let system = build_system(&corpus)?;
            let index = system.index();
            println!("documents:   {}", index.num_docs());
            println!("terms:       {}", index.num_terms());
            println!("avg length:  {:.2}", index.avg_doc_len());
            println!("scoring:     {}", system.scorer_name());
            Ok(())
        }
    }
}

fn build_system(args: &CorpusArgs) -> Result<IrSystem> {
    let config = IrConfig { stopwords: args.stopwords.clone(), scoring: args.scoring };
    let mut system = IrSystem::with_config(&config);
    let docs = load_dir(&args.corpus, &args.ext)?;
    system.index_collection_parallel(&docs)?;
    tracing::info!(corpus = %args.corpus, num_docs = system.len(), scoring = %args.scoring, "index ready");
    Ok(system)
}

fn answer(system: &IrSystem, query: &str, top: usize, out: &mut impl Write) -> Result<()> {
    let results = system.query(query, top);
    if results.is_empty() {
        writeln!(out, "no matches for '{query}'")?;
    }
    for line in present(system, &results) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn answer_stdin(system: &IrSystem, top: usize) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        answer(system, &line, top, &mut out)?;
        out.flush()?;
    }
    Ok(())
}
