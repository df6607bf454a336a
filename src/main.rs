use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

use tikznet::style::{LayoutSpec, VisualStyle};

#[derive(Parser, Debug)]
#[command(name = "tikznet")]
#[command(about = "Render graphs to tikz-network markup, CSV tables, or PDF", long_about = None)]
struct Args {
    /// Edge-list graph file, or '-' for stdin
    graph: PathBuf,

    /// Style configuration (JSON)
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Output file; the suffix picks the target (.tex, .csv, .pdf).
    /// Omitted: write network.tex plus CSV tables.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Layout algorithm (fr, circle, grid, random); overrides the style file
    #[arg(long)]
    layout: Option<String>,

    /// Layout seed; overrides the style file
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = if args.graph == PathBuf::from("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read graph from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.graph)
            .with_context(|| format!("Failed to read graph file {}", args.graph.display()))?
    };

    let graph = tikznet::parser::parse_edgelist(&input).context("Failed to parse graph")?;

    let mut style = match &args.style {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read style file {}", path.display()))?;
            VisualStyle::from_json(&json).context("Failed to parse style configuration")?
        }
        None => VisualStyle::default(),
    };
    if let Some(name) = args.layout {
        style.layout = Some(LayoutSpec::Algorithm(name));
    }
    if let Some(seed) = args.seed {
        style.seed = Some(seed);
    }

    let outcome = tikznet::plot(&graph, args.output.as_deref(), &style)
        .context("Failed to render graph")?;
    for path in outcome.written {
        println!("{}", path.display());
    }

    Ok(())
}
