// This is free and unencumbered software released into the public domain.

mod config;
mod report;

use clap::Parser;
use flowgraph::{FlowGraph, Script};
use std::{
    fs::{File, OpenOptions},
    io::{stdin, stdout, Read, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{
    config::{EditConfig, OutputFormat},
    report::Report,
};

#[derive(Parser, Debug)]
/// Switch target editor for control-flow graphs
#[clap(name = "flowedit", version, about)]
struct Options {
    #[clap(short = 'd', long, value_parser)]
    debug: bool,

    /// Emit the edited graph as DOT instead of a report
    #[clap(long, value_parser)]
    dot: bool,

    /// Report format
    #[clap(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Graph description
    #[clap(value_name = "GRAPH", value_parser, default_value = "/dev/stdin")]
    graph: PathBuf,

    /// Edits to apply, one per line
    #[clap(value_name = "SCRIPT", value_parser)]
    script: Option<PathBuf>,

    #[clap(
        short = 'o',
        value_name = "FILE",
        value_parser,
        default_value = "/dev/stdout"
    )]
    output: PathBuf,

    #[clap(short = 'v', long, value_parser)]
    verbose: bool,
}

macro_rules! abort {
    ($($t:tt)*) => {{
        eprintln!($($t)*);
        std::process::exit(1)
    }};
}

fn read_input(path: &Path) -> String {
    let mut input = match path.to_str() {
        Some("/dev/stdin") | Some("-") => Box::new(stdin()) as Box<dyn Read>,
        _ => match File::open(path) {
            Ok(file) => Box::new(file) as Box<dyn Read>,
            Err(err) => abort!("Could not open input file `{}': {}", path.display(), err),
        },
    };

    let mut buffer = String::new();
    if let Err(err) = input.read_to_string(&mut buffer) {
        abort!("Could not read input file `{}': {}", path.display(), err);
    }
    buffer
}

fn main() -> impl std::process::Termination {
    let options = Options::parse_from(wild::args());
    let config = EditConfig::new(options.debug, options.verbose, options.format, options.dot);
    config.init_tracing();
    debug!(?options, "parsed options");

    let mut graph = match read_input(&options.graph).parse::<FlowGraph>() {
        Ok(graph) => graph,
        Err(err) => abort!("Could not parse graph `{}': {:#}", options.graph.display(), err),
    };
    info!(blocks = graph.len(), "graph loaded");

    let applied = match &options.script {
        None => Vec::new(),
        Some(path) => {
            let script = match read_input(path).parse::<Script>() {
                Ok(script) => script,
                Err(err) => abort!("Could not parse script `{}': {:#}", path.display(), err),
            };
            match script.run(&mut graph) {
                Ok(applied) => applied,
                Err(err) => abort!("{:#}", err),
            }
        }
    };
    info!(edits = applied.len(), "script applied");

    if let Err(err) = graph.check_consistency() {
        abort!("Predecessor accounting diverged: {}", err);
    }

    let rendered = if config.dot {
        format!("digraph {{\n{}\n}}\n", graph.to_dot("cfg"))
    } else {
        let report = Report::new(&graph, &applied);
        match config.format {
            OutputFormat::Text => report.to_text(),
            OutputFormat::Json => match serde_json::to_string_pretty(&report) {
                Ok(json) => json + "\n",
                Err(err) => abort!("Could not serialize report: {}", err),
            },
        }
    };

    let mut output = match options.output.to_str() {
        Some("/dev/stdout") | Some("-") => Box::new(stdout()) as Box<dyn Write>,
        _ => match OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&options.output)
        {
            Ok(file) => Box::new(file) as Box<dyn Write>,
            Err(err) => abort!(
                "Could not open output file `{}': {}",
                options.output.display(),
                err
            ),
        },
    };

    if let Err(err) = output.write_all(rendered.as_bytes()) {
        abort!(
            "Could not write output file `{}': {}",
            options.output.display(),
            err
        );
    }
}
