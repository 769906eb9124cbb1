use std::{fs, path::PathBuf, process};

use clap::{ArgAction, Parser};
use sharegraph::{
    Graph, GraphError, MergeConfig, MergeStrategy, OutputFormat, RootOrder,
    logging::{init_tracing, level_for_verbosity},
    parse_records,
    record::descriptors_to_json,
    safety::run_strict_safety_checks,
};

#[derive(Parser, Debug)]
#[command(
    name = "sharegraph",
    version,
    about = "Merge structurally identical subtrees of a labeled graph"
)]
struct Cli {
    #[arg(
        value_name = "FILE",
        help = "JSON array of {\"id\", \"value\", \"children\"} records"
    )]
    input: PathBuf,

    #[arg(
        long,
        value_enum,
        default_value_t = MergeStrategy::Postorder,
        help = "Canonicalization algorithm"
    )]
    strategy: MergeStrategy,

    #[arg(
        long,
        value_enum,
        default_value_t = RootOrder::Ascending,
        help = "Order in which the postorder pass visits roots"
    )]
    root_order: RootOrder,

    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Json,
        help = "Output format for the node list"
    )]
    format: OutputFormat,

    #[arg(long, help = "Verify the merged graph and fail on integrity issues")]
    strict: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Raise log verbosity (repeatable)")]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(level_for_verbosity(cli.verbose));
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = fs::read_to_string(&cli.input)
        .map_err(|e| GraphError::io(format!("{}: {e}", cli.input.display())))?;
    let records = parse_records(&input)?;
    let mut graph = Graph::from_records(&records)?;
    let roots = graph.roots();

    let config = MergeConfig {
        strategy: cli.strategy,
        root_order: cli.root_order,
    };
    graph.canonicalize(&config)?;
    if cli.strict {
        run_strict_safety_checks(&graph, &roots)?;
    }

    let descriptors = graph.descriptors();
    match cli.format {
        OutputFormat::Json => println!("{}", descriptors_to_json(&descriptors)?),
        OutputFormat::Text => {
            for descriptor in &descriptors {
                println!("{}", descriptor.to_line());
            }
        }
    }
    Ok(())
}
