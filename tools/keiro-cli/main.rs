use clap::Parser;
use keiro::prelude::*;
use std::fs;

/// A topology graph validation and conversion CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the topology JSON document
    topology_path: String,

    /// Optional path to a schema catalog JSON document
    #[arg(short, long)]
    catalog: Option<String>,

    /// Validate the topology and print any violations
    #[arg(long)]
    check: bool,

    /// Print the re-exported topology after an import/export round trip
    #[arg(long)]
    roundtrip: bool,

    /// Print the computed node positions
    #[arg(long)]
    layout: bool,
}

fn main() {
    let cli = Cli::parse();

    let topology_json = fs::read_to_string(&cli.topology_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read topology file '{}': {}",
            &cli.topology_path, e
        ))
    });
    let topology = Topology::from_json(&topology_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse topology JSON: {}", e)));

    let catalog = match &cli.catalog {
        Some(path) => {
            let catalog_json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read catalog file '{}': {}", path, e))
            });
            StaticCatalog::from_json(&catalog_json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse catalog JSON: {}", e)))
        }
        None => {
            println!("No catalog provided. Node properties will not be schema-checked.");
            StaticCatalog::new()
        }
    };

    let model = GraphModel::import(topology);
    println!(
        "Imported '{}': {} node(s), {} edge(s)",
        model.name(),
        model.store().nodes().len(),
        model.store().edges().len()
    );

    if cli.layout {
        println!("\n--- Node Positions ---");
        for node in model.store().nodes() {
            println!("{:<40} x: {:>8.1}  y: {:>8.1}", node.name, node.x, node.y);
        }
    }

    if cli.roundtrip {
        let exported = model
            .export(&catalog)
            .to_json_pretty()
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize topology: {}", e)));
        println!("\n{}", exported);
    }

    // Validation runs by default so a bare invocation is still useful.
    if cli.check || (!cli.roundtrip && !cli.layout) {
        let errors = model.validate(&catalog);
        if errors.is_empty() {
            println!("\nTopology is valid.");
        } else {
            println!("\n{} validation error(s):", errors.len());
            for error in &errors {
                match &error.node_name {
                    Some(name) => println!("  [{:?}] {} (node: {})", error.kind, error.description, name),
                    None => println!("  [{:?}] {}", error.kind, error.description),
                }
            }
            std::process::exit(1);
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
