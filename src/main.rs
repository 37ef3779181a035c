mod config;
mod error;
mod parser;
mod sheet;
mod form;
mod display;
mod web;

use std::path::Path;

use config::AppConfig;
use display::print_summary;
use form::export_instruction_to_csv;
use parser::{load_catalog, load_snapshot};
use sheet::summarize;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let config = AppConfig::from_env().with_port_arg(args.get(2).map(String::as_str));
        let catalog = load_catalog(&config.data_dir)?;

        log::info!("starting web server on port {}", config.port);
        println!("Access the sheet at http://localhost:{}", config.port);

        web::start_server(config, catalog).await?;
        return Ok(());
    }

    // CLI mode: summarize a saved snapshot
    let Some(snapshot_path) = args.get(1) else {
        eprintln!("usage: housekeeping-sheet web [port]");
        eprintln!("       housekeeping-sheet <snapshot.json> [out.csv]");
        std::process::exit(2);
    };

    let snapshot = load_snapshot(snapshot_path)?;
    let summary = summarize(&snapshot);
    print_summary(&summary);

    if let Some(out) = args.get(2) {
        export_instruction_to_csv(&summary.instruction, Path::new(out))?;
        println!("\nInstruction table saved to {}", out);
    }

    Ok(())
}
