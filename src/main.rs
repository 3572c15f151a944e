use std::io::{Read, Write};

use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use link2clash::web_handlers::interfaces;
use link2clash::{convert, Settings};

/// Convert proxy share links into Clash proxy entries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (e.g., 127.0.0.1 or 0.0.0.0)
    #[arg(short, long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// File of links to convert directly instead of starting the server ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Output file for direct conversion (must be used with --input, defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,
}

fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Convert a file of links and write the Clash snippets.
fn run_direct(input: &str, output: Option<&str>) -> std::io::Result<()> {
    let content = read_input(input)?;
    let result = convert(&content);

    for err in &result.errors {
        warn!("Item #{} ({}): {}", err.index, err.value, err.message);
    }

    let rendered = format!(
        "proxies:\n{}\n\n# proxy group members\n{}\n",
        result.proxy_lines, result.group_lines
    );
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Successfully wrote converted proxies to {}", path);
        }
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    if args.output.is_some() && args.input.is_none() {
        eprintln!("Error: -o/--output must be used together with --input");
        std::process::exit(1);
    }

    if let Some(input) = args.input.as_deref() {
        return run_direct(input, args.output.as_deref()).inspect_err(|e| {
            error!("Failed to convert {}: {}", input, e);
        });
    }

    // Settings precedence: command line > environment > config file > defaults
    let mut settings = match args.config.as_deref() {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to load config from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    settings.apply_env();
    if let Some(address) = args.address {
        settings.listen_address = address;
    }
    if let Some(port) = args.port {
        settings.listen_port = port;
    }

    let listen_address = settings.listen_addr();
    info!("link2clash listening on {}", listen_address);

    HttpServer::new(move || {
        App::new()
            // Register web handlers
            .configure(interfaces::config(settings.clone()))
            // For health check
            .route("/", web::get().to(|| async { "link2clash is running!" }))
    })
    .bind(listen_address)?
    .run()
    .await
}
