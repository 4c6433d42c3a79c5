//! Main application entry point (native).

#[cfg(feature = "native")]
mod cli {
    use clap::{Parser, Subcommand};
    use kurbo::Point;
    use pagebuilder_app::{App, AppConfig, AppError};
    use pagebuilder_core::{Palette, ShortcutRegistry};
    use std::path::PathBuf;

    #[derive(Parser)]
    #[command(version, about = "Drag-and-drop page builder", long_about = None)]
    struct Cli {
        /// JSON config file
        #[arg(long, global = true)]
        config: Option<PathBuf>,

        /// Project directory (defaults to the platform data directory)
        #[arg(long, global = true)]
        storage: Option<PathBuf>,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// List the elements of the saved project
        List,
        /// Add an element at a canvas position (snapped to the grid)
        Add { tag: String, x: f64, y: f64 },
        /// Remove an element
        Remove { id: String },
        /// Set one style property; an empty value clears it
        Style {
            id: String,
            property: String,
            value: String,
        },
        /// Replace the text content of an element
        Text { id: String, text: String },
        /// Replace the project with a JSON file
        Import { path: PathBuf },
        /// Export the project as a React component
        Export {
            /// Output directory; prints to stdout when omitted
            #[arg(long)]
            out: Option<PathBuf>,
        },
        /// Show palette items, optionally filtered
        Palette { query: Option<String> },
        /// Show keyboard shortcuts
        Shortcuts,
    }

    pub fn run() -> Result<(), AppError> {
        let cli = Cli::parse();

        let open = || {
            App::open(AppConfig {
                config_path: cli.config.clone(),
                storage_dir: cli.storage.clone(),
            })
        };

        match &cli.command {
            Commands::List => {
                let app = open()?;
                for row in app.summary() {
                    println!(
                        "{:indent$}{} {} at ({}, {}) {}x{}",
                        "",
                        row.id,
                        row.tag,
                        row.origin.x,
                        row.origin.y,
                        row.size.width,
                        row.size.height,
                        indent = row.depth * 2
                    );
                }
            }
            Commands::Add { tag, x, y } => {
                let id = open()?.add(tag, Point::new(*x, *y))?;
                println!("{}", id);
            }
            Commands::Remove { id } => open()?.remove(id)?,
            Commands::Style { id, property, value } => {
                if !open()?.set_style(id, property, value)? {
                    log::info!("{} already has {} = {:?}", id, property, value);
                }
            }
            Commands::Text { id, text } => open()?.set_text(id, text)?,
            Commands::Import { path } => {
                let count = open()?.import(path)?;
                println!("Imported {} elements", count);
            }
            Commands::Export { out } => {
                let app = open()?;
                match out {
                    Some(dir) => println!("{}", app.export_to(dir)?.display()),
                    None => print!("{}", app.export().contents),
                }
            }
            Commands::Palette { query } => {
                for item in Palette::search(query.as_deref().unwrap_or("")) {
                    println!("  {:12} {}", item.tag, item.label);
                }
            }
            Commands::Shortcuts => print!("{}", ShortcutRegistry::help()),
        }
        Ok(())
    }
}

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    if let Err(e) = cli::run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
