use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use maestro_core::extension::loader;
use maestro_core::extension::resolver::ResolveMode;
use maestro_core::kernel::bootstrap::{Core, CoreMode};
use maestro_core::kernel::constants::{APP_NAME, APP_VERSION, EXTENSIONS_DIR_NAME};
use maestro_core::kernel::error::Result;
use maestro_core::memory::document::Document;
use maestro_core::settings::Settings;

/// Maestro: extension-driven web admin core
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Base directory holding the memory store and the extensions directory
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Seed a fresh memory store in the base directory
    Install,
    /// Scan the extensions directory and rebuild the available-set cache
    Detect,
    /// Manage extensions
    Extension {
        #[command(subcommand)]
        command: ExtensionCommand,
    },
    /// Show the platform settings and their validation problems
    Settings,
    /// Show the assembled admin menu
    Menu,
}

#[derive(Subcommand, Debug)]
enum ExtensionCommand {
    /// List available extensions with their activation state
    List,
    /// Activate an extension
    Activate {
        /// Registry identifier of the extension
        identifier: String,
    },
    /// Deactivate an extension
    Deactivate {
        /// Registry identifier of the extension
        identifier: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // A blocked lifecycle transition carries the structured list;
            // render it instead of the generic message.
            if let Some(unresolved) = error.unresolved_dependencies() {
                eprintln!("blocked by unresolved dependencies:");
                for entry in unresolved {
                    eprintln!("  - {}", entry);
                }
            } else {
                eprintln!("error: {}", error);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<()> {
    if let Commands::Install = args.command {
        // An empty store document reads back as "not installed", so seed
        // the minimal site block.
        let mut seed = Document::new();
        seed.put("site.name", serde_json::json!(APP_NAME));
        Core::install(&args.dir, seed)?;
        println!("seeded memory store under {}", args.dir.display());
        return Ok(());
    }

    let mut core = Core::start(&args.dir)?;
    if core.mode() == CoreMode::Install {
        println!(
            "{} v{}: no memory store found, run `maestro install` first",
            APP_NAME, APP_VERSION
        );
    }

    match args.command {
        Commands::Install => unreachable!("handled above"),
        Commands::Detect => {
            let dir = args.dir.join(EXTENSIONS_DIR_NAME);
            let locations = loader::discover_locations(&dir).await?;
            let registry = loader::detect(&locations, core.memory_mut()).await?;
            println!("detected {} extension(s):", registry.len());
            for (identifier, descriptor) in registry.iter() {
                println!("  {} ({} v{})", identifier, descriptor.name, descriptor.version);
            }
        }
        Commands::Extension { command } => match command {
            ExtensionCommand::List => list_extensions(&core)?,
            ExtensionCommand::Activate { identifier } => {
                let (extensions, memory) = core.extensions_mut();
                extensions.activate(&identifier, memory).await?;
                println!("activated '{}'", identifier);
            }
            ExtensionCommand::Deactivate { identifier } => {
                let (extensions, memory) = core.extensions_mut();
                extensions.deactivate(&identifier, memory).await?;
                println!("deactivated '{}'", identifier);
            }
        },
        Commands::Settings => {
            let settings = Settings::load(core.memory());
            println!("site name:      {}", settings.site_name);
            println!("site info:      {}", settings.site_description);
            println!("web upgrade:    {}", settings.site_web_upgrade);
            println!("mail transport: {}", settings.email_default);
            let problems = settings.validate();
            if problems.is_empty() {
                println!("settings valid");
            } else {
                println!("problems:");
                for problem in &problems {
                    println!("  - {}", problem);
                }
            }
        }
        Commands::Menu => {
            for entry in core.menu().iter() {
                println!("{:<12} {:<12} {}", entry.id, entry.title, entry.link);
            }
        }
    }

    Ok(())
}

fn list_extensions(core: &Core) -> Result<()> {
    let registry = maestro_core::ExtensionRegistry::load(core.memory())?;
    if registry.is_empty() {
        println!("no extensions detected; run `maestro detect`");
        return Ok(());
    }

    for (identifier, descriptor) in registry.iter() {
        let active = core.extensions().activated(identifier, core.memory());
        let marker = if active { "active" } else { "inactive" };
        println!(
            "{:<20} {} v{:<8} [{}]",
            identifier, descriptor.name, descriptor.version, marker
        );
        let unresolved =
            core.extensions()
                .unresolved(identifier, ResolveMode::Diagnostic, core.memory())?;
        for entry in unresolved {
            println!("    missing: {}", entry);
        }
    }
    Ok(())
}
