use clap::{Parser, Subcommand};
use newsletter_index::{config, generate, output, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let hash = env!("INDEX_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{}@{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "newsletter-index")]
#[command(about = "Static index generator for archived newsletter series")]
#[command(long_about = "\
Static index generator for archived newsletter series

The archive directory is the data source. Every directory under zips/ is a
series, every bundle inside it an issue. Pages list the newest series and
issues first, followed by a full listing grouped by century, 20-year renewal
cycle, year and month.

Archive structure:

  archive/
  ├── config.toml                  # Site config (optional)
  ├── series.json                  # Catalog: {\"series\": [{\"seriesId\", \"seriesName\"}]}
  ├── zips/
  │   └── alpha/                   # Series
  │       ├── 001.zip              # Issue bundle
  │       └── 001.json             # Its manifest.json, extracted
  └── output/
      └── alpha/
          └── TQ-001.pdf           # Rendered document (optional)

Metadata resolution (first available wins):
  Title:  manifest title → metadata.title → TQ-{serial}
  Date:   createdAt, shown in metadata.tz
  Name:   catalog seriesName → series id

Run 'newsletter-index gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Archive root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Output directory (defaults to the archive root)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the archive and write every index page
    Build,
    /// Scan the archive and list series, issues and warnings
    Scan {
        /// Print the scanned archive as JSON
        #[arg(long)]
        json: bool,
    },
    /// List issues whose rendered document is missing
    Pending,
    /// Validate config and archive without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let output_dir = resolve_output_dir(&cli.root, cli.output.as_deref());

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.root)?;

            println!("==> Stage 1: Scanning {}", cli.root.display());
            let archive = scan::scan(&cli.root, &config)?;
            output::print_scan_output(&archive, &config);

            println!(
                "==> Stage 2: Generating HTML \u{2192} {}",
                output_dir.display()
            );
            let report = generate::generate(&archive, &config, &output_dir)?;
            output::print_generate_output(&report, &archive);

            println!("==> Build complete: {}", output_dir.display());
        }
        Command::Scan { json } => {
            let config = config::load_config(&cli.root)?;
            let archive = scan::scan(&cli.root, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&archive)?);
            } else {
                output::print_scan_output(&archive, &config);
            }
        }
        Command::Pending => {
            let config = config::load_config(&cli.root)?;
            let archive = scan::scan(&cli.root, &config)?;
            output::print_pending_output(&archive, &config);
        }
        Command::Check => {
            println!("==> Checking {}", cli.root.display());
            let config = config::load_config(&cli.root)?;
            let archive = scan::scan(&cli.root, &config)?;
            for line in output::format_warnings(&archive) {
                println!("{}", line);
            }
            println!("{}", output::format_summary(&archive));
            println!("==> Archive is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Pages are written beside the archive unless `--output` says otherwise.
fn resolve_output_dir(root: &Path, output: Option<&Path>) -> PathBuf {
    output.unwrap_or(root).to_path_buf()
}
