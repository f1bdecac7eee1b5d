use clap::{Parser, Subcommand};
use service_areas::contact::Inquiry;
use service_areas::site::{self, Site};
use service_areas::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "service-areas")]
#[command(about = "Location pages, sitemap and photo assignment for a DJ service-area section")]
#[command(long_about = "\
Location pages, sitemap and photo assignment for a DJ service-area section

The site directory is optional. Every file in it overrides built-in data:

  site/
  ├── config.toml          # Base URL, site name, sitemap priorities
  ├── service-areas.toml   # Hubs and their city lists
  └── images.toml          # Photo pool and per-slug overrides

Pages:
  /service-areas                # index
  /service-areas/{hub}          # always indexed
  /service-areas/{hub}/{city}   # indexed only when the hub sets index_city_pages

Run 'service-areas gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate site data and print the hub inventory
    Check,
    /// Resolve every location page into pages.json
    Pages,
    /// Write sitemap.xml and robots.txt
    Sitemap,
    /// Run pages and sitemap
    Build,
    /// Show which pool photo each slug resolves to
    Resolve {
        /// Image slugs, e.g. chambersburg-pa or chambersburg-pa/waynesboro-pa
        #[arg(required = true)]
        slugs: Vec<String>,
    },
    /// Validate a saved booking inquiry and print the notification email
    Inquiry {
        /// JSON file with the contact form payload
        path: PathBuf,
        /// Print the HTML body instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = Site::load(&cli.source)?;
            output::print_check_output(&site.registry, &site.pool, &cli.source);
            println!("==> Site data is valid");
        }
        Command::Pages => {
            let site = Site::load(&cli.source)?;
            init_thread_pool(&site.config.processing);
            let manifest = site.manifest()?;
            let path = site::write_pages(&manifest, &cli.output)?;
            output::print_pages_output(&manifest);
            println!("Wrote {}", path.display());
        }
        Command::Sitemap => {
            let site = Site::load(&cli.source)?;
            site::write_sitemap(&site, &cli.output)?;
            output::print_sitemap_output(&site.sitemap_summary());
        }
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site = Site::load(&cli.source)?;
            init_thread_pool(&site.config.processing);

            println!("==> Writing pages and sitemap → {}", cli.output.display());
            let manifest = site::build(&site, &cli.output)?;
            output::print_pages_output(&manifest);
            output::print_sitemap_output(&site.sitemap_summary());

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Resolve { slugs } => {
            let site = Site::load(&cli.source)?;
            output::print_resolve_output(&site.pool, &slugs);
        }
        Command::Inquiry { path, html } => {
            let inquiry = Inquiry::load(&path)?;
            println!("Subject: {}", inquiry.subject());
            println!();
            if html {
                println!("{}", inquiry.html_body());
            } else {
                println!("{}", inquiry.text_body());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
