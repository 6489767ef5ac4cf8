use clap::{Parser, Subcommand};
use decoupled_pager::paginator::{MemoryRouter, NavEvent, Paginator, Router, Window, window};
use decoupled_pager::preview::{self, PreviewRequest, PreviewSettings};
use decoupled_pager::types::Item;
use decoupled_pager::{config, generate, output, source};
use std::path::PathBuf;

/// Dataset flag shared by every command that reads items.
#[derive(clap::Args, Clone)]
struct DataArgs {
    /// Dataset JSON: an item array, a JSON:API document, or a listing
    #[arg(long, default_value = "items.json")]
    data: PathBuf,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "decoupled-pager")]
#[command(about = "Paginated listing pages for headless Drupal content")]
#[command(long_about = "\
Paginated listing pages for headless Drupal content

The dataset is fetched once, outside this tool, and saved as JSON. Every page
and every page button is computed from that file; nothing is fetched again
when the page changes.

Accepted datasets:

  [ {\"id\": \"1\", \"title\": \"...\", \"body\": {\"value\": \"...\"}} ]
  {\"data\": [ {\"id\": \"1\", \"type\": \"node--article\", \"attributes\": {...}} ]}
  {\"data\": [...], \"totalPages\": 3, \"totalItems\": 25, \"itemsPerPage\": 10}

Navigation events for 'show --events' (comma separated):

  next, >          next page
  back, prev, <    previous page
  expand, ...      reveal more page buttons
  7                jump to page 7

Run 'decoupled-pager gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page of the listing to static HTML
    Generate {
        #[command(flatten)]
        data: DataArgs,
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Print one page and its navigation strip, optionally after replaying events
    Show {
        #[command(flatten)]
        data: DataArgs,
        /// Starting page, as it would arrive in the URL
        #[arg(long, default_value = "1")]
        page: String,
        /// Viewport width in pixels (unset counts as wide)
        #[arg(long)]
        width: Option<u32>,
        /// Comma-separated navigation events to apply in order
        #[arg(long, value_delimiter = ',')]
        events: Vec<NavEvent>,
    },
    /// Validate the dataset and config without generating anything
    Check {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Validate a preview-mode request against the dataset
    Preview {
        #[command(flatten)]
        data: DataArgs,
        /// Content slug, e.g. /articles/my-post
        #[arg(long)]
        slug: String,
        /// Secret sent with the request
        #[arg(long)]
        secret: String,
        #[arg(long)]
        resource_version_id: Option<String>,
        #[arg(long)]
        key: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate { data, output: out } => {
            let site_config = config::load_config(&cli.config)?;
            let listing = source::load_listing(&data.data, site_config.pagination.items_per_page)?;
            let report = generate::generate(&listing, &site_config, &out)?;
            output::print_generate_output(&report);
        }
        Command::Show {
            data,
            page,
            width,
            events,
        } => {
            let site_config = config::load_config(&cli.config)?;
            let listing = source::load_listing(&data.data, site_config.pagination.items_per_page)?;
            let paginator = Paginator::for_listing(&listing, site_config.pagination.options())?;

            if site_config.pagination.routing {
                let router = MemoryRouter::new(site_config.site.route.as_str()).with_query_page(page);
                let paginator = paginator.with_router(router);
                let paginator = replay(paginator, width, &events);
                output::print_page_view(&paginator);
                if let Some(path) = paginator.router().and_then(MemoryRouter::current_path) {
                    println!("URL: {path}");
                }
            } else {
                let mut paginator = paginator;
                let requested = window::parse_page_query(Some(&page));
                paginator.go_to(window::clamp_page(requested, paginator.total_pages()));
                let paginator = replay(paginator, width, &events);
                output::print_page_view(&paginator);
            }
        }
        Command::Check { data } => {
            let site_config = config::load_config(&cli.config)?;
            println!("==> Checking {}", data.data.display());
            let listing = source::load_listing(&data.data, site_config.pagination.items_per_page)?;
            let meta = listing.validate()?;
            output::print_check_output(&listing, &meta);
            println!("==> Dataset is valid");
        }
        Command::Preview {
            data,
            slug,
            secret,
            resource_version_id,
            key,
        } => {
            let site_config = config::load_config(&cli.config)?;
            let listing = source::load_listing(&data.data, site_config.pagination.items_per_page)?;
            let expected = std::env::var(&site_config.preview.secret_env).ok();
            let settings = PreviewSettings {
                secret: expected.as_deref(),
                default_locale: site_config.preview.default_locale.as_deref(),
            };
            let request = PreviewRequest {
                secret: Some(secret),
                slug: Some(slug),
                resource_version_id,
                key,
            };
            let grant = preview::enable_preview(&request, &settings, &listing.data)?;
            output::print_preview_grant(&grant);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Mount on a window of the given width, then apply `events` in order,
/// printing each change as it happens.
fn replay<'a, R: Router>(
    mut paginator: Paginator<'a, Item, R>,
    width: Option<u32>,
    events: &[NavEvent],
) -> Paginator<'a, Item, R> {
    if let Some(width) = width {
        paginator.mount(&Window::new(width));
    }
    if !events.is_empty() {
        paginator.subscribe(|change| println!("{}", output::format_change(change)));
    }
    for event in events {
        paginator.handle(*event);
    }
    if !events.is_empty() {
        println!();
    }
    paginator
}
