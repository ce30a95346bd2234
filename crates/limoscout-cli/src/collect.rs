//! `collect` and `regions` command handlers.
//!
//! A collect run never fails because of the remote service: failed queries
//! and lookups are logged and skipped. Only configuration problems and
//! output I/O errors are returned.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use limoscout_core::{AppConfig, Query, QueryOptions, RegionDefinition};
use limoscout_places::{DetailsPolicy, PlaceIdSet, PlacesClient, SearchPolicy};

use crate::export;

/// Arguments for `collect`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Args)]
pub(crate) struct CollectArgs {
    /// Built-in region slug (e.g. `alberta`, `quebec`)
    #[arg(long)]
    pub region: Option<String>,

    /// Google Places API key
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output CSV path (defaults to the region's file name)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Seconds to wait before requesting a continuation page
    #[arg(long, default_value = "2.0", value_parser = parse_secs)]
    pub sleep: Duration,

    /// Seconds between detail lookups; also the base of the details back-off
    #[arg(long, default_value = "0.12", value_parser = parse_secs)]
    pub details_sleep: Duration,

    /// Maximum search results kept per query
    #[arg(long, default_value_t = 180)]
    pub max_per_query: usize,

    /// Skip the province-wide queries
    #[arg(long)]
    pub no_province_wide: bool,

    /// Only search major cities
    #[arg(long)]
    pub major_cities_only: bool,

    /// Only search rural areas
    #[arg(long)]
    pub rural_only: bool,

    /// Drop non-English queries
    #[arg(long, alias = "no-french")]
    pub english_only: bool,

    /// Load the region definition from a YAML file instead of the built-ins
    #[arg(long)]
    pub regions_file: Option<PathBuf>,

    /// Print the generated queries and exit without calling the API
    #[arg(long)]
    pub dry_run: bool,
}

impl CollectArgs {
    pub(crate) fn query_options(&self) -> QueryOptions {
        QueryOptions {
            no_province_wide: self.no_province_wide,
            major_cities_only: self.major_cities_only,
            rural_only: self.rural_only,
            english_only: self.english_only,
        }
    }
}

/// Parses a non-negative number of seconds, e.g. `2`, `0.12`.
pub(crate) fn parse_secs(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("'{raw}': {e}"))
}

/// Picks the region: an explicit `--regions-file`, then
/// `LIMOSCOUT_REGIONS_PATH`, then the built-in named by `--region`.
pub(crate) fn resolve_region(
    args: &CollectArgs,
    config: &AppConfig,
) -> anyhow::Result<RegionDefinition> {
    let file = args
        .regions_file
        .as_deref()
        .or(config.regions_path.as_deref());

    if let Some(path) = file {
        let region = limoscout_core::load_region(path)?;
        if let Some(slug) = args.region.as_deref() {
            if !slug.trim().eq_ignore_ascii_case(&region.slug) {
                anyhow::bail!(
                    "--region '{slug}' does not match region '{}' defined in {}",
                    region.slug,
                    path.display()
                );
            }
        }
        return Ok(region);
    }

    let Some(slug) = args.region.as_deref() else {
        anyhow::bail!("--region is required unless --regions-file is given");
    };
    Ok(limoscout_core::builtin_region(slug)?)
}

pub(crate) async fn run_collect(config: &AppConfig, args: &CollectArgs) -> anyhow::Result<()> {
    let region = resolve_region(args, config)?;
    let queries = limoscout_core::generate_queries(&region, &args.query_options());

    if args.dry_run {
        print_queries(&region, &queries);
        return Ok(());
    }

    let api_key = args
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .context("missing API key: pass --api-key or set GOOGLE_PLACES_API_KEY")?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&region.default_output));

    let client = PlacesClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    )
    .context("failed to build Places client")?;

    let search_policy = SearchPolicy {
        page_delay: args.sleep,
        max_attempts: config.search_max_attempts,
        max_per_query: args.max_per_query,
        ..SearchPolicy::default()
    };
    let details_policy = DetailsPolicy {
        base_delay: args.details_sleep,
        max_attempts: config.details_max_attempts,
        ..DetailsPolicy::default()
    };

    tracing::info!(
        region = %region.slug,
        queries = queries.len(),
        out = %out.display(),
        "starting collection"
    );

    let mut ids = PlaceIdSet::new();
    let discovery =
        limoscout_places::discover_place_ids(&client, &queries, &search_policy, &mut ids).await;
    println!(
        "{}: {} queries, {} results, {} unique places",
        region.name,
        discovery.queries_run,
        discovery.results_seen,
        ids.len()
    );

    let rows = limoscout_places::enrich_places(&client, ids.as_slice(), &details_policy).await;
    report_written(&out, export::write_csv(&out, &rows)?);

    Ok(())
}

fn report_written(out: &Path, written: usize) {
    if written == 0 {
        println!("no rows to write; {} was not created", out.display());
    } else {
        println!("wrote {written} rows to {}", out.display());
    }
}

fn print_queries(region: &RegionDefinition, queries: &[Query]) {
    println!(
        "dry-run: {} queries for {} ({})",
        queries.len(),
        region.name,
        region.slug
    );
    for (i, q) in queries.iter().enumerate() {
        println!("{:>4}  [{}] {}", i + 1, q.lang, q.text);
    }
}

/// Prints the built-in regions.
pub(crate) fn list_regions() -> anyhow::Result<()> {
    for region in limoscout_core::builtin_regions()? {
        let langs: Vec<String> = region.languages().iter().map(ToString::to_string).collect();
        println!(
            "{:<10} {:<8} {:>4} queries  [{}]  -> {}",
            region.slug,
            region.name,
            region.query_count(),
            langs.join(","),
            region.default_output
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
