//! Provider abstraction and shared provider operations.
//!
//! A provider binds the application to one external site's content
//! structure. Concrete providers implement the site-specific pieces
//! (default location, location-list parsing, weather extraction); the
//! shared operations here handle configuration resolution, the
//! cache-backed run path and the interactive location walk.

use async_trait::async_trait;

use crate::{
    config::Config,
    error::{Error, Result},
    fetch::PageLoader,
    model::{Location, WeatherInfo, WeatherReport},
    registry::Registry,
};

pub mod accu;
mod markup;
pub mod rp5;

/// Everything a provider operation needs from the application, passed
/// explicitly instead of living in shared mutable state.
pub struct AppContext<'a> {
    pub config: &'a Config,
    pub pages: &'a PageLoader,
    /// Bypass cached pages for this run.
    pub refresh: bool,
}

#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier used for registry lookup and config sections.
    fn name(&self) -> &'static str;

    /// Human-readable label for output.
    fn title(&self) -> &'static str;

    /// Fallback location when nothing is configured.
    fn default_location(&self) -> Location;

    /// Root of the site's browse-locations tree.
    fn browse_url(&self) -> &'static str;

    /// Parse one level of the location tree out of a list page.
    ///
    /// Relative hrefs are resolved against `base_url`. An empty result
    /// marks the current node as a leaf.
    fn parse_locations(&self, html: &str, base_url: &str) -> Vec<Location>;

    /// Site-specific weather extraction. Async because some sites need
    /// a follow-up fetch for the current-conditions page. A missing
    /// sub-element omits that field, it never fails the extraction.
    async fn extract_weather(&self, ctx: &AppContext<'_>, html: &str) -> Result<WeatherInfo>;
}

/// Operator-choice seam for the location walk: interactive in the CLI,
/// scripted in tests.
pub trait SelectLocation: Send {
    /// Index of the chosen entry in `options`.
    fn select(&mut self, options: &[Location]) -> Result<usize>;
}

pub type ProviderFactory = fn() -> Box<dyn Provider>;

/// The built-in provider table, registered once at startup. Order here
/// is the default output order.
pub fn builtin() -> Registry<ProviderFactory> {
    let mut registry = Registry::new();
    registry.add(accu::NAME, accu::provider as ProviderFactory);
    registry.add(rp5::NAME, rp5::provider as ProviderFactory);
    registry
}

/// Configured location for `provider`, or its default when none is
/// stored. A malformed config file already degraded to defaults (with
/// a warning) when it was loaded, so this never fails.
pub fn resolve_location(provider: &dyn Provider, config: &Config) -> Location {
    match config.location_for(provider.name()) {
        Some(location) => location.clone(),
        None => provider.default_location(),
    }
}

/// Steady-state provider operation: resolve the location, load its
/// page through the cache, extract the weather fields.
pub async fn run(provider: &dyn Provider, ctx: &AppContext<'_>) -> Result<WeatherReport> {
    let location = resolve_location(provider, ctx.config);
    tracing::info!(provider = provider.name(), location = %location.name, "collecting weather");

    let html = ctx.pages.load(&location.url, ctx.refresh).await?;
    let info = provider.extract_weather(ctx, &html).await?;

    Ok(WeatherReport {
        provider: provider.name().to_string(),
        title: provider.title().to_string(),
        location: location.name,
        info,
    })
}

/// Walk the site's location tree until a leaf is reached.
///
/// Each round fetches the current list page and asks `selector` to
/// pick an entry; a page with no further entries terminates the walk
/// and the last chosen location is returned for persistence. An
/// out-of-range pick is rejected, and a cancelled selector aborts the
/// flow cleanly between rounds.
pub async fn drill_down(
    provider: &dyn Provider,
    ctx: &AppContext<'_>,
    selector: &mut dyn SelectLocation,
) -> Result<Location> {
    let mut current_url = provider.browse_url().to_string();
    let mut chosen: Option<Location> = None;

    loop {
        let html = ctx.pages.load(&current_url, ctx.refresh).await?;
        let options = provider.parse_locations(&html, &current_url);

        if options.is_empty() {
            return chosen.ok_or(Error::NoLocations { url: current_url });
        }

        let index = selector.select(&options)?;
        let location = options.get(index).ok_or(Error::InvalidSelection {
            index,
            count: options.len(),
        })?;

        current_url = location.url.clone();
        chosen = Some(location.clone());
    }
}
