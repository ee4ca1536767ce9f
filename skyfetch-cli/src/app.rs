//! Application orchestrator: owns the registries, the page loader and
//! the configuration, and dispatches the command-line surface onto
//! them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use skyfetch_core::{
    cache::{DEFAULT_TTL, PageCache},
    config::Config,
    error::Error,
    fetch::{HttpFetcher, PageLoader},
    model::WeatherReport,
    provider::{self, AppContext, ProviderFactory},
    registry::Registry,
};

use crate::{
    cli::{Cli, OutputFormat},
    commands,
    output,
    select::InquireSelector,
};

/// Outcome of one invocation, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// At least one provider in a batch run failed.
    PartialFailure,
}

pub struct App {
    pub config: Config,
    config_path: PathBuf,
    pub providers: Registry<ProviderFactory>,
    commands: Registry<commands::CommandFactory>,
    pages: PageLoader,
    refresh: bool,
    format: OutputFormat,
}

impl App {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config_path = Config::config_file_path()?;
        let config = Config::load_or_default(&config_path);

        let cache = PageCache::new(Config::cache_dir()?, DEFAULT_TTL);
        let fetcher = HttpFetcher::new()?;
        let pages = PageLoader::new(cache, Box::new(fetcher));

        Ok(Self {
            config,
            config_path,
            providers: provider::builtin(),
            commands: commands::builtin(),
            pages,
            refresh: cli.refresh,
            format: cli.formatter,
        })
    }

    fn context(&self) -> AppContext<'_> {
        AppContext {
            config: &self.config,
            pages: &self.pages,
            refresh: self.refresh,
        }
    }

    /// Dispatch: built-in command first, then provider name, otherwise
    /// the name is unknown. No command at all means "run everything".
    pub async fn run(mut self, cli: Cli) -> Result<Outcome> {
        let Some(name) = cli.command else {
            return self.run_all().await;
        };

        if let Some(factory) = self.commands.get(&name).copied() {
            let command = factory();
            command.run(&mut self, &cli.args).await?;
            return Ok(Outcome::Success);
        }

        if self.providers.contains(&name) {
            return self.run_one(&name).await;
        }

        Err(Error::UnknownName { name }.into())
    }

    async fn run_one(&self, name: &str) -> Result<Outcome> {
        let factory = self
            .providers
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownName { name: name.to_string() })?;
        let provider = factory();

        let ctx = self.context();
        let report = provider::run(provider.as_ref(), &ctx).await?;

        print!("{}", output::render(self.format, &[report])?);
        Ok(Outcome::Success)
    }

    async fn run_all(&self) -> Result<Outcome> {
        let ctx = self.context();
        let (reports, failures) = run_batch(&self.providers, &ctx).await;

        print!("{}", output::render(self.format, &reports)?);

        Ok(if failures == 0 {
            Outcome::Success
        } else {
            Outcome::PartialFailure
        })
    }

    /// Interactive location walk for `name`, persisting the chosen
    /// leaf into this provider's config section.
    pub async fn configure_provider(&mut self, name: &str) -> Result<()> {
        let factory = self
            .providers
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownName { name: name.to_string() })?;
        let provider = factory();

        let mut selector = InquireSelector;
        let location = {
            let ctx = self.context();
            provider::drill_down(provider.as_ref(), &ctx, &mut selector).await?
        };

        println!("{}: location set to {}", provider.title(), location.name);
        self.config.set_location(provider.name(), location);
        self.config
            .save_to(&self.config_path)
            .context("failed to save configuration")?;

        Ok(())
    }

    pub fn save_log_level(&mut self, level: &str) -> Result<()> {
        self.config.set_log_level(level);
        self.config
            .save_to(&self.config_path)
            .context("failed to save configuration")?;
        Ok(())
    }
}

/// Run every registered provider in registration order. One dead site
/// must not sink the batch: its failure is logged and counted while
/// the siblings still report.
pub(crate) async fn run_batch(
    providers: &Registry<ProviderFactory>,
    ctx: &AppContext<'_>,
) -> (Vec<WeatherReport>, usize) {
    let mut reports = Vec::new();
    let mut failures = 0;

    for (name, factory) in providers.iter() {
        let provider = factory();
        match provider::run(provider.as_ref(), ctx).await {
            Ok(report) => reports.push(report),
            Err(err) => {
                failures += 1;
                tracing::error!(provider = name, error = %err, "provider run failed");
            }
        }
    }

    (reports, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skyfetch_core::{
        error::Result as CoreResult,
        fetch::FetchPage,
        model::{Location, WeatherInfo},
        provider::Provider,
    };
    use std::time::Duration;
    use tempfile::TempDir;

    struct StaticFetcher;

    #[async_trait]
    impl FetchPage for StaticFetcher {
        async fn fetch(&self, url: &str) -> CoreResult<Vec<u8>> {
            if url.contains("dead") {
                return Err(Error::FetchStatus { url: url.to_string(), status: 500 });
            }
            Ok(b"<p>page</p>".to_vec())
        }
    }

    struct SiteProvider {
        name: &'static str,
        url: &'static str,
    }

    #[async_trait]
    impl Provider for SiteProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn title(&self) -> &'static str {
            self.name
        }

        fn default_location(&self) -> Location {
            Location::new("City", self.url)
        }

        fn browse_url(&self) -> &'static str {
            self.url
        }

        fn parse_locations(&self, _html: &str, _base_url: &str) -> Vec<Location> {
            Vec::new()
        }

        async fn extract_weather(
            &self,
            _ctx: &AppContext<'_>,
            _html: &str,
        ) -> CoreResult<WeatherInfo> {
            Ok(WeatherInfo {
                condition: Some("clear".to_string()),
                ..WeatherInfo::default()
            })
        }
    }

    fn site_a() -> Box<dyn Provider> {
        Box::new(SiteProvider { name: "a", url: "https://a.test/city" })
    }

    fn site_b() -> Box<dyn Provider> {
        Box::new(SiteProvider { name: "b", url: "https://b.test/city" })
    }

    fn site_dead() -> Box<dyn Provider> {
        Box::new(SiteProvider { name: "dead", url: "https://dead.test/city" })
    }

    #[tokio::test]
    async fn one_failing_provider_does_not_sink_the_batch() {
        let temp = TempDir::new().unwrap();
        let pages = PageLoader::new(
            PageCache::new(temp.path(), Duration::from_secs(60)),
            Box::new(StaticFetcher),
        );
        let config = Config::default();
        let ctx = AppContext { config: &config, pages: &pages, refresh: false };

        let mut providers: Registry<ProviderFactory> = Registry::new();
        providers.add("a", site_a as ProviderFactory);
        providers.add("dead", site_dead as ProviderFactory);
        providers.add("b", site_b as ProviderFactory);

        let (reports, failures) = run_batch(&providers, &ctx).await;

        assert_eq!(failures, 1);
        let names: Vec<&str> = reports.iter().map(|r| r.provider.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn all_successes_report_no_failures() {
        let temp = TempDir::new().unwrap();
        let pages = PageLoader::new(
            PageCache::new(temp.path(), Duration::from_secs(60)),
            Box::new(StaticFetcher),
        );
        let config = Config::default();
        let ctx = AppContext { config: &config, pages: &pages, refresh: false };

        let mut providers: Registry<ProviderFactory> = Registry::new();
        providers.add("a", site_a as ProviderFactory);
        providers.add("b", site_b as ProviderFactory);

        let (reports, failures) = run_batch(&providers, &ctx).await;

        assert_eq!(failures, 0);
        assert_eq!(reports.len(), 2);
    }
}
