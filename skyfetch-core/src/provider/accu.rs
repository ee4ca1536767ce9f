use async_trait::async_trait;
use scraper::Html;

use crate::{
    error::Result,
    model::{Location, WeatherInfo},
    provider::{AppContext, Provider, markup},
};

pub const NAME: &str = "accu";
const TITLE: &str = "AccuWeather";

const DEFAULT_LOCATION_NAME: &str = "Lviv";
const DEFAULT_LOCATION_URL: &str =
    "https://www.accuweather.com/uk/ua/lviv/324561/weather-forecast/324561";
const BROWSE_LOCATIONS_URL: &str = "https://www.accuweather.com/uk/browse-locations";

/// Weather provider for the AccuWeather site.
#[derive(Debug, Default)]
pub struct AccuProvider;

pub fn provider() -> Box<dyn Provider> {
    Box::new(AccuProvider)
}

#[async_trait]
impl Provider for AccuProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn title(&self) -> &'static str {
        TITLE
    }

    fn default_location(&self) -> Location {
        Location::new(DEFAULT_LOCATION_NAME, DEFAULT_LOCATION_URL)
    }

    fn browse_url(&self) -> &'static str {
        BROWSE_LOCATIONS_URL
    }

    fn parse_locations(&self, html: &str, base_url: &str) -> Vec<Location> {
        let doc = Html::parse_document(html);
        let mut locations = Vec::new();

        for item in markup::select_all(&doc, "li.drilldown.cl") {
            let Some(href) = markup::child_attr(item, "a", "href") else {
                continue;
            };
            let Some(name) = markup::child_text(item, "em") else {
                continue;
            };
            let Some(url) = markup::absolutize(base_url, &href) else {
                continue;
            };
            locations.push(Location::new(name, url));
        }

        locations
    }

    /// The forecast page only links to the current-day details, so
    /// extraction follows that link and reads the `detail-now` block.
    async fn extract_weather(&self, ctx: &AppContext<'_>, html: &str) -> Result<WeatherInfo> {
        let current_day_url = {
            let doc = Html::parse_document(html);
            markup::first_attr(&doc, "li.current.first.cl a", "href")
        };
        let Some(url) = current_day_url else {
            return Ok(WeatherInfo::default());
        };

        let page = ctx.pages.load(&url, ctx.refresh).await?;
        let doc = Html::parse_document(&page);

        let wind_parts = markup::all_text(&doc, "#detail-now li.wind");

        Ok(WeatherInfo {
            condition: markup::first_text(&doc, "#detail-now span.cond"),
            temperature: markup::first_text(&doc, "#detail-now span.large-temp"),
            feels_like: markup::first_text(&doc, "#detail-now span.small-temp"),
            wind: (!wind_parts.is_empty()).then(|| wind_parts.join(" ")),
        })
    }
}
