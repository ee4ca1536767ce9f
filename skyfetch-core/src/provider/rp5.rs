use async_trait::async_trait;
use scraper::{ElementRef, Html};

use crate::{
    error::Result,
    model::{Location, WeatherInfo},
    provider::{AppContext, Provider, markup},
};

pub const NAME: &str = "rp5";
const TITLE: &str = "rp5.ua";

const DEFAULT_LOCATION_NAME: &str = "Lviv";
const DEFAULT_LOCATION_URL: &str =
    "http://rp5.ua/%D0%9F%D0%BE%D0%B3%D0%BE%D0%B4%D0%B0_%D1%83_%D0%9B%D1%8C%D0%B2%D0%BE%D0%B2%D1%96,_%D0%9B%D1%8C%D0%B2%D1%96%D0%B2%D1%81%D1%8C%D0%BA%D0%B0_%D0%BE%D0%B1%D0%BB%D0%B0%D1%81%D1%82%D1%8C";
const BROWSE_LOCATIONS_URL: &str =
    "http://rp5.ua/%D0%9F%D0%BE%D0%B3%D0%BE%D0%B4%D0%B0_%D0%B2_%D1%81%D0%B2%D1%96%D1%82%D1%96";

/// Weather provider for the rp5.ua site.
#[derive(Debug, Default)]
pub struct Rp5Provider;

pub fn provider() -> Box<dyn Provider> {
    Box::new(Rp5Provider)
}

fn link_location(link: ElementRef<'_>, base_url: &str) -> Option<Location> {
    let href = link.value().attr("href")?;
    let name = markup::element_text(&link);
    if name.is_empty() {
        return None;
    }
    let url = markup::absolutize(base_url, href)?;
    Some(Location::new(name, url))
}

#[async_trait]
impl Provider for Rp5Provider {
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

    /// The world page links countries, country pages list city
    /// headings; a city page has neither and is a leaf.
    fn parse_locations(&self, html: &str, base_url: &str) -> Vec<Location> {
        let doc = Html::parse_document(html);

        let countries: Vec<Location> = markup::select_all(&doc, "div.country_map_links a")
            .into_iter()
            .filter_map(|link| link_location(link, base_url))
            .collect();
        if !countries.is_empty() {
            return countries;
        }

        markup::select_all(&doc, "div.countryMap h3 a")
            .into_iter()
            .filter_map(|link| link_location(link, base_url))
            .collect()
    }

    /// The archive block holds one comma-separated summary line;
    /// condition and wind are recovered from its pieces, temperature
    /// from its dedicated span.
    async fn extract_weather(&self, _ctx: &AppContext<'_>, html: &str) -> Result<WeatherInfo> {
        let doc = Html::parse_document(html);
        let mut info = WeatherInfo::default();

        let Some(archive) = markup::first_text(&doc, "div#archiveString div.ArchiveInfo") else {
            return Ok(info);
        };

        let parts: Vec<&str> = archive.split(',').collect();

        if let Some(condition) = parts.get(1).map(|part| part.trim()) {
            if !condition.is_empty() {
                info.condition = Some(condition.to_string());
            }
        }

        info.temperature = markup::first_text(&doc, "div#archiveString span.t_0");

        if let Some(part) = parts.get(3) {
            let part = part.trim();
            let mut wind = match part.find(')') {
                Some(end) => part[..=end].to_string(),
                None => part.to_string(),
            };
            if let Some(more) = parts.get(4) {
                wind.push_str(more);
            }
            if !wind.trim().is_empty() {
                info.wind = Some(wind);
            }
        }

        Ok(info)
    }
}
