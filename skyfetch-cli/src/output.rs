//! Human-friendly and machine-readable rendering of weather reports.

use anyhow::Result;
use skyfetch_core::model::WeatherReport;

use crate::cli::OutputFormat;

pub fn render(format: OutputFormat, reports: &[WeatherReport]) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(reports)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(reports)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn render_table(reports: &[WeatherReport]) -> String {
    let mut out = String::new();

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        let heading = format!("{} ({})", report.title, report.location);
        out.push_str(&heading);
        out.push('\n');
        out.push_str(&"-".repeat(heading.chars().count().max(20)));
        out.push('\n');

        let rows: Vec<(&str, &str)> = [
            ("condition", &report.info.condition),
            ("temperature", &report.info.temperature),
            ("feels like", &report.info.feels_like),
            ("wind", &report.info.wind),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect();

        if rows.is_empty() {
            out.push_str("no data\n");
            continue;
        }

        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in rows {
            out.push_str(&format!("{label:<width$}  {value}\n"));
        }
    }

    out
}
