use chrono::{Datelike, Duration, NaiveDate};
use clap::ValueEnum;

/// Placeholder cover for Countrytown rows without an image
pub const COUNTRYTOWN_DEFAULT_IMAGE: &str =
    "https://pbs.twimg.com/profile_images/1301033714529394693/SsLzg2DQ_400x400.jpg";

/// Charts this tool knows how to store
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Billboard Hot Country Songs
    CountrySongs,
    /// Billboard Country Airplay
    CountryAirplay,
    /// Countrytown Hot 50
    #[value(name = "countrytown-hot50")]
    CountrytownHot50,
}

impl ChartKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartKind::CountrySongs => "Country",
            ChartKind::CountryAirplay => "Country Airplay",
            ChartKind::CountrytownHot50 => "Countrytown Hot 50",
        }
    }

    /// File the most recent chart is written to
    pub fn latest_file_name(&self) -> &'static str {
        match self {
            ChartKind::CountrySongs => "latest.json",
            ChartKind::CountryAirplay => "latest-airplay.json",
            ChartKind::CountrytownHot50 => "latest-au.json",
        }
    }

    /// Prefix of the dated file an older chart is rotated to
    pub fn archive_prefix(&self) -> &'static str {
        match self {
            ChartKind::CountrySongs => "",
            ChartKind::CountryAirplay => "airplay-",
            ChartKind::CountrytownHot50 => "au-",
        }
    }

    /// Image used for rows the chart page publishes without a cover
    pub fn default_image(&self) -> Option<&'static str> {
        match self {
            ChartKind::CountrySongs | ChartKind::CountryAirplay => None,
            ChartKind::CountrytownHot50 => Some(COUNTRYTOWN_DEFAULT_IMAGE),
        }
    }

    /// Publication date of the chart current on `today`
    pub fn chart_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            ChartKind::CountrySongs | ChartKind::CountryAirplay => billboard_chart_date(today),
            ChartKind::CountrytownHot50 => countrytown_chart_date(today),
        }
    }
}

/// Billboard charts are dated on a Saturday
///
/// The upcoming Saturday is used, except on Monday and Tuesday when the new
/// chart isn't published yet and the previous Saturday applies.
pub fn billboard_chart_date(today: NaiveDate) -> NaiveDate {
    let weekday = today.weekday().number_from_monday() as i64;
    let days = if weekday <= 2 { -(weekday + 1) } else { 6 - weekday };
    today + Duration::days(days)
}

/// Countrytown charts are dated on the most recent Friday
pub fn countrytown_chart_date(today: NaiveDate) -> NaiveDate {
    let weekday = today.weekday().number_from_monday() as i64;
    let days_since_friday = (weekday - 5).rem_euclid(7);
    today - Duration::days(days_since_friday)
}
