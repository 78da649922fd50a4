//! Turns a [`ForecastRequest`] into the GET query sent to Open-Meteo.

use crate::request::error::RequestError;
use crate::types::coordinate::CoordinateList;
use crate::types::forecast_mode::{
    ForecastMode, ModeParameters, SeasonalDuration, WeatherPeriod, MAX_FORECAST_DAYS,
};
use crate::types::variable::VariableSelection;
use chrono::{Datelike, NaiveDate};
use reqwest::Url;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const SEASONAL_URL: &str = "https://seasonal-api.open-meteo.com/v1/seasonal";
pub const CLIMATE_URL: &str = "https://climate-api.open-meteo.com/v1/climate";

/// First year served by the climate projection API.
pub const CLIMATE_FIRST_YEAR: i32 = 1950;
/// Last year served by the climate projection API.
pub const CLIMATE_LAST_YEAR: i32 = 2050;

/// Base URLs of the three forecast APIs.
///
/// Defaults to the public Open-Meteo endpoints; tests and self-hosted
/// deployments can point them elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub forecast: String,
    pub seasonal: String,
    pub climate: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast: FORECAST_URL.to_string(),
            seasonal: SEASONAL_URL.to_string(),
            climate: CLIMATE_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn for_mode(&self, mode: ForecastMode) -> &str {
        match mode {
            ForecastMode::Weather => &self.forecast,
            ForecastMode::Seasonal => &self.seasonal,
            ForecastMode::ClimateProjection => &self.climate,
        }
    }
}

/// Everything needed to ask for a forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub coordinates: CoordinateList,
    pub parameters: ModeParameters,
    pub variables: VariableSelection,
}

impl ForecastRequest {
    pub fn new(
        coordinates: CoordinateList,
        parameters: ModeParameters,
        variables: VariableSelection,
    ) -> Self {
        Self {
            coordinates,
            parameters,
            variables,
        }
    }

    pub fn mode(&self) -> ForecastMode {
        self.parameters.mode()
    }

    /// Builds the outbound query.
    ///
    /// All coordinates are batched into one call: `latitude` and `longitude`
    /// carry the comma-joined tokens, index-aligned. `daily` lists the selected
    /// variables and is left out when none is selected.
    ///
    /// # Errors
    ///
    /// * [`RequestError::NoCoordinates`] for an empty coordinate list.
    /// * [`RequestError::InvalidDateRange`] for a weather range that ends before
    ///   it starts or spans more than 16 days, or for a climate range outside
    ///   1950-01-01..=2050-12-31 or ending before it starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use onacc_forecast::{
    ///     parse_coordinates, Endpoints, ForecastDays, ForecastRequest, ModeParameters,
    ///     VariableSelection, WeatherPeriod,
    /// };
    ///
    /// let request = ForecastRequest::new(
    ///     parse_coordinates("3.84,11.50")?,
    ///     ModeParameters::Weather(WeatherPeriod::Days(ForecastDays::Three)),
    ///     VariableSelection::default(),
    /// );
    /// let query = request.to_query(&Endpoints::default())?;
    /// assert_eq!(query.param("forecast_days"), Some("3"));
    /// assert_eq!(query.param("timezone"), Some("auto"));
    /// # Ok::<(), onacc_forecast::ForecastError>(())
    /// ```
    pub fn to_query(&self, endpoints: &Endpoints) -> Result<ForecastQuery, RequestError> {
        if self.coordinates.is_empty() {
            return Err(RequestError::NoCoordinates);
        }

        let mut params = vec![
            (
                "latitude".to_string(),
                self.coordinates.latitudes().join(","),
            ),
            (
                "longitude".to_string(),
                self.coordinates.longitudes().join(","),
            ),
        ];
        if !self.variables.is_empty() {
            let daily: Vec<&str> = self.variables.iter().map(|v| v.api_key()).collect();
            params.push(("daily".to_string(), daily.join(",")));
        }

        match self.parameters {
            ModeParameters::Weather(period) => {
                params.push(("forecast_days".to_string(), forecast_days(period)?.to_string()));
                params.push(("timezone".to_string(), "auto".to_string()));
            }
            ModeParameters::Seasonal(duration) => {
                params.push(seasonal_length(duration));
                params.push(("ensemble".to_string(), "true".to_string()));
            }
            ModeParameters::ClimateProjection { start, end, model } => {
                check_climate_range(start, end)?;
                params.push(("start_date".to_string(), iso_date(start)));
                params.push(("end_date".to_string(), iso_date(end)));
                params.push(("models".to_string(), model.identifier().to_string()));
            }
        }

        Ok(ForecastQuery {
            endpoint: endpoints.for_mode(self.mode()).to_string(),
            params,
        })
    }
}

/// An outbound GET: endpoint plus ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastQuery {
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

impl ForecastQuery {
    /// Value of the parameter named `key`, if present.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full request URL with percent-encoded parameters.
    pub fn to_url(&self) -> Result<Url, RequestError> {
        Url::parse_with_params(&self.endpoint, &self.params).map_err(|e| {
            RequestError::InvalidEndpoint {
                url: self.endpoint.clone(),
                reason: e.to_string(),
            }
        })
    }
}

fn forecast_days(period: WeatherPeriod) -> Result<i64, RequestError> {
    match period {
        WeatherPeriod::Days(days) => Ok(days.days()),
        WeatherPeriod::Maximum => Ok(MAX_FORECAST_DAYS),
        WeatherPeriod::Range { start, end } => {
            let invalid = |reason: String| RequestError::InvalidDateRange { start, end, reason };
            if end < start {
                return Err(invalid("end date is before start date".to_string()));
            }
            let days = (end - start).num_days() + 1;
            if days > MAX_FORECAST_DAYS {
                return Err(invalid(format!(
                    "{days} days requested, at most {MAX_FORECAST_DAYS} are available"
                )));
            }
            Ok(days)
        }
    }
}

fn seasonal_length(duration: SeasonalDuration) -> (String, String) {
    let key = if duration.counts_days() {
        "forecast_days"
    } else {
        "forecast_months"
    };
    (key.to_string(), duration.count().to_string())
}

fn check_climate_range(start: NaiveDate, end: NaiveDate) -> Result<(), RequestError> {
    let invalid = |reason: String| RequestError::InvalidDateRange { start, end, reason };
    let years = CLIMATE_FIRST_YEAR..=CLIMATE_LAST_YEAR;
    if !years.contains(&start.year()) || !years.contains(&end.year()) {
        return Err(invalid(format!(
            "climate projections cover {CLIMATE_FIRST_YEAR}-01-01 to {CLIMATE_LAST_YEAR}-12-31"
        )));
    }
    if end < start {
        return Err(invalid("end date is before start date".to_string()));
    }
    Ok(())
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::coordinate::CoordinatePair;
    use crate::types::forecast_mode::{ClimateModel, ForecastDays};
    use crate::types::variable::DailyVariable;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_coordinates() -> CoordinateList {
        vec![
            CoordinatePair::new("3.84", "11.50"),
            CoordinatePair::new("4.05", "9.76"),
        ]
        .into_iter()
        .collect()
    }

    fn query(parameters: ModeParameters) -> Result<ForecastQuery, RequestError> {
        ForecastRequest::new(two_coordinates(), parameters, VariableSelection::default())
            .to_query(&Endpoints::default())
    }

    #[test]
    fn test_weather_fixed_days() -> Result<(), RequestError> {
        let query = query(ModeParameters::Weather(WeatherPeriod::Days(
            ForecastDays::Seven,
        )))?;
        assert_eq!(query.endpoint, FORECAST_URL);
        assert_eq!(
            query.params,
            [
                ("latitude", "3.84,4.05"),
                ("longitude", "11.50,9.76"),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,precipitation_sum"
                ),
                ("forecast_days", "7"),
                ("timezone", "auto"),
            ]
            .map(|(k, v)| (k.to_string(), v.to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_weather_range_and_maximum() -> Result<(), RequestError> {
        let range = query(ModeParameters::Weather(WeatherPeriod::Range {
            start: date(2025, 3, 1),
            end: date(2025, 3, 10),
        }))?;
        assert_eq!(range.param("forecast_days"), Some("10"));

        let max = query(ModeParameters::Weather(WeatherPeriod::Maximum))?;
        assert_eq!(max.param("forecast_days"), Some("16"));
        Ok(())
    }

    #[test]
    fn test_weather_range_rejected() {
        for (start, end) in [
            (date(2025, 3, 10), date(2025, 3, 1)),
            (date(2025, 3, 1), date(2025, 3, 17)),
        ] {
            let result = query(ModeParameters::Weather(WeatherPeriod::Range { start, end }));
            assert!(matches!(
                result,
                Err(RequestError::InvalidDateRange { .. })
            ));
        }
        // Sixteen days inclusive is still fine.
        assert!(query(ModeParameters::Weather(WeatherPeriod::Range {
            start: date(2025, 3, 1),
            end: date(2025, 3, 16),
        }))
        .is_ok());
    }

    #[test]
    fn test_seasonal_parameters() -> Result<(), RequestError> {
        let months = query(ModeParameters::Seasonal(SeasonalDuration::SixMonths))?;
        assert_eq!(months.endpoint, SEASONAL_URL);
        assert_eq!(months.param("forecast_months"), Some("6"));
        assert_eq!(months.param("forecast_days"), None);
        assert_eq!(months.param("ensemble"), Some("true"));

        let days = query(ModeParameters::Seasonal(SeasonalDuration::FortyFiveDays))?;
        assert_eq!(days.param("forecast_days"), Some("45"));
        assert_eq!(days.param("forecast_months"), None);
        Ok(())
    }

    #[test]
    fn test_climate_parameters() -> Result<(), RequestError> {
        let query = query(ModeParameters::ClimateProjection {
            start: date(2020, 1, 1),
            end: date(2040, 1, 1),
            model: ClimateModel::MriAgcm32S,
        })?;
        assert_eq!(query.endpoint, CLIMATE_URL);
        assert_eq!(query.param("start_date"), Some("2020-01-01"));
        assert_eq!(query.param("end_date"), Some("2040-01-01"));
        assert_eq!(query.param("models"), Some("MRI_AGCM3_2_S"));
        assert_eq!(query.param("timezone"), None);
        Ok(())
    }

    #[test]
    fn test_climate_bounds() {
        let cases = [
            (date(1949, 12, 31), date(2000, 1, 1)),
            (date(2000, 1, 1), date(2051, 1, 1)),
            (date(2030, 1, 1), date(2020, 1, 1)),
        ];
        for (start, end) in cases {
            let result = query(ModeParameters::ClimateProjection {
                start,
                end,
                model: ClimateModel::FgoalsF3H,
            });
            assert!(matches!(
                result,
                Err(RequestError::InvalidDateRange { .. })
            ));
        }
        assert!(query(ModeParameters::ClimateProjection {
            start: date(1950, 1, 1),
            end: date(2050, 12, 31),
            model: ClimateModel::FgoalsF3H,
        })
        .is_ok());
    }

    #[test]
    fn test_daily_follows_selection() -> Result<(), RequestError> {
        let only_rain: VariableSelection = [DailyVariable::Precipitation].into_iter().collect();
        let request = ForecastRequest::new(
            two_coordinates(),
            ModeParameters::Weather(WeatherPeriod::Maximum),
            only_rain,
        );
        let query = request.to_query(&Endpoints::default())?;
        assert_eq!(query.param("daily"), Some("precipitation_sum"));

        let nothing = ForecastRequest::new(
            two_coordinates(),
            ModeParameters::Weather(WeatherPeriod::Maximum),
            VariableSelection::none(),
        );
        assert_eq!(nothing.to_query(&Endpoints::default())?.param("daily"), None);
        Ok(())
    }

    #[test]
    fn test_empty_coordinates_rejected() {
        let request = ForecastRequest::new(
            CoordinateList::default(),
            ModeParameters::Weather(WeatherPeriod::Maximum),
            VariableSelection::default(),
        );
        assert!(matches!(
            request.to_query(&Endpoints::default()),
            Err(RequestError::NoCoordinates)
        ));
    }

    #[test]
    fn test_url_encodes_parameters() -> Result<(), RequestError> {
        let query = query(ModeParameters::Seasonal(SeasonalDuration::ThreeMonths))?;
        let url = query.to_url()?;
        assert_eq!(url.host_str(), Some("seasonal-api.open-meteo.com"));
        assert!(url.as_str().contains("latitude=3.84%2C4.05"));
        assert!(url.as_str().contains("forecast_months=3"));

        let broken = ForecastQuery {
            endpoint: "not a url".to_string(),
            params: Vec::new(),
        };
        assert!(matches!(
            broken.to_url(),
            Err(RequestError::InvalidEndpoint { .. })
        ));
        Ok(())
    }
}
