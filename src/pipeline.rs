//! Entry point that runs a submission end to end: parse, build, fetch,
//! normalize, annotate.

use crate::annotate::annotate;
use crate::client::ForecastClient;
use crate::coordinates::parse_coordinates;
use crate::localities::locality_index::LocalityIndex;
use crate::request::query_builder::{Endpoints, ForecastQuery, ForecastRequest};
use crate::response::normalizer::normalize_response;
use crate::response::raw_response::RawResponse;
use crate::types::coordinate::CoordinateList;
use crate::types::forecast_mode::ModeParameters;
use crate::types::forecast_table::ForecastTable;
use crate::types::variable::VariableSelection;
use crate::ForecastError;
use bon::bon;
use log::info;

/// A validated submission and the query it turns into.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSubmission {
    pub request: ForecastRequest,
    pub query: ForecastQuery,
}

impl PreparedSubmission {
    pub fn coordinates(&self) -> &CoordinateList {
        &self.request.coordinates
    }
}

/// Runs forecast submissions against the Open-Meteo APIs.
///
/// A submission either fully succeeds with an annotated [`ForecastTable`] or
/// fails with one [`ForecastError`]; nothing is retained between calls.
///
/// # Examples
///
/// ```rust,no_run
/// # use onacc_forecast::{ForecastPipeline, ForecastError, ModeParameters, SeasonalDuration};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ForecastError> {
/// let pipeline = ForecastPipeline::builder().build()?;
/// let table = pipeline
///     .submit()
///     .coordinates("3.848,11.5021, 4.0511,9.7679")
///     .parameters(ModeParameters::Seasonal(SeasonalDuration::ThreeMonths))
///     .call()
///     .await?;
/// println!("{}", table.frame);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    client: ForecastClient,
    endpoints: Endpoints,
}

#[bon]
impl ForecastPipeline {
    /// Creates a pipeline.
    ///
    /// # Arguments
    ///
    /// * `.client(ForecastClient)`: Optional. Defaults to `ForecastClient::builder().build()`.
    /// * `.endpoints(Endpoints)`: Optional. Defaults to the public Open-Meteo URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::HttpClient`] if the default client cannot be created.
    #[builder]
    pub fn new(
        client: Option<ForecastClient>,
        endpoints: Option<Endpoints>,
    ) -> Result<Self, ForecastError> {
        let client = match client {
            Some(client) => client,
            None => ForecastClient::builder().build()?,
        };
        Ok(Self {
            client,
            endpoints: endpoints.unwrap_or_default(),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Validates the coordinate text and builds the outbound query.
    ///
    /// No network access happens here; all input errors surface before any
    /// request is issued.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::InvalidCoordinateFormat`] / [`ForecastError::NoCoordinatesProvided`]
    ///   from the coordinate parser.
    /// * [`ForecastError::Request`] for an invalid date range.
    pub fn prepare(
        &self,
        coordinate_text: &str,
        parameters: ModeParameters,
        variables: VariableSelection,
    ) -> Result<PreparedSubmission, ForecastError> {
        let coordinates = parse_coordinates(coordinate_text)?;
        let request = ForecastRequest::new(coordinates, parameters, variables);
        let query = request.to_query(&self.endpoints)?;
        Ok(PreparedSubmission { request, query })
    }

    /// Normalizes and annotates the response to a prepared submission.
    pub fn complete(
        &self,
        prepared: &PreparedSubmission,
        raw: &RawResponse,
        index: &LocalityIndex,
    ) -> Result<ForecastTable, ForecastError> {
        let request = &prepared.request;
        let table = normalize_response(
            raw,
            &request.coordinates,
            index,
            request.mode(),
            request.variables,
        )?;
        annotate(table, &request.parameters)
    }

    /// Runs a full submission: prepare, fetch, complete.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.coordinates(&str)`: **Required.** Coordinate text, e.g. `"3.84,11.50, 4.05,9.76"`.
    /// * `.parameters(ModeParameters)`: **Required.** Forecast mode and its parameters.
    /// * `.variables(VariableSelection)`: Optional. Defaults to all three variables.
    /// * `.index(&LocalityIndex)`: Optional. Locality names; without it every row is `"N/A"`.
    ///
    /// # Errors
    ///
    /// Any [`ForecastError`] from the steps above, or
    /// [`ForecastError::NetworkRequest`] if the API cannot be reached.
    #[builder]
    pub async fn submit(
        &self,
        coordinates: &str,
        parameters: ModeParameters,
        variables: Option<VariableSelection>,
        index: Option<&LocalityIndex>,
    ) -> Result<ForecastTable, ForecastError> {
        let prepared = self.prepare(coordinates, parameters, variables.unwrap_or_default())?;
        info!(
            "Submitting {} forecast for {} coordinate(s)",
            prepared.request.mode(),
            prepared.coordinates().len()
        );

        let raw = self.client.fetch(&prepared.query).await?;
        let empty = LocalityIndex::new();
        self.complete(&prepared, &raw, index.unwrap_or(&empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::error::ResponseError;
    use crate::types::coordinate::CoordinatePair;
    use crate::types::forecast_mode::{ClimateModel, ForecastDays, SeasonalDuration, WeatherPeriod};
    use crate::types::variable::DailyVariable;
    use chrono::NaiveDate;

    fn pipeline() -> ForecastPipeline {
        ForecastPipeline::builder().build().unwrap()
    }

    #[test]
    fn test_prepare_rejects_before_request() {
        let pipeline = pipeline();
        let result = pipeline.prepare(
            "3.84,11.50,9.99",
            ModeParameters::Weather(WeatherPeriod::Maximum),
            VariableSelection::default(),
        );
        assert!(matches!(
            result,
            Err(ForecastError::InvalidCoordinateFormat(_))
        ));

        let result = pipeline.prepare(
            "3.84,11.50",
            ModeParameters::ClimateProjection {
                start: NaiveDate::from_ymd_opt(2040, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                model: ClimateModel::MriAgcm32S,
            },
            VariableSelection::default(),
        );
        assert!(matches!(result, Err(ForecastError::Request(_))));
    }

    #[test]
    fn test_prepare_and_complete_offline() -> Result<(), ForecastError> {
        let pipeline = pipeline();
        let prepared = pipeline.prepare(
            "3.848,11.5021, 4.0511,9.7679",
            ModeParameters::Weather(WeatherPeriod::Days(ForecastDays::Three)),
            VariableSelection::default(),
        )?;
        assert_eq!(prepared.coordinates().len(), 2);
        assert_eq!(prepared.query.param("latitude"), Some("3.848,4.0511"));

        let body = r#"[
            {"daily": {"time": ["2025-03-01"], "temperature_2m_max": [29.4],
                       "temperature_2m_min": [19.2], "precipitation_sum": [1.5]}},
            {"daily": {"time": ["2025-03-01"], "temperature_2m_max": [31.0],
                       "temperature_2m_min": [23.9], "precipitation_sum": [8.0]}}
        ]"#;
        let mut index = LocalityIndex::new();
        index.insert(CoordinatePair::new("3.848", "11.5021"), "Yaoundé");
        index.insert(CoordinatePair::new("4.0511", "9.7679"), "Douala");

        let table = pipeline.complete(&prepared, &RawResponse::ok(body), &index)?;
        let rows = table.rows()?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].locality, "Douala");
        assert_eq!(rows[1].value(DailyVariable::Precipitation), Some(8.0));
        assert_eq!(rows[0].forecast_mode.as_deref(), Some("Weather forecast"));
        assert_eq!(
            table.column_names().last().map(String::as_str),
            Some("Forecast mode")
        );
        Ok(())
    }

    #[test]
    fn test_complete_surfaces_api_error() -> Result<(), ForecastError> {
        let pipeline = pipeline();
        let prepared = pipeline.prepare(
            "3.848,11.5021",
            ModeParameters::Seasonal(SeasonalDuration::SixMonths),
            VariableSelection::default(),
        )?;
        let result = pipeline.complete(
            &prepared,
            &RawResponse::new(500, ""),
            &LocalityIndex::new(),
        );
        match result {
            Err(ForecastError::Response(ResponseError::ApiError { code, reason })) => {
                assert_eq!(code, 500);
                assert_eq!(reason, "Weather service internal error");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_live_weather_submission() -> Result<(), ForecastError> {
        let pipeline = pipeline();
        let table = pipeline
            .submit()
            .coordinates("3.848,11.5021, 4.0511,9.7679")
            .parameters(ModeParameters::Weather(WeatherPeriod::Days(
                ForecastDays::Three,
            )))
            .call()
            .await?;

        assert_eq!(table.height(), 6);
        assert_eq!(table.coordinates()?.len(), 2);
        Ok(())
    }
}
