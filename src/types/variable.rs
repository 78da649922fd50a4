//! Daily variables that can be requested, and how their keys are resolved in a
//! response payload.

use crate::types::forecast_mode::ForecastMode;
use std::fmt;

/// A daily variable offered by all three forecast endpoints.
///
/// The declaration order is the column order of a [`crate::ForecastTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DailyVariable {
    TemperatureMax,
    TemperatureMin,
    Precipitation,
}

impl DailyVariable {
    pub const ALL: [DailyVariable; 3] = [
        DailyVariable::TemperatureMax,
        DailyVariable::TemperatureMin,
        DailyVariable::Precipitation,
    ];

    /// Identifier used in the `daily` request parameter and in the response.
    pub fn api_key(&self) -> &'static str {
        match self {
            DailyVariable::TemperatureMax => "temperature_2m_max",
            DailyVariable::TemperatureMin => "temperature_2m_min",
            DailyVariable::Precipitation => "precipitation_sum",
        }
    }

    /// Key of the ensemble mean of this variable in a seasonal response.
    pub fn ensemble_mean_key(&self) -> &'static str {
        match self {
            DailyVariable::TemperatureMax => "temperature_2m_max_mean",
            DailyVariable::TemperatureMin => "temperature_2m_min_mean",
            DailyVariable::Precipitation => "precipitation_sum_mean",
        }
    }

    /// Column header in tables and exports.
    pub fn column_name(&self) -> &'static str {
        match self {
            DailyVariable::TemperatureMax => "Temperature max (°C)",
            DailyVariable::TemperatureMin => "Temperature min (°C)",
            DailyVariable::Precipitation => "Precipitation (mm)",
        }
    }

    /// Returns the response keys to try for this variable under `mode`.
    pub fn keys(&self, mode: ForecastMode) -> VariableKeys {
        match mode {
            ForecastMode::Seasonal => VariableKeys {
                preferred: self.ensemble_mean_key(),
                fallback: Some(self.api_key()),
            },
            ForecastMode::Weather | ForecastMode::ClimateProjection => VariableKeys {
                preferred: self.api_key(),
                fallback: None,
            },
        }
    }
}

impl fmt::Display for DailyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_key())
    }
}

/// The payload keys under which a variable may appear, most preferred first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableKeys {
    pub preferred: &'static str,
    pub fallback: Option<&'static str>,
}

impl VariableKeys {
    pub fn iter(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.preferred).chain(self.fallback)
    }
}

/// Which daily variables a submission asks for.
///
/// All three are on by default. Turning all of them off is allowed: the
/// resulting table then only carries the locality, date and coordinate columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableSelection {
    pub temperature_max: bool,
    pub temperature_min: bool,
    pub precipitation: bool,
}

impl Default for VariableSelection {
    fn default() -> Self {
        Self {
            temperature_max: true,
            temperature_min: true,
            precipitation: true,
        }
    }
}

impl VariableSelection {
    /// A selection with every variable turned off.
    pub fn none() -> Self {
        Self {
            temperature_max: false,
            temperature_min: false,
            precipitation: false,
        }
    }

    pub fn contains(&self, variable: DailyVariable) -> bool {
        match variable {
            DailyVariable::TemperatureMax => self.temperature_max,
            DailyVariable::TemperatureMin => self.temperature_min,
            DailyVariable::Precipitation => self.precipitation,
        }
    }

    /// Selected variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = DailyVariable> + '_ {
        DailyVariable::ALL
            .into_iter()
            .filter(move |variable| self.contains(*variable))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl FromIterator<DailyVariable> for VariableSelection {
    fn from_iter<I: IntoIterator<Item = DailyVariable>>(iter: I) -> Self {
        let mut selection = VariableSelection::none();
        for variable in iter {
            match variable {
                DailyVariable::TemperatureMax => selection.temperature_max = true,
                DailyVariable::TemperatureMin => selection.temperature_min = true,
                DailyVariable::Precipitation => selection.precipitation = true,
            }
        }
        selection
    }
}
