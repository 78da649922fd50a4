//! Defines the three forecast modes and the parameters each one takes.

use chrono::NaiveDate;
use std::fmt;

/// Largest `forecast_days` value the Open-Meteo forecast API accepts.
pub const MAX_FORECAST_DAYS: i64 = 16;

/// The kind of forecast a submission asks for.
///
/// Each mode targets a different Open-Meteo endpoint, takes a different set of
/// parameters ([`ModeParameters`]) and returns a slightly different daily schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastMode {
    /// Short-range weather forecast, up to 16 days.
    Weather,
    /// Seasonal outlook based on an ensemble; values are ensemble means.
    Seasonal,
    /// Long-range downscaled climate projection between 1950 and 2050.
    ClimateProjection,
}

impl ForecastMode {
    /// Human-readable label written into the `Forecast mode` column.
    pub fn label(&self) -> &'static str {
        match self {
            ForecastMode::Weather => "Weather forecast",
            ForecastMode::Seasonal => "Seasonal forecast",
            ForecastMode::ClimateProjection => "Climate projection",
        }
    }
}

/// Allows formatting a `ForecastMode` using its label.
///
/// # Examples
///
/// ```
/// use onacc_forecast::ForecastMode;
///
/// assert_eq!(ForecastMode::Seasonal.to_string(), "Seasonal forecast");
/// ```
impl fmt::Display for ForecastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed day counts offered for a weather forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForecastDays {
    One,
    Three,
    #[default]
    Seven,
    Ten,
    Fourteen,
}

impl ForecastDays {
    pub const ALL: [ForecastDays; 5] = [
        ForecastDays::One,
        ForecastDays::Three,
        ForecastDays::Seven,
        ForecastDays::Ten,
        ForecastDays::Fourteen,
    ];

    pub fn days(&self) -> i64 {
        match self {
            ForecastDays::One => 1,
            ForecastDays::Three => 3,
            ForecastDays::Seven => 7,
            ForecastDays::Ten => 10,
            ForecastDays::Fourteen => 14,
        }
    }
}

impl TryFrom<i64> for ForecastDays {
    type Error = i64;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        ForecastDays::ALL
            .into_iter()
            .find(|option| option.days() == days)
            .ok_or(days)
    }
}

/// How long a weather forecast should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherPeriod {
    /// One of the fixed day counts.
    Days(ForecastDays),
    /// An explicit inclusive date range; its length in days is what gets requested.
    Range { start: NaiveDate, end: NaiveDate },
    /// No range chosen: request the longest forecast the API offers.
    Maximum,
}

/// Seasonal outlook lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonalDuration {
    FortyFiveDays,
    ThreeMonths,
    SixMonths,
    NineMonths,
}

impl SeasonalDuration {
    pub const ALL: [SeasonalDuration; 4] = [
        SeasonalDuration::FortyFiveDays,
        SeasonalDuration::ThreeMonths,
        SeasonalDuration::SixMonths,
        SeasonalDuration::NineMonths,
    ];

    /// Label shown to the user and written into the `Forecast duration` column.
    pub fn label(&self) -> &'static str {
        match self {
            SeasonalDuration::FortyFiveDays => "45 days",
            SeasonalDuration::ThreeMonths => "3 months",
            SeasonalDuration::SixMonths => "6 months",
            SeasonalDuration::NineMonths => "9 months",
        }
    }

    /// The leading integer of the label, which is the count sent upstream.
    pub fn count(&self) -> u32 {
        match self {
            SeasonalDuration::FortyFiveDays => 45,
            SeasonalDuration::ThreeMonths => 3,
            SeasonalDuration::SixMonths => 6,
            SeasonalDuration::NineMonths => 9,
        }
    }

    /// Whether [`Self::count`] is a number of days rather than months.
    pub fn counts_days(&self) -> bool {
        matches!(self, SeasonalDuration::FortyFiveDays)
    }
}

impl fmt::Display for SeasonalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// High-resolution CMIP6 models served by the Open-Meteo climate API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClimateModel {
    MriAgcm32S,
    FgoalsF3H,
    CmccCm2Vhr4,
    EcEarth3PHr,
    MpiEsm12Xr,
    Nicam168S,
    HiRamSitHr,
}

impl ClimateModel {
    pub const ALL: [ClimateModel; 7] = [
        ClimateModel::MriAgcm32S,
        ClimateModel::FgoalsF3H,
        ClimateModel::CmccCm2Vhr4,
        ClimateModel::EcEarth3PHr,
        ClimateModel::MpiEsm12Xr,
        ClimateModel::Nicam168S,
        ClimateModel::HiRamSitHr,
    ];

    /// Identifier sent as the `models` parameter.
    pub fn identifier(&self) -> &'static str {
        match self {
            ClimateModel::MriAgcm32S => "MRI_AGCM3_2_S",
            ClimateModel::FgoalsF3H => "FGOALS_f3_H",
            ClimateModel::CmccCm2Vhr4 => "CMCC_CM2_VHR4",
            ClimateModel::EcEarth3PHr => "EC_Earth3P_HR",
            ClimateModel::MpiEsm12Xr => "MPI_ESM1_2_XR",
            ClimateModel::Nicam168S => "NICAM16_8S",
            ClimateModel::HiRamSitHr => "HiRAM_SIT_HR",
        }
    }

    /// Looks a model up by its identifier (case-sensitive).
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        ClimateModel::ALL
            .into_iter()
            .find(|model| model.identifier() == identifier)
    }
}

impl fmt::Display for ClimateModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// The mode of a submission together with the parameters that mode needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeParameters {
    Weather(WeatherPeriod),
    Seasonal(SeasonalDuration),
    ClimateProjection {
        start: NaiveDate,
        end: NaiveDate,
        model: ClimateModel,
    },
}

impl ModeParameters {
    pub fn mode(&self) -> ForecastMode {
        match self {
            ModeParameters::Weather(_) => ForecastMode::Weather,
            ModeParameters::Seasonal(_) => ForecastMode::Seasonal,
            ModeParameters::ClimateProjection { .. } => ForecastMode::ClimateProjection,
        }
    }
}
