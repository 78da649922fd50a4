//! Plotly figure description of a forecast table.
//!
//! The figure is plain serde data; the dashboard hands the JSON to
//! `Plotly.newPlot` (or any Plotly binding) unchanged.

use crate::export::error::ExportError;
use crate::types::forecast_mode::ForecastMode;
use crate::types::forecast_table::{ForecastRow, ForecastTable};
use crate::types::variable::DailyVariable;
use crate::ForecastError;
use serde::Serialize;

pub const TEMPERATURE_MAX_COLOR: &str = "#FF5733";
pub const TEMPERATURE_MIN_COLOR: &str = "#3380FF";
pub const PRECIPITATION_COLOR: &str = "#33FF47";
pub const PRECIPITATION_OPACITY: f64 = 0.6;
const TEMPERATURE_AXIS_COLOR: &str = "#1f77b4";
const PRECIPITATION_AXIS_COLOR: &str = "#2ca02c";
const SEASONAL_BACKGROUND: &str = "rgba(200,200,200,0.2)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastChart {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub name: String,
    pub x: Vec<String>,
    /// `null` entries leave a gap in the plot.
    pub y: Vec<Option<f64>>,
    pub yaxis: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: &'static str,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: &'static str,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Text,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub orientation: &'static str,
    pub yanchor: &'static str,
    pub y: f64,
    pub xanchor: &'static str,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub fillcolor: &'static str,
    pub line: ShapeLine,
    pub layer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeLine {
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Text,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub yaxis2: Axis,
    pub legend: Legend,
    pub plot_bgcolor: &'static str,
    pub hovermode: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
}

impl ForecastChart {
    /// Builds the figure for `table`.
    ///
    /// Temperatures are lines on the left axis, precipitation is bars on a
    /// right axis overlaid on the same plot. Only the variables present in the
    /// table get a trace. When the table spans several coordinates each one
    /// gets its own trace group, named after its locality.
    pub fn build(table: &ForecastTable, mode: ForecastMode) -> Result<Self, ForecastError> {
        let coordinates = table.coordinates()?;
        let grouped = coordinates.len() > 1;

        let mut data = Vec::new();
        for pair in &coordinates {
            let rows = table.for_coordinate(pair)?.rows()?;
            let group = grouped.then(|| {
                let locality = rows.first().map(|r| r.locality.as_str()).unwrap_or_default();
                format!("{locality} ({pair})")
            });
            for variable in table.variables().iter() {
                data.push(trace(&rows, variable, group.as_deref()));
            }
        }

        Ok(Self {
            data,
            layout: layout(mode),
        })
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn trace(rows: &[ForecastRow], variable: DailyVariable, group: Option<&str>) -> Trace {
    let (kind, label, line, marker) = match variable {
        DailyVariable::TemperatureMax => (
            TraceKind::Scatter,
            "Temperature max",
            Some(Line {
                color: TEMPERATURE_MAX_COLOR,
                width: 2.0,
            }),
            None,
        ),
        DailyVariable::TemperatureMin => (
            TraceKind::Scatter,
            "Temperature min",
            Some(Line {
                color: TEMPERATURE_MIN_COLOR,
                width: 2.0,
            }),
            None,
        ),
        DailyVariable::Precipitation => (
            TraceKind::Bar,
            "Precipitation",
            None,
            Some(Marker {
                color: PRECIPITATION_COLOR,
                opacity: PRECIPITATION_OPACITY,
            }),
        ),
    };

    Trace {
        kind,
        name: match group {
            Some(group) => format!("{label} - {group}"),
            None => label.to_string(),
        },
        x: rows
            .iter()
            .map(|r| r.date.format("%Y-%m-%d").to_string())
            .collect(),
        y: rows.iter().map(|r| r.value(variable)).collect(),
        yaxis: match kind {
            TraceKind::Scatter => "y",
            TraceKind::Bar => "y2",
        },
        mode: (kind == TraceKind::Scatter).then_some("lines"),
        line,
        marker,
        legendgroup: group.map(str::to_string),
    }
}

fn layout(mode: ForecastMode) -> Layout {
    let shapes = match mode {
        ForecastMode::Seasonal => vec![Shape {
            kind: "rect",
            xref: "paper",
            yref: "paper",
            x0: 0.0,
            y0: 0.0,
            x1: 1.0,
            y1: 1.0,
            fillcolor: SEASONAL_BACKGROUND,
            line: ShapeLine { width: 0.0 },
            layer: "below",
        }],
        ForecastMode::Weather | ForecastMode::ClimateProjection => Vec::new(),
    };

    Layout {
        title: Text {
            text: format!("{} - ONACC", mode.label()),
            font: None,
        },
        xaxis: Axis {
            title: Text {
                text: "Date".to_string(),
                font: None,
            },
            tickfont: None,
            gridcolor: Some("lightgray"),
            side: None,
            overlaying: None,
        },
        yaxis: Axis {
            title: Text {
                text: "Temperature (°C)".to_string(),
                font: Some(Font {
                    color: TEMPERATURE_AXIS_COLOR,
                }),
            },
            tickfont: Some(Font {
                color: TEMPERATURE_AXIS_COLOR,
            }),
            gridcolor: Some("lightgray"),
            side: Some("left"),
            overlaying: None,
        },
        yaxis2: Axis {
            title: Text {
                text: "Precipitation (mm)".to_string(),
                font: Some(Font {
                    color: PRECIPITATION_AXIS_COLOR,
                }),
            },
            tickfont: Some(Font {
                color: PRECIPITATION_AXIS_COLOR,
            }),
            gridcolor: None,
            side: Some("right"),
            overlaying: Some("y"),
        },
        legend: Legend {
            orientation: "h",
            yanchor: "bottom",
            y: 1.02,
            xanchor: "right",
            x: 1.0,
        },
        plot_bgcolor: "rgba(255,255,255,0.9)",
        hovermode: "x unified",
        shapes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::variable::VariableSelection;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn row(locality: &str, lat: &str, day: u32) -> ForecastRow {
        ForecastRow {
            locality: locality.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            latitude: lat.to_string(),
            longitude: "10.0".to_string(),
            values: BTreeMap::from([
                (DailyVariable::TemperatureMax, Some(30.0 + day as f64)),
                (DailyVariable::TemperatureMin, Some(20.0)),
                (DailyVariable::Precipitation, None),
            ]),
            forecast_mode: None,
            mode_detail: None,
        }
    }

    #[test]
    fn test_single_location_chart() -> Result<(), Box<dyn std::error::Error>> {
        let rows = vec![row("Yaoundé", "3.8", 1), row("Yaoundé", "3.8", 2)];
        let table = ForecastTable::from_rows(&rows, VariableSelection::default(), Vec::new())?;
        let chart = ForecastChart::build(&table, ForecastMode::Weather)?;

        assert_eq!(chart.data.len(), 3);
        assert_eq!(chart.data[0].name, "Temperature max");
        assert_eq!(chart.data[0].y, [Some(31.0), Some(32.0)]);
        assert_eq!(chart.data[2].kind, TraceKind::Bar);
        assert_eq!(chart.data[2].y, [None, None]);
        assert!(chart.layout.shapes.is_empty());

        let value: serde_json::Value = serde_json::from_str(&chart.to_json()?)?;
        assert_eq!(value["data"][0]["type"], "scatter");
        assert_eq!(value["data"][0]["line"], json!({"color": "#FF5733", "width": 2.0}));
        assert_eq!(value["data"][1]["line"]["color"], "#3380FF");
        assert_eq!(value["data"][2]["yaxis"], "y2");
        assert_eq!(value["data"][2]["marker"], json!({"color": "#33FF47", "opacity": 0.6}));
        assert_eq!(value["data"][2]["y"], json!([null, null]));
        assert_eq!(value["data"][0]["x"], json!(["2025-03-01", "2025-03-02"]));
        assert_eq!(value["layout"]["yaxis2"]["overlaying"], "y");
        assert_eq!(value["layout"]["yaxis2"]["side"], "right");
        assert_eq!(value["layout"]["legend"]["orientation"], "h");
        assert_eq!(value["layout"]["hovermode"], "x unified");
        assert_eq!(value["layout"]["title"]["text"], "Weather forecast - ONACC");
        assert!(value["layout"].get("shapes").is_none());
        Ok(())
    }

    #[test]
    fn test_seasonal_background_and_groups() -> Result<(), Box<dyn std::error::Error>> {
        let rows = vec![
            row("Yaoundé", "3.8", 1),
            row("N/A", "4.0", 1),
            row("N/A", "4.0", 2),
        ];
        let only_max: VariableSelection = [DailyVariable::TemperatureMax].into_iter().collect();
        let table = ForecastTable::from_rows(&rows, only_max, Vec::new())?;
        let chart = ForecastChart::build(&table, ForecastMode::Seasonal)?;

        assert_eq!(chart.data.len(), 2);
        assert_eq!(chart.data[0].name, "Temperature max - Yaoundé (3.8,10.0)");
        assert_eq!(chart.data[1].legendgroup.as_deref(), Some("N/A (4.0,10.0)"));
        assert_eq!(chart.data[1].x.len(), 2);

        assert_eq!(chart.layout.shapes.len(), 1);
        let shape = &chart.layout.shapes[0];
        assert_eq!(shape.fillcolor, "rgba(200,200,200,0.2)");
        assert_eq!((shape.xref, shape.yref), ("paper", "paper"));
        Ok(())
    }
}
