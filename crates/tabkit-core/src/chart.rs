//! Chart payloads handed to an external renderer
//!
//! Image generation happens outside this crate. A [`Chart`] carries
//! everything a renderer needs, and [`ChartRenderer`] is the seam a concrete
//! backend plugs into. [`JsonRenderer`] writes the payload itself so any
//! plotting tool can pick it up.

use crate::error::Result;
use crate::world_map::ValueMap;
use crate::xy_plot::PlotPoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Kind of chart to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Choropleth keyed by plot country code
    WorldMap,
    /// Scatter of (x, y) points
    Xy,
}

/// Data of one named series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesData {
    /// Key -> intensity
    Values(BTreeMap<String, f64>),
    /// XY points
    Points(Vec<PlotPoint>),
    /// Keys highlighted as a flat category
    Keys(Vec<String>),
}

/// A named series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub data: SeriesData,
}

impl Series {
    pub fn new(label: impl Into<String>, data: SeriesData) -> Self {
        Self {
            label: label.into(),
            data,
        }
    }
}

/// Everything a renderer needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_title: Option<String>,
    pub series: Vec<Series>,
}

impl Chart {
    /// Find a series by label
    pub fn find_series(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }
}

/// World map of log-scaled GDP with the two no-data categories
pub fn world_map_chart(year: &str, map: &ValueMap) -> Chart {
    Chart {
        kind: ChartKind::WorldMap,
        title: format!("World GDP in {year}"),
        x_title: None,
        y_title: None,
        series: vec![
            Series::new("GDP (log scale)", SeriesData::Values(map.values.clone())),
            Series::new(
                "Missing from World Bank Data",
                SeriesData::Keys(map.unmatched.iter().cloned().collect()),
            ),
            Series::new(
                "No GDP Data for Year",
                SeriesData::Keys(map.missing_year.iter().cloned().collect()),
            ),
        ],
    }
}

/// XY chart with one point series per country
pub fn xy_chart(plot_dict: &BTreeMap<String, Vec<PlotPoint>>) -> Chart {
    Chart {
        kind: ChartKind::Xy,
        title: "GDP data from World Bank".to_string(),
        x_title: Some("Year".to_string()),
        y_title: Some("GDP in current US dollars".to_string()),
        series: plot_dict
            .iter()
            .map(|(country, points)| Series::new(country.clone(), SeriesData::Points(points.clone())))
            .collect(),
    }
}

/// Produces an output file from a chart payload
pub trait ChartRenderer {
    fn render(&self, chart: &Chart, path: &Path) -> Result<()>;
}

/// Writes the chart payload as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ChartRenderer for JsonRenderer {
    fn render(&self, chart: &Chart, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, chart)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
