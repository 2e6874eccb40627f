//! tabkit-core: delimited tables, first-difference diffs and GDP chart data
//!
//! This library provides functionality to:
//! - Read delimited files as lists of records or records keyed by a field
//! - Write records with bare numbers and literally quoted text
//! - Find and report the first difference between two lines or two files
//! - Reconcile chart-renderer country codes with a data source's codes
//! - Build log-scaled GDP maps and XY series, and hand them to a renderer

pub mod chart;
pub mod config;
pub mod diff;
pub mod error;
pub mod parser;
pub mod reconcile;
pub mod table;
pub mod world_map;
pub mod writer;
pub mod xy_plot;

pub use chart::{world_map_chart, xy_chart, Chart, ChartKind, ChartRenderer, JsonRenderer, Series, SeriesData};
pub use config::{CodeInfo, GdpInfo};
pub use diff::{
    diff_report, file_diff, file_diff_report, file_lines, first_diff_index, first_diff_line, format_diff,
    NO_DIFFERENCES,
};
pub use error::{Error, Result};
pub use parser::{parse_csv, parse_csv_str, read_as_keyed, read_as_records, read_fieldnames};
pub use reconcile::{build_code_converter, reconcile_by_code, reconcile_by_name, CodeTable, Reconciled};
pub use table::{Column, Dialect, FieldValue, KeyedTable, Record, Row, Table};
pub use world_map::{build_map_by_code, build_map_by_name, build_value_map, ValueMap};
pub use writer::{write_csv, write_csv_string, TypedRecord};
pub use xy_plot::{build_plot_dict, build_plot_values, PlotPoint};
