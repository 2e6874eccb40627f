//! Chart-ready GDP values keyed by plot country code

use crate::config::{CodeInfo, GdpInfo};
use crate::error::Result;
use crate::parser::parse_csv;
use crate::reconcile::{build_code_converter, reconcile_by_code, reconcile_by_name, Reconciled};
use crate::table::{KeyedTable, Record};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Log-scaled values for one year, plus the plot countries that could not
/// be given a value.
///
/// Every plot country is in exactly one of `values`, `unmatched` or
/// `missing_year`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    /// Plot code -> log10 of the value for the year
    pub values: BTreeMap<String, f64>,
    /// Plot codes not found in the data source
    pub unmatched: BTreeSet<String>,
    /// Plot codes found in the data source without a usable value for the year
    pub missing_year: BTreeSet<String>,
}

/// Attach the `year` value of each reconciled country.
///
/// The value must be present, non-blank and a finite positive number; its
/// base-10 logarithm is stored. Anything else sends the plot code to
/// `missing_year`. `reconciled.unmatched` is carried over unchanged.
pub fn build_value_map(data: &KeyedTable, reconciled: &Reconciled, year: &str) -> ValueMap {
    let mut result = ValueMap {
        unmatched: reconciled.unmatched.clone(),
        ..ValueMap::default()
    };

    for (plot_code, data_key) in &reconciled.mapping {
        match data.get(data_key).and_then(|record| year_value(record, year)) {
            Some(value) => {
                result.values.insert(plot_code.clone(), value.log10());
            }
            None => {
                result.missing_year.insert(plot_code.clone());
            }
        }
    }

    debug!(
        year,
        values = result.values.len(),
        unmatched = result.unmatched.len(),
        missing_year = result.missing_year.len(),
        "built value map"
    );

    result
}

/// Value usable on a log scale, if the record has one for `year`
fn year_value(record: &Record, year: &str) -> Option<f64> {
    let raw = record.get(year)?.trim();
    if raw.is_empty() {
        return None;
    }

    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Load the GDP table keyed by `key_field`, with keys trimmed. Rows whose
/// trimmed keys collide resolve in file order.
fn load_gdp(gdpinfo: &GdpInfo, key_field: &str) -> Result<KeyedTable> {
    parse_csv(&gdpinfo.gdpfile, gdpinfo.dialect())?.to_keyed_by(key_field, str::trim)
}

/// GDP value map for `year`, joining plot codes to GDP rows through the
/// country code table.
pub fn build_map_by_code(
    gdpinfo: &GdpInfo,
    codeinfo: &CodeInfo,
    plot_countries: &BTreeMap<String, String>,
    year: &str,
) -> Result<ValueMap> {
    let gdp = load_gdp(gdpinfo, &gdpinfo.country_code)?;
    let codes = build_code_converter(codeinfo)?;
    let reconciled = reconcile_by_code(&codes, plot_countries, &gdp);

    Ok(build_value_map(&gdp, &reconciled, year))
}

/// GDP value map for `year`, joining plot countries to GDP rows by display
/// name.
pub fn build_map_by_name(
    gdpinfo: &GdpInfo,
    plot_countries: &BTreeMap<String, String>,
    year: &str,
) -> Result<ValueMap> {
    let gdp = load_gdp(gdpinfo, &gdpinfo.country_name)?;
    let reconciled = reconcile_by_name(plot_countries, &gdp);

    Ok(build_value_map(&gdp, &reconciled, year))
}
