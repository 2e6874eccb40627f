//! Year/GDP series for XY plots

use crate::config::GdpInfo;
use crate::error::Result;
use crate::parser::parse_csv;
use crate::table::Record;
use std::collections::BTreeMap;

/// A single (year, GDP) point
pub type PlotPoint = (i32, f64);

/// Points for every year in `min_year..=max_year` that has a numeric value
/// in `record`, in year order. Missing, blank and unparseable years are
/// skipped.
pub fn build_plot_values(gdpinfo: &GdpInfo, record: &Record) -> Vec<PlotPoint> {
    (gdpinfo.min_year..=gdpinfo.max_year)
        .filter_map(|year| {
            let raw = record.get(&year.to_string())?.trim();
            if raw.is_empty() {
                return None;
            }
            raw.parse::<f64>().ok().map(|gdp| (year, gdp))
        })
        .collect()
}

/// Series for each country in `countries`, read from the GDP file and keyed
/// by country name. Countries absent from the file get an empty series.
pub fn build_plot_dict<S: AsRef<str>>(
    gdpinfo: &GdpInfo,
    countries: &[S],
) -> Result<BTreeMap<String, Vec<PlotPoint>>> {
    let gdp = parse_csv(&gdpinfo.gdpfile, gdpinfo.dialect())?.to_keyed(&gdpinfo.country_name)?;

    Ok(countries
        .iter()
        .map(|country| {
            let country = country.as_ref();
            let points = gdp
                .get(country)
                .map(|record| build_plot_values(gdpinfo, record))
                .unwrap_or_default();
            (country.to_string(), points)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(min_year: i32, max_year: i32) -> GdpInfo {
        GdpInfo {
            min_year,
            max_year,
            ..GdpInfo::default()
        }
    }

    #[test]
    fn test_build_plot_values_in_range() {
        let record: Record = [
            ("Country Name", "Xland"),
            ("2000", "1.5"),
            ("2001", ""),
            ("2002", "abc"),
            ("2003", "7"),
            ("2004", "9"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let points = build_plot_values(&info(2000, 2003), &record);

        assert_eq!(points, vec![(2000, 1.5), (2003, 7.0)]);
    }

    #[test]
    fn test_build_plot_values_empty_range() {
        let record = Record::new();
        assert!(build_plot_values(&info(2005, 2000), &record).is_empty());
    }
}
