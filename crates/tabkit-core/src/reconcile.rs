//! Country reconciliation between the chart renderer's identifiers and the
//! identifiers used by a data source
//!
//! Code matching is case-insensitive, but every output keeps the exact
//! casing of the collection the key came from. Each plot country ends up in
//! exactly one of `mapping` or `unmatched`.

use crate::config::CodeInfo;
use crate::error::Result;
use crate::parser::parse_csv;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Plot code -> data code translation table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<String, String>,
}

impl CodeTable {
    pub fn new(codes: BTreeMap<String, String>) -> Self {
        Self { codes }
    }

    /// Data code for a plot code, exact match
    pub fn get(&self, plot_code: &str) -> Option<&str> {
        self.codes.get(plot_code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Lowercased plot code -> lowercased data code. Plot codes that only
    /// differ by case collapse to the last one in sorted order.
    fn folded(&self) -> BTreeMap<String, String> {
        self.codes
            .iter()
            .map(|(plot, data)| (plot.to_lowercase(), data.to_lowercase()))
            .collect()
    }
}

impl FromIterator<(String, String)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Outcome of matching plot countries against a data source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Plot key -> data key, both in their original casing
    pub mapping: BTreeMap<String, String>,
    /// Plot keys with no counterpart in the data source
    pub unmatched: BTreeSet<String>,
}

/// Build the code table described by `codeinfo`, trimming whitespace around
/// every code.
pub fn build_code_converter(codeinfo: &CodeInfo) -> Result<CodeTable> {
    let table = parse_csv(&codeinfo.codefile, codeinfo.dialect())?;
    let codes = table.column_pairs(&codeinfo.plot_codes, &codeinfo.data_codes)?;

    debug!(
        path = %codeinfo.codefile.display(),
        codes = codes.len(),
        "built country code converter"
    );

    Ok(CodeTable::new(codes))
}

/// Match plot countries to data countries through `codes`.
///
/// A plot code is looked up in `codes` and the translated code is looked up
/// among the keys of `data_countries`, both case-insensitively. On success the
/// mapping points from the plot code to the data key as spelled in
/// `data_countries`.
pub fn reconcile_by_code<V>(
    codes: &CodeTable,
    plot_countries: &BTreeMap<String, String>,
    data_countries: &BTreeMap<String, V>,
) -> Reconciled {
    let folded_codes = codes.folded();
    let data_keys = fold_keys(data_countries);

    let mut result = Reconciled::default();
    for plot_code in plot_countries.keys() {
        let matched = folded_codes
            .get(&plot_code.to_lowercase())
            .and_then(|data_code| data_keys.get(data_code));

        match matched {
            Some(&data_key) => {
                result.mapping.insert(plot_code.clone(), data_key.to_string());
            }
            None => {
                result.unmatched.insert(plot_code.clone());
            }
        }
    }

    debug!(
        matched = result.mapping.len(),
        unmatched = result.unmatched.len(),
        "reconciled countries by code"
    );

    result
}

/// Match plot countries to data countries by display name, exact and
/// case-sensitive. The mapping points from plot code to name.
pub fn reconcile_by_name<V>(
    plot_countries: &BTreeMap<String, String>,
    data_countries: &BTreeMap<String, V>,
) -> Reconciled {
    let mut result = Reconciled::default();
    for (code, name) in plot_countries {
        if data_countries.contains_key(name) {
            result.mapping.insert(code.clone(), name.clone());
        } else {
            result.unmatched.insert(code.clone());
        }
    }

    debug!(
        matched = result.mapping.len(),
        unmatched = result.unmatched.len(),
        "reconciled countries by name"
    );

    result
}

/// Lowercased key -> original key
fn fold_keys<V>(map: &BTreeMap<String, V>) -> BTreeMap<String, &str> {
    map.keys().map(|k| (k.to_lowercase(), k.as_str())).collect()
}
