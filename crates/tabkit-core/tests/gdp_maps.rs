use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tabkit_core::{
    build_code_converter, build_map_by_code, build_map_by_name, build_plot_dict, world_map_chart, xy_chart,
    Chart, ChartKind, ChartRenderer, CodeInfo, Error, GdpInfo, JsonRenderer, SeriesData,
};

const GDP_CSV: &str = "\
Country Name,Country Code,1960,1961,1962
United States,USA,1000,,10000
France, fra ,100,200,-5
Germany,DEU,,,
Korea,KOR,abc,1,1
";

const CODES_CSV: &str = "\
Name,ISO3166-1-Alpha-2,ISO3166-1-Alpha-3
United States, US , USA
France,FR,FRA
Germany,de,deu
Korea,KR,KOR
Italy,IT,ITA
";

fn setup(dir: &Path) -> (GdpInfo, CodeInfo) {
    let gdpfile = dir.join("gdp.csv");
    let codefile = dir.join("codes.csv");
    fs::write(&gdpfile, GDP_CSV).unwrap();
    fs::write(&codefile, CODES_CSV).unwrap();

    let gdpinfo = GdpInfo {
        gdpfile,
        min_year: 1960,
        max_year: 1962,
        ..GdpInfo::default()
    };
    let codeinfo = CodeInfo {
        codefile,
        ..CodeInfo::default()
    };
    (gdpinfo, codeinfo)
}

fn plot_countries() -> BTreeMap<String, String> {
    [
        ("us", "United States"),
        ("fr", "France"),
        ("de", "Germany"),
        ("kr", "Korea"),
        ("it", "Italy"),
        ("xx", "Atlantis"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn assert_partition(plot: &BTreeMap<String, String>, map: &tabkit_core::ValueMap) {
    for code in plot.keys() {
        let hits = [
            map.values.contains_key(code),
            map.unmatched.contains(code),
            map.missing_year.contains(code),
        ]
        .iter()
        .filter(|hit| **hit)
        .count();
        assert_eq!(hits, 1, "{code} should be in exactly one category");
    }
}

#[test]
fn code_converter_trims_codes() {
    let dir = tempfile::tempdir().unwrap();
    let (_, codeinfo) = setup(dir.path());

    let codes = build_code_converter(&codeinfo).unwrap();

    assert_eq!(codes.len(), 5);
    assert_eq!(codes.get("US"), Some("USA"));
    assert_eq!(codes.get("de"), Some("deu"));
}

#[test]
fn code_converter_requires_columns() {
    let dir = tempfile::tempdir().unwrap();
    let (_, codeinfo) = setup(dir.path());
    let codeinfo = CodeInfo {
        data_codes: "ISO3166-1-Numeric".to_string(),
        ..codeinfo
    };

    let err = build_code_converter(&codeinfo).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "ISO3166-1-Numeric"));
}

#[test]
fn map_by_code_for_1960() {
    let dir = tempfile::tempdir().unwrap();
    let (gdpinfo, codeinfo) = setup(dir.path());
    let plot = plot_countries();

    let map = build_map_by_code(&gdpinfo, &codeinfo, &plot, "1960").unwrap();

    assert_eq!(map.values.len(), 2);
    assert!((map.values["us"] - 3.0).abs() < 1e-12);
    assert!((map.values["fr"] - 2.0).abs() < 1e-12);
    assert!(map.unmatched.contains("it"));
    assert!(map.unmatched.contains("xx"));
    assert!(map.missing_year.contains("de"));
    assert!(map.missing_year.contains("kr"));
    assert_partition(&plot, &map);
}

#[test]
fn map_by_code_negative_value_has_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let (gdpinfo, codeinfo) = setup(dir.path());
    let plot = plot_countries();

    let map = build_map_by_code(&gdpinfo, &codeinfo, &plot, "1962").unwrap();

    assert!(map.missing_year.contains("fr"));
    assert!((map.values["us"] - 4.0).abs() < 1e-12);
    assert!((map.values["kr"]).abs() < 1e-12);
    assert_partition(&plot, &map);
}

#[test]
fn trimmed_duplicate_keys_keep_the_last_row() {
    let dir = tempfile::tempdir().unwrap();
    let (gdpinfo, codeinfo) = setup(dir.path());
    fs::write(
        &gdpinfo.gdpfile,
        "Country Name,Country Code,2000\nFrance,FRA,100\nFrance, FRA ,1000\n",
    )
    .unwrap();
    let gdpinfo = GdpInfo {
        min_year: 2000,
        max_year: 2000,
        ..gdpinfo
    };
    let plot: BTreeMap<String, String> = [("fr".to_string(), "France".to_string())].into_iter().collect();

    let map = build_map_by_code(&gdpinfo, &codeinfo, &plot, "2000").unwrap();

    assert_eq!(map.values.len(), 1);
    assert!((map.values["fr"] - 3.0).abs() < 1e-12);
}

#[test]
fn map_by_name_matches_exact_names() {
    let dir = tempfile::tempdir().unwrap();
    let (gdpinfo, _) = setup(dir.path());
    let mut plot = plot_countries();
    plot.insert("ca".to_string(), "united states".to_string());

    let map = build_map_by_name(&gdpinfo, &plot, "1961").unwrap();

    assert!((map.values["fr"] - 200f64.log10()).abs() < 1e-12);
    assert_eq!(map.values.len(), 2);
    assert!(map.missing_year.contains("us"));
    assert!(map.unmatched.contains("ca"));
    assert!(map.unmatched.contains("it"));
    assert_partition(&plot, &map);
}

#[test]
fn unknown_year_puts_matched_countries_in_missing_year() {
    let dir = tempfile::tempdir().unwrap();
    let (gdpinfo, codeinfo) = setup(dir.path());
    let plot = plot_countries();

    let map = build_map_by_code(&gdpinfo, &codeinfo, &plot, "2050").unwrap();

    assert!(map.values.is_empty());
    assert_eq!(map.missing_year.len(), 4);
    assert_eq!(map.unmatched.len(), 2);
}

#[test]
fn plot_dict_covers_every_requested_country() {
    let dir = tempfile::tempdir().unwrap();
    let (gdpinfo, _) = setup(dir.path());

    let plot_dict = build_plot_dict(&gdpinfo, &["United States", "Korea", "Atlantis"]).unwrap();

    assert_eq!(plot_dict.len(), 3);
    assert_eq!(plot_dict["United States"], vec![(1960, 1000.0), (1962, 10000.0)]);
    assert_eq!(plot_dict["Korea"], vec![(1961, 1.0), (1962, 1.0)]);
    assert!(plot_dict["Atlantis"].is_empty());
}

#[test]
fn json_renderer_writes_chart_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let (gdpinfo, codeinfo) = setup(dir.path());
    let plot = plot_countries();

    let map = build_map_by_code(&gdpinfo, &codeinfo, &plot, "1960").unwrap();
    let map_path = dir.path().join("map.json");
    JsonRenderer.render(&world_map_chart("1960", &map), &map_path).unwrap();

    let chart: Chart = serde_json::from_str(&fs::read_to_string(&map_path).unwrap()).unwrap();
    assert_eq!(chart.kind, ChartKind::WorldMap);
    assert_eq!(chart.title, "World GDP in 1960");
    assert_eq!(
        chart.find_series("Missing from World Bank Data").unwrap().data,
        SeriesData::Keys(vec!["it".to_string(), "xx".to_string()])
    );

    let plot_dict = build_plot_dict(&gdpinfo, &["France"]).unwrap();
    let xy_path = dir.path().join("xy.json");
    JsonRenderer.render(&xy_chart(&plot_dict), &xy_path).unwrap();

    let chart: Chart = serde_json::from_str(&fs::read_to_string(&xy_path).unwrap()).unwrap();
    assert_eq!(chart.kind, ChartKind::Xy);
    assert_eq!(
        chart.find_series("France").unwrap().data,
        SeriesData::Points(vec![(1960, 100.0), (1961, 200.0), (1962, -5.0)])
    );
}
