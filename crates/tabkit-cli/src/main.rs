//! tabkit CLI
//!
//! Command-line tool for inspecting delimited tables, diffing text files and
//! building GDP chart payloads.

use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tabkit_core::{
    build_code_converter, build_map_by_code, build_map_by_name, build_plot_dict, file_diff_report,
    parse_csv, world_map_chart, write_csv, xy_chart, ChartRenderer, CodeInfo, Dialect, FieldValue,
    GdpInfo, JsonRenderer, TypedRecord, ValueMap,
};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "tabkit")]
#[command(about = "Delimited tables, file diffs and GDP chart data", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DialectArgs {
    /// Field separator character
    #[arg(long, default_value_t = ',')]
    separator: char,

    /// Quote character
    #[arg(long, default_value_t = '"')]
    quote: char,
}

impl DialectArgs {
    fn dialect(&self) -> Dialect {
        Dialect::new(self.separator, self.quote)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the field names of a delimited file
    Fields {
        /// Path to the file
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        dialect: DialectArgs,
    },

    /// Display the rows of a delimited file
    Show {
        /// Path to the file
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,

        #[command(flatten)]
        dialect: DialectArgs,
    },

    /// Print a delimited file as JSON records keyed by one field
    Keyed {
        /// Path to the file
        #[arg(short, long)]
        file: PathBuf,

        /// Field whose value keys each record
        #[arg(short, long)]
        key: String,

        #[command(flatten)]
        dialect: DialectArgs,
    },

    /// Rewrite a delimited file with bare numbers and literally quoted text
    Rewrite {
        /// Input file
        #[arg(short, long)]
        file: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        dialect: DialectArgs,
    },

    /// Report the first difference between two text files
    Diff {
        /// First file
        a: PathBuf,

        /// Second file
        b: PathBuf,
    },

    /// Print the plot code -> data code table
    Codes {
        /// Country code configuration (JSON)
        #[arg(long)]
        code_config: Option<PathBuf>,
    },

    /// Build a world GDP map joining countries by code
    MapByCode {
        /// GDP configuration (JSON)
        #[arg(long)]
        gdp_config: Option<PathBuf>,

        /// Country code configuration (JSON)
        #[arg(long)]
        code_config: Option<PathBuf>,

        /// Plot countries as a two-column CSV: code, name
        #[arg(short, long)]
        countries: PathBuf,

        /// Year to map
        #[arg(short, long)]
        year: String,

        /// Output chart payload path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build a world GDP map joining countries by name
    MapByName {
        /// GDP configuration (JSON)
        #[arg(long)]
        gdp_config: Option<PathBuf>,

        /// Plot countries as a two-column CSV: code, name
        #[arg(short, long)]
        countries: PathBuf,

        /// Year to map
        #[arg(short, long)]
        year: String,

        /// Output chart payload path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build an XY plot of GDP over time for named countries
    Xy {
        /// GDP configuration (JSON)
        #[arg(long)]
        gdp_config: Option<PathBuf>,

        /// Country names to plot
        #[arg(short, long)]
        country: Vec<String>,

        /// Output chart payload path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> tabkit_core::Result<()> {
    match command {
        Commands::Fields { file, dialect } => cmd_fields(&file, dialect.dialect()),
        Commands::Show { file, limit, dialect } => cmd_show(&file, limit, dialect.dialect()),
        Commands::Keyed { file, key, dialect } => cmd_keyed(&file, &key, dialect.dialect()),
        Commands::Rewrite { file, output, dialect } => cmd_rewrite(&file, &output, dialect.dialect()),
        Commands::Diff { a, b } => cmd_diff(&a, &b),
        Commands::Codes { code_config } => cmd_codes(code_config.as_deref()),
        Commands::MapByCode {
            gdp_config,
            code_config,
            countries,
            year,
            output,
        } => cmd_map_by_code(gdp_config.as_deref(), code_config.as_deref(), &countries, &year, &output),
        Commands::MapByName {
            gdp_config,
            countries,
            year,
            output,
        } => cmd_map_by_name(gdp_config.as_deref(), &countries, &year, &output),
        Commands::Xy {
            gdp_config,
            country,
            output,
        } => cmd_xy(gdp_config.as_deref(), &country, &output),
    }
}

fn cmd_fields(file: &Path, dialect: Dialect) -> tabkit_core::Result<()> {
    for name in tabkit_core::read_fieldnames(file, dialect)? {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_show(file: &Path, limit: Option<usize>, dialect: Dialect) -> tabkit_core::Result<()> {
    let table = parse_csv(file, dialect)?;

    println!("File: {}", file.display());
    println!("Columns: {}", table.column_count());
    println!("Rows: {}", table.row_count());
    println!();

    let header = table.field_names();
    println!("{}", header.join("\t"));
    println!("{}", "-".repeat(header.len() * 12));

    let row_limit = limit.unwrap_or(table.row_count());
    for row in table.rows.iter().take(row_limit) {
        println!("{}", row.cells.join("\t"));
    }

    if table.row_count() > row_limit {
        println!("... ({} more rows)", table.row_count() - row_limit);
    }

    Ok(())
}

fn cmd_keyed(file: &Path, key: &str, dialect: Dialect) -> tabkit_core::Result<()> {
    let keyed = tabkit_core::read_as_keyed(file, key, dialect)?;
    println!("{}", serde_json::to_string_pretty(&keyed)?);
    Ok(())
}

fn cmd_rewrite(file: &Path, output: &Path, dialect: Dialect) -> tabkit_core::Result<()> {
    let table = parse_csv(file, dialect)?;
    let fieldnames = table.field_names();

    let records: Vec<TypedRecord> = table
        .to_records()
        .into_iter()
        .map(|record| {
            record
                .into_iter()
                .map(|(name, value)| (name, FieldValue::infer(&value)))
                .collect()
        })
        .collect();

    write_csv(output, &records, &fieldnames, dialect)?;
    info!(rows = records.len(), output = %output.display(), "rewrote table");
    println!("Wrote {} rows to {}", records.len(), output.display());

    Ok(())
}

fn cmd_diff(a: &Path, b: &Path) -> tabkit_core::Result<()> {
    print!("{}", file_diff_report(a, b)?);
    Ok(())
}

fn cmd_codes(code_config: Option<&Path>) -> tabkit_core::Result<()> {
    let codeinfo = load_code_info(code_config)?;
    let codes = build_code_converter(&codeinfo)?;

    println!("{}\t{}", codeinfo.plot_codes, codeinfo.data_codes);
    for (plot, data) in codes.iter() {
        println!("{}\t{}", plot, data);
    }
    println!();
    println!("{} codes", codes.len());

    Ok(())
}

fn cmd_map_by_code(
    gdp_config: Option<&Path>,
    code_config: Option<&Path>,
    countries: &Path,
    year: &str,
    output: &Path,
) -> tabkit_core::Result<()> {
    let gdpinfo = load_gdp_info(gdp_config)?;
    let codeinfo = load_code_info(code_config)?;
    let plot_countries = load_plot_countries(countries)?;

    let map = build_map_by_code(&gdpinfo, &codeinfo, &plot_countries, year)?;
    render_world_map(year, &map, output)
}

fn cmd_map_by_name(
    gdp_config: Option<&Path>,
    countries: &Path,
    year: &str,
    output: &Path,
) -> tabkit_core::Result<()> {
    let gdpinfo = load_gdp_info(gdp_config)?;
    let plot_countries = load_plot_countries(countries)?;

    let map = build_map_by_name(&gdpinfo, &plot_countries, year)?;
    render_world_map(year, &map, output)
}

fn render_world_map(year: &str, map: &ValueMap, output: &Path) -> tabkit_core::Result<()> {
    JsonRenderer.render(&world_map_chart(year, map), output)?;

    println!("World GDP in {}:", year);
    println!("  {} countries with data", map.values.len());
    println!("  {} missing from the GDP data", map.unmatched.len());
    println!("  {} without data for the year", map.missing_year.len());
    println!("Chart written to {}", output.display());

    Ok(())
}

fn cmd_xy(gdp_config: Option<&Path>, countries: &[String], output: &Path) -> tabkit_core::Result<()> {
    let gdpinfo = load_gdp_info(gdp_config)?;
    let plot_dict = build_plot_dict(&gdpinfo, countries)?;

    JsonRenderer.render(&xy_chart(&plot_dict), output)?;

    for (country, points) in &plot_dict {
        println!("  {} ({} points)", country, points.len());
    }
    println!("Chart written to {}", output.display());

    Ok(())
}

fn load_gdp_info(path: Option<&Path>) -> tabkit_core::Result<GdpInfo> {
    path.map(GdpInfo::load).unwrap_or_else(|| Ok(GdpInfo::default()))
}

fn load_code_info(path: Option<&Path>) -> tabkit_core::Result<CodeInfo> {
    path.map(CodeInfo::load).unwrap_or_else(|| Ok(CodeInfo::default()))
}

/// Plot countries from a CSV whose first two columns are code and name
fn load_plot_countries(path: &Path) -> tabkit_core::Result<BTreeMap<String, String>> {
    let table = parse_csv(path, Dialect::default())?;
    let header = table.field_names();

    match header.as_slice() {
        [code, name, ..] => table.column_pairs(code, name),
        _ => Err(tabkit_core::Error::MissingColumn {
            path: path.to_path_buf(),
            column: "name".to_string(),
        }),
    }
}
