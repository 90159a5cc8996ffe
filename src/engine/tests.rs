use super::{
    date_suffix, dated_path, load_mapping, write_candidates, write_rows, Pipeline, PipelineConfig, PipelineError,
    MAPPING_DELIMITER
};

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use crate::classifier::{Classifier, MappingError, MappingTable};
use crate::models::{Diagnostic, NormalizedRow};
use crate::parser::{InputMode, ParseError};

const EXPORT_CSV: &str = "\
Account Name,Fund Name,Symbol,Shares,Value
Joint Brokerage,APPLE INC,AAPL,10,\"$1,000.00\"
Joint Brokerage,US TREASURY NOTE 2.5% 2030,,,\"$5,000.00\"
Joint Brokerage,GOLDMAN SACHS BK USA CD 4.5% 2027,,,\"$2,500.00\"
Joint Brokerage,BROKEN LINE,BRKN,,
Roth IRA,XYZ HOLDINGS LP,,,$300.00
Roth IRA,XYZ HOLDINGS LP,,,$200.00
";

const EXPORT_HTML: &str = "\
<html><body><table>
<tr><th>Account Name</th><th>Fund Name</th><th>Symbol</th><th>Shares</th><th>Value</th></tr>
<tr><td>Joint Brokerage</td><td>APPLE INC</td><td>AAPL</td><td>10</td><td>$1,000.00</td></tr>
<tr><td>Joint Brokerage</td><td>US TREASURY NOTE 2.5% 2030</td><td></td><td></td><td>$5,000.00</td></tr>
<tr><td>Joint Brokerage</td><td>GOLDMAN SACHS BK USA CD 4.5% 2027</td><td></td><td></td><td>$2,500.00</td></tr>
<tr><td>Joint Brokerage</td><td>BROKEN LINE</td><td>BRKN</td><td></td><td></td></tr>
<tr><td>Roth IRA</td><td>XYZ HOLDINGS LP</td><td></td><td></td><td>$300.00</td></tr>
<tr><td>Roth IRA</td><td>XYZ HOLDINGS LP</td><td></td><td></td><td>$200.00</td></tr>
</table></body></html>
";

fn create_temporary_mapping(lines: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    for line in lines {
        writeln!(file, "{line}")?;
    }

    Ok(file)
}

fn create_pipeline(config: PipelineConfig, class_map: &str) -> Result<Pipeline> {
    let (class_map, _) = MappingTable::parse("Class-Map.csv", class_map.as_bytes(), MAPPING_DELIMITER)?;

    Ok(Pipeline::new(config, Classifier::new(MappingTable::default(), class_map)))
}

fn classes(rows: &[NormalizedRow]) -> Vec<&str> {
    rows.iter().map(|row| row.asset_class.as_str()).collect()
}

#[test]
fn test_pipeline_classifies_rows_with_defaults() -> Result<()> {
    let output = create_pipeline(PipelineConfig::default(), "")?.run(EXPORT_CSV.as_bytes())?;

    assert_eq!(output.rows.len(), 5);
    assert_eq!(classes(&output.rows), vec!["Equity", "Treasury", "CD", "Unclassified", "Unclassified"]);

    let apple = &output.rows[0];

    assert_eq!(apple.account, "Joint Brokerage");
    assert_eq!(apple.asset_name, "AAPL");
    assert_eq!(apple.quantity, Some(Decimal::from_str("10")?));
    assert_eq!(apple.market_value, Decimal::from_str("1000")?);

    Ok(())
}

#[test]
fn test_pipeline_groups_fixed_income_when_enabled() -> Result<()> {
    let config = PipelineConfig { fixed_income_grouping: true, ..PipelineConfig::default() };
    let output = create_pipeline(config, "")?.run(EXPORT_CSV.as_bytes())?;

    assert_eq!(classes(&output.rows), vec!["Equity", "Fixed", "Fixed", "Unclassified", "Unclassified"]);
    assert!(output.rows.iter().all(|row| row.asset_class != "CD" && row.asset_class != "Treasury"));

    Ok(())
}

#[test]
fn test_pipeline_prefers_class_map_over_heuristics() -> Result<()> {
    let class_map = "US TREASURY NOTE 2.5% 2030,Treasury\nXYZ HOLDINGS LP,Private Equity\nAAPL,Tech\n";
    let output = create_pipeline(PipelineConfig::default(), class_map)?.run(EXPORT_CSV.as_bytes())?;

    assert_eq!(classes(&output.rows), vec!["Tech", "Treasury", "CD", "Private Equity", "Private Equity"]);
    assert!(output.unmapped_assets().is_empty());

    Ok(())
}

#[test]
fn test_pipeline_reports_skipped_rows_and_unmapped_assets_once() -> Result<()> {
    let output = create_pipeline(PipelineConfig::default(), "")?.run(EXPORT_CSV.as_bytes())?;

    assert_eq!(output.diagnostics.len(), 2);
    assert!(matches!(&output.diagnostics[0], Diagnostic::RowSkipped { row: 3, reason } if reason.contains("[BRKN]")));
    assert_eq!(output.unmapped_assets(), vec!["XYZ HOLDINGS LP"]);

    Ok(())
}

#[test]
fn test_pipeline_output_does_not_depend_on_input_encoding() -> Result<()> {
    let tabular = create_pipeline(PipelineConfig::default(), "")?.run(EXPORT_CSV.as_bytes())?;
    let markup_config = PipelineConfig { mode: InputMode::Markup, ..PipelineConfig::default() };
    let markup = create_pipeline(markup_config, "")?.run(EXPORT_HTML.as_bytes())?;

    assert_eq!(tabular, markup);

    Ok(())
}

#[test]
fn test_quiet_mode_does_not_change_results() -> Result<()> {
    let loud = create_pipeline(PipelineConfig::default(), "")?.run(EXPORT_CSV.as_bytes())?;
    let quiet_config = PipelineConfig { quiet: true, ..PipelineConfig::default() };
    let quiet = create_pipeline(quiet_config, "")?.run(EXPORT_CSV.as_bytes())?;

    assert_eq!(loud, quiet);

    Ok(())
}

#[test]
fn test_pipeline_aborts_on_structural_failures() -> Result<()> {
    let pipeline = create_pipeline(PipelineConfig::default(), "")?;

    assert!(matches!(pipeline.run(b"no,header\nhere,at all\n"), Err(PipelineError::Parse(ParseError::HeaderNotFound { .. }))));
    assert!(matches!(pipeline.run(b"Symbol,Value\nAAPL,\xFF"), Err(PipelineError::Parse(ParseError::Encoding { .. }))));

    let markup_config = PipelineConfig { mode: InputMode::Markup, ..PipelineConfig::default() };
    let pipeline = create_pipeline(markup_config, "")?;

    assert!(matches!(pipeline.run(EXPORT_CSV.as_bytes()), Err(PipelineError::Parse(ParseError::TableNotFound { .. }))));

    Ok(())
}

#[test]
fn test_load_mapping_reads_file_and_reports_bad_lines() -> Result<()> {
    let file = create_temporary_mapping(&["# overrides", "VTSAX,Total Stock Market", "onlyonecolumn", "VBTLX,Total Bond Market"])?;
    let (table, diagnostics) = load_mapping(file.path(), true, MAPPING_DELIMITER)?;

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("VBTLX"), Some("Total Bond Market"));
    assert!(matches!(&diagnostics[..], [Diagnostic::MalformedMapping { line: 3, .. }]));

    Ok(())
}

#[test]
fn test_load_mapping_accepts_file_without_entries() -> Result<()> {
    let file = create_temporary_mapping(&["# asset name,class", ""])?;
    let (table, diagnostics) = load_mapping(file.path(), true, MAPPING_DELIMITER)?;

    assert!(table.is_empty());
    assert!(diagnostics.is_empty());

    Ok(())
}

#[test]
fn test_load_mapping_tolerates_missing_default_file_only() -> Result<()> {
    let path = Path::new("definitely-missing-mapping-file.csv");
    let (table, diagnostics) = load_mapping(path, false, MAPPING_DELIMITER)?;

    assert!(table.is_empty());
    assert!(diagnostics.is_empty());
    assert!(matches!(load_mapping(path, true, MAPPING_DELIMITER), Err(MappingError::Io { .. })));

    Ok(())
}

#[test]
fn test_write_rows_renders_header_and_optional_quantity() -> Result<()> {
    let rows = vec![
        NormalizedRow {
            account: "Joint Brokerage".to_string(),
            asset_name: "AAPL".to_string(),
            asset_class: "Equity".to_string(),
            quantity: Some(Decimal::from_str("10")?),
            market_value: Decimal::from_str("1000.00")?
        },
        NormalizedRow {
            account: "Roth IRA".to_string(),
            asset_name: "Vanguard Federal Money Market Fund, Investor".to_string(),
            asset_class: "Cash".to_string(),
            quantity: None,
            market_value: Decimal::from_str("-12.5")?
        },
    ];
    let mut buffer = Vec::new();

    write_rows(&mut buffer, &rows)?;

    assert_eq!(
        String::from_utf8(buffer)?,
        "account,asset_name,asset_class,quantity,market_value\n\
         Joint Brokerage,AAPL,Equity,10,1000.00\n\
         Roth IRA,\"Vanguard Federal Money Market Fund, Investor\",Cash,,-12.5\n"
    );

    let mut buffer = Vec::new();

    write_rows(&mut buffer, &[])?;

    assert_eq!(String::from_utf8(buffer)?, "account,asset_name,asset_class,quantity,market_value\n");

    Ok(())
}

#[test]
fn test_write_candidates_produces_a_loadable_class_map() -> Result<()> {
    let mut buffer = Vec::new();

    write_candidates(&mut buffer, &["XYZ HOLDINGS LP", "ACME, INC"])?;

    let (table, diagnostics) = MappingTable::parse("candidates", &buffer, MAPPING_DELIMITER)?;

    assert!(diagnostics.is_empty());
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("acme, inc"), Some("Unclassified"));

    Ok(())
}

#[test]
fn test_date_suffix_follows_format_and_rejects_bad_ones() -> Result<()> {
    let date = NaiveDate::from_ymd_opt(2026, 10, 16).ok_or_else(|| anyhow!("Invalid test date"))?;

    assert_eq!(date_suffix(date, "%Y-%m-%d")?, "2026-10-16");
    assert_eq!(date_suffix(date, "%Y%m%d")?, "20261016");
    assert!(matches!(date_suffix(date, "%Q"), Err(PipelineError::DateFormat(format)) if format == "%Q"));
    assert!(matches!(date_suffix(date, "%Y-%H"), Err(PipelineError::DateFormat(_))));

    Ok(())
}

#[test]
fn test_dated_path_inserts_suffix_before_extension() {
    assert_eq!(dated_path(Path::new("out/report.csv"), "2026-10-16"), PathBuf::from("out/report-2026-10-16.csv"));
    assert_eq!(dated_path(Path::new("report"), "2026"), PathBuf::from("report-2026"));
    assert_eq!(dated_path(Path::new("report.csv"), ""), PathBuf::from("report.csv"));
}
