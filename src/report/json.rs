//! JSON report generation.

use crate::models::AggregateReport;
use anyhow::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Indentation of the printed report.
const INDENT: &[u8] = b"    ";

/// Generate the JSON report document, indented by four spaces.
pub fn generate_json_report(report: &AggregateReport) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    report.serialize(&mut serializer)?;

    Ok(String::from_utf8(buf)?)
}
