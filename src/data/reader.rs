use std::path::Path;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{PipelineError, Result};

use super::model::{label_from_path, ChartSeries, RawSeries, RawValue, ReferenceCurve};

// ---------------------------------------------------------------------------
// Chart export loading
// ---------------------------------------------------------------------------

/// Load chart series from an export file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "title": "...", "values": [1.2, " ", ...] }, ...]`
/// * `.csv`  – header `title,values`; values are semicolon-separated tokens
///
/// Values may be numbers or blank strings (the missing-point placeholder).
pub fn load_charts(path: &Path) -> Result<Vec<ChartSeries>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let charts = match ext.as_str() {
        "json" => load_charts_json(path)?,
        "csv" => load_charts_csv(path)?,
        other => {
            return Err(PipelineError::MalformedPresentation(format!(
                "unsupported chart export extension: .{other}"
            )))
        }
    };

    if charts.is_empty() {
        return Err(PipelineError::MalformedPresentation(format!(
            "{path:?} contains no chart series"
        )));
    }
    Ok(charts)
}

/// One record of the JSON export: chart title plus the series values, which
/// arrive as a mix of numbers and blank placeholder strings.
#[derive(Debug, Deserialize)]
struct ChartRecord {
    title: String,
    values: Vec<JsonValue>,
}

fn load_charts_json(path: &Path) -> Result<Vec<ChartSeries>> {
    let text = std::fs::read_to_string(path)?;
    let records: Vec<ChartRecord> = serde_json::from_str(&text)?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let values = rec
                .values
                .iter()
                .enumerate()
                .map(|(j, v)| json_raw_value(v, i, j))
                .collect::<Result<Vec<_>>>()?;
            Ok(ChartSeries::new(&rec.title, RawSeries::new(values)))
        })
        .collect()
}

fn json_raw_value(val: &JsonValue, chart: usize, idx: usize) -> Result<RawValue> {
    match val {
        JsonValue::Number(n) => n.as_f64().map(RawValue::Number).ok_or_else(|| {
            PipelineError::MalformedPresentation(format!(
                "chart {chart}, values[{idx}]: {n} is not representable as f64"
            ))
        }),
        JsonValue::String(s) if s.trim().is_empty() => Ok(RawValue::Blank),
        JsonValue::String(s) => s.trim().parse::<f64>().map(RawValue::Number).map_err(|_| {
            PipelineError::MalformedPresentation(format!(
                "chart {chart}, values[{idx}]: '{s}' is not a number"
            ))
        }),
        other => Err(PipelineError::MalformedPresentation(format!(
            "chart {chart}, values[{idx}]: unexpected {other}"
        ))),
    }
}

/// CSV layout: header row `title,values`, one chart series per row, the
/// values cell holding semicolon-separated tokens: `"0.1;0.4; ;1.2"`.
fn load_charts_csv(path: &Path) -> Result<Vec<ChartSeries>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let title_idx = header_position(&headers, "title").ok_or_else(|| {
        PipelineError::MalformedPresentation(format!("{path:?} has no 'title' column"))
    })?;
    let values_idx = header_position(&headers, "values").ok_or_else(|| {
        PipelineError::MalformedPresentation(format!("{path:?} has no 'values' column"))
    })?;

    let mut charts = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let title = record.get(title_idx).unwrap_or("");
        let values = record
            .get(values_idx)
            .unwrap_or("")
            .split(';')
            .enumerate()
            .map(|(j, tok)| parse_raw_token(tok, row_no, j))
            .collect::<Result<Vec<_>>>()?;
        charts.push(ChartSeries::new(title, RawSeries::new(values)));
    }
    Ok(charts)
}

fn parse_raw_token(tok: &str, row: usize, idx: usize) -> Result<RawValue> {
    let trimmed = tok.trim();
    if trimmed.is_empty() {
        return Ok(RawValue::Blank);
    }
    trimmed.parse::<f64>().map(RawValue::Number).map_err(|_| {
        PipelineError::MalformedPresentation(format!(
            "row {row}, values[{idx}]: '{tok}' is not a number"
        ))
    })
}

fn header_position(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

// ---------------------------------------------------------------------------
// Reference column loading
// ---------------------------------------------------------------------------

/// Read one reference curve from a CSV file: the named column, top to bottom.
/// Blank cells become placeholder entries; anything else must parse as f64.
pub fn load_reference(path: &Path, column: &str) -> Result<ReferenceCurve> {
    let label = label_from_path(path);
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let col_idx =
        header_position(&headers, column).ok_or_else(|| PipelineError::MissingReferenceColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })?;

    let mut values = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cell = record.get(col_idx).unwrap_or("").trim();
        if cell.is_empty() {
            values.push(RawValue::Blank);
            continue;
        }
        let number = cell
            .parse::<f64>()
            .map_err(|_| PipelineError::MalformedReference {
                label: label.clone(),
                detail: format!("row {row_no}: '{cell}' is not a number"),
            })?;
        values.push(RawValue::Number(number));
    }

    Ok(ReferenceCurve::new(label, RawSeries::new(values)))
}
