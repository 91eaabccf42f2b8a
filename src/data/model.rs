use std::path::Path;

// ---------------------------------------------------------------------------
// RawValue / RawSeries – a series as read from the source, blanks included
// ---------------------------------------------------------------------------

/// One entry of a series as the readers deliver it.  Chart exports and
/// reference columns both use a blank placeholder for missing points; those
/// entries survive capture and are filtered only at the numeric boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Blank,
}

/// An ordered sequence of raw entries, immutable once captured.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSeries {
    pub values: Vec<RawValue>,
}

impl RawSeries {
    pub fn new(values: Vec<RawValue>) -> Self {
        Self { values }
    }

    /// Build a series of plain numbers (no blanks).
    pub fn from_numbers(numbers: &[f64]) -> Self {
        Self {
            values: numbers.iter().copied().map(RawValue::Number).collect(),
        }
    }

    /// The numeric form: blanks dropped, order preserved.  Every alignment
    /// stage works on this, never on the raw entries.
    pub fn numeric(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(|v| match v {
                RawValue::Number(x) => Some(*x),
                RawValue::Blank => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ChartSeries / ReferenceCurve – labelled inputs to the pipeline
// ---------------------------------------------------------------------------

/// One plotted series extracted from a chart object, labelled with the text
/// before the first `;` of the chart title.  Discovery order is significant:
/// it fixes the column order of every output table.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: String,
    pub series: RawSeries,
}

impl ChartSeries {
    pub fn new(title: &str, series: RawSeries) -> Self {
        Self {
            label: label_from_title(title),
            series,
        }
    }
}

/// Chart labels keep only the leading part of the title, up to the first `;`.
pub fn label_from_title(title: &str) -> String {
    title.split(';').next().unwrap_or("").trim().to_string()
}

/// A pre-recorded standard curve read from an external tabular file.
/// Exactly two participate per run, in load order.
#[derive(Debug, Clone)]
pub struct ReferenceCurve {
    pub label: String,
    pub series: RawSeries,
}

impl ReferenceCurve {
    pub fn new(label: impl Into<String>, series: RawSeries) -> Self {
        Self {
            label: label.into(),
            series,
        }
    }
}

/// Reference labels come from the source file name: the first
/// whitespace-separated token of the stem.
pub fn label_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("reference")
        .split_whitespace()
        .next()
        .unwrap_or("reference")
        .to_string()
}

// ---------------------------------------------------------------------------
// Output tables
// ---------------------------------------------------------------------------

/// A labelled numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    pub values: Vec<f64>,
}

/// The trimmed joint table: every windowed chart column followed by the two
/// resampled reference columns, all exactly `rows` long.
#[derive(Debug, Clone)]
pub struct JointTable {
    pub rows: usize,
    pub columns: Vec<Column>,
}

/// The untrimmed numeric chart columns.  Lengths may differ; the writer pads
/// short columns with empty cells.
#[derive(Debug, Clone)]
pub struct OriginalTable {
    pub columns: Vec<Column>,
}

/// One scored chart series: its windowed endpoint and one offset-corrected
/// MSE per reference, already rounded for presentation.
#[derive(Debug, Clone)]
pub struct ScoreRecord {
    pub label: String,
    pub binding_max: f64,
    pub scores: [f64; 2],
}

/// Per-series scores against both references, row order = discovery order.
#[derive(Debug, Clone)]
pub struct ResultTable {
    pub reference_labels: [String; 2],
    pub records: Vec<ScoreRecord>,
}

/// Everything one successful pipeline run produces.
#[derive(Debug, Clone)]
pub struct Tables {
    pub joint: JointTable,
    pub original: OriginalTable,
    pub result: ResultTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_drops_blanks_preserving_order() {
        let s = RawSeries::new(vec![
            RawValue::Number(1.0),
            RawValue::Blank,
            RawValue::Number(2.5),
            RawValue::Blank,
            RawValue::Number(-3.0),
        ]);
        assert_eq!(s.numeric(), vec![1.0, 2.5, -3.0]);
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn chart_label_takes_text_before_first_semicolon() {
        assert_eq!(label_from_title("CPD1-1280; run 3; op A"), "CPD1-1280");
        assert_eq!(label_from_title("no separator"), "no separator");
        assert_eq!(label_from_title("; trailing"), "");
    }

    #[test]
    fn reference_label_is_first_token_of_stem() {
        assert_eq!(
            label_from_path(Path::new("data/KineticStandard.csv")),
            "KineticStandard"
        );
        assert_eq!(
            label_from_path(Path::new("20250307-Kinetic Standard Curve.csv")),
            "20250307-Kinetic"
        );
    }
}
