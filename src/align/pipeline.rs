use crate::data::model::{
    ChartSeries, Column, JointTable, OriginalTable, ReferenceCurve, ResultTable, ScoreRecord,
    Tables,
};
use crate::error::Result;

use super::resample::resample_labeled;
use super::score::{offset_mse, round2};
use super::window::window_labeled;

// ---------------------------------------------------------------------------
// AlignmentPipeline – windows, resamples, assembles tables, scores
// ---------------------------------------------------------------------------

/// Run the whole alignment over already-loaded inputs.
///
/// Chart columns keep discovery order; the two reference columns follow in
/// load order.  Any failing stage aborts the run with nothing produced, so
/// callers can safely defer all file writes until this returns `Ok`.
pub fn run(
    charts: &[ChartSeries],
    references: &[ReferenceCurve; 2],
    n: usize,
) -> Result<Tables> {
    // Windowed chart columns, one per discovered series.
    let mut joint_columns = Vec::with_capacity(charts.len() + 2);
    for chart in charts {
        joint_columns.push(Column {
            label: chart.label.clone(),
            values: window_labeled(&chart.series, n, &chart.label)?,
        });
    }
    let chart_count = joint_columns.len();

    // Resampled reference columns, appended after all chart columns.
    for reference in references {
        joint_columns.push(Column {
            label: reference.label.clone(),
            values: resample_labeled(&reference.series, n, &reference.label)?,
        });
    }

    // Untrimmed numeric columns; ragged lengths are fine here.
    let original = OriginalTable {
        columns: charts
            .iter()
            .map(|c| Column {
                label: c.label.clone(),
                values: c.series.numeric(),
            })
            .collect(),
    };

    // Score every chart column against both references.  The offset is the
    // endpoint difference of the full columns, rounded once, then passed to
    // the scorer unchanged.
    let (chart_cols, ref_cols) = joint_columns.split_at(chart_count);
    let mut records = Vec::with_capacity(chart_count);
    for column in chart_cols {
        let endpoint = column.values[n - 1];
        let mut scores = [0.0; 2];
        for (slot, reference) in scores.iter_mut().zip(ref_cols) {
            let offset = round2(endpoint - reference.values[n - 1]);
            *slot = round2(offset_mse(&reference.values, &column.values, offset)?);
        }
        records.push(ScoreRecord {
            label: column.label.clone(),
            binding_max: endpoint,
            scores,
        });
    }

    log::info!(
        "aligned {chart_count} chart series against {} and {} at n = {n}",
        references[0].label,
        references[1].label
    );

    Ok(Tables {
        joint: JointTable {
            rows: n,
            columns: joint_columns,
        },
        original,
        result: ResultTable {
            reference_labels: [references[0].label.clone(), references[1].label.clone()],
            records,
        },
    })
}
