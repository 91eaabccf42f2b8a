use std::path::{Path, PathBuf};

use crate::error::Result;

use super::model::{JointTable, OriginalTable, ResultTable, Tables};

// ---------------------------------------------------------------------------
// CSV emission of the three output tables
// ---------------------------------------------------------------------------

/// Output file names, fixed by the downstream tooling that consumes them.
pub const JOINT_FILE: &str = "chart_data.csv";
pub const ORIGINAL_FILE: &str = "chart_original_data.csv";
pub const RESULT_FILE: &str = "chart_result.csv";

/// Write all three tables into `out_dir`.  Callers invoke this only after the
/// whole computation has succeeded, so a failed run never touches the files.
pub fn write_tables(out_dir: &Path, tables: &Tables) -> Result<Vec<PathBuf>> {
    let joint = out_dir.join(JOINT_FILE);
    let original = out_dir.join(ORIGINAL_FILE);
    let result = out_dir.join(RESULT_FILE);

    write_joint(&joint, &tables.joint)?;
    write_original(&original, &tables.original)?;
    write_result(&result, &tables.result)?;

    Ok(vec![joint, original, result])
}

fn write_joint(path: &Path, table: &JointTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns.iter().map(|c| c.label.as_str()))?;
    for row in 0..table.rows {
        writer.write_record(table.columns.iter().map(|c| c.values[row].to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Ragged columns: rows run to the longest column, shorter columns emit
/// empty cells past their end.
fn write_original(path: &Path, table: &OriginalTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns.iter().map(|c| c.label.as_str()))?;

    let rows = table.columns.iter().map(|c| c.values.len()).max().unwrap_or(0);
    for row in 0..rows {
        writer.write_record(
            table
                .columns
                .iter()
                .map(|c| c.values.get(row).map(|v| v.to_string()).unwrap_or_default()),
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn write_result(path: &Path, table: &ResultTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let [ref1, ref2] = &table.reference_labels;
    writer.write_record([
        String::new(),
        "binding_max".to_string(),
        format!("{ref1}_score"),
        format!("{ref2}_score"),
    ])?;

    for record in &table.records {
        writer.write_record([
            record.label.clone(),
            record.binding_max.to_string(),
            record.scores[0].to_string(),
            record.scores[1].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ScoreRecord};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("curvescore-writer-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn column(label: &str, values: &[f64]) -> Column {
        Column {
            label: label.to_string(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn writes_all_three_tables() {
        let dir = temp_dir("all");
        let tables = Tables {
            joint: JointTable {
                rows: 2,
                columns: vec![
                    column("A", &[1.0, 2.0]),
                    column("KineticStandard", &[1.5, 2.5]),
                    column("SteadyStandard", &[0.5, 1.5]),
                ],
            },
            original: OriginalTable {
                columns: vec![column("A", &[1.0, 2.0, 3.0]), column("B", &[9.0])],
            },
            result: ResultTable {
                reference_labels: ["KineticStandard".into(), "SteadyStandard".into()],
                records: vec![ScoreRecord {
                    label: "A".into(),
                    binding_max: 2.0,
                    scores: [0.25, 1.0],
                }],
            },
        };

        let written = write_tables(&dir, &tables).unwrap();
        assert_eq!(written.len(), 3);

        let joint = std::fs::read_to_string(dir.join(JOINT_FILE)).unwrap();
        assert_eq!(joint, "A,KineticStandard,SteadyStandard\n1,1.5,0.5\n2,2.5,1.5\n");

        let original = std::fs::read_to_string(dir.join(ORIGINAL_FILE)).unwrap();
        assert_eq!(original, "A,B\n1,9\n2,\n3,\n");

        let result = std::fs::read_to_string(dir.join(RESULT_FILE)).unwrap();
        assert_eq!(
            result,
            ",binding_max,KineticStandard_score,SteadyStandard_score\nA,2,0.25,1\n"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
