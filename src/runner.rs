use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::align;
use crate::data::{reader, writer};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// RunConfig – everything one batch run needs
// ---------------------------------------------------------------------------

/// Default sample count when the operator does not override it.
pub const DEFAULT_SAMPLE_COUNT: usize = 48;

/// Default reference-file value column.
pub const DEFAULT_REFERENCE_COLUMN: &str = "Y-axis";

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub charts_path: PathBuf,
    /// Kinetic standard first, steady-state standard second; this order fixes
    /// the reference column order of every output table.
    pub reference_paths: [PathBuf; 2],
    pub sample_count: usize,
    pub reference_column: String,
    pub out_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// Events – what a run reports to its foreground
// ---------------------------------------------------------------------------

/// What a finished run leaves behind.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub charts: usize,
    pub rows: usize,
    pub outputs: Vec<PathBuf>,
}

/// Structured progress events.  The worker sends these over a channel; the
/// foreground drains them at its own pace.  Exactly one terminal event
/// (`Completed` or `Failed`) ends every run.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Info(String),
    Completed(RunSummary),
    Failed(String),
}

/// Sender side handed to the job body.
pub struct EventSink {
    tx: Sender<RunEvent>,
}

impl EventSink {
    pub fn info(&self, message: impl Into<String>) {
        // A disconnected foreground is not an error; the run finishes anyway.
        let _ = self.tx.send(RunEvent::Info(message.into()));
    }
}

// ---------------------------------------------------------------------------
// The batch job
// ---------------------------------------------------------------------------

/// One full run: load charts and references, align, then write all three
/// tables.  Writing starts only after every computation has succeeded, so a
/// failed run leaves earlier outputs untouched.
pub fn process(config: &RunConfig, sink: &EventSink) -> Result<RunSummary> {
    let charts = reader::load_charts(&config.charts_path)?;
    sink.info(format!(
        "loaded {} chart series from {:?}",
        charts.len(),
        config.charts_path
    ));
    for chart in &charts {
        sink.info(chart.label.clone());
    }

    let references = [
        reader::load_reference(&config.reference_paths[0], &config.reference_column)?,
        reader::load_reference(&config.reference_paths[1], &config.reference_column)?,
    ];

    let tables = align::run(&charts, &references, config.sample_count)?;
    let outputs = writer::write_tables(&config.out_dir, &tables)?;
    sink.info(format!("wrote {} output tables", outputs.len()));

    Ok(RunSummary {
        charts: charts.len(),
        rows: config.sample_count,
        outputs,
    })
}

// ---------------------------------------------------------------------------
// Runner – single-run exclusivity + background execution
// ---------------------------------------------------------------------------

/// Owns the run-in-progress flag and executes one job at a time on a worker
/// thread.  A second submission while a run is active is rejected with
/// [`PipelineError::RunInProgress`] rather than interleaved against the same
/// output files.
#[derive(Clone, Default)]
pub struct Runner {
    running: Arc<AtomicBool>,
}

/// Foreground view of a submitted run.
pub struct RunHandle {
    pub events: Receiver<RunEvent>,
    worker: JoinHandle<()>,
}

impl RunHandle {
    /// Block until the worker exits.
    pub fn join(self) {
        let _ = self.worker.join();
    }
}

/// Clears the running flag when the job ends, including on worker panic.
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Submit one batch run.  Fails immediately if a run is in progress.
    pub fn submit(&self, config: RunConfig) -> Result<RunHandle> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(PipelineError::RunInProgress);
        }

        let guard = RunningGuard(Arc::clone(&self.running));
        let (tx, events) = channel();
        let worker = std::thread::spawn(move || {
            let _guard = guard;
            let sink = EventSink { tx: tx.clone() };
            match process(&config, &sink) {
                Ok(summary) => {
                    log::info!(
                        "run complete: {} charts, {} rows",
                        summary.charts,
                        summary.rows
                    );
                    let _ = tx.send(RunEvent::Completed(summary));
                }
                Err(e) => {
                    log::error!("run failed: {e}");
                    let _ = tx.send(RunEvent::Failed(e.to_string()));
                }
            }
        });

        Ok(RunHandle { events, worker })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn temp_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("curvescore-runner-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_reference(path: &Path, points: usize) {
        let mut text = String::from("t,Y-axis\n");
        for i in 0..points {
            text.push_str(&format!("{i},{}.5\n", i));
        }
        std::fs::write(path, text).unwrap();
    }

    fn write_charts(path: &Path, points: usize) {
        let values: Vec<String> = (0..points).map(|i| i.to_string()).collect();
        let json = format!(
            r#"[{{"title": "A; op", "values": [{}]}}]"#,
            values.join(", ")
        );
        std::fs::write(path, json).unwrap();
    }

    fn config(dir: &Path, n: usize) -> RunConfig {
        RunConfig {
            charts_path: dir.join("charts.json"),
            reference_paths: [dir.join("KineticStandard.csv"), dir.join("SteadyStandard.csv")],
            sample_count: n,
            reference_column: DEFAULT_REFERENCE_COLUMN.to_string(),
            out_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn background_run_completes_and_clears_the_guard() {
        let dir = temp_dir("ok");
        write_charts(&dir.join("charts.json"), 60);
        write_reference(&dir.join("KineticStandard.csv"), 50);
        write_reference(&dir.join("SteadyStandard.csv"), 50);

        let runner = Runner::new();
        let handle = runner.submit(config(&dir, 48)).unwrap();

        let mut completed = None;
        for event in handle.events.iter() {
            match event {
                RunEvent::Completed(summary) => completed = Some(summary),
                RunEvent::Failed(msg) => panic!("run failed: {msg}"),
                RunEvent::Info(_) => {}
            }
        }
        handle.join();

        let summary = completed.expect("terminal event");
        assert_eq!(summary.charts, 1);
        assert_eq!(summary.rows, 48);
        assert!(dir.join(crate::data::writer::JOINT_FILE).exists());
        assert!(dir.join(crate::data::writer::RESULT_FILE).exists());
        assert!(!runner.is_running());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_run_writes_no_output_files() {
        let dir = temp_dir("fail");
        write_charts(&dir.join("charts.json"), 10); // too short for n = 48
        write_reference(&dir.join("KineticStandard.csv"), 50);
        write_reference(&dir.join("SteadyStandard.csv"), 50);

        let runner = Runner::new();
        let handle = runner.submit(config(&dir, 48)).unwrap();

        let mut failed = false;
        for event in handle.events.iter() {
            if let RunEvent::Failed(msg) = event {
                assert!(msg.contains("sample count 48"));
                failed = true;
            }
        }
        handle.join();

        assert!(failed);
        assert!(!dir.join(crate::data::writer::JOINT_FILE).exists());
        assert!(!dir.join(crate::data::writer::ORIGINAL_FILE).exists());
        assert!(!dir.join(crate::data::writer::RESULT_FILE).exists());
        assert!(!runner.is_running());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn concurrent_submission_is_rejected() {
        let runner = Runner::new();
        runner.running.store(true, Ordering::SeqCst);
        let dir = temp_dir("busy");
        assert!(matches!(
            runner.submit(config(&dir, 48)),
            Err(PipelineError::RunInProgress)
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
