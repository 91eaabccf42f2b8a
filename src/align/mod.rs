/// Alignment core: the numeric stages between the readers and the writer.
///
/// ```text
///   ChartSeries ──▶ window    ─┐
///                              ├─▶ pipeline ──▶ Tables
///   ReferenceCurve ─▶ resample ┘      │
///                                     └── score (offset-corrected MSE)
/// ```
///
/// Every stage is a pure function over the numeric form of a series; all
/// file handling stays in [`crate::data`].
pub mod pipeline;
pub mod resample;
pub mod score;
pub mod window;

pub use pipeline::run;
