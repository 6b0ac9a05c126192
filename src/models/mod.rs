// Domain models: raw telemetry in, derived reports out.

mod report;
mod telemetry;

pub use report::{
    DayBucket, DurationParts, HourlyHistogram, Interval, IntervalEntry, IntervalReduction,
    OverallReport, Rollup, StateTotals,
};
pub use telemetry::{ConnectivityState, DataBounds, EventRecord, StateSample};
