// Step-function reduction of connectivity samples into labeled intervals.
//
// Each sample's state holds until the next sample. Range-bounded reduction always covers
// [range_start, range_end] exactly: the first sample's state is applied back to range_start,
// and the last sample's state is extended to range_end.

use std::borrow::Cow;

use futures_util::stream::{self, BoxStream, Stream, StreamExt};

use crate::models::{ConnectivityState, Interval, IntervalReduction, StateSample, StateTotals};

/// Reduce `samples` over `[range_start, range_end]`.
///
/// With no samples the whole range is attributed to `default_state`. Samples outside the
/// range are clamped onto its bounds and counted in `clamped_samples`; a sample past
/// `range_end` is logged as a consistency warning, the computation still completes.
pub fn reduce(
    samples: &[StateSample],
    range_start: i64,
    range_end: i64,
    default_state: ConnectivityState,
) -> IntervalReduction {
    let range_end = if range_end < range_start {
        tracing::warn!(range_start, range_end, "inverted interval range, treating as empty");
        range_start
    } else {
        range_end
    };

    let sorted = sorted_by_timestamp(samples);
    let Some(first) = sorted.first() else {
        let only = Interval {
            start: range_start,
            state: default_state,
            duration: span(range_start, range_end),
        };
        let mut totals = StateTotals::default();
        totals.add(only.state, only.duration);
        return IntervalReduction {
            intervals: vec![only],
            totals,
            clamped_samples: 0,
        };
    };

    let mut before = 0usize;
    let mut after = 0usize;
    let clamped: Vec<StateSample> = sorted
        .iter()
        .map(|s| {
            let timestamp = if s.timestamp < range_start {
                before += 1;
                range_start
            } else if s.timestamp > range_end {
                after += 1;
                range_end
            } else {
                s.timestamp
            };
            StateSample::new(timestamp, s.state)
        })
        .collect();

    if after > 0 {
        tracing::warn!(
            samples_after_range = after,
            range_end,
            "state samples beyond range end; clamping tail to zero"
        );
    }
    if before > 0 {
        tracing::debug!(
            samples_before_range = before,
            range_start,
            "state samples before range start"
        );
    }

    let mut intervals = Vec::with_capacity(clamped.len() + 1);
    let lead_end = clamped[0].timestamp;
    if lead_end > range_start {
        intervals.push(Interval {
            start: range_start,
            state: first.state,
            duration: span(range_start, lead_end),
        });
    }
    for pair in clamped.windows(2) {
        intervals.push(Interval {
            start: pair[0].timestamp,
            state: pair[0].state,
            duration: span(pair[0].timestamp, pair[1].timestamp),
        });
    }
    let last = clamped[clamped.len() - 1];
    intervals.push(Interval {
        start: last.timestamp,
        state: last.state,
        duration: span(last.timestamp, range_end),
    });

    let mut totals = StateTotals::default();
    for interval in &intervals {
        totals.add(interval.state, interval.duration);
    }

    IntervalReduction {
        intervals,
        totals,
        clamped_samples: before + after,
    }
}

fn sorted_by_timestamp(samples: &[StateSample]) -> Cow<'_, [StateSample]> {
    if samples.is_sorted_by_key(|s| s.timestamp) {
        Cow::Borrowed(samples)
    } else {
        let mut owned = samples.to_vec();
        owned.sort_by_key(|s| s.timestamp);
        Cow::Owned(owned)
    }
}

fn span(from: i64, to: i64) -> u64 {
    to.saturating_sub(from).max(0) as u64
}

/// Raw history listing: one interval per sample, closed by the next sample.
///
/// A left-to-right fold that only carries the previous sample, so it can run over an
/// arbitrarily long source. The newest sample yields an open entry with `duration == 0`.
/// A source error is passed through and ends the listing.
pub fn list_intervals<'a, St>(samples: St) -> BoxStream<'a, anyhow::Result<Interval>>
where
    St: Stream<Item = anyhow::Result<StateSample>> + Send + 'a,
{
    let listing = Listing {
        samples: samples.boxed(),
        previous: None,
        done: false,
    };
    stream::unfold(listing, |mut listing| async move {
        if listing.done {
            return None;
        }
        while let Some(item) = listing.samples.next().await {
            let sample = match item {
                Ok(sample) => sample,
                Err(e) => {
                    listing.done = true;
                    return Some((Err(e), listing));
                }
            };
            if let Some(closed) = listing.advance(sample) {
                return Some((Ok(closed), listing));
            }
        }
        listing.done = true;
        let open = listing.previous.take()?;
        Some((
            Ok(Interval {
                start: open.timestamp,
                state: open.state,
                duration: 0,
            }),
            listing,
        ))
    })
    .boxed()
}

struct Listing<'a> {
    samples: BoxStream<'a, anyhow::Result<StateSample>>,
    previous: Option<StateSample>,
    done: bool,
}

impl Listing<'_> {
    /// Close the previous sample's interval at `next`. The first sample closes nothing.
    fn advance(&mut self, next: StateSample) -> Option<Interval> {
        let current = self.previous.replace(next)?;
        if next.timestamp < current.timestamp {
            tracing::warn!(
                previous = current.timestamp,
                next = next.timestamp,
                "out-of-order state sample in listing"
            );
        }
        Some(Interval {
            start: current.timestamp,
            state: current.state,
            duration: span(current.timestamp, next.timestamp),
        })
    }
}
