// File: crates/dash-core/src/scale.rs
// Summary: Linear data->pixel scale with invert, domain clamping and tick-aligned "nice" domains.

/// Domain used when a view has no data to derive one from.
pub const DEFAULT_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Tick counts used for nicing axes.
pub const AXIS_TICKS: usize = 10;

/// Monotonic linear map from a data domain onto a pixel range. The range may be
/// descending (y axes grow upward on screen).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale over [`DEFAULT_DOMAIN`], for empty views.
    pub fn fallback(range: (f64, f64)) -> Self {
        Self::new(DEFAULT_DOMAIN, range)
    }

    /// Scale over the extent of `values`, widened if degenerate and niced with `ticks`.
    /// Falls back to [`DEFAULT_DOMAIN`] when there are no values.
    pub fn from_values<I>(values: I, range: (f64, f64), ticks: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        match extent(values) {
            Some((lo, hi)) => Self::new(widen(lo, hi), range).nice(ticks),
            None => Self::fallback(range),
        }
    }

    pub fn domain(&self) -> (f64, f64) { self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self
    }

    /// Pixel extent `[min, max]` of the range regardless of its direction.
    pub fn pixel_bounds(&self) -> (f64, f64) {
        (self.range.0.min(self.range.1), self.range.0.max(self.range.1))
    }

    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) * 0.5;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    pub fn clamp_to_domain(&self, v: f64) -> f64 {
        let lo = self.domain.0.min(self.domain.1);
        let hi = self.domain.0.max(self.domain.1);
        v.clamp(lo, hi)
    }

    /// Extend the domain outward to tick boundaries for roughly `count` ticks.
    pub fn nice(mut self, count: usize) -> Self {
        self.domain = nice_domain(self.domain.0, self.domain.1, count);
        self
    }
}

/// `[min, max]` of the values, `None` when empty.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Single-valued extents would give a zero-width domain; widen them by one unit.
pub fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < 1e-12 { (lo, lo + 1.0) } else { (lo, hi) }
}

/// Tick increment for `[start, stop]` split into about `count` steps.
/// Positive results are the step itself; negative results are `-1/step`, which
/// keeps sub-unit steps exact (0.1 is represented as -10).
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(1) as f64;
    if !(step.is_finite() && step > 0.0) {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 { 10.0 } else if error >= e5 { 5.0 } else if error >= e2 { 2.0 } else { 1.0 };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power) / factor)
    }
}

/// Round `[start, stop]` outward to multiples of its tick increment, repeating
/// until the increment stops changing.
pub fn nice_domain(mut start: f64, mut stop: f64, count: usize) -> (f64, f64) {
    let reversed = stop < start;
    if reversed {
        std::mem::swap(&mut start, &mut stop);
    }
    let mut prestep: Option<f64> = None;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if prestep == Some(step) {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        prestep = Some(step);
    }
    if reversed { (stop, start) } else { (start, stop) }
}

/// Upper bound on interior edges; a wider request yields the domain as one bucket.
pub const MAX_BUCKETS: i64 = 1_000_000;

// multiples of a step past 2^53 are no longer distinct floats
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Tick-aligned thresholds strictly inside `(start, stop)` plus both endpoints;
/// consecutive pairs form equal-width buckets when the domain was niced with `count`.
/// Thresholds are enumerated by integer multiple of the step, so the work is bounded
/// even when the domain sits far from zero; if the multiples cannot be told apart at
/// that magnitude only the endpoints are returned.
pub fn bucket_edges(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = tick_increment(start, stop, count);
    let mut edges = vec![start];
    let (lo, hi) = if step > 0.0 {
        (start / step, stop / step)
    } else {
        (start * -step, stop * -step)
    };
    if step != 0.0 && lo.abs() < EXACT_INT_LIMIT && hi.abs() < EXACT_INT_LIMIT {
        let i0 = lo.floor() as i64 + 1;
        let i1 = hi.ceil() as i64 - 1;
        if i1 >= i0 && i1 - i0 < MAX_BUCKETS {
            for k in i0..=i1 {
                let t = if step > 0.0 { k as f64 * step } else { k as f64 / -step };
                if t > start && t < stop {
                    edges.push(t);
                }
            }
        }
    }
    if stop > start {
        edges.push(stop);
    }
    edges
}
