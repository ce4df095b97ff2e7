// File: crates/chart-core/src/scale.rs
// Summary: Linear (niced, domain policy) and band (first-seen order) scales mapping data to pixels.

use indexmap::IndexSet;

/// Data value on a continuous axis.
pub type Value = f64;

/// Default tick count used for nicing and axes.
pub const DEFAULT_TICKS: usize = 10;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// (first index, last index, increment). A negative increment means "divide by -inc".
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start { i1 += 1.0; }
        if i2 / inv > stop { i2 -= 1.0; }
        inc = -inv;
    } else {
        let fwd = 10f64.powf(power) * factor;
        i1 = (start / fwd).round();
        i2 = (stop / fwd).round();
        if i1 * fwd < start { i1 += 1.0; }
        if i2 * fwd > stop { i2 -= 1.0; }
        inc = fwd;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Raw tick increment for `[start, stop]` (start <= stop); negative for sub-unit steps.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Signed distance between adjacent ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse { tick_increment(stop, start, count) } else { tick_increment(start, stop, count) };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Round tick values covering `[start, stop]`, roughly `count` of them.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    let at = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| if reverse { at(i2 - i as f64) } else { at(i1 + i as f64) })
        .collect()
}

/// How a continuous domain is derived from the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Exact (min, max) of the data.
    Extent,
    /// `[0, max]`; energy and price axes.
    Zero,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainPolicy {
    pub anchor: Anchor,
    /// Multiplier applied to the domain maximum before nicing (1.0 = none).
    pub headroom: f64,
}

impl DomainPolicy {
    pub const fn extent() -> Self { Self { anchor: Anchor::Extent, headroom: 1.0 } }
    pub const fn zero_anchored() -> Self { Self { anchor: Anchor::Zero, headroom: 1.0 } }

    pub const fn with_headroom(mut self, factor: f64) -> Self {
        self.headroom = factor;
        self
    }

    /// Domain before nicing; `None` when there is no finite value. Never zero-width.
    pub fn domain<I: IntoIterator<Item = f64>>(&self, values: I) -> Option<(f64, f64)> {
        let (min, max) = crate::coerce::extent(values)?;
        let (lo, max) = match self.anchor {
            Anchor::Extent => (min, max),
            // an all-zero series still gets a unit-high axis
            Anchor::Zero => (0.0, if max == 0.0 { 1.0 } else { max }),
        };
        let mut hi = max * self.headroom;
        if (hi - lo).abs() < 1e-12 {
            // guarantee at least one tick unit of span
            hi = lo + 1.0;
        }
        Some((lo, hi))
    }
}

/// Continuous linear mapping from a data domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (Value, Value),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (Value, Value), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Domain from `values` under `policy`, niced with [`DEFAULT_TICKS`].
    pub fn from_values<I>(values: I, policy: DomainPolicy, range: (f32, f32)) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let domain = policy.domain(values)?;
        Some(Self::new(domain, range).nice(DEFAULT_TICKS))
    }

    pub fn domain(&self) -> (Value, Value) { self.domain }
    pub fn range(&self) -> (f32, f32) { self.range }

    /// Extend the domain outward to round values, iterating until the step settles.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reverse = d1 < d0;
        let (mut start, mut stop) = if reverse { (d1, d0) } else { (d0, d1) };
        let mut prestep: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if prestep == Some(step) {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                return self;
            }
            prestep = Some(step);
        }
        self.domain = if reverse { (stop, start) } else { (start, stop) };
        self
    }

    #[inline]
    pub fn to_px(&self, v: Value) -> f32 {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        let t = if span.abs() < 1e-12 { 0.5 } else { (v - d0) / span };
        self.range.0 + t as f32 * (self.range.1 - self.range.0)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> Value {
        let (r0, r1) = self.range;
        let span = (r1 - r0) as f64;
        let t = if span.abs() < 1e-9 { 0.0 } else { (px - r0) as f64 / span };
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }

    pub fn ticks(&self, count: usize) -> Vec<Value> {
        ticks(self.domain.0, self.domain.1, count)
    }

    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.0, self.domain.1, count)
    }
}

/// Categorical band layout: ordered slots with a padding fraction between and around them.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    range: (f32, f32),
    padding_inner: f32,
    padding_outer: f32,
    align: f32,
    start: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    /// Distinct labels in first-seen order; `padding` is used for inner and outer padding.
    pub fn new<I, S>(labels: I, range: (f32, f32), padding: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domain: IndexSet<String> = labels.into_iter().map(Into::into).collect();
        let padding = padding.clamp(0.0, 1.0);
        let mut s = Self {
            domain,
            range,
            padding_inner: padding,
            padding_outer: padding,
            align: 0.5,
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        s.rescale();
        s
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f32;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        self.step = (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.start = lo + (hi - lo - self.step * (n - self.padding_inner)) * self.align;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
    }

    pub fn domain(&self) -> &IndexSet<String> { &self.domain }
    pub fn labels(&self) -> impl Iterator<Item = &str> { self.domain.iter().map(String::as_str) }
    pub fn bandwidth(&self) -> f32 { self.bandwidth }
    pub fn step(&self) -> f32 { self.step }

    /// Leading edge of the band for `label`.
    pub fn to_px(&self, label: &str) -> Option<f32> {
        let i = self.domain.get_index_of(label)?;
        let (r0, r1) = self.range;
        let n = self.domain.len();
        // reversed ranges lay the bands out from the far end
        let slot = if r1 < r0 { n - 1 - i } else { i };
        Some(self.start + self.step * slot as f32)
    }

    /// Center of the band for `label`, where tick marks go.
    pub fn center(&self, label: &str) -> Option<f32> {
        self.to_px(label).map(|x| x + self.bandwidth / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_anchored_domain_starts_at_zero() {
        let s = LinearScale::from_values([12.0, 45.0, 7.0], DomainPolicy::zero_anchored(), (712.0, 0.0)).unwrap();
        assert_eq!(s.domain(), (0.0, 45.0));
        assert_relative_eq!(s.to_px(0.0), 712.0);
        assert_relative_eq!(s.to_px(45.0), 0.0);
    }

    #[test]
    fn extent_domain_is_niced_outward() {
        let s = LinearScale::from_values([3.5, 7.2], DomainPolicy::extent(), (0.0, 100.0)).unwrap();
        assert_eq!(s.domain(), (3.5, 7.5));
    }

    #[test]
    fn headroom_inflates_max_before_nicing() {
        let s = LinearScale::from_values([40.0, 90.0], DomainPolicy::zero_anchored().with_headroom(1.1), (1.0, 0.0))
            .unwrap();
        // 99 niced up to the next round step
        assert_eq!(s.domain(), (0.0, 100.0));
    }

    #[test]
    fn zero_width_extent_gets_a_unit_of_span() {
        let s = LinearScale::from_values([5.0, 5.0], DomainPolicy::extent(), (0.0, 10.0)).unwrap();
        let (lo, hi) = s.domain();
        assert!(hi > lo);
        assert_eq!((lo, hi), (5.0, 6.0));
        let z = LinearScale::from_values([0.0], DomainPolicy::zero_anchored(), (0.0, 10.0)).unwrap();
        assert_eq!(z.domain(), (0.0, 1.0));
        let h = DomainPolicy::zero_anchored().with_headroom(1.1).domain([0.0, 0.0]).unwrap();
        assert_relative_eq!(h.1, 1.1);
    }

    #[test]
    fn no_values_no_scale() {
        assert!(LinearScale::from_values(std::iter::empty(), DomainPolicy::extent(), (0.0, 1.0)).is_none());
    }

    #[test]
    fn ticks_are_round() {
        assert_eq!(ticks(0.0, 45.0, 10), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0]);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(2.0, 2.0, 10), vec![2.0]);
        assert_relative_eq!(tick_step(0.0, 1.0, 5), 0.2);
    }

    #[test]
    fn invert_round_trips_pixel() {
        let s = LinearScale::new((0.0, 200.0), (712.0, 0.0));
        assert_relative_eq!(s.from_px(s.to_px(50.0)), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn band_keeps_first_seen_order() {
        let b = BandScale::new(["OLED", "LED", "Plasma", "LED"], (0.0, 708.0), 0.3);
        let labels: Vec<_> = b.labels().collect();
        assert_eq!(labels, ["OLED", "LED", "Plasma"]);
        assert!(b.to_px("OLED").unwrap() < b.to_px("LED").unwrap());
    }

    #[test]
    fn band_layout_matches_padding_math() {
        let b = BandScale::new(["a", "b", "c"], (0.0, 330.0), 0.3);
        // step = 330 / (3 - 0.3 + 0.6) = 100
        assert_relative_eq!(b.step(), 100.0, epsilon = 1e-4);
        assert_relative_eq!(b.bandwidth(), 70.0, epsilon = 1e-4);
        assert_relative_eq!(b.to_px("a").unwrap(), 30.0, epsilon = 1e-4);
        assert_relative_eq!(b.center("c").unwrap(), 265.0, epsilon = 1e-4);
    }

    #[test]
    fn single_band_is_not_degenerate() {
        let b = BandScale::new(["only"], (0.0, 130.0), 0.3);
        assert!(b.bandwidth() > 0.0);
        assert_relative_eq!(b.to_px("only").unwrap(), 30.0, epsilon = 1e-4);
        assert!(b.to_px("missing").is_none());
    }
}
