//! Bar chart geometry: top-N slice, band scale, and a "nice" linear scale.
//!
//! Everything here works in abstract chart units; the widget decides how
//! those map onto terminal cells.

use super::model::WordCount;

/// Display limits offered to the user, in cycle order.
pub const BAR_LIMITS: &[usize] = &[10, 20, 50];
pub const DEFAULT_BAR_LIMIT: usize = 10;

/// Inner and outer padding of the categorical axis, as a fraction of a step.
const BAND_PADDING: f64 = 0.1;

pub fn is_valid_limit(n: usize) -> bool {
    BAR_LIMITS.contains(&n)
}

/// The limit after `current` in [`BAR_LIMITS`], wrapping around.
pub fn next_limit(current: usize) -> usize {
    let idx = BAR_LIMITS.iter().position(|&l| l == current).unwrap_or(0);
    BAR_LIMITS[(idx + 1) % BAR_LIMITS.len()]
}

/// The first `limit` entries of the already-sorted sequence.
pub fn top_n(frequencies: &[WordCount], limit: usize) -> &[WordCount] {
    &frequencies[..limit.min(frequencies.len())]
}

// ───────────────────────────────────────── scales ────────────

/// Maps the i-th of `n` categories onto `[0, extent]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(n: usize, extent: f64) -> Self {
        let n = n as f64;
        let step = extent / (n - BAND_PADDING + BAND_PADDING * 2.0).max(1.0);
        let start = (extent - step * (n - BAND_PADDING)) * 0.5;
        Self {
            start,
            step,
            bandwidth: step * (1.0 - BAND_PADDING),
        }
    }

    /// Left edge of category `i`.
    pub fn position(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Tick spacing for roughly `count` ticks over `[start, stop]`.
///
/// Positive results are the increment itself; negative results `-k` mean an
/// increment of `1 / k`, which keeps sub-unit steps exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
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
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Extend `max` outward to a round tick value, so `[0, nice_max(m)]` starts
/// and ends on ticks.
pub fn nice_max(max: f64) -> f64 {
    if max <= 0.0 || !max.is_finite() {
        return max.max(0.0);
    }
    let mut stop = max;
    let mut prev_step = None;
    for _ in 0..10 {
        let step = tick_increment(0.0, stop, 10);
        if prev_step == Some(step) {
            break;
        }
        if step > 0.0 {
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            stop = (stop * -step).ceil() / -step;
        } else {
            break;
        }
        prev_step = Some(step);
    }
    stop
}

/// Round tick values in `[0, max]`, about `count` of them.
pub fn ticks(max: f64, count: usize) -> Vec<f64> {
    if max <= 0.0 || count == 0 {
        return vec![0.0];
    }
    let step = tick_increment(0.0, max, count);
    let mut out = Vec::new();
    if step > 0.0 {
        let n = (max / step).floor() as u64;
        out.extend((0..=n).map(|i| i as f64 * step));
    } else {
        let inv = -step;
        let n = (max * inv).floor() as u64;
        out.extend((0..=n).map(|i| i as f64 / inv));
    }
    out
}

/// Axis labels for `ticks`, with as many decimals as the tick step needs:
/// `[0, 5, 10]` → `0 5 10`, `[0, 0.2, 0.4]` → `0.0 0.2 0.4`.
pub fn tick_labels(ticks: &[f64]) -> Vec<String> {
    let step = match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => 1.0,
    };
    let decimals = if step > 0.0 && step < 1.0 {
        (-(step.log10() + 1e-9).floor()) as usize
    } else {
        0
    };
    ticks.iter().map(|t| format!("{t:.decimals$}")).collect()
}

/// Maps `[0, domain_max]` onto `[extent, 0]` (bottom-up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_max: f64,
    extent: f64,
}

impl LinearScale {
    /// Domain `[0, max]` extended with [`nice_max`].
    pub fn nice(max: f64, extent: f64) -> Self {
        Self {
            domain_max: nice_max(max),
            extent,
        }
    }

    /// Distance from the top of the plot to the value's position.
    pub fn y(&self, value: f64) -> f64 {
        if self.domain_max <= 0.0 {
            return self.extent;
        }
        self.extent - value / self.domain_max * self.extent
    }

    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }
}

// ───────────────────────────────────────── layout ────────────

/// One bar, in chart units with the origin at the top-left of the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar<'a> {
    pub word: &'a str,
    pub count: u64,
    pub x: f64,
    pub width: f64,
    pub y: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartLayout<'a> {
    pub bars: Vec<Bar<'a>>,
    pub y_scale: LinearScale,
    pub ticks: Vec<f64>,
}

/// Lay out the first `limit` entries over a `width × height` plot.
pub fn layout<'a>(
    frequencies: &'a [WordCount],
    limit: usize,
    width: f64,
    height: f64,
    tick_count: usize,
) -> BarChartLayout<'a> {
    let shown = top_n(frequencies, limit);
    let max = shown.iter().map(|f| f.count).max().unwrap_or(0) as f64;
    let x = BandScale::new(shown.len(), width);
    let y = LinearScale::nice(max, height);

    let bars = shown
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let top = y.y(entry.count as f64);
            Bar {
                word: &entry.word,
                count: entry.count,
                x: x.position(i),
                width: x.bandwidth(),
                y: top,
                height: height - top,
            }
        })
        .collect();

    BarChartLayout {
        bars,
        y_scale: y,
        ticks: ticks(y.domain_max(), tick_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entries(n: usize) -> Vec<WordCount> {
        (0..n)
            .map(|i| WordCount::new(format!("w{i}"), (n - i) as u64 * 3))
            .collect()
    }

    #[test]
    fn tick_labels_keep_sub_unit_steps_distinct() {
        assert_eq!(tick_labels(&[0.0, 5.0, 10.0]), ["0", "5", "10"]);
        assert_eq!(
            tick_labels(&ticks(nice_max(1.0), 6)),
            ["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]
        );
        assert_eq!(tick_labels(&[0.0, 0.05, 0.1]), ["0.00", "0.05", "0.10"]);
        assert_eq!(tick_labels(&[0.0]), ["0"]);
    }

    #[test]
    fn top_n_takes_prefix_without_resorting() {
        let freqs = entries(30);
        let shown = top_n(&freqs, 20);
        assert_eq!(shown.len(), 20);
        assert_eq!(shown, &freqs[..20]);
        assert_eq!(top_n(&freqs, 50).len(), 30);
    }

    #[test]
    fn limits_cycle() {
        assert_eq!(next_limit(10), 20);
        assert_eq!(next_limit(20), 50);
        assert_eq!(next_limit(50), 10);
        assert!(is_valid_limit(20));
        assert!(!is_valid_limit(15));
    }

    #[test]
    fn nice_extends_to_round_values() {
        assert_eq!(nice_max(120.0), 120.0);
        assert_eq!(nice_max(95.0), 100.0);
        assert_eq!(nice_max(7.0), 7.0);
        assert_eq!(nice_max(3.0), 3.0);
        assert_eq!(nice_max(1234.0), 1300.0);
        assert_eq!(nice_max(0.0), 0.0);
    }

    #[test]
    fn ticks_are_round() {
        assert_eq!(ticks(100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks(1.0, 2), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn band_scale_matches_padded_steps() {
        let band = BandScale::new(2, 210.0);
        // step = 210 / (2 - 0.1 + 0.2) = 100
        assert!((band.step() - 100.0).abs() < 1e-9);
        assert!((band.bandwidth() - 90.0).abs() < 1e-9);
        assert!((band.position(0) - 10.0).abs() < 1e-9);
        assert!((band.position(1) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn tallest_bar_reaches_nice_max() {
        let freqs = vec![WordCount::new("the", 95), WordCount::new("a", 50)];
        let chart = layout(&freqs, 10, 100.0, 200.0, 5);
        assert_eq!(chart.y_scale.domain_max(), 100.0);
        assert!((chart.bars[0].height - 190.0).abs() < 1e-9);
        assert!((chart.bars[1].height - 100.0).abs() < 1e-9);
        assert!(chart.bars[0].x < chart.bars[1].x);
    }

    #[test]
    fn empty_input_has_no_bars() {
        let chart = layout(&[], 10, 100.0, 100.0, 5);
        assert!(chart.bars.is_empty());
        assert_eq!(chart.ticks, vec![0.0]);
    }

    proptest! {
        #[test]
        fn displayed_bars_are_first_n_in_order(n in 0usize..80, limit_idx in 0usize..3) {
            let freqs = entries(n);
            let limit = BAR_LIMITS[limit_idx];
            let chart = layout(&freqs, limit, 300.0, 100.0, 5);

            prop_assert_eq!(chart.bars.len(), n.min(limit));
            for (bar, entry) in chart.bars.iter().zip(&freqs) {
                prop_assert_eq!(bar.word, entry.word.as_str());
                prop_assert_eq!(bar.count, entry.count);
                prop_assert!(bar.height <= 100.0 + 1e-9);
            }
        }
    }
}
