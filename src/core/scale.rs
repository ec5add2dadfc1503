use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Tick count used by axes when none is requested.
pub const DEFAULT_TICK_COUNT: usize = 10;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Continuous `domain -> range` mapping. Inverted ranges (`r0 > r1`) are how a
/// value axis puts zero at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value into range space. A collapsed domain maps to the
    /// range midpoint.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / span
        };
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Extends the domain outward to round tick-step multiples.
    ///
    /// The extended domain always contains the original one.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let reversed = self.domain_end < self.domain_start;
        let (lo, hi) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        let mut start = lo;
        let mut stop = hi;
        let mut previous: Option<f64> = None;
        let mut converged = false;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                converged = true;
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
            previous = Some(step);
        }
        if !converged {
            return self;
        }

        let start = start.min(lo);
        let stop = stop.max(hi);
        let (domain_start, domain_end) = if reversed {
            (stop, start)
        } else {
            (start, stop)
        };
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }

    /// Round tick values inside the domain.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }

    /// Distance between adjacent ticks produced by [`LinearScale::ticks`].
    #[must_use]
    pub fn tick_step(self, count: usize) -> f64 {
        tick_step(self.domain_start, self.domain_end, count)
    }
}

/// Signed tick increment; negative values `-k` encode a step of `1 / k` so
/// fractional steps stay exact.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reversed = stop < start;
    let increment = if reversed {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let magnitude = if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    };
    if reversed { -magnitude } else { magnitude }
}

#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reversed = stop < start;
    let (lo, hi) = if reversed { (stop, start) } else { (start, stop) };
    let Some(run) = tick_run(lo, hi, count as f64) else {
        return Vec::new();
    };
    if run.last < run.first {
        return Vec::new();
    }

    let mut values: Vec<f64> = (run.first..=run.last)
        .map(|index| {
            let index = index as f64;
            if run.increment < 0.0 {
                index / -run.increment
            } else {
                index * run.increment
            }
        })
        .collect();
    if reversed {
        values.reverse();
    }
    values
}

struct TickRun {
    first: i64,
    last: i64,
    increment: f64,
}

fn tick_run(start: f64, stop: f64, count: f64) -> Option<TickRun> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        first = (start * inc).round() as i64;
        last = (stop * inc).round() as i64;
        if (first as f64) / inc < start {
            first += 1;
        }
        if (last as f64) / inc > stop {
            last -= 1;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        first = (start / inc).round() as i64;
        last = (stop / inc).round() as i64;
        if (first as f64) * inc < start {
            first += 1;
        }
        if (last as f64) * inc > stop {
            last -= 1;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_run(start, stop, count * 2.0);
    }
    Some(TickRun {
        first,
        last,
        increment,
    })
}

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Formats a tick value with the precision implied by `step` and thousands
/// separators, e.g. `1,250` or `0.25`.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let precision = if step.is_finite() && step != 0.0 {
        (-step.abs().log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let text = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    let negative = value < 0.0 && text.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    if negative {
        grouped.push('\u{2212}');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, format_tick, tick_increment, ticks};
    use approx::assert_relative_eq;

    #[test]
    fn inverted_range_puts_zero_at_the_floor() {
        let scale = LinearScale::new((0.0, 10.0), (480.0, 0.0)).expect("valid scale");
        assert_eq!(scale.map(0.0), 480.0);
        assert_eq!(scale.map(10.0), 0.0);
        assert_relative_eq!(scale.invert(scale.map(3.5)), 3.5, epsilon = 1e-12);
    }

    #[test]
    fn nice_rounds_upper_bound_to_tick_multiple() {
        let scale = LinearScale::new((0.0, 7.0), (480.0, 0.0))
            .expect("valid scale")
            .nice(10);
        assert_eq!(scale.domain(), (0.0, 7.0));

        let scale = LinearScale::new((0.0, 97.0), (480.0, 0.0))
            .expect("valid scale")
            .nice(10);
        assert_eq!(scale.domain(), (0.0, 100.0));

        let scale = LinearScale::new((0.0, 0.73), (1.0, 0.0))
            .expect("valid scale")
            .nice(10);
        assert_relative_eq!(scale.domain().1, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn tick_increment_follows_1_2_5_ladder() {
        assert_eq!(tick_increment(0.0, 10.0, 10), 1.0);
        assert_eq!(tick_increment(0.0, 97.0, 10), 10.0);
        assert_eq!(tick_increment(0.0, 35.0, 10), 5.0);
        assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
    }

    #[test]
    fn ticks_cover_domain_inclusively() {
        assert_eq!(
            ticks(0.0, 10.0, 10),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn tick_labels_use_step_precision_and_grouping() {
        assert_eq!(format_tick(5.0, 1.0), "5");
        assert_eq!(format_tick(0.2, 0.2), "0.2");
        assert_eq!(format_tick(1250.0, 250.0), "1,250");
        assert_eq!(format_tick(100_000.0, 10_000.0), "100,000");
    }
}
