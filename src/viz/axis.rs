//! Pixel ↔ domain mappings for the legend axis.
//!
//! [`LinearAxis`] serves binned and continuous scales, [`BandAxis`] serves
//! nominal ones. Tick generation follows the usual 1-2-5 stepping so labels
//! land on round numbers.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Linear map from `domain` to `range` (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearAxis {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearAxis {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    /// Domain value → pixel. A zero-width domain maps everything to the range midpoint.
    pub fn scale(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Pixel → domain value.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Extend the domain outward to multiples of a round tick step.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        if d0 == d1 || !d0.is_finite() || !d1.is_finite() {
            return self;
        }
        let reverse = d1 < d0;
        let (mut start, mut stop) = if reverse { (d1, d0) } else { (d0, d1) };
        let mut prestep = f64::NAN;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count as f64);
            if step == prestep {
                self.domain = if reverse { (stop, start) } else { (start, stop) };
                return self;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = step;
        }
        self
    }

    /// Round tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count as f64)
    }
}

/// Approximately `count` round values between `start` and `stop` (inclusive).
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) {
        return vec![];
    }
    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let k = if reverse { i2 - i as f64 } else { i1 + i as f64 };
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect()
}

/// Tick step for the interval; negative values encode `1 / step` for sub-unit steps.
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).2
}

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
        let m = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * m);
        i2 = round_half_up(stop * m);
        if i1 / m < start {
            i1 += 1.0;
        }
        if i2 / m > stop {
            i2 -= 1.0;
        }
        inc = -m;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = round_half_up(start / inc);
        i2 = round_half_up(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Equal-width bands for an ordered list of categories.
#[derive(Debug, Clone, PartialEq)]
pub struct BandAxis {
    labels: Vec<String>,
    range: (f64, f64),
    padding: f64,
}

impl BandAxis {
    /// `padding` applies to the gaps between bands and, symmetrically, to both ends.
    pub fn new(labels: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self {
            labels,
            range,
            padding: padding.clamp(0.0, 1.0),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.labels.len() as f64;
        let (r0, r1) = self.range;
        (r1 - r0) / (n - self.padding + 2.0 * self.padding).max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    fn start(&self) -> f64 {
        let n = self.labels.len() as f64;
        let (r0, r1) = self.range;
        r0 + (r1 - r0 - self.step() * (n - self.padding)) * 0.5
    }

    /// Left edge of the band for `label`.
    pub fn position(&self, label: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == label)?;
        Some(self.start() + self.step() * i as f64)
    }

    pub fn center(&self, label: &str) -> Option<f64> {
        self.position(label).map(|x| x + self.bandwidth() / 2.0)
    }
}
