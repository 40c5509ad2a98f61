//! Sequential color ramps over [0, 1].

use crate::config::ColorChoice;

use super::color::Rgb;

// ColorBrewer 9-class sequential schemes, light to dark.
const BLUES: [Rgb; 9] = [
    Rgb::from_hex(0xf7fbff), Rgb::from_hex(0xdeebf7), Rgb::from_hex(0xc6dbef),
    Rgb::from_hex(0x9ecae1), Rgb::from_hex(0x6baed6), Rgb::from_hex(0x4292c6),
    Rgb::from_hex(0x2171b5), Rgb::from_hex(0x08519c), Rgb::from_hex(0x08306b),
];

const GREENS: [Rgb; 9] = [
    Rgb::from_hex(0xf7fcf5), Rgb::from_hex(0xe5f5e0), Rgb::from_hex(0xc7e9c0),
    Rgb::from_hex(0xa1d99b), Rgb::from_hex(0x74c476), Rgb::from_hex(0x41ab5d),
    Rgb::from_hex(0x238b45), Rgb::from_hex(0x006d2c), Rgb::from_hex(0x00441b),
];

const REDS: [Rgb; 9] = [
    Rgb::from_hex(0xfff5f0), Rgb::from_hex(0xfee0d2), Rgb::from_hex(0xfcbba1),
    Rgb::from_hex(0xfc9272), Rgb::from_hex(0xfb6a4a), Rgb::from_hex(0xef3b2c),
    Rgb::from_hex(0xcb181d), Rgb::from_hex(0xa50f15), Rgb::from_hex(0x67000d),
];

// Viridis sampled at t = 0.0, 0.1, ..., 1.0.
const VIRIDIS: [Rgb; 11] = [
    Rgb::from_hex(0x440154), Rgb::from_hex(0x482475), Rgb::from_hex(0x414487),
    Rgb::from_hex(0x355f8d), Rgb::from_hex(0x2a788e), Rgb::from_hex(0x21918c),
    Rgb::from_hex(0x22a884), Rgb::from_hex(0x44bf70), Rgb::from_hex(0x7ad151),
    Rgb::from_hex(0xbddf26), Rgb::from_hex(0xfde725),
];

/// A continuous color ramp. `at(0.0)` is the lowest intensity, `at(1.0)` the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorRamp {
    #[default]
    Blues,
    Greens,
    Reds,
    Viridis,
}

impl ColorRamp {
    /// Color at `t`; values outside [0, 1] are clamped, NaN maps to the low end.
    pub fn at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            ColorRamp::Blues => basis(&BLUES, t),
            ColorRamp::Greens => basis(&GREENS, t),
            ColorRamp::Reds => basis(&REDS, t),
            ColorRamp::Viridis => linear(&VIRIDIS, t),
        }
    }

    /// Lowest-intensity color.
    pub fn min_color(&self) -> Rgb { self.stops()[0] }

    /// Highest-intensity color.
    pub fn max_color(&self) -> Rgb {
        let stops = self.stops();
        stops[stops.len() - 1]
    }

    fn stops(&self) -> &'static [Rgb] {
        match self {
            ColorRamp::Blues => &BLUES,
            ColorRamp::Greens => &GREENS,
            ColorRamp::Reds => &REDS,
            ColorRamp::Viridis => &VIRIDIS,
        }
    }
}

impl From<ColorChoice> for ColorRamp {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Blues => ColorRamp::Blues,
            ColorChoice::Greens => ColorRamp::Greens,
            ColorChoice::Reds => ColorRamp::Reds,
            ColorChoice::Viridis => ColorRamp::Viridis,
        }
    }
}

/// Piecewise-linear interpolation between evenly spaced stops.
fn linear(stops: &[Rgb], t: f64) -> Rgb {
    let n = stops.len() - 1;
    if n == 0 { return stops[0] }
    let i = ((t * n as f64).floor() as usize).min(n - 1);
    let local = t * n as f64 - i as f64;
    stops[i].lerp(stops[i + 1], local)
}

/// Uniform cubic B-spline through evenly spaced stops; passes through both endpoints.
fn basis(stops: &[Rgb], t: f64) -> Rgb {
    let n = stops.len() - 1;
    if n == 0 { return stops[0] }
    let i = if t >= 1.0 { n - 1 } else { (t * n as f64).floor() as usize };

    let v1 = stops[i].channels();
    let v2 = stops[i + 1].channels();
    let v0 = if i > 0 { stops[i - 1].channels() } else { reflect(v1, v2) };
    let v3 = if i < n - 1 { stops[i + 2].channels() } else { reflect(v2, v1) };

    let local = (t - i as f64 / n as f64) * n as f64;
    let c = |k: usize| spline(local, v0[k], v1[k], v2[k], v3[k]);
    Rgb::from_channels(c(0), c(1), c(2))
}

#[inline]
fn reflect(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [2.0 * a[0] - b[0], 2.0 * a[1] - b[1], 2.0 * a[2] - b[2]]
}

#[inline]
fn spline(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3) / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for ramp in [ColorRamp::Blues, ColorRamp::Greens, ColorRamp::Reds, ColorRamp::Viridis] {
            assert_eq!(ramp.at(0.0), ramp.min_color(), "{ramp:?} low");
            assert_eq!(ramp.at(1.0), ramp.max_color(), "{ramp:?} high");
        }
        assert_eq!(ColorRamp::Blues.at(0.0).to_string(), "rgb(247,251,255)");
        assert_eq!(ColorRamp::Blues.at(1.0).to_string(), "rgb(8,48,107)");
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(ColorRamp::Reds.at(-3.0), ColorRamp::Reds.min_color());
        assert_eq!(ColorRamp::Reds.at(7.0), ColorRamp::Reds.max_color());
        assert_eq!(ColorRamp::Greens.at(f64::NAN), ColorRamp::Greens.min_color());
    }

    #[test]
    fn blues_darken_monotonically() {
        let mut prev = ColorRamp::Blues.at(0.0);
        for step in 1..=20 {
            let next = ColorRamp::Blues.at(step as f64 / 20.0);
            assert!(next.r <= prev.r && next.g <= prev.g, "{prev:?} -> {next:?}");
            prev = next;
        }
    }

    #[test]
    fn viridis_hits_its_stops() {
        assert_eq!(ColorRamp::Viridis.at(0.5), Rgb::from_hex(0x21918c));
    }

    #[test]
    fn choice_maps_to_ramp() {
        assert_eq!(ColorRamp::from(ColorChoice::Greens), ColorRamp::Greens);
        assert_eq!(ColorRamp::from(ColorChoice::Viridis), ColorRamp::Viridis);
    }
}
