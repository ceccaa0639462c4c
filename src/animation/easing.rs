//! Easing curves, matching the curve names of the page's original tween
//! library so timings read the same.

use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    OutQuad,
    InOutQuad,
    OutExpo,
    OutBack,
    /// `easeOutElastic(amplitude, period)`
    OutElastic { amplitude: f64, period: f64 },
}

impl Easing {
    /// The `easeOutElastic(1, .8)` curve used for the profile image.
    pub const OUT_ELASTIC: Easing = Easing::OutElastic {
        amplitude: 1.0,
        period: 0.8,
    };

    /// Map linear progress `t` in `[0, 1]` to eased progress. Always 0 at
    /// `t = 0` and 1 at `t = 1`; overshooting curves may leave `[0, 1]` in
    /// between.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match *self {
            Easing::Linear => t,
            Easing::OutQuad => 1.0 - (1.0 - t).powi(2),
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::OutExpo => 1.0 - 2f64.powf(-10.0 * t),
            Easing::OutBack => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Easing::OutElastic { amplitude, period } => {
                1.0 - elastic_in(1.0 - t, amplitude, period)
            }
        }
    }
}

fn elastic_in(t: f64, amplitude: f64, period: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let a = amplitude.clamp(1.0, 10.0);
    let p = period.clamp(0.1, 2.0);
    let s = p / (2.0 * PI) * (1.0 / a).asin();
    -a * 2f64.powf(10.0 * (t - 1.0)) * (((t - 1.0) - s) * (2.0 * PI) / p).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::OutExpo,
        Easing::OutBack,
        Easing::OUT_ELASTIC,
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_input_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-0.5), 0.0);
            assert_eq!(easing.apply(1.5), 1.0);
        }
    }

    #[test]
    fn test_in_out_quad_is_symmetric() {
        let e = Easing::InOutQuad;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_expo_front_loaded() {
        assert!(Easing::OutExpo.apply(0.2) > 0.7);
    }

    #[test]
    fn test_out_back_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::OutBack.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_out_quad_monotonic() {
        let mut last = 0.0;
        for i in 1..=100 {
            let v = Easing::OutQuad.apply(i as f64 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }
}
