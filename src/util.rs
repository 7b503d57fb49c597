use std::f64::consts::PI;

pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    match (mean(data), data.len()) {
        (Some(data_mean), count) if count > 0 => {
            let variance = data
                .iter()
                .map(|value| {
                    let diff = data_mean - *value;

                    diff * diff
                })
                .sum::<f64>()
                / count as f64;

            Some(variance.sqrt())
        }
        _ => None,
    }
}

/// Error function, Abramowitz & Stegun 7.1.26 (absolute error below 1.5e-7)
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;

    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal density
pub fn std_normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution
pub fn std_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Density of a normal(`loc`, `scale`) truncated to `[low, high]`.
///
/// Zero outside the interval. `scale` must be positive; callers validate it.
pub fn truncated_normal_pdf(x: f64, loc: f64, scale: f64, low: f64, high: f64) -> f64 {
    if x < low || x > high {
        return 0.0;
    }

    let a = (low - loc) / scale;
    let b = (high - loc) / scale;
    let mass = std_normal_cdf(b) - std_normal_cdf(a);
    if mass <= 0.0 {
        return 0.0;
    }

    std_normal_pdf((x - loc) / scale) / (scale * mass)
}
