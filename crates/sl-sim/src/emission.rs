//! Collapse heating and thermal light emission.

/// Peak temperature assigned to a collapse that just reaches the heating threshold (K).
pub const REFERENCE_COLLAPSE_TEMPERATURE_K: f64 = 50_000.0;

/// Collapse must shrink the bubble below this fraction of its rest radius to heat it.
pub const HEATING_RADIUS_FRACTION: f64 = 0.5;

/// Peak temperature reached by a collapse, if it is severe enough to heat the gas.
///
/// Returns `Some(50000 * (0.5 * R0) / R)` when `R < 0.5 * R0`, otherwise `None`.
/// The ratio is not guarded: a zero radius gives an infinite temperature and a
/// negative rest radius flips the comparison.
pub fn collapse_heating(ambient_radius_mm: f64, radius_mm: f64) -> Option<f64> {
    let threshold = ambient_radius_mm * HEATING_RADIUS_FRACTION;
    if radius_mm < threshold {
        let compression_ratio = threshold / radius_mm;
        Some(REFERENCE_COLLAPSE_TEMPERATURE_K * compression_ratio)
    } else {
        None
    }
}

/// Trait mapping a peak gas temperature to emitted light intensity.
pub trait EmissionModel {
    /// Light intensity (dimensionless, non-negative) for a peak temperature (K).
    fn intensity(&self, peak_temperature_k: f64) -> f64;
}

/// Exponential ramp above an emission floor.
///
/// ```text
/// I(T) = 0                             T < floor
/// I(T) = exp((T - floor) / scale)      otherwise
/// ```
///
/// There is no upper clamp; intensity grows without bound with temperature.
#[derive(Clone, Copy, Debug)]
pub struct ExponentialEmission {
    /// Temperature below which nothing is emitted (K)
    pub floor_k: f64,
    /// e-folding temperature of the ramp (K)
    pub scale_k: f64,
}

impl Default for ExponentialEmission {
    fn default() -> Self {
        Self {
            floor_k: 1000.0,
            scale_k: 10_000.0,
        }
    }
}

impl EmissionModel for ExponentialEmission {
    fn intensity(&self, peak_temperature_k: f64) -> f64 {
        if peak_temperature_k < self.floor_k {
            return 0.0;
        }
        ((peak_temperature_k - self.floor_k) / self.scale_k).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_floor_is_dark() {
        let emission = ExponentialEmission::default();
        assert_eq!(emission.intensity(0.0), 0.0);
        assert_eq!(emission.intensity(999.999), 0.0);
    }

    #[test]
    fn floor_emits_unit_intensity() {
        let emission = ExponentialEmission::default();
        assert_eq!(emission.intensity(1000.0), 1.0);
    }

    #[test]
    fn ramp_is_exponential() {
        let emission = ExponentialEmission::default();
        let i = emission.intensity(51_000.0);
        assert!((i - 5.0_f64.exp()).abs() < 1e-12);
        assert!(emission.intensity(1.0e7).is_infinite());
    }

    #[test]
    fn nan_temperature_propagates() {
        // NaN fails the floor comparison and falls through to the ramp
        let emission = ExponentialEmission::default();
        assert!(emission.intensity(f64::NAN).is_nan());
    }

    #[test]
    fn heating_requires_radius_below_half_ambient() {
        assert_eq!(collapse_heating(0.005, 0.0025), None);
        assert_eq!(collapse_heating(0.005, 0.004), None);

        let t = collapse_heating(0.005, 0.00125).unwrap();
        assert!((t - 100_000.0).abs() < 1e-9);
    }

    #[test]
    fn heating_at_zero_radius_is_infinite() {
        let t = collapse_heating(0.005, 0.0).unwrap();
        assert!(t.is_infinite());
    }

    #[test]
    fn negative_rest_radius_flips_threshold() {
        // R0 < 0: any radius "below" the negative threshold heats
        let t = collapse_heating(-0.005, -0.004).unwrap();
        assert!((t - 50_000.0 * 0.625).abs() < 1e-9);
    }
}
