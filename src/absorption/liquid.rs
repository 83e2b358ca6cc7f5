//! Cloud liquid-water absorption.

use crate::dielectric;
use crate::NEPERS_TO_DB;

/// Liquid-water specific absorption.
///
/// For a frequency in GHz, an effective cloud temperature `t_cloud` in °C
/// and a liquid-water content `w` in kg/m³, compute the cloud absorption
/// coefficient in dB/km. The coefficient is linear in `w` with the
/// permittivity-derived weight of [`dielectric::liquid_water_weight`].
pub fn gamma_liquid_water(frequency: f32, t_cloud: f32, w: f32) -> f32 {
    NEPERS_TO_DB * dielectric::liquid_water_weight(frequency, t_cloud) * w
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn unit_water_content_at_the_vapor_line() {
        assert_relative_eq!(
            gamma_liquid_water(22.235, -2., 1.),
            0.487952,
            max_relative = 1e-3
        );
    }

    #[test]
    fn dry_air_absorbs_nothing() {
        assert_abs_diff_eq!(gamma_liquid_water(22.235, -2., 0.), 0.);
    }
}
