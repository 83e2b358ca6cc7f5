//! Outgoing radiation of the atmosphere-surface system seen from orbit.

use crate::atmosphere::Atmosphere;
use crate::error::Error;
use crate::parallel;
use crate::surface::Surface;
use crate::tensor::Field;
use crate::CELSIUS_ZERO;

/// Top-of-atmosphere brightness temperature at `frequency` GHz, in K.
///
/// Combines the surface emission attenuated by the full column, the
/// upwelling atmospheric emission, and the downwelling emission reflected
/// off the surface and attenuated on the way back up:
/// `T_s·κ·e^{−τ} + T_B↑ + r·T_B↓·e^{−τ}`.
pub fn brightness_temperature<S: Surface>(
    frequency: f32,
    atm: &Atmosphere,
    srf: &S,
) -> Result<Field, Error> {
    let transmission = atm
        .opacity()
        .summary(frequency)?
        .map(|tau| (-tau).exp());
    let tb_down = atm.downward().brightness_temperature(frequency)?;
    let tb_up = atm.upward().brightness_temperature(frequency)?;
    let reflectivity = srf.reflectivity(frequency);
    let emissivity = reflectivity.map(|r| 1. - r);
    let t_surface = srf.temperature().map(|t| t + CELSIUS_ZERO);
    Ok(t_surface * emissivity * transmission.clone()
        + tb_up
        + reflectivity * tb_down * transmission)
}

/// TOA brightness temperatures for a batch of frequencies, evaluated on a
/// worker pool; results follow the input order.
pub fn brightness_temperatures<S>(
    frequencies: &[f32],
    atm: &Atmosphere,
    srf: &S,
    n_workers: Option<usize>,
) -> Result<Vec<Field>, Error>
where
    S: Surface + Sync,
{
    parallel::over_frequencies(frequencies, |f| brightness_temperature(f, atm, srf), n_workers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::StandardAtmosphere;
    use crate::surface::SmoothWaterSurface;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn standard_scene_over_calm_water() {
        let atm = StandardAtmosphere::default().build().unwrap();
        let srf = SmoothWaterSurface::default();
        let toa = brightness_temperature(22.235, &atm, &srf).unwrap();
        assert_relative_eq!(toa.as_scalar().unwrap(), 140.88, max_relative = 1e-2);
    }

    #[test]
    fn transparent_atmosphere_shows_the_surface() {
        // a near-vacuum column: no vapor, microscopic pressure
        let atm = StandardAtmosphere {
            surface_pressure: 1e-3,
            surface_humidity: 0.,
            ..StandardAtmosphere::default()
        }
        .build()
        .unwrap();
        let srf = SmoothWaterSurface::default();
        let frequency = 22.235;

        let toa = brightness_temperature(frequency, &atm, &srf)
            .unwrap()
            .as_scalar()
            .unwrap();
        let kappa = srf.emissivity(frequency).as_scalar().unwrap();
        let expected = (15. + CELSIUS_ZERO) * kappa;
        assert_abs_diff_eq!(toa, expected, epsilon = 1e-2);
    }

    #[test]
    fn opaque_atmosphere_hides_the_surface() {
        // enough vapor to saturate the column many times over
        let atm = StandardAtmosphere {
            surface_humidity: 1000.,
            ..StandardAtmosphere::default()
        }
        .build()
        .unwrap();
        let srf = SmoothWaterSurface::default();
        let frequency = 22.235;

        let tau = atm
            .opacity()
            .summary(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        assert!(tau > 20.);

        let toa = brightness_temperature(frequency, &atm, &srf)
            .unwrap()
            .as_scalar()
            .unwrap();
        let tb_up = atm
            .upward()
            .brightness_temperature(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        assert_relative_eq!(toa, tb_up, max_relative = 1e-3);
    }

    #[test]
    fn batch_matches_sequential_evaluation() {
        let atm = StandardAtmosphere::default().build().unwrap();
        let srf = SmoothWaterSurface::default();
        let frequencies = [18.7, 22.235, 36.5];
        let batch = brightness_temperatures(&frequencies, &atm, &srf, Some(2)).unwrap();
        for (&f, tb) in frequencies.iter().zip(&batch) {
            let fresh = StandardAtmosphere::default().build().unwrap();
            let sequential = brightness_temperature(f, &fresh, &srf).unwrap();
            assert_abs_diff_eq!(
                tb.as_scalar().unwrap(),
                sequential.as_scalar().unwrap(),
                epsilon = 1e-4
            );
        }
    }
}
