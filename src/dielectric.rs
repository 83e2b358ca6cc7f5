//! Water permittivity and the smooth-surface Fresnel coefficients.
//!
//! A single-relaxation Debye model with a salinity correction supplies the
//! complex permittivity; the Fresnel formulas turn it into amplitude
//! reflection coefficients and power reflectances for a calm water surface.

use std::f32::consts::{FRAC_PI_2, PI};

use num_complex::Complex32;

use crate::SPEED_OF_LIGHT;

/// Parameters of the Debye relaxation model for water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebyeParameters {
    /// Optical (high-frequency) permittivity component.
    pub eps_optical: f32,
    /// Static permittivity component.
    pub eps_static: f32,
    /// Relaxation wavelength, cm.
    pub relaxation_wavelength: f32,
}

/// Free-space wavelength in cm for a frequency in GHz.
fn wavelength_cm(frequency: f32) -> f32 {
    SPEED_OF_LIGHT / (frequency * 1e9) * 100.
}

/// Debye parameters of water at temperature `t` (°C) and salinity
/// `salinity` (‰).
pub fn debye_parameters(t: f32, salinity: f32) -> DebyeParameters {
    DebyeParameters {
        eps_optical: 5.5,
        eps_static: 88.2 - 0.40885 * t + 0.00081 * t * t - 17.2 * salinity / 60.,
        relaxation_wavelength: 1.8735116 - 0.027296 * t + 0.000136 * t * t
            + 1.662 * (-0.0634 * t).exp()
            - 0.206 * salinity / 60.,
    }
}

/// Complex permittivity of water at `frequency` GHz.
///
/// The imaginary part carries the Debye loss plus the ionic conductivity of
/// saline water, and is returned negative.
pub fn permittivity(frequency: f32, t: f32, salinity: f32) -> Complex32 {
    let lambda = wavelength_cm(frequency);
    let DebyeParameters {
        eps_optical,
        eps_static,
        relaxation_wavelength,
    } = debye_parameters(t, salinity);
    let y = relaxation_wavelength / lambda;
    let spread = (eps_static - eps_optical) / (1. + y * y);
    let sigma = 1e-5 * (2.63 * t + 77.5) * salinity;
    Complex32::new(eps_optical + spread, -(y * spread + 60. * sigma * lambda))
}

/// Complex Fresnel reflection coefficient at horizontal polarization for a
/// grazing angle `psi` in radians.
pub fn reflection_horizontal(frequency: f32, psi: f32, t: f32, salinity: f32) -> Complex32 {
    let eps = permittivity(frequency, t, salinity);
    let transmitted = (eps - psi.cos() * psi.cos()).sqrt();
    (psi.sin() - transmitted) / (psi.sin() + transmitted)
}

/// Complex Fresnel reflection coefficient at vertical polarization for a
/// grazing angle `psi` in radians.
pub fn reflection_vertical(frequency: f32, psi: f32, t: f32, salinity: f32) -> Complex32 {
    let eps = permittivity(frequency, t, salinity);
    let transmitted = (eps - psi.cos() * psi.cos()).sqrt();
    (eps * psi.sin() - transmitted) / (eps * psi.sin() + transmitted)
}

/// Power reflectance at horizontal polarization for a zenith angle `theta`
/// in radians.
pub fn reflectance_horizontal(frequency: f32, theta: f32, t: f32, salinity: f32) -> f32 {
    reflection_horizontal(frequency, FRAC_PI_2 - theta, t, salinity).norm_sqr()
}

/// Power reflectance at vertical polarization for a zenith angle `theta`
/// in radians.
pub fn reflectance_vertical(frequency: f32, theta: f32, t: f32, salinity: f32) -> f32 {
    reflection_vertical(frequency, FRAC_PI_2 - theta, t, salinity).norm_sqr()
}

/// Power reflectance looking straight down.
pub fn reflectance_nadir(frequency: f32, t: f32, salinity: f32) -> f32 {
    let eps = permittivity(frequency, t, salinity);
    ((eps.sqrt() - 1.) / (eps.sqrt() + 1.)).norm_sqr()
}

/// Weight of the liquid-water content in the cloud absorption coefficient,
/// Np/km per kg/m³, evaluated for fresh water at the effective cloud
/// temperature `t_cloud` (°C).
pub fn liquid_water_weight(frequency: f32, t_cloud: f32) -> f32 {
    let lambda = wavelength_cm(frequency);
    let DebyeParameters {
        eps_optical,
        eps_static,
        relaxation_wavelength,
    } = debye_parameters(t_cloud, 0.);
    let y = relaxation_wavelength / lambda;
    3. * 0.6 * PI / lambda * (eps_static - eps_optical) * y
        / ((eps_static + 2.) * (eps_static + 2.) + (eps_optical + 2.) * (eps_optical + 2.) * y * y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn fresh_water_permittivity_at_x_band() {
        let eps = permittivity(10., 15., 0.);
        assert_relative_eq!(eps.re, 56.394, max_relative = 1e-3);
        assert_relative_eq!(eps.im, -36.275, max_relative = 1e-3);
    }

    #[test]
    fn salinity_adds_conductive_loss() {
        let fresh = permittivity(10., 15., 0.);
        let saline = permittivity(10., 15., 35.);
        assert_relative_eq!(saline.re, 51.432, max_relative = 1e-2);
        assert_relative_eq!(saline.im, -38.260, max_relative = 1e-2);
        assert!(saline.im < fresh.im);
    }

    #[test]
    fn nadir_reflectance_of_calm_fresh_water() {
        assert_abs_diff_eq!(reflectance_nadir(10., 15., 0.), 0.624840, epsilon = 1e-3);
    }

    #[test]
    fn polarized_reflectances_agree_at_nadir() {
        let (f, t, s) = (10., 15., 0.);
        let nadir = reflectance_nadir(f, t, s);
        assert_abs_diff_eq!(reflectance_horizontal(f, 0., t, s), nadir, epsilon = 1e-4);
        assert_abs_diff_eq!(reflectance_vertical(f, 0., t, s), nadir, epsilon = 1e-4);
    }

    #[test]
    fn off_nadir_polarizations_split() {
        let (f, theta, t, s) = (10., 0.5, 15., 0.);
        assert_relative_eq!(
            reflectance_horizontal(f, theta, t, s),
            0.66176,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            reflectance_vertical(f, theta, t, s),
            0.58522,
            max_relative = 1e-3
        );
    }

    #[test]
    fn liquid_water_weight_at_the_vapor_line() {
        assert_relative_eq!(liquid_water_weight(22.235, -2.), 0.113477, max_relative = 1e-3);
        // absorption per unit water grows towards shorter wavelengths
        assert!(liquid_water_weight(36., -2.) > liquid_water_weight(22.235, -2.));
    }
}
