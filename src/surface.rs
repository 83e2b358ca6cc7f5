//! Underlying-surface models and their microwave reflection parameters.

use crate::dielectric;
use crate::error::Error;
use crate::tensor::Field;

/// Polarization of the observed radiation at the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Polarization {
    /// Horizontal polarization.
    Horizontal,
    /// Vertical polarization.
    Vertical,
    /// No declared polarization; off-nadir geometry falls back to vertical.
    #[default]
    Unspecified,
}

/// A reflecting surface below the atmosphere.
pub trait Surface {
    /// Thermodynamic surface temperature in °C, scalar or 2D.
    fn temperature(&self) -> &Field;

    /// Power reflectivity at `frequency` GHz.
    fn reflectivity(&self, frequency: f32) -> Field;

    /// Emissivity at thermodynamic equilibrium.
    fn emissivity(&self, frequency: f32) -> Field {
        self.reflectivity(frequency).map(|r| 1. - r)
    }
}

/// Smooth (calm) water surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothWaterSurface {
    temperature: Field,
    salinity: Field,
    zenith_angle: f32,
    polarization: Polarization,
}

impl Default for SmoothWaterSurface {
    /// Calm fresh water at 15 °C observed at nadir.
    fn default() -> Self {
        Self {
            temperature: Field::Scalar(15.),
            salinity: Field::Scalar(0.),
            zenith_angle: 0.,
            polarization: Polarization::Unspecified,
        }
    }
}

impl SmoothWaterSurface {
    /// Build a surface from its temperature (°C) and salinity (‰), each a
    /// scalar or a 2D slice; two 2D slices must share one shape. The
    /// zenith angle is in radians.
    pub fn new(
        temperature: Field,
        salinity: Field,
        zenith_angle: f32,
        polarization: Polarization,
    ) -> Result<Self, Error> {
        if let (Field::Plane(t), Field::Plane(s)) = (&temperature, &salinity) {
            if t.dim() != s.dim() {
                return Err(Error::ShapeMismatch);
            }
        }
        Ok(Self {
            temperature,
            salinity,
            zenith_angle,
            polarization,
        })
    }

    /// Water salinity, ‰.
    pub fn salinity(&self) -> &Field {
        &self.salinity
    }

    /// Zenith angle of the observation, rad.
    pub fn zenith_angle(&self) -> f32 {
        self.zenith_angle
    }

    /// Polarization tag of the observation.
    pub fn polarization(&self) -> Polarization {
        self.polarization
    }
}

impl Surface for SmoothWaterSurface {
    fn temperature(&self) -> &Field {
        &self.temperature
    }

    /// Fresnel reflectivity of calm water. A nadir-looking geometry
    /// ignores the polarization tag; otherwise the polarized reflectance
    /// is selected.
    fn reflectivity(&self, frequency: f32) -> Field {
        let theta = self.zenith_angle;
        if theta.abs() < 1e-6 {
            return self.temperature.zip_with(&self.salinity, |t, s| {
                dielectric::reflectance_nadir(frequency, t, s)
            });
        }
        match self.polarization {
            Polarization::Horizontal => self.temperature.zip_with(&self.salinity, |t, s| {
                dielectric::reflectance_horizontal(frequency, theta, t, s)
            }),
            Polarization::Vertical | Polarization::Unspecified => {
                self.temperature.zip_with(&self.salinity, |t, s| {
                    dielectric::reflectance_vertical(frequency, theta, t, s)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::arr2;

    #[test]
    fn emissivity_complements_reflectivity() {
        let surface = SmoothWaterSurface::new(
            Field::Scalar(10.),
            Field::Scalar(35.),
            0.4,
            Polarization::Horizontal,
        )
        .unwrap();
        let r = surface.reflectivity(18.7).as_scalar().unwrap();
        let e = surface.emissivity(18.7).as_scalar().unwrap();
        assert_abs_diff_eq!(r + e, 1., epsilon = 1e-6);
    }

    #[test]
    fn nadir_geometry_ignores_polarization() {
        for polarization in [
            Polarization::Horizontal,
            Polarization::Vertical,
            Polarization::Unspecified,
        ] {
            let surface = SmoothWaterSurface::new(
                Field::Scalar(15.),
                Field::Scalar(0.),
                0.,
                polarization,
            )
            .unwrap();
            assert_abs_diff_eq!(
                surface.reflectivity(10.).as_scalar().unwrap(),
                0.624840,
                epsilon = 1e-3
            );
        }
    }

    #[test]
    fn unspecified_polarization_is_vertical_off_nadir() {
        let vertical = SmoothWaterSurface::new(
            Field::Scalar(15.),
            Field::Scalar(0.),
            0.5,
            Polarization::Vertical,
        )
        .unwrap();
        let unspecified = SmoothWaterSurface::new(
            Field::Scalar(15.),
            Field::Scalar(0.),
            0.5,
            Polarization::Unspecified,
        )
        .unwrap();
        assert_relative_eq!(
            unspecified.reflectivity(10.).as_scalar().unwrap(),
            vertical.reflectivity(10.).as_scalar().unwrap(),
            max_relative = 1e-6
        );
    }

    #[test]
    fn two_dimensional_surfaces_keep_their_shape() {
        let surface = SmoothWaterSurface::new(
            Field::Plane(arr2(&[[14., 15.], [16., 17.]])),
            Field::Scalar(35.),
            0.,
            Polarization::Unspecified,
        )
        .unwrap();
        let r = surface.reflectivity(10.);
        assert_eq!(r.as_plane().unwrap().dim(), (2, 2));
        let e = surface.emissivity(10.);
        for (&r, &e) in r.as_plane().unwrap().iter().zip(e.as_plane().unwrap()) {
            assert_abs_diff_eq!(r + e, 1., epsilon = 1e-6);
        }
    }

    #[test]
    fn mismatched_planes_are_rejected() {
        let result = SmoothWaterSurface::new(
            Field::Plane(arr2(&[[15.]])),
            Field::Plane(arr2(&[[0., 0.]])),
            0.,
            Polarization::Unspecified,
        );
        assert_eq!(result.unwrap_err(), Error::ShapeMismatch);
    }
}
