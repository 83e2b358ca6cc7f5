//! Weighting functions for retrieval consumers, and the mean effective
//! temperatures of the atmospheric emission.

use crate::atmosphere::Atmosphere;
use crate::dielectric;
use crate::error::Error;
use crate::quadrature;
use crate::tensor::{Field, Profile};

/// Sensitivity of the water-vapor opacity to the integrated vapor column.
///
/// The humidity profile is integrated with the atmosphere's configured
/// quadrature rule; the factor 10 converts the g/m³·km column to kg/m².
pub fn krho(sa: &Atmosphere, frequency: f32) -> Result<Field, Error> {
    let tau = sa.opacity().water_vapor(frequency)?;
    let vapor_column =
        quadrature::full(sa.absolute_humidity(), sa.step(), sa.integration_method()) * 0.1;
    Ok(tau / vapor_column)
}

/// Weight of the liquid-water content in the cloud opacity, evaluated at
/// the atmosphere's effective cloud temperature.
pub fn kw(sa: &Atmosphere, frequency: f32) -> f32 {
    dielectric::liquid_water_weight(frequency, sa.effective_cloud_temperature())
}

/// Staelin weighting function: water-vapor absorption per unit humidity,
/// elementwise over the profile (dB/km per g/m³).
pub fn staelin(sa: &Atmosphere, frequency: f32) -> Result<Profile, Error> {
    sa.attenuation()
        .water_vapor(frequency)?
        .zip_with(sa.absolute_humidity(), |gamma, rho| gamma / rho)
}

/// Mean effective temperatures of the atmospheric emission.
pub mod average {
    use super::*;

    /// Mean effective temperature of the downwelling emission, K.
    pub fn downward_temperature(sa: &Atmosphere, frequency: f32) -> Result<Field, Error> {
        let tb = sa.downward().brightness_temperature(frequency)?;
        let transmission = sa.opacity().summary(frequency)?.map(|tau| (-tau).exp());
        Ok(tb / transmission.map(|e| 1. - e))
    }

    /// Mean effective temperature of the upwelling emission, K.
    pub fn upward_temperature(sa: &Atmosphere, frequency: f32) -> Result<Field, Error> {
        let tb = sa.upward().brightness_temperature(frequency)?;
        let transmission = sa.opacity().summary(frequency)?.map(|tau| (-tau).exp());
        Ok(tb / transmission.map(|e| 1. - e))
    }
}
