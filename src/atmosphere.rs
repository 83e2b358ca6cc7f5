//! The atmosphere aggregate: profile fields, altitude grid, and memoized
//! per-frequency attenuation, opacity and brightness-temperature operations.

use std::collections::HashMap;
use std::sync::Mutex;

use log::debug;
use ndarray::Array1;

use crate::absorption::{gamma_liquid_water, gamma_oxygen, gamma_water_vapor};
use crate::error::Error;
use crate::parallel;
use crate::quadrature::{self, IntegrationMethod, Step};
use crate::tensor::{Field, Profile};
use crate::{CELSIUS_ZERO, DB_TO_NEPERS};

/// Identity of a memoized per-frequency operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Op {
    GammaOxygen,
    GammaWaterVapor,
    GammaLiquidWater,
    GammaSummary,
    TauOxygen,
    TauWaterVapor,
    TauLiquidWater,
    TauSummary,
    TbDown,
    TbUp,
}

/// Cached result of a memoized operation.
#[derive(Debug, Clone)]
enum Cached {
    Gamma(Profile),
    Reduced(Field),
}

/// Model of the thermal microwave emission of the Earth's atmosphere.
///
/// Holds the temperature, pressure and humidity data as rank-1 profiles or
/// rank-3 fields (horizontal axes first, altitude last) together with the
/// altitude grid, and memoizes every derived quantity per
/// `(frequency, operation)`. The cache is never invalidated: mutate the
/// inputs only before the first evaluation, or construct a fresh instance.
#[derive(Debug)]
pub struct Atmosphere {
    temperature: Profile,
    pressure: Profile,
    absolute_humidity: Profile,
    liquid_water: Option<Profile>,
    altitudes: Array1<f32>,
    step: Step,
    cloud_temperature: f32,
    method: IntegrationMethod,
    cache: Mutex<HashMap<(u32, Op), Cached>>,
}

impl Atmosphere {
    /// Build an atmosphere on a uniform altitude grid with step `dh` km;
    /// the implicit altitudes are `dh, 2·dh, …, n·dh`.
    ///
    /// Temperature is in °C, pressure in hPa, absolute humidity in g/m³;
    /// the three must share one shape.
    pub fn new(
        temperature: Profile,
        pressure: Profile,
        absolute_humidity: Profile,
        dh: f32,
    ) -> Result<Self, Error> {
        if !(dh > 1e-6) {
            return Err(Error::InvalidStep);
        }
        let altitudes = (1..=temperature.levels())
            .map(|level| level as f32 * dh)
            .collect();
        Self::build(
            temperature,
            pressure,
            absolute_humidity,
            altitudes,
            Step::Uniform(dh),
        )
    }

    /// Build an atmosphere on an explicit altitude grid in km.
    ///
    /// Altitudes must be strictly increasing with `altitudes[0] > 0`; the
    /// per-layer thicknesses are the grid differences, with the first layer
    /// reaching down to the ground.
    pub fn with_altitudes(
        temperature: Profile,
        pressure: Profile,
        absolute_humidity: Profile,
        altitudes: Array1<f32>,
    ) -> Result<Self, Error> {
        if altitudes.len() != temperature.levels() {
            return Err(Error::ShapeMismatch);
        }
        let mut thickness = Array1::<f32>::zeros(altitudes.len());
        let mut previous = 0.;
        for (dh, &alt) in thickness.iter_mut().zip(&altitudes) {
            if alt - previous <= 1e-6 {
                return Err(Error::InvalidStep);
            }
            *dh = alt - previous;
            previous = alt;
        }
        Self::build(
            temperature,
            pressure,
            absolute_humidity,
            altitudes,
            Step::PerLayer(thickness),
        )
    }

    fn build(
        temperature: Profile,
        pressure: Profile,
        absolute_humidity: Profile,
        altitudes: Array1<f32>,
        step: Step,
    ) -> Result<Self, Error> {
        if temperature.levels() == 0
            || !temperature.same_shape(&pressure)
            || !temperature.same_shape(&absolute_humidity)
        {
            return Err(Error::ShapeMismatch);
        }
        debug!(
            "atmosphere profiles are consistent: rank {}, {} levels",
            temperature.rank(),
            temperature.levels()
        );
        Ok(Self {
            temperature,
            pressure,
            absolute_humidity,
            liquid_water: None,
            altitudes,
            step,
            cloud_temperature: -2.,
            method: IntegrationMethod::Trapezoid,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Attach a liquid-water field (kg/m³) of the same shape as the
    /// other profiles.
    pub fn set_liquid_water(&mut self, liquid_water: Profile) -> Result<(), Error> {
        if !liquid_water.same_shape(&self.temperature) {
            return Err(Error::ShapeMismatch);
        }
        self.liquid_water = Some(liquid_water);
        Ok(())
    }

    /// Override the effective cloud temperature (°C, default −2).
    pub fn set_effective_cloud_temperature(&mut self, t_cloud: f32) {
        self.cloud_temperature = t_cloud;
    }

    /// Override the vertical quadrature rule (default trapezoid).
    pub fn set_integration_method(&mut self, method: IntegrationMethod) {
        self.method = method;
    }

    /// Temperature profile, °C.
    pub fn temperature(&self) -> &Profile {
        &self.temperature
    }

    /// Pressure profile, hPa.
    pub fn pressure(&self) -> &Profile {
        &self.pressure
    }

    /// Absolute-humidity profile, g/m³.
    pub fn absolute_humidity(&self) -> &Profile {
        &self.absolute_humidity
    }

    /// Liquid-water profile, kg/m³, when attached.
    pub fn liquid_water(&self) -> Option<&Profile> {
        self.liquid_water.as_ref()
    }

    /// Level altitudes, km.
    pub fn altitudes(&self) -> &Array1<f32> {
        &self.altitudes
    }

    /// Layer thicknesses of the altitude grid.
    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Effective cloud temperature, °C.
    pub fn effective_cloud_temperature(&self) -> f32 {
        self.cloud_temperature
    }

    /// Vertical quadrature rule used by the column integrals.
    pub fn integration_method(&self) -> IntegrationMethod {
        self.method
    }

    /// Specific-absorption view, dB/km.
    pub fn attenuation(&self) -> Attenuation<'_> {
        Attenuation { atm: self }
    }

    /// Column-opacity view, Np.
    pub fn opacity(&self) -> Opacity<'_> {
        Opacity { atm: self }
    }

    /// Downwelling-emission view.
    pub fn downward(&self) -> Downward<'_> {
        Downward { atm: self }
    }

    /// Upwelling-emission view.
    pub fn upward(&self) -> Upward<'_> {
        Upward { atm: self }
    }

    fn cached_gamma(
        &self,
        frequency: f32,
        op: Op,
        compute: impl FnOnce() -> Result<Profile, Error>,
    ) -> Result<Profile, Error> {
        let key = (frequency.to_bits(), op);
        {
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(Cached::Gamma(hit)) = cache.get(&key) {
                return Ok(hit.clone());
            }
        }
        let value = compute()?;
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, Cached::Gamma(value.clone()));
        Ok(value)
    }

    fn cached_reduced(
        &self,
        frequency: f32,
        op: Op,
        compute: impl FnOnce() -> Result<Field, Error>,
    ) -> Result<Field, Error> {
        let key = (frequency.to_bits(), op);
        {
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(Cached::Reduced(hit)) = cache.get(&key) {
                return Ok(hit.clone());
            }
        }
        let value = compute()?;
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, Cached::Reduced(value.clone()));
        Ok(value)
    }

    #[cfg(test)]
    fn cache_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Specific absorption (attenuation) of the atmosphere constituents.
#[derive(Debug, Clone, Copy)]
pub struct Attenuation<'a> {
    atm: &'a Atmosphere,
}

impl Attenuation<'_> {
    /// Oxygen absorption profile at `frequency` GHz, dB/km.
    pub fn oxygen(&self, frequency: f32) -> Result<Profile, Error> {
        let atm = self.atm;
        atm.cached_gamma(frequency, Op::GammaOxygen, || {
            atm.temperature
                .zip_with(&atm.pressure, |t, p| gamma_oxygen(frequency, t, p))
        })
    }

    /// Water-vapor absorption profile at `frequency` GHz, dB/km.
    pub fn water_vapor(&self, frequency: f32) -> Result<Profile, Error> {
        let atm = self.atm;
        atm.cached_gamma(frequency, Op::GammaWaterVapor, || {
            atm.temperature
                .zip3_with(&atm.pressure, &atm.absolute_humidity, |t, p, rho| {
                    gamma_water_vapor(frequency, t, p, rho)
                })
        })
    }

    /// Cloud liquid-water absorption profile at `frequency` GHz, dB/km.
    ///
    /// Fails with [`Error::MissingField`] when no liquid-water field is
    /// attached.
    pub fn liquid_water(&self, frequency: f32) -> Result<Profile, Error> {
        let atm = self.atm;
        atm.cached_gamma(frequency, Op::GammaLiquidWater, || {
            let w = atm
                .liquid_water
                .as_ref()
                .ok_or(Error::MissingField("liquid water"))?;
            Ok(w.map(|w| gamma_liquid_water(frequency, atm.cloud_temperature, w)))
        })
    }

    /// Total absorption profile: oxygen plus water vapor plus liquid
    /// water, dB/km. An absent liquid-water field contributes nothing.
    pub fn summary(&self, frequency: f32) -> Result<Profile, Error> {
        let atm = self.atm;
        atm.cached_gamma(frequency, Op::GammaSummary, || {
            let gases = self
                .oxygen(frequency)?
                .zip_with(&self.water_vapor(frequency)?, |a, b| a + b)?;
            match atm.liquid_water {
                Some(_) => gases.zip_with(&self.liquid_water(frequency)?, |a, b| a + b),
                None => Ok(gases),
            }
        })
    }
}

/// Column opacity (optical depth) of the atmosphere constituents.
#[derive(Debug, Clone, Copy)]
pub struct Opacity<'a> {
    atm: &'a Atmosphere,
}

impl Opacity<'_> {
    fn column(&self, gamma: &Profile) -> Field {
        quadrature::full(gamma, &self.atm.step, self.atm.method) * DB_TO_NEPERS
    }

    /// Oxygen column opacity at `frequency` GHz, Np.
    pub fn oxygen(&self, frequency: f32) -> Result<Field, Error> {
        let atm = self.atm;
        atm.cached_reduced(frequency, Op::TauOxygen, || {
            Ok(self.column(&atm.attenuation().oxygen(frequency)?))
        })
    }

    /// Water-vapor column opacity at `frequency` GHz, Np.
    pub fn water_vapor(&self, frequency: f32) -> Result<Field, Error> {
        let atm = self.atm;
        atm.cached_reduced(frequency, Op::TauWaterVapor, || {
            Ok(self.column(&atm.attenuation().water_vapor(frequency)?))
        })
    }

    /// Liquid-water column opacity at `frequency` GHz, Np.
    pub fn liquid_water(&self, frequency: f32) -> Result<Field, Error> {
        let atm = self.atm;
        atm.cached_reduced(frequency, Op::TauLiquidWater, || {
            Ok(self.column(&atm.attenuation().liquid_water(frequency)?))
        })
    }

    /// Total column opacity at `frequency` GHz, Np.
    pub fn summary(&self, frequency: f32) -> Result<Field, Error> {
        let atm = self.atm;
        atm.cached_reduced(frequency, Op::TauSummary, || {
            Ok(self.column(&atm.attenuation().summary(frequency)?))
        })
    }
}

/// Downwelling atmospheric emission.
#[derive(Debug, Clone, Copy)]
pub struct Downward<'a> {
    atm: &'a Atmosphere,
}

impl Downward<'_> {
    /// Brightness temperature of the downwelling emission at `frequency`
    /// GHz, in K.
    ///
    /// Integrates the emission of every level attenuated by the optical
    /// depth of the column below it. The outer integral is the trapezoid
    /// rule over level indices; the nested optical-depth integral uses the
    /// atmosphere's configured rule.
    pub fn brightness_temperature(&self, frequency: f32) -> Result<Field, Error> {
        let atm = self.atm;
        atm.cached_reduced(frequency, Op::TbDown, || {
            let g = atm
                .attenuation()
                .summary(frequency)?
                .map(|g| g * DB_TO_NEPERS);
            let t_kelvin = atm.temperature.map(|t| t + CELSIUS_ZERO);
            Ok(quadrature::indexed(
                |h| {
                    let tau = quadrature::with_limits(&g, 0, h, &atm.step, atm.method);
                    t_kelvin.at(h) * g.at(h) * tau.map(|tau| (-tau).exp())
                },
                0,
                g.last_index(),
                &atm.step,
            ))
        })
    }

    /// Downwelling brightness temperatures for a batch of frequencies,
    /// evaluated on a worker pool; results follow the input order.
    pub fn brightness_temperatures(
        &self,
        frequencies: &[f32],
        n_workers: Option<usize>,
    ) -> Result<Vec<Field>, Error> {
        let atm = self.atm;
        parallel::over_frequencies(
            frequencies,
            |f| atm.downward().brightness_temperature(f),
            n_workers,
        )
    }
}

/// Upwelling atmospheric emission (the underlying surface not included).
#[derive(Debug, Clone, Copy)]
pub struct Upward<'a> {
    atm: &'a Atmosphere,
}

impl Upward<'_> {
    /// Brightness temperature of the upwelling emission at `frequency`
    /// GHz, in K.
    ///
    /// Same kernel as the downwelling case, with every level attenuated by
    /// the optical depth of the column above it.
    pub fn brightness_temperature(&self, frequency: f32) -> Result<Field, Error> {
        let atm = self.atm;
        atm.cached_reduced(frequency, Op::TbUp, || {
            let g = atm
                .attenuation()
                .summary(frequency)?
                .map(|g| g * DB_TO_NEPERS);
            let t_kelvin = atm.temperature.map(|t| t + CELSIUS_ZERO);
            let top = g.last_index();
            Ok(quadrature::indexed(
                |h| {
                    let tau = quadrature::with_limits(&g, h, top, &atm.step, atm.method);
                    t_kelvin.at(h) * g.at(h) * tau.map(|tau| (-tau).exp())
                },
                0,
                top,
                &atm.step,
            ))
        })
    }

    /// Upwelling brightness temperatures for a batch of frequencies,
    /// evaluated on a worker pool; results follow the input order.
    pub fn brightness_temperatures(
        &self,
        frequencies: &[f32],
        n_workers: Option<usize>,
    ) -> Result<Vec<Field>, Error> {
        let atm = self.atm;
        parallel::over_frequencies(
            frequencies,
            |f| atm.upward().brightness_temperature(f),
            n_workers,
        )
    }
}

/// Configuration of the reference mid-latitude standard atmosphere.
///
/// `Default` carries the textbook values: 15 °C and 1013 hPa at the
/// surface, 7.5 g/m³ of water vapor, and a 10 km column in 20 m steps.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardAtmosphere {
    /// Surface temperature, °C.
    pub surface_temperature: f32,
    /// Surface pressure, hPa.
    pub surface_pressure: f32,
    /// Surface absolute humidity, g/m³.
    pub surface_humidity: f32,
    /// Top of the modeled column, km.
    pub top_height: f32,
    /// Uniform altitude step, km.
    pub step: f32,
    /// Temperature lapse rates of the three lower layers, K/km.
    pub lapse_rates: (f32, f32, f32),
    /// Pressure scale height, km.
    pub pressure_scale_height: f32,
    /// Water-vapor scale height, km.
    pub humidity_scale_height: f32,
}

impl Default for StandardAtmosphere {
    fn default() -> Self {
        Self {
            surface_temperature: 15.,
            surface_pressure: 1013.,
            surface_humidity: 7.5,
            top_height: 10.,
            step: 10. / 500.,
            lapse_rates: (6.5, 1., 2.8),
            pressure_scale_height: 7.7,
            humidity_scale_height: 2.1,
        }
    }
}

impl StandardAtmosphere {
    /// Build the standard profiles and wrap them in an [`Atmosphere`] with
    /// a zero liquid-water field.
    ///
    /// The column must be tall next to the step (`top_height > 99 * step`),
    /// otherwise the piecewise temperature layers degenerate.
    pub fn build(&self) -> Result<Atmosphere, Error> {
        if !(self.top_height > 99. * self.step) {
            return Err(Error::InvalidStep);
        }
        let (beta1, beta2, beta3) = self.lapse_rates;
        let n = (self.top_height / self.step).round() as usize;
        let altitudes: Vec<f32> = (1..=n).map(|k| k as f32 * self.step).collect();

        let t11 = self.surface_temperature - beta1 * 11.;
        let mut t32 = 0.;
        let mut t47 = 0.;
        let mut temperature = Vec::with_capacity(n);
        for &h in &altitudes {
            temperature.push(if h <= 11. {
                self.surface_temperature - beta1 * h
            } else if h <= 20. {
                t11
            } else if h <= 32. {
                t32 = t11 + (beta2 * h - 20.);
                t32
            } else if h <= 47. {
                t47 = t32 + beta3 * (h - 32.);
                t47
            } else {
                t47
            });
        }
        let pressure: Vec<f32> = altitudes
            .iter()
            .map(|h| self.surface_pressure * (-h / self.pressure_scale_height).exp())
            .collect();
        let humidity: Vec<f32> = altitudes
            .iter()
            .map(|h| self.surface_humidity * (-h / self.humidity_scale_height).exp())
            .collect();
        debug!("standard atmosphere: {n} levels up to {} km", self.top_height);

        let humidity = Profile::from(humidity);
        let zeros = humidity.zeros_like();
        let mut atm = Atmosphere::new(
            Profile::from(temperature),
            Profile::from(pressure),
            humidity,
            self.step,
        )?;
        atm.set_liquid_water(zeros)?;
        Ok(atm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::Array3;

    fn level_scalar(profile: &Profile, level: usize) -> f32 {
        profile.at(level).as_scalar().unwrap()
    }

    #[test]
    fn standard_profile_matches_reference_values() {
        let atm = StandardAtmosphere {
            top_height: 12.,
            ..StandardAtmosphere::default()
        }
        .build()
        .unwrap();

        // 20 m steps: 11 km sits at index 549, 5 km at index 249
        assert_relative_eq!(atm.altitudes()[549], 11., max_relative = 1e-5);
        assert_relative_eq!(
            level_scalar(atm.temperature(), 549),
            -56.5,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            level_scalar(atm.pressure(), 249),
            529.176,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            level_scalar(atm.absolute_humidity(), 249),
            0.693469,
            max_relative = 1e-4
        );
        // isothermal above the tropopause
        assert_abs_diff_eq!(
            level_scalar(atm.temperature(), 560),
            level_scalar(atm.temperature(), 580)
        );
    }

    #[test]
    fn too_coarse_standard_grid_is_rejected() {
        let config = StandardAtmosphere {
            top_height: 1.,
            ..StandardAtmosphere::default()
        };
        assert_eq!(config.build().unwrap_err(), Error::InvalidStep);
    }

    #[test]
    fn rank1_operations_preserve_shape() {
        let atm = StandardAtmosphere::default().build().unwrap();
        let frequency = 22.235;

        let gamma = atm.attenuation().summary(frequency).unwrap();
        assert_eq!(gamma.rank(), 1);
        assert_eq!(gamma.levels(), 500);

        let tau = atm.opacity().summary(frequency).unwrap();
        assert!(tau.as_scalar().is_some());
    }

    #[test]
    fn rank3_columns_match_the_rank1_pipeline() {
        let reference = StandardAtmosphere::default().build().unwrap();
        let n = reference.temperature().levels();
        let lift = |profile: &Profile| {
            let Profile::Rank1(values) = profile else {
                panic!("standard profiles are rank 1");
            };
            Profile::Rank3(Array3::from_shape_fn((2, 3, n), |(_, _, k)| values[k]))
        };

        let atm = Atmosphere::new(
            lift(reference.temperature()),
            lift(reference.pressure()),
            lift(reference.absolute_humidity()),
            0.02,
        )
        .unwrap();
        let frequency = 22.235;

        let gamma = atm.attenuation().summary(frequency).unwrap();
        assert_eq!(gamma.rank(), 3);
        assert_eq!(gamma.levels(), n);

        let tau = atm.opacity().summary(frequency).unwrap();
        let tau_reference = reference
            .opacity()
            .summary(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        let plane = tau.as_plane().unwrap();
        assert_eq!(plane.dim(), (2, 3));
        for &tau in plane {
            assert_relative_eq!(tau, tau_reference, max_relative = 1e-5);
        }

        let tb = atm.downward().brightness_temperature(frequency).unwrap();
        let tb_reference = reference
            .downward()
            .brightness_temperature(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        for &tb in tb.as_plane().unwrap() {
            assert_relative_eq!(tb, tb_reference, max_relative = 1e-4);
        }
    }

    #[test]
    fn summary_is_the_sum_of_the_constituents() {
        let mut atm = StandardAtmosphere::default().build().unwrap();
        let w = atm.temperature().map(|_| 1e-4);
        atm.set_liquid_water(w).unwrap();
        let frequency = 36.5;

        let oxygen = atm.attenuation().oxygen(frequency).unwrap();
        let vapor = atm.attenuation().water_vapor(frequency).unwrap();
        let liquid = atm.attenuation().liquid_water(frequency).unwrap();
        let summary = atm.attenuation().summary(frequency).unwrap();

        let rebuilt = oxygen
            .zip_with(&vapor, |a, b| a + b)
            .unwrap()
            .zip_with(&liquid, |a, b| a + b)
            .unwrap();
        let difference = summary.zip_with(&rebuilt, |a, b| (a - b).abs()).unwrap();
        for level in 0..difference.levels() {
            assert_abs_diff_eq!(level_scalar(&difference, level), 0., epsilon = 1e-9);
        }
    }

    #[test]
    fn missing_liquid_water_is_reported_but_does_not_block_the_summary() {
        let atm = Atmosphere::new(
            Profile::from(vec![15., 10., 5.]),
            Profile::from(vec![1013., 900., 800.]),
            Profile::from(vec![7.5, 5., 3.]),
            1.,
        )
        .unwrap();
        assert_eq!(
            atm.attenuation().liquid_water(22.235).unwrap_err(),
            Error::MissingField("liquid water")
        );
        assert!(atm.attenuation().summary(22.235).is_ok());
    }

    #[test]
    fn repeated_calls_are_memoized() {
        let atm = StandardAtmosphere::default().build().unwrap();
        let frequency = 22.235;

        let first = atm.downward().brightness_temperature(frequency).unwrap();
        let populated = atm.cache_len();
        let second = atm.downward().brightness_temperature(frequency).unwrap();

        assert_eq!(first, second);
        assert_eq!(atm.cache_len(), populated);

        // a different frequency occupies new slots
        let _ = atm.downward().brightness_temperature(36.5).unwrap();
        assert!(atm.cache_len() > populated);
    }

    #[test]
    fn quadrature_rules_agree_on_the_standard_column() {
        let frequency = 22.235;
        let trapezoid = StandardAtmosphere::default().build().unwrap();
        let mut simpson = StandardAtmosphere::default().build().unwrap();
        simpson.set_integration_method(IntegrationMethod::Simpson);

        let tau_t = trapezoid
            .opacity()
            .summary(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        let tau_s = simpson
            .opacity()
            .summary(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        assert_relative_eq!(tau_t, 0.110031, max_relative = 1e-3);
        assert!((tau_t - tau_s).abs() < 1e-3);
    }

    #[test]
    fn emission_integrals_match_reference_values() {
        let atm = StandardAtmosphere::default().build().unwrap();
        let frequency = 22.235;
        let down = atm
            .downward()
            .brightness_temperature(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        let up = atm
            .upward()
            .brightness_temperature(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        assert_relative_eq!(down, 28.298, max_relative = 1e-2);
        assert_relative_eq!(up, 28.207, max_relative = 1e-2);
        // most of the emission comes from the humid lower layers
        assert!(down > up);
    }

    #[test]
    fn explicit_altitudes_match_the_uniform_grid() {
        let reference = StandardAtmosphere::default().build().unwrap();
        let explicit = Atmosphere::with_altitudes(
            reference.temperature().clone(),
            reference.pressure().clone(),
            reference.absolute_humidity().clone(),
            reference.altitudes().clone(),
        )
        .unwrap();

        let frequency = 22.235;
        let tau_uniform = reference
            .opacity()
            .summary(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        let tau_explicit = explicit
            .opacity()
            .summary(frequency)
            .unwrap()
            .as_scalar()
            .unwrap();
        assert_relative_eq!(tau_uniform, tau_explicit, max_relative = 1e-3);
    }

    #[test]
    fn invalid_grids_are_rejected() {
        let t = Profile::from(vec![15., 10., 5.]);
        let p = Profile::from(vec![1013., 900., 800.]);
        let rho = Profile::from(vec![7.5, 5., 3.]);

        assert_eq!(
            Atmosphere::new(t.clone(), p.clone(), rho.clone(), 0.)
                .unwrap_err(),
            Error::InvalidStep
        );
        assert_eq!(
            Atmosphere::with_altitudes(
                t.clone(),
                p.clone(),
                rho.clone(),
                ndarray::arr1(&[0., 1., 2.])
            )
            .unwrap_err(),
            Error::InvalidStep
        );
        assert_eq!(
            Atmosphere::with_altitudes(
                t.clone(),
                p.clone(),
                rho.clone(),
                ndarray::arr1(&[1., 3., 2.])
            )
            .unwrap_err(),
            Error::InvalidStep
        );
        assert_eq!(
            Atmosphere::with_altitudes(t.clone(), p.clone(), rho.clone(), ndarray::arr1(&[1., 2.]))
                .unwrap_err(),
            Error::ShapeMismatch
        );
        assert_eq!(
            Atmosphere::new(t, p, Profile::from(vec![7.5, 5.]), 1.).unwrap_err(),
            Error::ShapeMismatch
        );
    }

    #[test]
    fn liquid_water_must_match_the_profile_shape() {
        let mut atm = Atmosphere::new(
            Profile::from(vec![15., 10., 5.]),
            Profile::from(vec![1013., 900., 800.]),
            Profile::from(vec![7.5, 5., 3.]),
            1.,
        )
        .unwrap();
        assert_eq!(
            atm.set_liquid_water(Profile::from(vec![0., 0.])).unwrap_err(),
            Error::ShapeMismatch
        );
        assert!(atm.set_liquid_water(Profile::from(vec![0., 0., 0.])).is_ok());
    }
}
