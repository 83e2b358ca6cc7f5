//! Microwave radiative transfer of the cloudy atmosphere over a reflecting
//! surface.
//!
//! The model computes the specific absorption of oxygen, water vapor and
//! cloud liquid water (Rec. ITU-R P.676-3 plus a Rayleigh liquid-water
//! term), integrates it into column opacities with a selectable vertical
//! quadrature, evaluates the downwelling and upwelling emission integrals,
//! and couples the result to a smooth water surface through the Fresnel
//! coefficients to obtain the outgoing brightness temperature seen from
//! orbit.
//!
//! Profile inputs are rank-1 vertical profiles or rank-3 fields with the
//! two horizontal axes first and altitude last. Every operation preserves
//! that contract: elementwise quantities keep the input shape, column
//! reductions yield a scalar for rank 1 and a 2D horizontal field for
//! rank 3.

pub mod absorption;
pub mod atmosphere;
pub mod dielectric;
mod error;
pub mod parallel;
pub mod quadrature;
pub mod satellite;
pub mod surface;
pub mod tensor;
pub mod weights;

pub use atmosphere::{Atmosphere, StandardAtmosphere};
pub use error::Error;
pub use quadrature::{IntegrationMethod, Step};
pub use surface::{Polarization, SmoothWaterSurface, Surface};
pub use tensor::{Field, Profile};

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f32 = 299_792_458.;

/// Conversion factor from dB to Np.
pub const DB_TO_NEPERS: f32 = 0.23255814;

/// Conversion factor from Np to dB.
pub const NEPERS_TO_DB: f32 = 1. / DB_TO_NEPERS;

/// Zero of the Celsius scale in K.
pub const CELSIUS_ZERO: f32 = 273.15;
