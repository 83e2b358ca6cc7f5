//! Specific absorption of the atmospheric constituents.
//!
//! Oxygen and water vapor follow the closed-form approximations of
//! Rec. ITU-R P.676-3; cloud liquid water uses a Rayleigh form on top of the
//! Debye water permittivity. All coefficients are in dB/km; the near-ground
//! opacity shortcuts convert to Np.

pub mod liquid;
pub mod oxygen;
pub mod water_vapor;

pub use liquid::gamma_liquid_water;
pub use oxygen::gamma_oxygen;
pub use water_vapor::gamma_water_vapor;
