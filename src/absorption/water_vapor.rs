//! Water-vapor absorption per Rec. ITU-R P.676-3.

use crate::tensor::Field;
use crate::DB_TO_NEPERS;

/// Water-vapor specific absorption.
///
/// For a frequency `frequency` in GHz, temperature `t` in °C, total
/// pressure `p` in hPa and absolute humidity `rho` in g/m³, compute the
/// water-vapor absorption coefficient in dB/km. The closed form carries the
/// 22.235, 183.31 and 325.153 GHz resonances and is zero above 350 GHz.
pub fn gamma_water_vapor(frequency: f32, t: f32, p: f32, rho: f32) -> f32 {
    let rp = p / 1013.;
    let rt = 288. / (273. + t);
    let f = frequency;
    if f > 350. {
        return 0.;
    }
    (3.27e-2 * rt
        + 1.67e-3 * rho * rt.powi(7) / rp
        + 7.7e-4 * f.sqrt()
        + 3.79 / ((f - 22.235) * (f - 22.235) + 9.81 * rp * rp * rt)
        + 11.73 * rt / ((f - 183.31) * (f - 183.31) + 11.85 * rp * rp * rt)
        + 4.01 * rt / ((f - 325.153) * (f - 325.153) + 10.44 * rp * rp * rt))
        * f
        * f
        * rho
        * rp
        * rt
        / 1e4
}

/// Characteristic height of the water-vapor absorption layer, km.
///
/// The base height of 1.6 km grows to 2.1 km under rain; resonance bumps
/// sit at the three vapor lines.
pub fn characteristic_height(frequency: f32, rain: bool) -> f32 {
    let f = frequency;
    let base = if rain { 2.1 } else { 1.6 };
    base * (1.
        + 3. / ((f - 22.2) * (f - 22.2) + 5.)
        + 5. / ((f - 183.3) * (f - 183.3) + 6.)
        + 2.5 / ((f - 325.4) * (f - 325.4) + 4.))
}

/// Closed-form water-vapor opacity of the whole column in Np, from the
/// near-ground temperature `t` (°C), pressure `p` (hPa) and absolute
/// humidity `rho` (g/m³), for a slant path at zenith angle `theta` (rad).
/// Inputs are scalars or 2D horizontal slices.
pub fn opacity_near_ground(
    frequency: f32,
    t: &Field,
    p: &Field,
    rho: &Field,
    theta: f32,
    rain: bool,
) -> Field {
    let height = characteristic_height(frequency, rain);
    t.zip3_with(p, rho, |t, p, rho| {
        gamma_water_vapor(frequency, t, p, rho) * height / theta.cos() * DB_TO_NEPERS
    })
}
