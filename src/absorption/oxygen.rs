//! Oxygen absorption per Rec. ITU-R P.676-3.

use crate::tensor::Field;
use crate::DB_TO_NEPERS;

/// Oxygen specific absorption.
///
/// For a frequency `frequency` in GHz, temperature `t` in °C and total
/// pressure `p` in hPa, compute the oxygen absorption coefficient in dB/km.
///
/// The recommendation covers 0–350 GHz, split at the 60 GHz complex: one
/// closed form up to 57 GHz (inclusive), another from 63 GHz (inclusive) up
/// to 350 GHz, and a cubic blend between the two band edges. Outside the
/// covered window the coefficient is zero.
pub fn gamma_oxygen(frequency: f32, t: f32, p: f32) -> f32 {
    let rp = p / 1013.;
    let rt = 288. / (273. + t);
    let f = frequency;
    if f <= 57. {
        (7.27 * rt / (f * f + 0.351 * rp * rp * rt * rt)
            + 7.5 / ((f - 57.) * (f - 57.) + 2.44 * rp * rp * rt.powi(5)))
            * f
            * f
            * rp
            * rp
            * rt
            * rt
            / 1000.
    } else if (63. ..=350.).contains(&f) {
        (2e-4 * rt.powf(1.5) * (1. - 1.2e-5 * f.powf(1.5))
            + 4. / ((f - 63.) * (f - 63.) + 1.5 * rp * rp * rt.powi(5))
            + 0.28 * rt * rt / ((f - 118.75) * (f - 118.75) + 2.84 * rp * rp * rt * rt))
            * f
            * f
            * rp
            * rp
            * rt
            * rt
            / 1000.
    } else if f < 63. {
        // 57 < f < 63: cubic blend anchored on both band edges
        (f - 60.) * (f - 63.) / 18. * gamma_oxygen(57., t, p)
            - 1.66 * rp * rp * rt.powf(8.5) * (f - 57.) * (f - 63.)
            + (f - 57.) * (f - 60.) / 18. * gamma_oxygen(63., t, p)
    } else {
        0.
    }
}

/// Characteristic height of the oxygen absorption layer, km.
pub fn characteristic_height(frequency: f32) -> f32 {
    const BASE: f32 = 6.;
    if frequency > 70. && frequency < 350. {
        BASE + 40. / ((frequency - 118.7) * (frequency - 118.7) + 1.)
    } else {
        BASE
    }
}

/// Closed-form oxygen opacity of the whole column in Np, from the
/// near-ground temperature `t` (°C) and pressure `p` (hPa) and the
/// characteristic absorption height, for a slant path at zenith angle
/// `theta` (rad). Inputs are scalars or 2D horizontal slices.
pub fn opacity_near_ground(frequency: f32, t: &Field, p: &Field, theta: f32) -> Field {
    let height = characteristic_height(frequency);
    t.zip_with(p, |t, p| {
        gamma_oxygen(frequency, t, p) * height / theta.cos() * DB_TO_NEPERS
    })
}
