//! Vertical quadrature along the altitude axis.
//!
//! One set of rules serves both the opacity integrals and the nested
//! radiative-transfer integrals: a profile is reduced between two level
//! indices with a selectable rule and either a uniform step or per-layer
//! thicknesses. Rank-3 fields reduce along their trailing altitude axis to a
//! 2D horizontal plane, rank-1 profiles to a scalar.

use std::str::FromStr;

use ndarray::{Array1, Array2};
use smallvec::SmallVec;

use crate::error::Error;
use crate::tensor::{Field, Profile, ALTITUDE_AXIS};

/// Quadrature rule used for the vertical integrals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// Composite trapezoid rule (the default).
    #[default]
    Trapezoid,
    /// Composite Simpson 1/3 rule.
    Simpson,
    /// Composite Boole rule.
    Boole,
}

impl FromStr for IntegrationMethod {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "trapezoid" | "trapz" => Ok(IntegrationMethod::Trapezoid),
            "simpson" => Ok(IntegrationMethod::Simpson),
            "boole" => Ok(IntegrationMethod::Boole),
            other => Err(Error::UnknownMethod(other.to_owned())),
        }
    }
}

/// Layer thickness along the altitude grid, in km.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// One constant step for every layer.
    Uniform(f32),
    /// Per-layer thickness, one entry per level.
    PerLayer(Array1<f32>),
}

impl Step {
    /// Thickness of the layer below level `level`.
    pub fn at(&self, level: usize) -> f32 {
        match self {
            Step::Uniform(dh) => *dh,
            Step::PerLayer(dh) => dh[level],
        }
    }
}

/// Per-level absolute weights of a rule over `lower..=upper`.
///
/// Every rule reduces to `sum(w_k * a_k)` with `w_k = c_k * dh_k / factor`;
/// only the coefficient pattern differs. A degenerate range (`lower ==
/// upper`) folds both endpoint contributions onto the single level.
fn rule_weights(
    method: IntegrationMethod,
    lower: usize,
    upper: usize,
    step: &Step,
) -> SmallVec<[f32; 64]> {
    let mut weights: SmallVec<[f32; 64]> = (lower..=upper)
        .map(|k| {
            let endpoint = k == lower || k == upper;
            let coefficient = match method {
                IntegrationMethod::Trapezoid => {
                    if endpoint {
                        0.5
                    } else {
                        1.
                    }
                }
                IntegrationMethod::Simpson => {
                    let c = if endpoint {
                        1.
                    } else if (k - lower) % 2 == 1 {
                        4.
                    } else {
                        2.
                    };
                    c / 3.
                }
                IntegrationMethod::Boole => {
                    let c = if endpoint {
                        14.
                    } else if (k - lower) % 2 == 1 {
                        64.
                    } else if (k - lower) % 4 == 2 {
                        24.
                    } else {
                        28.
                    };
                    c / 45.
                }
            };
            coefficient * step.at(k)
        })
        .collect();
    if lower == upper {
        weights[0] *= 2.;
    }
    weights
}

/// Integrate `a` along the altitude axis between level indices `lower` and
/// `upper`, both included.
///
/// Returns a scalar for a rank-1 profile and a 2D horizontal plane for a
/// rank-3 field. Both indices must be valid levels with `lower <= upper`.
pub fn with_limits(
    a: &Profile,
    lower: usize,
    upper: usize,
    step: &Step,
    method: IntegrationMethod,
) -> Field {
    let weights = rule_weights(method, lower, upper, step);
    match a {
        Profile::Rank1(values) => Field::Scalar(
            weights
                .iter()
                .enumerate()
                .map(|(offset, w)| values[lower + offset] * w)
                .sum(),
        ),
        Profile::Rank3(values) => {
            let (nx, ny, _) = values.dim();
            let mut plane = Array2::<f32>::zeros((nx, ny));
            for (offset, &w) in weights.iter().enumerate() {
                plane.scaled_add(w, &values.index_axis(ALTITUDE_AXIS, lower + offset));
            }
            Field::Plane(plane)
        }
    }
}

/// Integrate `a` over the whole altitude range.
pub fn full(a: &Profile, step: &Step, method: IntegrationMethod) -> Field {
    with_limits(a, 0, a.last_index(), step, method)
}

/// Trapezoid quadrature of a function of the level index.
///
/// Accumulates `dh_k * f(k)` over the interior of the range plus
/// half-weighted endpoints. This is the outer rule of the nested transfer
/// integrals, where `f(k)` itself evaluates [`with_limits`] for the
/// optical depth up to (or above) level `k`.
pub fn indexed<F>(mut f: F, lower: usize, upper: usize, step: &Step) -> Field
where
    F: FnMut(usize) -> Field,
{
    if lower == upper {
        return f(lower) * step.at(lower);
    }
    let mut acc = f(lower) * (0.5 * step.at(lower)) + f(upper) * (0.5 * step.at(upper));
    for k in lower + 1..upper {
        acc = acc + f(k) * step.at(k);
    }
    acc
}
