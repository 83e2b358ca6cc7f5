//! Profile tensors and their horizontal reductions.
//!
//! All vertical data in the model is a [`Profile`]: either a rank-1 altitude
//! profile or a rank-3 field whose two leading axes are horizontal and whose
//! last axis is altitude. Reducing a profile along altitude yields a
//! [`Field`]: a scalar for rank 1, a 2D horizontal plane for rank 3.

use ndarray::{Array1, Array2, Array3, ArrayD, Axis, Ix1, Ix3, Zip};

use crate::error::Error;

/// Altitude axis of a rank-3 field (the last of the three axes).
pub(crate) const ALTITUDE_AXIS: Axis = Axis(2);

/// A vertical profile or a 3D field with a trailing altitude axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    /// Altitude profile, indexed by level.
    Rank1(Array1<f32>),
    /// 3D field: two horizontal axes, then altitude.
    Rank3(Array3<f32>),
}

impl Profile {
    /// Accept a dynamic-rank array, rejecting every rank other than 1 and 3.
    pub fn from_dyn(a: ArrayD<f32>) -> Result<Self, Error> {
        match a.ndim() {
            1 => a
                .into_dimensionality::<Ix1>()
                .map(Profile::Rank1)
                .map_err(|_| Error::InvalidRank(1)),
            3 => a
                .into_dimensionality::<Ix3>()
                .map(Profile::Rank3)
                .map_err(|_| Error::InvalidRank(3)),
            rank => Err(Error::InvalidRank(rank)),
        }
    }

    /// Tensor rank, 1 or 3.
    pub fn rank(&self) -> usize {
        match self {
            Profile::Rank1(_) => 1,
            Profile::Rank3(_) => 3,
        }
    }

    /// Number of altitude levels (length of the last axis).
    pub fn levels(&self) -> usize {
        match self {
            Profile::Rank1(a) => a.len(),
            Profile::Rank3(a) => a.len_of(ALTITUDE_AXIS),
        }
    }

    /// Index of the topmost level.
    pub fn last_index(&self) -> usize {
        self.levels() - 1
    }

    /// Whether `other` has exactly the same shape.
    pub fn same_shape(&self, other: &Profile) -> bool {
        match (self, other) {
            (Profile::Rank1(a), Profile::Rank1(b)) => a.len() == b.len(),
            (Profile::Rank3(a), Profile::Rank3(b)) => a.dim() == b.dim(),
            _ => false,
        }
    }

    /// Slice at altitude index `level`: an element for rank 1, the
    /// horizontal plane across the first two axes for rank 3.
    pub fn at(&self, level: usize) -> Field {
        match self {
            Profile::Rank1(a) => Field::Scalar(a[level]),
            Profile::Rank3(a) => Field::Plane(a.index_axis(ALTITUDE_AXIS, level).to_owned()),
        }
    }

    /// Apply `f` to every element, preserving shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Profile {
        match self {
            Profile::Rank1(a) => Profile::Rank1(a.mapv(f)),
            Profile::Rank3(a) => Profile::Rank3(a.mapv(f)),
        }
    }

    /// Combine two same-shaped profiles elementwise.
    pub fn zip_with(
        &self,
        other: &Profile,
        f: impl Fn(f32, f32) -> f32,
    ) -> Result<Profile, Error> {
        match (self, other) {
            (Profile::Rank1(a), Profile::Rank1(b)) if a.len() == b.len() => Ok(Profile::Rank1(
                Zip::from(a).and(b).map_collect(|&x, &y| f(x, y)),
            )),
            (Profile::Rank3(a), Profile::Rank3(b)) if a.dim() == b.dim() => Ok(Profile::Rank3(
                Zip::from(a).and(b).map_collect(|&x, &y| f(x, y)),
            )),
            _ => Err(Error::ShapeMismatch),
        }
    }

    /// Combine three same-shaped profiles elementwise.
    pub fn zip3_with(
        &self,
        b: &Profile,
        c: &Profile,
        f: impl Fn(f32, f32, f32) -> f32,
    ) -> Result<Profile, Error> {
        match (self, b, c) {
            (Profile::Rank1(a), Profile::Rank1(b), Profile::Rank1(c))
                if a.len() == b.len() && a.len() == c.len() =>
            {
                Ok(Profile::Rank1(
                    Zip::from(a).and(b).and(c).map_collect(|&x, &y, &z| f(x, y, z)),
                ))
            }
            (Profile::Rank3(a), Profile::Rank3(b), Profile::Rank3(c))
                if a.dim() == b.dim() && a.dim() == c.dim() =>
            {
                Ok(Profile::Rank3(
                    Zip::from(a).and(b).and(c).map_collect(|&x, &y, &z| f(x, y, z)),
                ))
            }
            _ => Err(Error::ShapeMismatch),
        }
    }

    /// Zeroed profile of the same shape.
    pub fn zeros_like(&self) -> Profile {
        match self {
            Profile::Rank1(a) => Profile::Rank1(Array1::zeros(a.len())),
            Profile::Rank3(a) => Profile::Rank3(Array3::zeros(a.dim())),
        }
    }
}

impl From<Array1<f32>> for Profile {
    fn from(a: Array1<f32>) -> Self {
        Profile::Rank1(a)
    }
}

impl From<Array3<f32>> for Profile {
    fn from(a: Array3<f32>) -> Self {
        Profile::Rank3(a)
    }
}

impl From<Vec<f32>> for Profile {
    fn from(a: Vec<f32>) -> Self {
        Profile::Rank1(Array1::from(a))
    }
}

/// A profile reduced along altitude, or any other scalar-or-2D quantity
/// (surface temperature, opacity, brightness temperature).
///
/// Arithmetic between two fields broadcasts scalars over planes; two planes
/// must share one shape, which the model guarantees for every quantity
/// derived from a single atmosphere/surface pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A single value (rank-1 pipeline).
    Scalar(f32),
    /// A 2D horizontal field (rank-3 pipeline).
    Plane(Array2<f32>),
}

impl Field {
    /// Apply `f` to every element.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Field {
        match self {
            Field::Scalar(a) => Field::Scalar(f(*a)),
            Field::Plane(a) => Field::Plane(a.mapv(f)),
        }
    }

    /// The scalar value, if this is a rank-1 result.
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Field::Scalar(a) => Some(*a),
            Field::Plane(_) => None,
        }
    }

    /// The 2D plane, if this is a rank-3 result.
    pub fn as_plane(&self) -> Option<&Array2<f32>> {
        match self {
            Field::Scalar(_) => None,
            Field::Plane(a) => Some(a),
        }
    }

    /// Combine two fields elementwise, broadcasting scalars over planes.
    pub(crate) fn zip_with(&self, other: &Field, f: impl Fn(f32, f32) -> f32) -> Field {
        match (self, other) {
            (Field::Scalar(a), Field::Scalar(b)) => Field::Scalar(f(*a, *b)),
            (Field::Scalar(a), Field::Plane(b)) => Field::Plane(b.mapv(|y| f(*a, y))),
            (Field::Plane(a), Field::Scalar(b)) => Field::Plane(a.mapv(|x| f(x, *b))),
            (Field::Plane(a), Field::Plane(b)) => {
                Field::Plane(Zip::from(a).and(b).map_collect(|&x, &y| f(x, y)))
            }
        }
    }

    /// Combine three fields elementwise with scalar broadcast.
    pub(crate) fn zip3_with(
        &self,
        b: &Field,
        c: &Field,
        f: impl Fn(f32, f32, f32) -> f32,
    ) -> Field {
        let dim = match (self, b, c) {
            (Field::Scalar(a), Field::Scalar(b), Field::Scalar(c)) => {
                return Field::Scalar(f(*a, *b, *c));
            }
            (Field::Plane(p), _, _) | (_, Field::Plane(p), _) | (_, _, Field::Plane(p)) => p.dim(),
        };
        let get = |v: &Field, idx: (usize, usize)| match v {
            Field::Scalar(a) => *a,
            Field::Plane(p) => p[idx],
        };
        Field::Plane(Array2::from_shape_fn(dim, |idx| {
            f(get(self, idx), get(b, idx), get(c, idx))
        }))
    }
}

macro_rules! field_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl std::ops::$trait for Field {
            type Output = Field;
            fn $method(self, rhs: Field) -> Field {
                self.zip_with(&rhs, |a, b| a $op b)
            }
        }

        impl std::ops::$trait<f32> for Field {
            type Output = Field;
            fn $method(self, rhs: f32) -> Field {
                self.map(|a| a $op rhs)
            }
        }
    };
}

field_binop!(Add, add, +);
field_binop!(Sub, sub, -);
field_binop!(Mul, mul, *);
field_binop!(Div, div, /);
