//! Transformation types and traits.

use serde::{Deserialize, Serialize};

use super::{Point, Side};
use crate::orientation::wrap_angle;

/// A 2x2 rotation-matrix and two-entry translation vector,
/// used for relative movement of [Point]s and port orientations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    /// The transformation matrix represented in row-major order.
    pub a: [[f64; 2]; 2],
    /// The x-y translation applied after the transformation.
    pub b: [f64; 2],
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    /// Returns the identity transform, leaving any transformed object unmodified.
    pub fn identity() -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [0., 0.],
        }
    }
    /// Returns a translation by `(x,y)`.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [x, y],
        }
    }
    /// Returns a rotatation by `angle` degrees.
    ///
    /// Multiples of 90 degrees produce an exact matrix.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = sin_cos(angle);
        Self {
            a: [[cos, -sin], [sin, cos]],
            b: [0., 0.],
        }
    }
    /// Returns a reflection about the x-axis.
    pub fn reflect_vert() -> Self {
        Self {
            a: [[1., 0.], [0., -1.]],
            b: [0., 0.],
        }
    }
    /// Returns a reflection about the y-axis.
    pub fn reflect_horiz() -> Self {
        Self {
            a: [[-1., 0.], [0., 1.]],
            b: [0., 0.],
        }
    }
    /// Returns a reflection about the vertical line `x = x0`.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// # use waygeom::transform::{Transform, Transformation};
    /// let mirror = Transformation::mirror_x(50.);
    /// assert_eq!(Point::new(0., 3.).transform(mirror), Point::new(100., 3.));
    /// ```
    pub fn mirror_x(x0: f64) -> Self {
        Self::cascade(
            Self::translate(x0, 0.),
            Self::cascade(Self::reflect_horiz(), Self::translate(-x0, 0.)),
        )
    }
    /// Returns a reflection about the horizontal line `y = y0`.
    pub fn mirror_y(y0: f64) -> Self {
        Self::cascade(
            Self::translate(0., y0),
            Self::cascade(Self::reflect_vert(), Self::translate(0., -y0)),
        )
    }

    /// Returns a new [`TransformationBuilder`].
    #[inline]
    pub fn builder() -> TransformationBuilder {
        TransformationBuilder::default()
    }

    /// Create a new [`Transformation`] that is the cascade of `parent` and `child`.
    ///
    /// The child is applied first. Note this operation *is not* commutative.
    pub fn cascade(parent: Transformation, child: Transformation) -> Transformation {
        // The result-transform's origin is the parent's origin,
        // plus the parent-transformed child's origin
        let mut b = matvec(&parent.a, &child.b);
        b[0] += parent.b[0];
        b[1] += parent.b[1];
        // And the cascade-matrix is the product of the parent's and child's
        let a = matmul(&parent.a, &child.a);
        Self { a, b }
    }

    /// The translation encoded by this transformation.
    pub fn offset_point(&self) -> Point {
        Point::new(self.b[0], self.b[1])
    }

    /// Transforms an orientation angle (degrees), ignoring the translation.
    ///
    /// The result is wrapped to `[0, 360)`.
    pub fn apply_to_angle(&self, angle: f64) -> f64 {
        let (sin, cos) = sin_cos(angle);
        let v = matvec(&self.a, &[cos, sin]);
        let out = wrap_angle(v[1].atan2(v[0]).to_degrees());
        // Snap values within rounding noise of a cardinal angle.
        let snapped = (out / 90.).round() * 90.;
        if (out - snapped).abs() < 1e-9 {
            wrap_angle(snapped)
        } else {
            out
        }
    }
}

/// A builder for creating transformations from translations and rotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationBuilder {
    x: f64,
    y: f64,
    reflect_vert: bool,
    angle: f64,
}

impl TransformationBuilder {
    /// Specifies the x-y translation encoded by the transformation.
    pub fn point(&mut self, point: impl Into<Point>) -> &mut Self {
        let point = point.into();
        self.x = point.x;
        self.y = point.y;
        self
    }

    /// Specifies the angle of rotation encoded by this transformation.
    pub fn angle(&mut self, angle: f64) -> &mut Self {
        self.angle = angle;
        self
    }

    /// Specifies whether the transformation results in a vertical reflection.
    ///
    /// The reflection is applied before the rotation.
    pub fn reflect_vert(&mut self, reflect_vert: bool) -> &mut Self {
        self.reflect_vert = reflect_vert;
        self
    }

    /// Builds a [`Transformation`] from the specified parameters.
    pub fn build(&mut self) -> Transformation {
        let b = [self.x, self.y];
        let (sin, cos) = sin_cos(self.angle);
        let sin_refl = if self.reflect_vert { sin } else { -sin };
        let cos_refl = if self.reflect_vert { -cos } else { cos };
        let a = [[cos, sin_refl], [sin, cos_refl]];
        Transformation { a, b }
    }
}

/// Sine and cosine of an angle in degrees, exact for multiples of 90 degrees.
fn sin_cos(angle: f64) -> (f64, f64) {
    let wrapped = wrap_angle(angle);
    if wrapped == 0. {
        (0., 1.)
    } else if wrapped == 90. {
        (1., 0.)
    } else if wrapped == 180. {
        (0., -1.)
    } else if wrapped == 270. {
        (-1., 0.)
    } else {
        wrapped.to_radians().sin_cos()
    }
}

/// Multiples two 2x2 matrices, returning a new 2x2 matrix
fn matmul(a: &[[f64; 2]; 2], b: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}
/// Multiplies a 2x2 matrix by a 2-entry vector, returning a new 2-entry vector.
fn matvec(a: &[[f64; 2]; 2], b: &[f64; 2]) -> [f64; 2] {
    [
        a[0][0] * b[0] + a[0][1] * b[1],
        a[1][0] * b[0] + a[1][1] * b[1],
    ]
}

/// A trait for specifying how an object is changed by a transformation.
pub trait Transform {
    /// Applies matrix-vector [`Transformation`] `trans`.
    ///
    /// Creates a new object at a location equal to the transformation of our own.
    fn transform(&self, trans: Transformation) -> Self;
}

impl Transform for Point {
    fn transform(&self, trans: Transformation) -> Self {
        let x = trans.a[0][0] * self.x + trans.a[0][1] * self.y + trans.b[0];
        let y = trans.a[1][0] * self.x + trans.a[1][1] * self.y + trans.b[1];
        Self { x, y }
    }
}

impl Transform for Side {
    /// Rotates or reflects the direction this side points in.
    ///
    /// Non-rectilinear transformations snap to the nearest side.
    fn transform(&self, trans: Transformation) -> Self {
        let v = matvec(&trans.a, &[self.unit().x, self.unit().y]);
        if v[0].abs() >= v[1].abs() {
            if v[0] >= 0. {
                Side::Right
            } else {
                Side::Left
            }
        } else if v[1] >= 0. {
            Side::Top
        } else {
            Side::Bot
        }
    }
}
