use core::ops;
use core::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::MatrixError;
use crate::vec::*;

#[inline]
fn check_index(row: usize, col: usize) -> Result<(), MatrixError> {
    if row < 2 && col < 2 {
        Ok(())
    } else {
        Err(MatrixError::IndexOutOfBounds { row, col })
    }
}

macro_rules! mat2_impl {
    ($m: ident, $t: ident, $v: ident) => {

        /// 2x2 matrix stored row-major, `e[row][col]`.
        ///
        /// The default value is the identity.
        #[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[repr(C)]
        pub struct $m {
            pub e: [[$t; 2]; 2],
        }

        impl Default for $m {
            #[inline]
            fn default() -> $m {
                $m::identity()
            }
        }

        impl $m {
            /// Builds a matrix from its elements in row-major order.
            #[inline]
            pub fn new(a00: $t, a01: $t, a10: $t, a11: $t) -> $m {
                $m { e: [[a00, a01], [a10, a11]] }
            }

            #[inline]
            pub fn zero() -> $m {
                $m { e: [[0.0; 2]; 2] }
            }

            #[inline]
            pub fn identity() -> $m {
                $m::scale_uniform(1.0)
            }

            #[inline]
            pub fn scale_uniform(d: $t) -> $m {
                $m::new(d, 0.0, 0.0, d)
            }

            /// Diagonal operator scaling `x` by `v.x` and `y` by `v.y`.
            #[inline]
            pub fn scale(v: $v) -> $m {
                $m::new(v.x, 0.0, 0.0, v.y)
            }

            /// Counter-clockwise rotation by `angle` radians.
            #[inline]
            pub fn rotation(angle: $t) -> $m {
                let cos_alpha = angle.cos();
                let sin_alpha = angle.sin();

                $m::new(cos_alpha, -sin_alpha,
                        sin_alpha,  cos_alpha)
            }

            /// Counter-clockwise rotation by `degrees`.
            #[inline]
            pub fn rotate(degrees: $t) -> $m {
                $m::rotation(degrees.to_radians())
            }

            #[inline]
            pub fn from_array(a: &[[$t; 2]; 2]) -> $m {
                $m { e: *a }
            }

            #[inline]
            pub fn from_rows(r: [$v; 2]) -> $m {
                $m { e: [r[0].to_slice(), r[1].to_slice()] }
            }

            #[inline]
            pub fn from_columns(c: [$v; 2]) -> $m {
                $m::from_rows(c).transpose()
            }

            /// Borrows the backing store. Writes through `as_array_mut` are
            /// visible to every later read of this matrix.
            #[inline]
            pub fn as_array(&self) -> &[[$t; 2]; 2] {
                &self.e
            }

            #[inline]
            pub fn as_array_mut(&mut self) -> &mut [[$t; 2]; 2] {
                &mut self.e
            }

            /// Owned copy of the backing store, detached from `self`.
            #[inline]
            pub fn copy_array(&self) -> [[$t; 2]; 2] {
                self.e
            }

            #[inline]
            pub fn copy(&self) -> $m {
                *self
            }

            /// Replaces every element with the contents of `a`.
            #[inline]
            pub fn set_array(&mut self, a: &[[$t; 2]; 2]) {
                self.e = *a;
            }

            pub fn get(&self, row: usize, col: usize) -> Result<$t, MatrixError> {
                check_index(row, col)?;
                Ok(self.e[row][col])
            }

            pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut $t, MatrixError> {
                check_index(row, col)?;
                Ok(&mut self.e[row][col])
            }

            pub fn set(&mut self, row: usize, col: usize, value: $t) -> Result<(), MatrixError> {
                *self.get_mut(row, col)? = value;
                Ok(())
            }

            /// Row `i` as a vector. Panics if `i >= 2`.
            #[inline]
            pub fn row(&self, i: usize) -> $v {
                $v::from_slice(&self.e[i])
            }

            /// Column `i` as a vector. Panics if `i >= 2`.
            #[inline]
            pub fn col(&self, i: usize) -> $v {
                $v::new(self.e[0][i], self.e[1][i])
            }

            #[inline]
            pub fn to_rows(&self) -> [$v; 2] {
                [self.row(0), self.row(1)]
            }

            #[inline]
            pub fn to_columns(&self) -> [$v; 2] {
                [self.col(0), self.col(1)]
            }

            #[inline]
            pub fn transpose(&self) -> $m {
                $m::new(self.e[0][0], self.e[1][0],
                        self.e[0][1], self.e[1][1])
            }

            #[inline]
            pub fn trace(&self) -> $t {
                self.e[0][0] + self.e[1][1]
            }

            #[inline]
            pub fn determinant(&self) -> $t {
                self.e[0][0] * self.e[1][1] - self.e[0][1] * self.e[1][0]
            }

            #[inline]
            pub fn adjugate(&self) -> $m {
                $m::new( self.e[1][1], -self.e[0][1],
                        -self.e[1][0],  self.e[0][0])
            }

            /// Adjugate scaled by the reciprocal of the determinant.
            ///
            /// A singular matrix is not rejected: the result holds infinities
            /// or NaNs. Use [`Self::try_inverse`] or check
            /// [`Self::determinant`] first when that matters.
            pub fn inverse(&self) -> $m {
                let det = self.determinant();
                if det == 0.0 {
                    log::debug!("inverting singular {}: {}", stringify!($m), self);
                }
                self.adjugate() * (1.0 / det)
            }

            pub fn try_inverse(&self) -> Option<$m> {
                let det = self.determinant();
                if det == 0.0 {
                    log::trace!("{} has no inverse: {}", stringify!($m), self);
                    return None;
                }
                Some(self.adjugate() * (1.0 / det))
            }

            #[inline]
            fn map<F: Fn($t) -> $t>(&self, f: F) -> $m {
                $m::new(f(self.e[0][0]), f(self.e[0][1]),
                        f(self.e[1][0]), f(self.e[1][1]))
            }

            #[inline]
            fn zip_with<F: Fn($t, $t) -> $t>(&self, rhs: &$m, f: F) -> $m {
                $m::new(f(self.e[0][0], rhs.e[0][0]), f(self.e[0][1], rhs.e[0][1]),
                        f(self.e[1][0], rhs.e[1][0]), f(self.e[1][1], rhs.e[1][1]))
            }
        }

        impl From<[[$t; 2]; 2]> for $m {
            #[inline]
            fn from(a: [[$t; 2]; 2]) -> $m {
                $m { e: a }
            }
        }

        impl From<$m> for [[$t; 2]; 2] {
            #[inline]
            fn from(m: $m) -> [[$t; 2]; 2] {
                m.e
            }
        }

        impl ops::Index<(usize, usize)> for $m {
            type Output = $t;

            #[inline]
            fn index(&self, (row, col): (usize, usize)) -> &$t {
                &self.e[row][col]
            }
        }

        impl ops::IndexMut<(usize, usize)> for $m {
            #[inline]
            fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut $t {
                &mut self.e[row][col]
            }
        }

        impl ops::Add<$m> for $m {
            type Output = $m;

            #[inline]
            fn add(self, rhs: $m) -> $m {
                self.zip_with(&rhs, |a, b| a + b)
            }
        }

        impl ops::Sub<$m> for $m {
            type Output = $m;

            #[inline]
            fn sub(self, rhs: $m) -> $m {
                self.zip_with(&rhs, |a, b| a - b)
            }
        }

        impl ops::Neg for $m {
            type Output = $m;

            #[inline]
            fn neg(self) -> $m {
                self.map(|a| -a)
            }
        }

        impl ops::Mul<$m> for $m {
            type Output = $m;

            #[inline]
            fn mul(self, rhs: $m) -> $m {
                let a = self.to_rows();
                let b = rhs.to_columns();

                let mut m = $m::zero();
                for i in 0..2 {
                    for j in 0..2 {
                        m.e[i][j] = $v::dot(a[i], b[j]);
                    }
                }
                m
            }
        }

        impl ops::Mul<$t> for $m {
            type Output = $m;

            #[inline]
            fn mul(self, rhs: $t) -> $m {
                self.map(|a| a * rhs)
            }
        }

        impl ops::Mul<$m> for $t {
            type Output = $m;

            #[inline]
            fn mul(self, rhs: $m) -> $m {
                rhs.map(|a| self * a)
            }
        }

        impl ops::Mul<$v> for $m {
            type Output = $v;

            #[inline]
            fn mul(self, rhs: $v) -> $v {
                $v::new(self.row(0).dot(rhs), self.row(1).dot(rhs))
            }
        }

        impl ops::AddAssign<$m> for $m {
            #[inline]
            fn add_assign(&mut self, rhs: $m) {
                *self = *self + rhs;
            }
        }

        impl ops::SubAssign<$m> for $m {
            #[inline]
            fn sub_assign(&mut self, rhs: $m) {
                *self = *self - rhs;
            }
        }

        impl ops::MulAssign<$m> for $m {
            #[inline]
            fn mul_assign(&mut self, rhs: $m) {
                *self = *self * rhs;
            }
        }

        impl ops::MulAssign<$t> for $m {
            #[inline]
            fn mul_assign(&mut self, rhs: $t) {
                *self = *self * rhs;
            }
        }

        impl fmt::Display for $m {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let prec = f.precision().unwrap_or(3);
                write!(f, "{}([{:.prec$}, {:.prec$}], [{:.prec$}, {:.prec$}])",
                       stringify!($m),
                       self.e[0][0], self.e[0][1],
                       self.e[1][0], self.e[1][1],
                       prec = prec)
            }
        }

        #[cfg(feature = "approx")]
        impl approx::AbsDiffEq for $m {
            type Epsilon = $t;

            #[inline]
            fn default_epsilon() -> $t {
                <$t as approx::AbsDiffEq>::default_epsilon()
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: $t) -> bool {
                self.to_rows().iter().zip(other.to_rows().iter())
                    .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        #[cfg(feature = "approx")]
        impl approx::RelativeEq for $m {
            #[inline]
            fn default_max_relative() -> $t {
                <$t as approx::RelativeEq>::default_max_relative()
            }

            #[inline]
            fn relative_eq(&self, other: &Self, epsilon: $t, max_relative: $t) -> bool {
                self.to_rows().iter().zip(other.to_rows().iter())
                    .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
            }
        }

        #[cfg(feature = "approx")]
        impl approx::UlpsEq for $m {
            #[inline]
            fn default_max_ulps() -> u32 {
                <$t as approx::UlpsEq>::default_max_ulps()
            }

            #[inline]
            fn ulps_eq(&self, other: &Self, epsilon: $t, max_ulps: u32) -> bool {
                self.to_rows().iter().zip(other.to_rows().iter())
                    .all(|(a, b)| approx::UlpsEq::ulps_eq(a, b, epsilon, max_ulps))
            }
        }
    }
}

mat2_impl!(Mat2, f32, Vec2);
mat2_impl!(Mat2d, f64, Vec2d);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_identity() {
        let m = Mat2::default();
        assert_eq!(m.get(0, 0), Ok(1.0));
        assert_eq!(m.get(1, 1), Ok(1.0));
        assert_eq!(m.get(0, 1), Ok(0.0));
        assert_eq!(m.get(1, 0), Ok(0.0));
        assert_eq!(m, Mat2::identity());
    }

    #[test]
    fn new_is_row_major() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.e, [[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 3.0);
    }

    #[test]
    fn get_set() {
        let mut m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        for row in 0..2 {
            for col in 0..2 {
                let before = m;
                m.set(row, col, -7.5).unwrap();
                assert_eq!(m.get(row, col), Ok(-7.5));
                for r in 0..2 {
                    for c in 0..2 {
                        if (r, c) != (row, col) {
                            assert_eq!(m.get(r, c), before.get(r, c));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn index_out_of_bounds() {
        let mut m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let bad = [(7, 0), (0, 5), (2, 1), (1, 2), (2, 2), (usize::MAX, 0)];
        for &(row, col) in bad.iter() {
            let err = MatrixError::IndexOutOfBounds { row, col };
            assert_eq!(m.get(row, col), Err(err));
            assert_eq!(m.set(row, col, 0.0), Err(err));
            assert!(m.get_mut(row, col).is_err());
        }
        assert_eq!(m, Mat2::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    #[should_panic]
    fn index_operator_panics_out_of_bounds() {
        let m = Mat2::identity();
        let _ = m[(0, 2)];
    }

    #[test]
    fn error_message_names_indices() {
        let err = Mat2::identity().get(3, 1).unwrap_err();
        assert_eq!(err.to_string(), "Matrix index out of bounds (row: 3, col: 1, size: 2x2)");
    }

    #[test]
    fn array_copy() {
        let mut src = Mat2::new(1.0, 2.0,
                                0.0, 1.0);
        let array = src.copy_array();
        let copy = src.copy();
        let original = [[1.0, 2.0], [0.0, 1.0]];

        let new_array = [[1.0, 2.0], [3.0, 4.0]];
        src.set_array(&new_array);

        assert_eq!(src.as_array(), &new_array);
        assert_eq!(array, original);
        assert_eq!(copy, Mat2::from_array(&original));
    }

    #[test]
    fn as_array_mut_aliases() {
        let mut m = Mat2::identity();
        m.as_array_mut()[1][0] = 9.0;
        assert_eq!(m.get(1, 0), Ok(9.0));

        let mut copy = m.copy();
        copy.set(1, 0, -1.0).unwrap();
        assert_eq!(m.get(1, 0), Ok(9.0));
    }

    #[test]
    fn from_array_does_not_alias() {
        let mut grid = [[1.0, 2.0], [3.0, 4.0]];
        let m = Mat2::from_array(&grid);
        grid[0][0] = 100.0;
        assert_eq!(m.get(0, 0), Ok(1.0));

        let mut out: [[f32; 2]; 2] = m.into();
        out[1][1] = 0.0;
        assert_eq!(m.get(1, 1), Ok(4.0));
    }

    #[test]
    fn rows_and_columns() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.to_rows(), [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);
        assert_eq!(m.to_columns(), [Vec2::new(1.0, 3.0), Vec2::new(2.0, 4.0)]);
        assert_eq!(Mat2::from_rows(m.to_rows()), m);
        assert_eq!(Mat2::from_columns(m.to_columns()), m);
    }

    #[test]
    #[should_panic]
    fn row_panics_out_of_bounds() {
        let _ = Mat2::identity().row(2);
    }

    #[test]
    #[should_panic]
    fn col_panics_out_of_bounds() {
        let _ = Mat2::identity().col(2);
    }

    #[test]
    fn transpose() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Mat2::transpose(&m), Mat2::new(1.0, 3.0, 2.0, 4.0));
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn determinant() {
        assert_eq!(Mat2::identity().determinant(), 1.0);
        assert_eq!(Mat2::determinant(&Mat2::new(1.0, 2.0, 3.0, 4.0)), -2.0);
    }

    #[test]
    fn adjugate() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Mat2::adjugate(&m), Mat2::new(4.0, -2.0, -3.0, 1.0));
    }

    #[test]
    fn inverse() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let expected = Mat2::new(-2.0, 1.0, 1.5, -0.5);
        assert_eq!(Mat2::inverse(&m), expected);
        assert_eq!(m.try_inverse(), Some(expected));
        assert_eq!(m * m.inverse(), Mat2::identity());
    }

    #[test]
    fn singular_inverse_is_not_finite() {
        let m = Mat2::new(1.0, 2.0, 2.0, 4.0);
        assert_eq!(m.determinant(), 0.0);
        assert!(m.try_inverse().is_none());

        let inv = m.inverse();
        assert!(inv.e.iter().flatten().all(|a| !a.is_finite()));
    }

    #[test]
    fn scale() {
        let op = Mat2::scale(Vec2::new(2.0, 4.0));
        assert_eq!(op * Vec2::new(-1.0, 3.0), Vec2::new(-2.0, 12.0));
    }

    #[test]
    fn rotate() {
        let result = Mat2::rotate(45.0) * Vec2::new(2.0, 0.0);
        let sqrt2 = core::f32::consts::SQRT_2;
        assert_relative_eq!(result.x, sqrt2, epsilon = 1e-6);
        assert_relative_eq!(result.y, sqrt2, epsilon = 1e-6);

        let quarter = Mat2d::rotate(90.0) * Vec2d::new(1.0, 0.0);
        assert_relative_eq!(quarter.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(quarter.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rotations_compose() {
        let a = Mat2d::rotate(30.0) * Mat2d::rotate(60.0);
        let b = Mat2d::rotate(90.0);
        for (x, y) in a.e.iter().flatten().zip(b.e.iter().flatten()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn add() {
        let left = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let right = Mat2::new(5.0, 2.0, -5.0, 4.0);
        assert_eq!(left + right, Mat2::new(6.0, 4.0, -2.0, 8.0));

        let mut acc = left;
        acc += right;
        assert_eq!(acc, left + right);
    }

    #[test]
    fn sub() {
        let left = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let right = Mat2::new(5.0, 2.0, -5.0, 4.0);
        assert_eq!(left - right, Mat2::new(-4.0, 0.0, 8.0, 0.0));
        assert_eq!(left - right, left + -right);

        let mut acc = left;
        acc -= right;
        assert_eq!(acc, left - right);
    }

    #[test]
    fn matrix_mul_is_not_commutative() {
        let left = Mat2::new(1.0, 2.0, -3.0, 4.0);
        let right = Mat2::new(5.0, 2.0, 1.0, -1.0);
        assert_eq!(left * right, Mat2::new(7.0, 0.0, -11.0, -10.0));
        assert_eq!(right * left, Mat2::new(-1.0, 18.0, 4.0, -2.0));

        let mut acc = left;
        acc *= right;
        assert_eq!(acc, left * right);
    }

    #[test]
    fn scalar_mul() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let expected = Mat2::new(2.0, 4.0, 6.0, 8.0);
        assert_eq!(m * 2.0, expected);
        assert_eq!(2.0f32 * m, expected);

        let mut acc = m;
        acc *= 2.0;
        assert_eq!(acc, expected);
    }

    #[test]
    fn vector_mul() {
        let op = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(op * Vec2::new(7.0, -6.0), Vec2::new(-5.0, -3.0));
    }

    #[test]
    fn operands_are_unchanged() {
        let a = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let b = Mat2::new(5.0, 2.0, -5.0, 4.0);
        let _ = a + b;
        let _ = a * b;
        let _ = a.inverse();
        assert_eq!(a, Mat2::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(b, Mat2::new(5.0, 2.0, -5.0, 4.0));
    }

    #[test]
    fn trace() {
        assert_eq!(Mat2::new(1.0, 2.0, 3.0, 4.0).trace(), 5.0);
    }

    #[test]
    fn display() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(format!("{}", m), "Mat2([1.000, 2.000], [3.000, 4.000])");
        assert_eq!(format!("{:.0}", Mat2d::identity()), "Mat2d([1, 0], [0, 1])");
    }

    #[test]
    fn casts_to_bytes() {
        let ms = [Mat2::new(1.0, 2.0, 3.0, 4.0)];
        let floats: &[f32] = bytemuck::cast_slice(&ms);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[cfg(feature = "approx")]
    #[test]
    fn approx_comparison() {
        use approx::{assert_abs_diff_eq, assert_relative_ne};

        let rotated = Mat2::rotate(45.0) * Vec2::new(2.0, 0.0);
        let sqrt2 = core::f32::consts::SQRT_2;
        assert_relative_eq!(rotated, Vec2::new(sqrt2, sqrt2), epsilon = 1e-6);

        let a = Mat2::rotate(90.0);
        assert_abs_diff_eq!(a, Mat2::new(0.0, -1.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_ne!(a, Mat2::identity());
    }
}
