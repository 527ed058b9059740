use core::ops;
use core::fmt;

use bytemuck::{Pod, Zeroable};

macro_rules! vec2_op_impl {
    ($trait: ident, $func: ident, $v: ident) => {
        impl ops::$trait<$v> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v {
                    x: ops::$trait::$func(self.x, rhs.x),
                    y: ops::$trait::$func(self.y, rhs.y),
                }
            }
        }
    }
}

macro_rules! vec2_assign_op_impl {
    ($trait: ident, $func: ident, $v: ident, $t: ident) => {
        impl ops::$trait<$v> for $v {
            #[inline]
            fn $func(&mut self, rhs: $v) {
                ops::$trait::$func(&mut self.x, rhs.x);
                ops::$trait::$func(&mut self.y, rhs.y);
            }
        }

        impl ops::$trait<$t> for $v {
            #[inline]
            fn $func(&mut self, rhs: $t) {
                ops::$trait::$func(&mut self.x, rhs);
                ops::$trait::$func(&mut self.y, rhs);
            }
        }
    }
}

macro_rules! vec2_scalar_op_impl {
    ($trait: ident, $func: ident, $v: ident, $t: ident) => {
        impl ops::$trait<$t> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $t) -> $v {
                $v {
                    x: ops::$trait::$func(self.x, rhs),
                    y: ops::$trait::$func(self.y, rhs),
                }
            }
        }

        impl ops::$trait<$v> for $t {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v {
                    x: ops::$trait::$func(self, rhs.x),
                    y: ops::$trait::$func(self, rhs.y),
                }
            }
        }
    }
}

macro_rules! vec2_impl {
    ($v: ident, $t: ident) => {

        /// Two component column vector.
        #[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[repr(C)]
        pub struct $v {
            pub x: $t,
            pub y: $t,
        }

        impl $v {
            #[inline]
            pub fn new(x: $t, y: $t) -> $v {
                $v { x, y }
            }

            #[inline]
            pub fn zero() -> $v {
                $v::from_scalar(0.0)
            }

            #[inline]
            pub fn from_scalar(a: $t) -> $v {
                $v { x: a, y: a }
            }

            #[inline]
            pub fn from_slice(a: &[$t; 2]) -> $v {
                $v { x: a[0], y: a[1] }
            }

            #[inline]
            pub fn to_slice(self) -> [$t; 2] {
                [self.x, self.y]
            }

            #[inline]
            pub fn dot(self, b: $v) -> $t {
                // -0.0 is the additive identity in IEEE 754, +0.0 would turn
                // a (-0.0) sum into (+0.0).
                self.x * b.x + self.y * b.y + (-0.0)
            }

            #[inline]
            pub fn length2(self) -> $t {
                $v::dot(self, self)
            }

            #[inline]
            pub fn length(self) -> $t {
                $v::length2(self).sqrt()
            }

            #[inline]
            pub fn normalized(self) -> $v {
                self * (1.0 / $v::length(self))
            }

            /// Blends towards `self` as `t` grows: `t = 0` gives `b`, `t = 1` gives `self`.
            #[inline]
            pub fn lerp(self, b: $v, t: $t) -> $v {
                self * t + b * (1.0 - t)
            }

            /// Counter-clockwise quarter turn.
            #[inline]
            pub fn perp(self) -> $v {
                $v { x: -self.y, y: self.x }
            }
        }

        impl ops::Neg for $v {
            type Output = $v;

            #[inline]
            fn neg(self) -> $v {
                $v { x: -self.x, y: -self.y }
            }
        }

        impl From<[$t; 2]> for $v {
            #[inline]
            fn from(a: [$t; 2]) -> $v {
                $v::from_slice(&a)
            }
        }

        impl fmt::Display for $v {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let prec = f.precision().unwrap_or(3);
                write!(f, "{}({:.prec$}, {:.prec$})",
                       stringify!($v), self.x, self.y, prec = prec)
            }
        }

        #[cfg(feature = "approx")]
        impl approx::AbsDiffEq for $v {
            type Epsilon = $t;

            #[inline]
            fn default_epsilon() -> $t {
                <$t as approx::AbsDiffEq>::default_epsilon()
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: $t) -> bool {
                approx::AbsDiffEq::abs_diff_eq(&self.x, &other.x, epsilon)
                    && approx::AbsDiffEq::abs_diff_eq(&self.y, &other.y, epsilon)
            }
        }

        #[cfg(feature = "approx")]
        impl approx::RelativeEq for $v {
            #[inline]
            fn default_max_relative() -> $t {
                <$t as approx::RelativeEq>::default_max_relative()
            }

            #[inline]
            fn relative_eq(&self, other: &Self, epsilon: $t, max_relative: $t) -> bool {
                approx::RelativeEq::relative_eq(&self.x, &other.x, epsilon, max_relative)
                    && approx::RelativeEq::relative_eq(&self.y, &other.y, epsilon, max_relative)
            }
        }

        #[cfg(feature = "approx")]
        impl approx::UlpsEq for $v {
            #[inline]
            fn default_max_ulps() -> u32 {
                <$t as approx::UlpsEq>::default_max_ulps()
            }

            #[inline]
            fn ulps_eq(&self, other: &Self, epsilon: $t, max_ulps: u32) -> bool {
                approx::UlpsEq::ulps_eq(&self.x, &other.x, epsilon, max_ulps)
                    && approx::UlpsEq::ulps_eq(&self.y, &other.y, epsilon, max_ulps)
            }
        }

        vec2_op_impl!(Add, add, $v);
        vec2_op_impl!(Sub, sub, $v);
        vec2_op_impl!(Mul, mul, $v);
        vec2_op_impl!(Div, div, $v);

        vec2_assign_op_impl!(AddAssign, add_assign, $v, $t);
        vec2_assign_op_impl!(SubAssign, sub_assign, $v, $t);
        vec2_assign_op_impl!(MulAssign, mul_assign, $v, $t);
        vec2_assign_op_impl!(DivAssign, div_assign, $v, $t);

        vec2_scalar_op_impl!(Add, add, $v, $t);
        vec2_scalar_op_impl!(Sub, sub, $v, $t);
        vec2_scalar_op_impl!(Mul, mul, $v, $t);
        vec2_scalar_op_impl!(Div, div, $v, $t);
    }
}

vec2_impl!(Vec2, f32);
vec2_impl!(Vec2d, f64);
