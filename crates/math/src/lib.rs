pub mod vec;
pub mod mat;
pub mod error;

pub use error::MatrixError;
pub use mat::{Mat2, Mat2d};
pub use vec::{Vec2, Vec2d};
