//! Element-type bound shared by every fitting routine

use scirs2_core::ndarray_ext::ScalarOperand;
use scirs2_core::numeric::{Float, FloatConst, FromPrimitive, NumAssign, NumCast};
use std::fmt::{Debug, Display};
use std::iter::Sum;

use crate::error::FitError;

/// Floating-point element usable by the fitter (`f32` or `f64`)
pub trait FitScalar:
    Float
    + FloatConst
    + FromPrimitive
    + NumCast
    + NumAssign
    + Sum
    + ScalarOperand
    + Send
    + Sync
    + Display
    + Debug
    + 'static
{
}

impl<T> FitScalar for T where
    T: Float
        + FloatConst
        + FromPrimitive
        + NumCast
        + NumAssign
        + Sum
        + ScalarOperand
        + Send
        + Sync
        + Display
        + Debug
        + 'static
{
}

/// Convert a configuration value into the element type
pub(crate) fn cast<T: FitScalar>(value: f64, what: &str) -> Result<T, FitError> {
    T::from(value)
        .ok_or_else(|| FitError::InvalidConfig(format!("{} = {} not representable", what, value)))
}

/// Widen an element for error reporting
pub(crate) fn to_f64<T: FitScalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
