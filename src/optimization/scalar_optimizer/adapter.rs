//! scalar_optimizer::adapter — bridges from [`ScalarObjective`] to argmin.
//!
//! Purpose
//! -------
//! Expose a positive-domain objective to argmin in the coordinates each
//! solver works in:
//! - [`LogScaleAdapter`]: `u = ln x`, scalar parameter, for Brent.
//! - [`SoftplusAdapter`]: `x = lower + scale·softplus(θ₀)`, length-one
//!   vector parameter, for L-BFGS.
//!
//! Key behaviors
//! -------------
//! - Non-finite costs become [`OptError::NonFiniteCost`] before argmin sees
//!   them.
//! - Gradients for L-BFGS are central finite differences, falling back to
//!   forward differences when the central stencil fails or produces a
//!   non-finite gradient. The first objective error raised inside a stencil
//!   is kept and returned in place of a `NaN` gradient.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    numerical_stability::to_shifted_positive,
    scalar_optimizer::{
        traits::ScalarObjective,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

#[derive(Debug, Clone)]
pub struct LogScaleAdapter<'a, F: ScalarObjective> {
    pub f: &'a F,
}

impl<'a, F: ScalarObjective> LogScaleAdapter<'a, F> {
    pub fn new(f: &'a F) -> Self {
        Self { f }
    }

    #[inline]
    pub fn to_x(&self, u: f64) -> f64 {
        u.exp()
    }
}

impl<'a, F: ScalarObjective> CostFunction for LogScaleAdapter<'a, F> {
    type Param = f64;
    type Output = Cost;

    fn cost(&self, u: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(self.to_x(*u))?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

#[derive(Debug, Clone)]
pub struct SoftplusAdapter<'a, F: ScalarObjective> {
    pub f: &'a F,
    pub lower: f64,
    pub scale: f64,
}

impl<'a, F: ScalarObjective> SoftplusAdapter<'a, F> {
    pub fn new(f: &'a F, lower: f64, scale: f64) -> Self {
        Self { f, lower, scale }
    }

    #[inline]
    pub fn to_x(&self, theta: f64) -> f64 {
        to_shifted_positive(theta, self.lower, self.scale)
    }
}

impl<'a, F: ScalarObjective> CostFunction for SoftplusAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let coord = theta.first().copied().ok_or(OptError::GradientDimMismatch {
            expected: 1,
            found: theta.len(),
        })?;
        let output = self.f.value(self.to_x(coord))?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: ScalarObjective> Gradient for SoftplusAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let cost_func = |theta: &Theta| -> f64 {
            match self.cost(theta) {
                Ok(val) => val,
                Err(e) => {
                    let mut slot = closure_err.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(e);
                    }
                    f64::NAN
                }
            }
        };
        let fd_grad = theta.central_diff(&cost_func);
        if closure_err.borrow().is_some() {
            return run_forward_diff(theta, &cost_func, &closure_err);
        }
        match validate_grad(&fd_grad, dim) {
            Ok(()) => Ok(fd_grad),
            Err(_) => run_forward_diff(theta, &cost_func, &closure_err),
        }
    }
}

fn run_forward_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}
