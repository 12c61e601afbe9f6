//! Gaussfactor linear module.
//!
//! Linear Gaussian factors, their noise models and joint assembly.
//! The central type is [`JacobianFactor`], which stores a factor as an
//! augmented block matrix `[A₁|…|Aₙ|b]` with an optional
//! [`GaussianNoiseModel`].   A [`GaussianFactorGraph`] of factors can be
//! assembled into a single dense [`JacobianFactor`] with
//! [`JacobianFactor::from_graph`].

mod error_types;
mod factor_graph;
mod gaussian_factor;
mod jacobian_factor;
mod noise_model;
mod vector_values;

pub use error_types::*;
pub use factor_graph::*;
pub use gaussian_factor::*;
pub use jacobian_factor::*;
pub use noise_model::*;
pub use vector_values::*;
