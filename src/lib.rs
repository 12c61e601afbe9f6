//!  __gaussfactor__ is a Rust implementation of the sparse linear algebra core of a
//! factor graph least squares solver, as used in SLAM and bundle adjustment.
//!
//! A linear Gaussian factor graph represents the least squares problem
//!
//! $$
//! \text{minimize} \quad \sum_i \frac{1}{2}\left\lVert \Sigma_i^{-1/2}\left(A_i x - b_i\right)\right\rVert^2
//! $$
//!
//! where each factor $i$ involves only a few blocks of the unknowns $x$.
//! This crate provides:
//!
//! * __Elimination orderings__: fill reducing variable orderings computed from the
//!   sparsity of the graph using approximate minimum degree, optionally with
//!   variables constrained to be eliminated first, last, or in grouped tiers.
//!   See [`Ordering`](crate::inference::Ordering).
//!
//! * __Jacobian factors__: block sparse Gaussian factors stored as an augmented
//!   matrix $[A_1|\dots|A_n|b]$ with a noise model, and the assembly of a whole
//!   graph into a single dense joint factor.
//!   See [`JacobianFactor`](crate::linear::JacobianFactor).
//!
//! __Example usage__ :
//!
//! ```no_run
//! use gaussfactor::algebra::Matrix;
//! use gaussfactor::inference::Ordering;
//! use gaussfactor::linear::{GaussianFactorGraph, GaussianNoiseModel, JacobianFactor};
//!
//! let I = Matrix::<f64>::identity(2);
//! let mut negI = Matrix::<f64>::identity(2);
//! negI.data_mut().iter_mut().for_each(|x| *x = -*x);
//!
//! let mut graph = GaussianFactorGraph::new();
//! graph.push(JacobianFactor::unary(0, I.clone(), &[0., 0.], None).unwrap());
//! graph.push(JacobianFactor::binary(0, negI.clone(), 1, I.clone(), &[1., 0.], None).unwrap());
//! graph.push(JacobianFactor::binary(1, negI, 2, I, &[1., 0.],
//!            Some(GaussianNoiseModel::from_sigmas(&[0.1, 0.1]).unwrap())).unwrap());
//!
//! let ordering = Ordering::colamd_from_graph(&graph).unwrap();
//! let joint = JacobianFactor::from_graph_with_ordering(&graph, &ordering).unwrap();
//! assert_eq!(joint.rows(), 6);
//! assert_eq!(joint.cols(), 6);
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

pub mod algebra;
pub mod inference;
pub mod linear;
