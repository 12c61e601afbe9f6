//! Gaussfactor inference module.
//!
//! Variable/factor incidence and the computation of fill reducing
//! elimination orderings.   An [`Ordering`] is computed either from a
//! precomputed [`VariableIndex`] or directly from any graph type that
//! implements [`FactorIncidence`].

/// Integer name of a single unknown.   Keys are unique within a problem.
pub type Key = usize;

mod colamd;
mod error_types;
mod ordering;
mod settings;
mod variable_index;

pub use error_types::*;
pub use ordering::*;
pub use settings::*;
pub use variable_index::*;
