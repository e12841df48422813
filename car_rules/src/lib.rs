//! # Car Rules
//!
//! The "rule book" crate - the five base attributes every car is described by,
//! the bit codes built from their answers, and the catalog the guesser starts from.
//! This crate holds no state and performs no I/O.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod questions;

pub use catalog::*;
pub use entities::*;
pub use error::*;
pub use questions::*;
