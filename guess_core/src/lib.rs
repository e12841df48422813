//! # Guess Core
//!
//! The engine of the car guesser. It identifies a car from five yes/no answers,
//! breaks ties with learned questions, and learns new cars as it goes.
//!
//! ## Core Components
//!
//! - **knowledge_base**: the known cars and the disambiguating rules
//! - **resolver**: the question/answer state machine producing a guess
//! - **learning**: adds a car, creating or reusing a rule on collision
//! - **persistence**: the JSON snapshot the knowledge base lives in between runs
//! - **session**: ties a knowledge base to its snapshot for one run
//!
//! ## Design Philosophy
//!
//! - **Owned State**: one `KnowledgeBase` value per run, borrowed by each operation
//! - **Outcomes, not errors**: no match and ambiguous matches are ordinary results
//! - **Validate at the edge**: records are checked before they enter the knowledge base

pub mod config;
pub mod error;
pub mod knowledge_base;
pub mod learning;
pub mod persistence;
pub mod resolver;
pub mod session;

pub use config::*;
pub use error::*;
pub use knowledge_base::*;
pub use learning::*;
pub use persistence::*;
pub use resolver::*;
pub use session::*;
