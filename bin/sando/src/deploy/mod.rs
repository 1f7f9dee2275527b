//! Deployment commands
//!
//! `deploy` compiles (or loads) the contract bytecode and deploys it through the metamorphic
//! factory. `predict` computes the resulting address offline.

mod cmd;
mod predict;

pub use cmd::*;
pub use predict::*;
