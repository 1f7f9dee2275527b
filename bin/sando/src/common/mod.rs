mod chain;
mod error;
mod fees;
mod hex;
mod logging;
mod value;

pub use chain::*;
pub use error::*;
pub use fees::*;
pub use hex::*;
pub use logging::*;
pub use value::*;
