#[macro_use]
extern crate serde;

mod ams;
mod ballot;
mod election;
mod error;
mod event;
mod method;
mod name;
mod operation;
mod plurality;
mod registry;
mod stv;
mod tally;

pub use ballot::*;
pub use election::*;
pub use error::*;
pub use event::*;
pub use method::*;
pub use name::*;
pub use operation::*;
pub use plurality::*;
pub use registry::*;
pub use stv::droop_quota;
pub use tally::{Elected, ElectionResults, PartyTotals};

#[cfg(test)]
mod tests;
