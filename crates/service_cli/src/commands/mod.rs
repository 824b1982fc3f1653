//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. `report` builds the
//! command result; `run` logs, renders and prints it.

pub mod batch;
pub mod greeks;
pub mod price;
pub mod simulate;
pub mod sweep;
