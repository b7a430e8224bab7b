//! DOM listeners that feed the core event buses.

pub mod keyboard;
pub mod pointer;
pub mod visibility;
