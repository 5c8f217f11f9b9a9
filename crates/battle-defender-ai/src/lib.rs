//! Roaming defender AI for Battle Bets.
//!
//! Implements lane threat tracking, weighted patrol target selection and the
//! one-way switch into guard posture when the castle is in danger.

pub mod fsm;
pub mod profiles;
pub mod threat;

pub use battle_core as core;

#[cfg(test)]
mod tests;
