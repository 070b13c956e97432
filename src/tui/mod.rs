//! Interactive form in the terminal.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Screen, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `theme`: Style constants
//! - `run`: Effects (terminal, reducer, submission sink)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
