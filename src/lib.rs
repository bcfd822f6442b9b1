//! Engine-agnostic player state machine for a 2D fighting platformer.
//!
//! Characters live in a `hecs::World`. Each one owns a [`fsm::StateMachine`]
//! that arbitrates transition requests by priority and interruptibility and
//! drives the active state once per tick. Physics, input and visuals are
//! reached only through the seams in [`engine`].

pub mod app;
pub mod combat;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod scene;
pub mod systems;

#[cfg(test)]
mod testing;
