//! Core of a side-scrolling arcade shooter: a streaming, column-windowed
//! landscape plus the entities that fly through it.
//!
//! Everything in here is synchronous and deterministic given its inputs.
//! The binary supplies the tick cadence, keyboard input and terminal
//! rendering, while tests drive [`session::GameSession::tick`] directly.

pub mod display;
pub mod entities;
pub mod geometry;
pub mod map;
pub mod session;
pub mod stage;
pub mod stage_data;
pub mod window;
