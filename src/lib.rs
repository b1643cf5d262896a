//! RoboPup behavior controller library.
//!
//! Exposes the puppy's domain logic and host adapters for the binary and
//! for integration testing.  Nothing in here talks to a real robot; the
//! hardware is reached only through the traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod counters;
pub mod error;
pub mod expression;
pub mod fsm;
pub mod motion;
pub mod timing;
