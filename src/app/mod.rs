//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the puppy's orchestration: the startup sequence,
//! the per-tick monitor and the behavior FSM.  All interaction with the
//! robot happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without a real puppy.

pub mod events;
pub mod ports;
pub mod service;
