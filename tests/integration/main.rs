//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the puppy against mock
//! adapters.  All tests run on the host with no robot required.

mod mock_hw;
mod puppy_flow_tests;
