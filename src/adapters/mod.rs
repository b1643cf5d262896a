//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements              | Connects to                 |
//! |------------|-------------------------|-----------------------------|
//! | `log_sink` | EventSink               | `log` facade                |
//! | `random`   | RandomSource            | `rand::rngs::StdRng`        |
//! | `sim`      | PuppyHardware (all I/O) | Scripted in-memory puppy    |
//! | `time`     | Clock                   | `std::time` / virtual clock |

pub mod log_sink;
pub mod random;
pub mod sim;
pub mod time;
