// # Probe Implementations
//
// This module provides stock implementations of the probe traits.

pub mod default;
pub mod memory;

pub use default::DefaultProtocolProbe;
pub use memory::MemoryHostProbe;
