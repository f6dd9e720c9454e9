// # Requirement Implementations
//
// Built-in requirement kinds. New kinds implement `Requirement` and register
// a `RequirementFactory` with the `RequirementRegistry`.

pub mod replication;

pub use replication::{Replication, ReplicationFactory};
