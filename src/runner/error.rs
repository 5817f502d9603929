//! Runtime errors reported by a runner.

use thiserror::Error;

/// The only condition a runner can detect at run time. Contract, membership
/// and force-marker violations are compile errors instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunnerError {
    #[error("Machine '{machine}' has no active state; a lifecycle hook panicked during a switch")]
    Vacant { machine: &'static str },
}
