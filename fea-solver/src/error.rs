//! Error types for FEA Solver

use thiserror::Error;

/// Main error type for FEA operations
#[derive(Error, Debug)]
pub enum FEAError {
    #[error("Node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("Member '{0}' not found in model")]
    MemberNotFound(String),

    #[error("Material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("Section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("Load combination '{0}' not found in model")]
    LoadCombinationNotFound(String),

    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Model is unstable: smallest scaled pivot {pivot:.3e} is below {tolerance:.1e}; check supports")]
    Unstable { pivot: f64, tolerance: f64 },

    #[error("Stiffness matrix could not be factored for combination '{0}'")]
    SingularMatrix(String),

    #[error("Every degree of freedom is restrained; nothing to solve")]
    NoFreeDofs,

    #[error("Member '{0}' has zero length")]
    ZeroLengthMember(String),

    #[error("Nodes '{first}' and '{second}' coincide on member '{member}'")]
    CoincidentNodes {
        member: String,
        first: String,
        second: String,
    },

    #[error("Load on member '{member}' lies outside the member: {reason}")]
    LoadOutsideMember { member: String, reason: String },

    #[error("Distributed load on member '{member}' ends at {x2} before it starts at {x1}")]
    ReversedLoad { member: String, x1: f64, x2: f64 },

    #[error("Unknown load direction '{0}' (expected Fx, Fy or Fz)")]
    UnknownDirection(String),

    #[error("Model not analyzed - run analyze() first")]
    NotAnalyzed,
}

/// Result type for FEA operations
pub type FEAResult<T> = Result<T, FEAError>;
