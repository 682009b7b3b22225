pub mod applicant;
pub mod error;
pub mod types;

#[cfg(feature = "eligibility")]
pub mod eligibility;

#[cfg(feature = "pricing")]
pub mod pricing;

#[cfg(feature = "schedule")]
pub mod emi;

#[cfg(feature = "schedule")]
pub mod schedule;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use applicant::Applicant;
pub use error::LoanError;
pub use types::*;

/// Standard result type for all loan-estimator operations
pub type LoanResult<T> = Result<T, LoanError>;
