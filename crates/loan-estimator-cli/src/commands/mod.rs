pub mod applicant;
pub mod simulate;
