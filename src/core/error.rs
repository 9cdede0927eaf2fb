use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParameters {
    #[error("The earlier starting age must be less than the later starting age.")]
    ClaimAgeOrder { early: u32, late: u32 },

    #[error("annual return rate must be finite and greater than -100%, got {}%", .0 * 100.0)]
    ReturnRate(f64),

    #[error("reference monthly benefit must be finite and non-negative, got {0}")]
    ReferenceBenefit(f64),

    #[error("maximum age {max_age} must be at least the later starting age {late}")]
    MaxAgeBelowLateClaim { max_age: u32, late: u32 },

    #[error("maximum age {max_age} exceeds the supported limit of {limit}")]
    MaxAgeTooLarge { max_age: u32, limit: u32 },
}
