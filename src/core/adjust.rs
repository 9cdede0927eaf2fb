pub const FULL_RETIREMENT_AGE: u32 = 67;

const FULL_RETIREMENT_AGE_MONTHS: f64 = FULL_RETIREMENT_AGE as f64 * 12.0;
const REDUCED_RATE_MONTHS: f64 = 36.0;
const DELAYED_CREDIT_PER_MONTH: f64 = 2.0 / 3.0 / 100.0;
const EARLY_REDUCTION_PER_MONTH: f64 = 5.0 / 9.0 / 100.0;
const EXTENDED_REDUCTION_PER_MONTH: f64 = 5.0 / 12.0 / 100.0;

// Late claims earn 2/3% per month; early claims lose 5/9% for the first 36 months, 5/12% after.
pub fn adjust_benefit(reference_monthly_benefit: f64, claim_age: f64) -> f64 {
    let months_delta = claim_age * 12.0 - FULL_RETIREMENT_AGE_MONTHS;

    if months_delta > 0.0 {
        reference_monthly_benefit * (1.0 + months_delta * DELAYED_CREDIT_PER_MONTH)
    } else if months_delta < 0.0 {
        let adjustment = if months_delta >= -REDUCED_RATE_MONTHS {
            months_delta * EARLY_REDUCTION_PER_MONTH
        } else {
            -REDUCED_RATE_MONTHS * EARLY_REDUCTION_PER_MONTH
                + (months_delta + REDUCED_RATE_MONTHS) * EXTENDED_REDUCTION_PER_MONTH
        };
        reference_monthly_benefit * (1.0 + adjustment)
    } else {
        reference_monthly_benefit
    }
}
