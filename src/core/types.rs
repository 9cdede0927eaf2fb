use serde::Serialize;

use super::error::InvalidParameters;

pub const MAX_SUPPORTED_AGE: u32 = 130;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub reference_monthly_benefit: f64,
    pub annual_return_rate: f64,
    pub early_claim_age: u32,
    pub late_claim_age: u32,
    pub max_age: u32,
}

impl SimulationParameters {
    pub fn new(
        reference_monthly_benefit: f64,
        annual_return_rate: f64,
        early_claim_age: u32,
        late_claim_age: u32,
        max_age: u32,
    ) -> Result<Self, InvalidParameters> {
        let params = Self {
            reference_monthly_benefit,
            annual_return_rate,
            early_claim_age,
            late_claim_age,
            max_age,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), InvalidParameters> {
        if self.early_claim_age >= self.late_claim_age {
            return Err(InvalidParameters::ClaimAgeOrder {
                early: self.early_claim_age,
                late: self.late_claim_age,
            });
        }

        if !self.annual_return_rate.is_finite() || self.annual_return_rate <= -1.0 {
            return Err(InvalidParameters::ReturnRate(self.annual_return_rate));
        }

        if !self.reference_monthly_benefit.is_finite() || self.reference_monthly_benefit < 0.0 {
            return Err(InvalidParameters::ReferenceBenefit(
                self.reference_monthly_benefit,
            ));
        }

        if self.max_age < self.late_claim_age {
            return Err(InvalidParameters::MaxAgeBelowLateClaim {
                max_age: self.max_age,
                late: self.late_claim_age,
            });
        }

        if self.max_age > MAX_SUPPORTED_AGE {
            return Err(InvalidParameters::MaxAgeTooLarge {
                max_age: self.max_age,
                limit: MAX_SUPPORTED_AGE,
            });
        }

        Ok(())
    }

    pub fn min_claim_age(&self) -> u32 {
        self.early_claim_age.min(self.late_claim_age)
    }
}

pub type Trajectory = Vec<f64>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakevenResult {
    pub start_age: u32,
    pub early_claim_age: u32,
    pub late_claim_age: u32,
    pub early_monthly_benefit: f64,
    pub late_monthly_benefit: f64,
    pub early_trajectory: Trajectory,
    pub late_trajectory: Trajectory,
    pub breakeven_age: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryRow {
    pub age: u32,
    pub early_value: f64,
    pub late_value: f64,
}

impl BreakevenResult {
    pub fn ages(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.early_trajectory.len()).map(move |i| self.start_age + i as u32)
    }

    pub fn rows(&self) -> Vec<TrajectoryRow> {
        self.ages()
            .zip(self.early_trajectory.iter().zip(&self.late_trajectory))
            .map(|(age, (&early_value, &late_value))| TrajectoryRow {
                age,
                early_value,
                late_value,
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        match self.breakeven_age {
            Some(age) => format!("The breakeven age is approximately: {age}"),
            None => "Breakeven not reached by the maximum age considered.".to_string(),
        }
    }
}
