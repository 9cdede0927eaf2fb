use tracing::debug;

use super::adjust::adjust_benefit;
use super::error::InvalidParameters;
use super::types::{BreakevenResult, SimulationParameters, Trajectory};

const MONTHS_PER_YEAR: usize = 12;

#[derive(Debug, Clone, Copy)]
struct ClaimStream {
    claim_age: u32,
    monthly_benefit: f64,
    cumulative: f64,
}

impl ClaimStream {
    fn new(reference_monthly_benefit: f64, claim_age: u32) -> Self {
        Self {
            claim_age,
            monthly_benefit: adjust_benefit(reference_monthly_benefit, claim_age as f64),
            cumulative: 0.0,
        }
    }

    fn step_year(&mut self, age: u32, growth_factor: f64) -> f64 {
        if age < self.claim_age {
            return 0.0;
        }
        // Add the month's benefit, then compound the whole balance.
        for _ in 0..MONTHS_PER_YEAR {
            self.cumulative += self.monthly_benefit;
            self.cumulative *= growth_factor;
        }
        self.cumulative
    }
}

pub fn run_breakeven(
    reference_monthly_benefit: f64,
    annual_return_rate: f64,
    early_claim_age: u32,
    late_claim_age: u32,
    max_age: u32,
) -> Result<BreakevenResult, InvalidParameters> {
    let params = SimulationParameters::new(
        reference_monthly_benefit,
        annual_return_rate,
        early_claim_age,
        late_claim_age,
        max_age,
    )?;
    Ok(simulate(&params))
}

pub fn simulate(params: &SimulationParameters) -> BreakevenResult {
    let mut early = ClaimStream::new(params.reference_monthly_benefit, params.early_claim_age);
    let mut late = ClaimStream::new(params.reference_monthly_benefit, params.late_claim_age);
    let growth_factor = 1.0 + monthly_return(params.annual_return_rate);

    let start_age = params.min_claim_age();
    let len = params.max_age.saturating_sub(start_age) as usize + 1;
    let mut early_trajectory = Trajectory::with_capacity(len);
    let mut late_trajectory = Trajectory::with_capacity(len);

    for age in start_age..=params.max_age {
        early_trajectory.push(early.step_year(age, growth_factor));
        late_trajectory.push(late.step_year(age, growth_factor));
    }

    let breakeven_age = find_breakeven_age(
        &early_trajectory,
        &late_trajectory,
        start_age,
        params.late_claim_age,
    );

    debug!(
        benefit = params.reference_monthly_benefit,
        rate = params.annual_return_rate,
        early_claim_age = params.early_claim_age,
        late_claim_age = params.late_claim_age,
        max_age = params.max_age,
        ?breakeven_age,
        "breakeven simulation complete"
    );

    BreakevenResult {
        start_age,
        early_claim_age: params.early_claim_age,
        late_claim_age: params.late_claim_age,
        early_monthly_benefit: early.monthly_benefit,
        late_monthly_benefit: late.monthly_benefit,
        early_trajectory,
        late_trajectory,
        breakeven_age,
    }
}

fn monthly_return(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

fn find_breakeven_age(
    early: &[f64],
    late: &[f64],
    start_age: u32,
    late_claim_age: u32,
) -> Option<u32> {
    // Before the late claim begins its samples are zero and must not be compared.
    let first = late_claim_age.saturating_sub(start_age) as usize;
    early
        .iter()
        .zip(late)
        .enumerate()
        .skip(first)
        .find(|(_, (e, l))| l > e)
        .map(|(i, _)| start_age + i as u32)
}
