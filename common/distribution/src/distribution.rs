use core::f64::consts::{LOG10_2, LOG10_E};

use common_constants::{MAX_AUDIT_ROUNDS, UINT256_BITS};
use common_errors::DerivationError;
use common_math::Derivation;
use log::debug;

/// Supply figures of an actual deployment, in the smallest token unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub init_total_supply: u128,
    /// Part of the total supply held back and paid out as yield.
    pub total_yield: u128,
}

impl Deployment {
    /// `C`, the supply circulating right after deployment.
    pub fn init_circulating_supply(&self) -> u128 {
        self.init_total_supply.saturating_sub(self.total_yield)
    }

    pub fn total_to_circulating_ratio(&self) -> f64 {
        self.init_total_supply as f64 / self.init_circulating_supply() as f64
    }
}

/// The limits the contract was built against, together with the chosen `ONE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuditParams {
    pub max_total_tokens: u128,
    pub max_total_to_collateral_ratio: f64,
    pub max_epsilon: f64,
    pub one_exponent: u32,
}

impl AuditParams {
    pub fn from_derivation(derivation: &Derivation) -> Self {
        Self {
            max_total_tokens: derivation.bounds.max_total_tokens,
            max_total_to_collateral_ratio: derivation.bounds.max_total_to_collateral_ratio(),
            max_epsilon: derivation.bounds.max_epsilon,
            one_exponent: derivation.constant.exponent,
        }
    }

    /// `γ = 1 / (1 - ε)`
    pub fn max_gamma(&self) -> f64 {
        1.0 / (1.0 - self.max_epsilon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundBound {
    /// Zero-based round index.
    pub round: u32,
    pub amount: u128,
    pub total_distributed: u128,
    pub log2_round_bound: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Audit {
    pub deployment: Deployment,
    pub log2_global_bound: f64,
    pub rounds: Vec<RoundBound>,
}

/// Mirrors the guard the contract runs before every distribution.
///
/// **Scope**: Rejects deployments that already sit outside the limits `ONE`
/// was derived for.
///
/// # Errors
/// - `BrokenAssumption` if the yield is not smaller than the total supply,
///   the total supply exceeds the assumed maximum, or `T / C` exceeds the
///   assumed maximum ratio.
pub fn check_assumptions(
    deployment: &Deployment,
    params: &AuditParams,
) -> Result<(), DerivationError> {
    if deployment.total_yield >= deployment.init_total_supply {
        return Err(DerivationError::BrokenAssumption(format!(
            "yield {} leaves no circulating supply out of {}",
            deployment.total_yield, deployment.init_total_supply
        )));
    }
    if deployment.init_total_supply > params.max_total_tokens {
        return Err(DerivationError::BrokenAssumption(format!(
            "total supply {} above assumed maximum {}",
            deployment.init_total_supply, params.max_total_tokens
        )));
    }
    let ratio = deployment.total_to_circulating_ratio();
    if ratio > params.max_total_to_collateral_ratio {
        return Err(DerivationError::BrokenAssumption(format!(
            "total to circulating ratio {} above assumed maximum {}",
            ratio, params.max_total_to_collateral_ratio
        )));
    }
    Ok(())
}

/// Splits the yield pool equally over the remaining rounds, recomputing the
/// share every round so that the last one drains the remainder.
///
/// # Errors
/// - `InvalidRounds` for zero rounds or more than `MAX_AUDIT_ROUNDS`.
pub fn equal_split_schedule(total_yield: u128, rounds: u32) -> Result<Vec<u128>, DerivationError> {
    if rounds == 0 || rounds > MAX_AUDIT_ROUNDS {
        return Err(DerivationError::InvalidRounds(rounds));
    }

    let mut undistributed = total_yield;
    let schedule = (0..rounds)
        .map(|round| {
            let amount = undistributed / u128::from(rounds - round);
            undistributed -= amount;
            amount
        })
        .collect();

    Ok(schedule)
}

/// Bound on the largest computation for any deployment within the limits.
///
/// **Formula**: `(log10(e) * γ * (max(T/C) - 1) + log10(ONE) + log10(max T)) / log10(2)`
pub fn log2_global_bound(params: &AuditParams) -> f64 {
    (LOG10_E * params.max_gamma() * (params.max_total_to_collateral_ratio - 1.0)
        + params.one_exponent as f64
        + (params.max_total_tokens as f64).log10())
        / LOG10_2
}

/// Bound on the largest computation once `total_distributed` has been paid
/// out of a given deployment.
///
/// **Formula**: `(log10(e) * γ * distributed / C + log10(ONE) + log10(T)) / log10(2)`
pub fn log2_round_bound(
    total_distributed: u128,
    deployment: &Deployment,
    params: &AuditParams,
) -> f64 {
    let distributed_ratio =
        total_distributed as f64 / deployment.init_circulating_supply() as f64;

    (LOG10_E * params.max_gamma() * distributed_ratio
        + params.one_exponent as f64
        + (deployment.init_total_supply as f64).log10())
        / LOG10_2
}

/// Replays an equal-split payout of the whole yield pool over `rounds`
/// rounds and checks every round against the global bound.
///
/// **Scope**: Audits a concrete deployment against the derived `ONE`.
///
/// **Goal**: Confirm that `log2(round bound) < log2(global bound) < 256`
/// holds after every round.
pub fn audit(
    deployment: &Deployment,
    params: &AuditParams,
    rounds: u32,
) -> Result<Audit, DerivationError> {
    check_assumptions(deployment, params)?;

    let log2_global = log2_global_bound(params);
    if log2_global >= UINT256_BITS as f64 {
        return Err(DerivationError::Overflow { bits: log2_global });
    }

    let schedule = equal_split_schedule(deployment.total_yield, rounds)?;

    let mut total_distributed = 0u128;
    let mut bounds = Vec::with_capacity(schedule.len());
    for (round, amount) in (0u32..).zip(schedule) {
        total_distributed += amount;
        let log2_round = log2_round_bound(total_distributed, deployment, params);

        debug!(
            "round {}: distributed {} of {}, log2 bound {} < {}",
            round, total_distributed, deployment.total_yield, log2_round, log2_global
        );
        if log2_round >= log2_global {
            return Err(DerivationError::BrokenAssumption(format!(
                "round {} bound 2 ** {} reaches global bound 2 ** {}",
                round, log2_round, log2_global
            )));
        }

        bounds.push(RoundBound {
            round,
            amount,
            total_distributed,
            log2_round_bound: log2_round,
        });
    }

    Ok(Audit {
        deployment: *deployment,
        log2_global_bound: log2_global,
        rounds: bounds,
    })
}
