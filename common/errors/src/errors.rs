use thiserror::Error;

pub static ERROR_INVALID_TOTAL_TOKENS: &str = "Maximum total tokens must be a positive amount.";

pub static ERROR_INVALID_COLLATERAL_RATIO: &str = "Minimum collateral ratio must be in (0, 1].";

pub static ERROR_INVALID_EPSILON: &str = "Maximum epsilon must be in [0, 1).";

pub static ERROR_NON_FINITE_BOUND: &str = "Growth upper bound is not finite for these parameters.";

pub static ERROR_NO_SAFE_SCALE: &str = "No non-negative power of ten fits below the uint256 ceiling.";

pub static ERROR_OVERFLOW: &str = "Worst-case computation does not fit below 2 ** 256 - 1.";

pub static ERROR_BROKEN_ASSUMPTION: &str = "Broken assumption";

pub static ERROR_INVALID_ROUNDS: &str = "A distribution schedule needs between 1 and MAX_AUDIT_ROUNDS rounds.";

/// Every way a derivation can fail. All of them are fatal for the caller:
/// the input bounds are either outside the domain of the growth function or
/// the chosen constant would overflow the contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DerivationError {
    #[error("{} Got {}.", ERROR_INVALID_TOTAL_TOKENS, .0)]
    InvalidTotalTokens(u128),

    #[error("{} Got {}.", ERROR_INVALID_COLLATERAL_RATIO, .0)]
    InvalidCollateralRatio(f64),

    #[error("{} Got {}.", ERROR_INVALID_EPSILON, .0)]
    InvalidEpsilon(f64),

    #[error("{} ln(f) = {}.", ERROR_NON_FINITE_BOUND, .0)]
    NonFiniteBound(f64),

    #[error("{} max log10(ONE) = {}.", ERROR_NO_SAFE_SCALE, .0)]
    NoSafeScale(f64),

    #[error("{} Needs {} bits.", ERROR_OVERFLOW, .bits)]
    Overflow { bits: f64 },

    #[error("{}: {}", ERROR_BROKEN_ASSUMPTION, .0)]
    BrokenAssumption(String),

    #[error("{} Got {}.", ERROR_INVALID_ROUNDS, .0)]
    InvalidRounds(u32),
}
