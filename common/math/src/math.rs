use core::f64::consts::LN_10;

use common_constants::{CROSS_CHECK_TOLERANCE, LOG10_MAX_UINT256, UINT256_BITS};
use common_errors::DerivationError;
use log::{debug, warn};
use num_bigint::BigUint;
use num_traits::{FromPrimitive, One, ToPrimitive};

/// Assumed limits of the token contract the scaling constant is derived for.
///
/// **Scope**: Holds the three parameters the growth function bound depends on.
///
/// **Goal**: Keep the worst-case scenario explicit instead of hiding it in globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Upper bound on total supply, in the smallest token unit.
    pub max_total_tokens: u128,
    /// Lower bound on collateral (circulating) over total supply, in (0, 1].
    pub min_collateral_ratio: f64,
    /// Upper bound on the excluded share of circulating supply, in [0, 1).
    pub max_epsilon: f64,
}

impl Bounds {
    pub fn new(
        max_total_tokens: u128,
        min_collateral_ratio: f64,
        max_epsilon: f64,
    ) -> Result<Self, DerivationError> {
        let bounds = Self {
            max_total_tokens,
            min_collateral_ratio,
            max_epsilon,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Rejects parameters for which the growth function bound is undefined.
    /// NaN fails every comparison and is rejected as well.
    pub fn validate(&self) -> Result<(), DerivationError> {
        if self.max_total_tokens == 0 {
            return Err(DerivationError::InvalidTotalTokens(self.max_total_tokens));
        }
        if !(self.min_collateral_ratio > 0.0 && self.min_collateral_ratio <= 1.0) {
            return Err(DerivationError::InvalidCollateralRatio(
                self.min_collateral_ratio,
            ));
        }
        if !(self.max_epsilon >= 0.0 && self.max_epsilon < 1.0) {
            return Err(DerivationError::InvalidEpsilon(self.max_epsilon));
        }
        Ok(())
    }

    pub fn max_total_to_collateral_ratio(&self) -> f64 {
        max_total_to_collateral_ratio(self.min_collateral_ratio)
    }

    pub fn max_total_tokens_f64(&self) -> f64 {
        self.max_total_tokens as f64
    }
}

/// Both forms of the growth function bound, plus how far they disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundEstimate {
    pub ln_f_upper_bound: f64,
    pub growth_upper_bound: f64,
    /// Log-domain result, authoritative.
    pub max_log10_one: f64,
    /// Direct-domain result, kept as a cross-check.
    pub max_one: f64,
    pub divergence: f64,
}

/// The chosen power of ten.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingConstant {
    pub exponent: u32,
    pub one: BigUint,
}

impl ScalingConstant {
    pub fn from_max_log10(max_log10_one: f64) -> Result<Self, DerivationError> {
        let exponent = select_one_exponent(max_log10_one)?;
        Ok(Self {
            exponent,
            one: pow10(exponent),
        })
    }

    pub fn one_f64(&self) -> f64 {
        10f64.powi(self.exponent as i32)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub worst_case_product: BigUint,
    pub log2_product: f64,
    /// Bits left unused under the 256-bit ceiling.
    pub headroom_bits: f64,
}

impl Verification {
    pub fn worst_case_product_f64(&self) -> f64 {
        self.worst_case_product.to_f64().unwrap_or(f64::INFINITY)
    }
}

/// Full result of a derivation, in the order the steps ran.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub bounds: Bounds,
    pub estimate: BoundEstimate,
    pub constant: ScalingConstant,
    pub verification: Verification,
}

// ============== BOUND CALCULATOR ==============

/// `T / C` at its largest, which is where the collateral ratio is smallest.
pub fn max_total_to_collateral_ratio(min_collateral_ratio: f64) -> f64 {
    1.0 / min_collateral_ratio
}

/// Natural logarithm of the supremum of `f`.
///
/// `max(f)` depends not on the absolute values of `T` and `C`, only on their
/// ratio.
///
/// **Formula**: `ln(max f) = (T/C - 1) / (1 - ε)`
///
/// # Errors
/// - `NonFiniteBound` when `ε` is close enough to 1 for the quotient to
///   blow up.
pub fn ln_f_upper_bound(t_over_c: f64, max_epsilon: f64) -> Result<f64, DerivationError> {
    let ln_bound = (t_over_c - 1.0) / (1.0 - max_epsilon);
    if !ln_bound.is_finite() {
        return Err(DerivationError::NonFiniteBound(ln_bound));
    }
    Ok(ln_bound)
}

/// Supremum of `f` itself, `exp((T/C - 1) / (1 - ε))`.
pub fn f_upper_bound(t_over_c: f64, max_epsilon: f64) -> Result<f64, DerivationError> {
    let ln_bound = ln_f_upper_bound(t_over_c, max_epsilon)?;
    let bound = ln_bound.exp();
    if !bound.is_finite() {
        return Err(DerivationError::NonFiniteBound(ln_bound));
    }
    Ok(bound)
}

/// Largest `log10(ONE)` such that `max(f) * ONE * max(T) <= 2^256 - 1`,
/// computed entirely in the log domain.
///
/// **Formula**: `log10(2^256 - 1) - (ln(max f) / ln(10) + log10(max T))`
pub fn max_log10_one(bounds: &Bounds) -> Result<f64, DerivationError> {
    let ln_bound = ln_f_upper_bound(bounds.max_total_to_collateral_ratio(), bounds.max_epsilon)?;
    Ok(LOG10_MAX_UINT256 - (ln_bound / LN_10 + bounds.max_total_tokens_f64().log10()))
}

/// Largest `ONE` such that `max(f) * ONE * max(T) <= 2^256 - 1`, computed
/// directly. Returns the bound on `f` alongside since the verifier needs it.
pub fn max_one(bounds: &Bounds) -> Result<(f64, f64), DerivationError> {
    let growth = f_upper_bound(bounds.max_total_to_collateral_ratio(), bounds.max_epsilon)?;
    let ceiling = 2f64.powi(UINT256_BITS as i32);
    Ok((ceiling / (growth * bounds.max_total_tokens_f64()), growth))
}

/// Relative difference between `10^max_log10_one` and `max_one`.
pub fn bound_divergence(max_log10_one: f64, max_one: f64) -> f64 {
    let from_log = 10f64.powf(max_log10_one);
    ((from_log - max_one) / max_one).abs()
}

/// NaN counts as a disagreement.
pub fn bounds_agree(divergence: f64) -> bool {
    divergence <= CROSS_CHECK_TOLERANCE
}

/// Compares both forms of the bound and warns when they drift apart. The
/// log-domain value stays authoritative either way.
pub fn cross_check(max_log10_one: f64, max_one: f64) -> f64 {
    let divergence = bound_divergence(max_log10_one, max_one);
    if !bounds_agree(divergence) {
        warn!(
            "log-domain and direct bounds diverge by {:e}, using log-domain value {}",
            divergence, max_log10_one
        );
    }
    divergence
}

pub fn estimate(bounds: &Bounds) -> Result<BoundEstimate, DerivationError> {
    bounds.validate()?;

    let ln_bound = ln_f_upper_bound(bounds.max_total_to_collateral_ratio(), bounds.max_epsilon)?;
    let max_log10 = max_log10_one(bounds)?;
    let (max_direct, growth) = max_one(bounds)?;

    debug!(
        "ln(max f) = {}, max f = {}, max log10(ONE) = {}, max ONE = {}",
        ln_bound, growth, max_log10, max_direct
    );
    let divergence = cross_check(max_log10, max_direct);

    Ok(BoundEstimate {
        ln_f_upper_bound: ln_bound,
        growth_upper_bound: growth,
        max_log10_one: max_log10,
        max_one: max_direct,
        divergence,
    })
}

// ============== CONSTANT SELECTOR ==============

/// Rounds the theoretical exponent down so that `ONE` is an exact power of
/// ten that still sits under the overflow boundary.
pub fn select_one_exponent(max_log10_one: f64) -> Result<u32, DerivationError> {
    let floor = max_log10_one.floor();
    if !floor.is_finite() || floor < 0.0 || floor > u32::MAX as f64 {
        return Err(DerivationError::NoSafeScale(max_log10_one));
    }
    Ok(floor as u32)
}

pub fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}

// ============== VERIFIER ==============

/// `2^256 - 1`, exact.
pub fn max_uint256() -> BigUint {
    (BigUint::one() << UINT256_BITS) - 1u32
}

/// `ceil(max(f) * (ONE * max(T)))`.
///
/// `ONE * max(T)` is formed exactly and rounded to a float once; the
/// rounded-up float product is then taken back into exact integers.
pub fn worst_case_product(
    growth_upper_bound: f64,
    one: &BigUint,
    max_total_tokens: u128,
) -> Result<BigUint, DerivationError> {
    let scaled_supply = (one * BigUint::from(max_total_tokens))
        .to_f64()
        .unwrap_or(f64::INFINITY);
    let product = (growth_upper_bound * scaled_supply).ceil();
    if product.is_infinite() {
        return Err(DerivationError::Overflow {
            bits: f64::INFINITY,
        });
    }

    BigUint::from_f64(product)
        .ok_or_else(|| DerivationError::NonFiniteBound(growth_upper_bound.ln()))
}

/// Checks that the largest computation fits strictly under `2^256 - 1`.
pub fn verify(
    growth_upper_bound: f64,
    constant: &ScalingConstant,
    max_total_tokens: u128,
) -> Result<Verification, DerivationError> {
    let product = worst_case_product(growth_upper_bound, &constant.one, max_total_tokens)?;
    let log2_product = product.to_f64().map_or(f64::INFINITY, f64::log2);

    if product >= max_uint256() {
        return Err(DerivationError::Overflow { bits: log2_product });
    }

    debug!(
        "worst-case computation {} = 2 ** {} with ONE = 10 ** {}",
        product, log2_product, constant.exponent
    );

    Ok(Verification {
        worst_case_product: product,
        log2_product,
        headroom_bits: UINT256_BITS as f64 - log2_product,
    })
}

/// Runs the bound calculator, the constant selector and the verifier, in
/// that order, once.
pub fn derive(bounds: &Bounds) -> Result<Derivation, DerivationError> {
    let estimate = estimate(bounds)?;
    let constant = ScalingConstant::from_max_log10(estimate.max_log10_one)?;
    let verification = verify(
        estimate.growth_upper_bound,
        &constant,
        bounds.max_total_tokens,
    )?;

    Ok(Derivation {
        bounds: *bounds,
        estimate,
        constant,
        verification,
    })
}
