use std::io::{self, Write};

use common_constants::{BILLION_TOKENS, UINT256_BITS, WAD};
use common_distribution::Audit;
use common_math::Derivation;

const SIGNIFICANT_DIGITS: usize = 9;

/// Formats like printf's `%.9g`: nine significant digits, trailing zeros
/// dropped, scientific notation outside `[1e-4, 1e9)`.
pub fn general(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if (-4..SIGNIFICANT_DIGITS as i32).contains(&exponent) {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    }
}

fn trim_fraction(number: &str) -> String {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        number.to_string()
    }
}

fn tokens(units: u128) -> String {
    general(units as f64 / WAD as f64)
}

/// Prints every step of the derivation so it can be checked by hand.
pub fn report_derivation(out: &mut impl Write, derivation: &Derivation) -> io::Result<()> {
    let bounds = &derivation.bounds;
    let estimate = &derivation.estimate;
    let constant = &derivation.constant;
    let verification = &derivation.verification;

    let max_t = bounds.max_total_tokens_f64();
    let one = general(constant.one_f64());
    let ceiling = general(2f64.powi(UINT256_BITS as i32));

    writeln!(
        out,
        "MAX_T         = {:?} billion tokens",
        max_t / BILLION_TOKENS as f64
    )?;
    writeln!(out, "MIN_C_OVER_T  = {}", general(bounds.min_collateral_ratio))?;
    writeln!(out, "MAX_ε         = {}", general(bounds.max_epsilon))?;

    writeln!(
        out,
        "MAX_ONE (more precise)        = {}",
        general(10f64.powf(estimate.max_log10_one))
    )?;
    writeln!(
        out,
        "MAX_ONE (clearer calculation) = {}",
        general(estimate.max_one)
    )?;

    writeln!(out, "Setting ONE = 10 ** {} = {}", constant.exponent, one)?;

    writeln!(out, "With ONE = {}:", one)?;
    writeln!(out, "max possible computation")?;
    writeln!(out, "  = max(f) * ONE * MAX_T")?;
    writeln!(
        out,
        "  = {} * {} * {}",
        general(estimate.growth_upper_bound),
        one,
        general(max_t)
    )?;
    writeln!(
        out,
        "  = {} = 2 ** {}",
        general(verification.worst_case_product_f64()),
        general(verification.log2_product)
    )?;
    writeln!(out, "  < {} = 2 ** {} - 1", ceiling, UINT256_BITS)?;
    writeln!(
        out,
        "Headroom: {} bits",
        general(verification.headroom_bits)
    )?;

    Ok(())
}

/// Prints one line per distribution round.
pub fn report_audit(out: &mut impl Write, audit: &Audit) -> io::Result<()> {
    writeln!(
        out,
        "Distributing {} tokens of yield out of {} tokens in {} rounds:",
        tokens(audit.deployment.total_yield),
        tokens(audit.deployment.init_total_supply),
        audit.rounds.len()
    )?;

    for round in &audit.rounds {
        writeln!(
            out,
            "  round {:>3}: +{} = {} tokens, log2(f_max) = {}",
            round.round + 1,
            tokens(round.amount),
            tokens(round.total_distributed),
            general(round.log2_round_bound)
        )?;
    }

    writeln!(
        out,
        "  every round < 2 ** {} < 2 ** {}",
        general(audit.log2_global_bound),
        UINT256_BITS
    )?;

    Ok(())
}
