// Tests for replaying yield distributions against the derived ONE

use common_constants::{
    BILLION_TOKENS, DEFAULT_AUDIT_ROUNDS, MAX_AUDIT_ROUNDS, DEFAULT_INIT_TOTAL_SUPPLY, DEFAULT_MAX_EPSILON,
    DEFAULT_MAX_TOTAL_TOKENS, DEFAULT_MIN_COLLATERAL_RATIO, DEFAULT_TOTAL_YIELD,
};
use common_distribution::{
    audit, check_assumptions, equal_split_schedule, log2_global_bound, log2_round_bound,
    AuditParams, Deployment,
};
use common_errors::DerivationError;
use common_math::{derive, Bounds};

fn default_params() -> AuditParams {
    let bounds = Bounds::new(
        DEFAULT_MAX_TOTAL_TOKENS,
        DEFAULT_MIN_COLLATERAL_RATIO,
        DEFAULT_MAX_EPSILON,
    )
    .unwrap();
    AuditParams::from_derivation(&derive(&bounds).unwrap())
}

fn default_deployment() -> Deployment {
    Deployment {
        init_total_supply: DEFAULT_INIT_TOTAL_SUPPLY,
        total_yield: DEFAULT_TOTAL_YIELD,
    }
}

// ============== PARAMS ==============

#[test]
fn test_params_from_derivation() {
    let params = default_params();

    assert_eq!(params.max_total_tokens, DEFAULT_MAX_TOTAL_TOKENS);
    assert_eq!(params.max_total_to_collateral_ratio, 2.0);
    assert_eq!(params.max_epsilon, 0.5);
    assert_eq!(params.one_exponent, 47);
    assert_eq!(params.max_gamma(), 2.0);
}

#[test]
fn test_deployment_circulating_supply() {
    let deployment = default_deployment();

    assert_eq!(deployment.init_circulating_supply(), 6_300_000_000 * 10u128.pow(18));
    assert!((deployment.total_to_circulating_ratio() - 1.587_301_587_301_587).abs() < 1e-12);
}

// ============== SCHEDULE ==============

#[test]
fn test_equal_split_single_round() {
    assert_eq!(equal_split_schedule(1_000, 1).unwrap(), vec![1_000]);
}

#[test]
fn test_equal_split_remainder_goes_last() {
    // 10 / 3 = 3, 7 / 2 = 3, 4 / 1 = 4
    assert_eq!(equal_split_schedule(10, 3).unwrap(), vec![3, 3, 4]);
}

#[test]
fn test_equal_split_drains_pool() {
    for rounds in DEFAULT_AUDIT_ROUNDS {
        let schedule = equal_split_schedule(DEFAULT_TOTAL_YIELD, rounds).unwrap();

        assert_eq!(schedule.len(), rounds as usize);
        assert_eq!(schedule.iter().sum::<u128>(), DEFAULT_TOTAL_YIELD);
    }
}

#[test]
fn test_equal_split_zero_rounds() {
    assert_eq!(
        equal_split_schedule(1_000, 0),
        Err(DerivationError::InvalidRounds(0))
    );
}

#[test]
fn test_equal_split_round_limit() {
    let schedule = equal_split_schedule(DEFAULT_TOTAL_YIELD, MAX_AUDIT_ROUNDS).unwrap();
    assert_eq!(schedule.len(), MAX_AUDIT_ROUNDS as usize);

    assert_eq!(
        equal_split_schedule(DEFAULT_TOTAL_YIELD, MAX_AUDIT_ROUNDS + 1),
        Err(DerivationError::InvalidRounds(MAX_AUDIT_ROUNDS + 1))
    );
    assert_eq!(
        equal_split_schedule(DEFAULT_TOTAL_YIELD, u32::MAX),
        Err(DerivationError::InvalidRounds(u32::MAX))
    );
}

#[test]
fn test_audit_rejects_too_many_rounds() {
    assert_eq!(
        audit(&default_deployment(), &default_params(), u32::MAX),
        Err(DerivationError::InvalidRounds(u32::MAX))
    );
}

// ============== BOUNDS ==============

#[test]
fn test_log2_global_bound_default() {
    let log2_global = log2_global_bound(&default_params());

    assert!((log2_global - 253.029_997_198_330_1).abs() < 1e-9);
}

#[test]
fn test_log2_round_bound_after_full_payout() {
    let deployment = default_deployment();

    let log2_round = log2_round_bound(DEFAULT_TOTAL_YIELD, &deployment, &default_params());
    assert!((log2_round - 250.839_201_291_564_6).abs() < 1e-9);
}

#[test]
fn test_log2_round_bound_grows_with_distribution() {
    let deployment = default_deployment();
    let params = default_params();

    let before = log2_round_bound(0, &deployment, &params);
    let after = log2_round_bound(BILLION_TOKENS, &deployment, &params);
    assert!(after > before);
}

// ============== ASSUMPTIONS ==============

#[test]
fn test_assumptions_hold_for_default_deployment() {
    assert_eq!(check_assumptions(&default_deployment(), &default_params()), Ok(()));
}

#[test]
fn test_assumption_supply_too_large() {
    let deployment = Deployment {
        init_total_supply: DEFAULT_MAX_TOTAL_TOKENS + 1,
        total_yield: DEFAULT_TOTAL_YIELD,
    };

    assert!(matches!(
        check_assumptions(&deployment, &default_params()),
        Err(DerivationError::BrokenAssumption(_))
    ));
}

#[test]
fn test_assumption_ratio_too_large() {
    // T / C = 10 / 4 = 2.5 > 2
    let deployment = Deployment {
        init_total_supply: 10 * BILLION_TOKENS,
        total_yield: 6 * BILLION_TOKENS,
    };

    assert!(matches!(
        check_assumptions(&deployment, &default_params()),
        Err(DerivationError::BrokenAssumption(_))
    ));
}

#[test]
fn test_assumption_yield_consumes_supply() {
    let deployment = Deployment {
        init_total_supply: BILLION_TOKENS,
        total_yield: BILLION_TOKENS,
    };

    assert!(matches!(
        check_assumptions(&deployment, &default_params()),
        Err(DerivationError::BrokenAssumption(_))
    ));
}

// ============== AUDIT ==============

#[test]
fn test_audit_default_rounds() {
    let deployment = default_deployment();
    let params = default_params();

    for rounds in DEFAULT_AUDIT_ROUNDS {
        let result = audit(&deployment, &params, rounds).unwrap();

        assert_eq!(result.rounds.len(), rounds as usize);
        assert!(result.log2_global_bound < 256.0);

        let last = result.rounds.last().unwrap();
        assert_eq!(last.total_distributed, DEFAULT_TOTAL_YIELD);
        assert!((last.log2_round_bound - 250.839_201_291_564_6).abs() < 1e-9);

        for pair in result.rounds.windows(2) {
            assert!(pair[0].log2_round_bound <= pair[1].log2_round_bound);
            assert!(pair[1].log2_round_bound <= result.log2_global_bound);
        }
    }
}

#[test]
fn test_audit_rejects_overflowing_one() {
    let params = AuditParams {
        one_exponent: 48,
        ..default_params()
    };

    assert!(matches!(
        audit(&default_deployment(), &params, 10),
        Err(DerivationError::Overflow { .. })
    ));
}

#[test]
fn test_audit_deployment_at_limits() {
    // T = max T and T / C = max T / C: the last round reaches the global bound
    let deployment = Deployment {
        init_total_supply: DEFAULT_MAX_TOTAL_TOKENS,
        total_yield: DEFAULT_MAX_TOTAL_TOKENS / 2,
    };
    let params = default_params();

    assert_eq!(check_assumptions(&deployment, &params), Ok(()));
    assert_eq!(
        log2_round_bound(deployment.total_yield, &deployment, &params),
        log2_global_bound(&params)
    );

    for rounds in [1, 24] {
        assert!(matches!(
            audit(&deployment, &params, rounds),
            Err(DerivationError::BrokenAssumption(_))
        ));
    }
}
