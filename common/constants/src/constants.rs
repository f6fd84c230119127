#![no_std]

/// Smallest-unit precision of the token (1 token = 10^18 units)
pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_PRECISION: u32 = 18;

pub const MILLION_TOKENS: u128 = 1_000_000 * WAD;
pub const BILLION_TOKENS: u128 = 1_000_000_000 * WAD;

/// Width of the contract's native unsigned integer
pub const UINT256_BITS: u32 = 256;

/// log10(2^256 - 1), the decimal magnitude of the uint256 ceiling
pub const LOG10_MAX_UINT256: f64 = 77.063_678_889_979_19;

/// Relative difference tolerated between the log-domain and the direct-domain bound
pub const CROSS_CHECK_TOLERANCE: f64 = 1e-9;

// Shipped scenario

/// Maximum total supply the contract is assumed to ever reach (20 billion tokens)
pub const DEFAULT_MAX_TOTAL_TOKENS: u128 = 20 * BILLION_TOKENS;

/// Minimum collateral (circulating) to total supply ratio (50%)
pub const DEFAULT_MIN_COLLATERAL_RATIO: f64 = 0.5;

/// Maximum share of circulating supply excluded from a distribution (50%)
pub const DEFAULT_MAX_EPSILON: f64 = 0.5;

/// Deployment replayed by the distribution audit
pub const DEFAULT_INIT_TOTAL_SUPPLY: u128 = 10 * BILLION_TOKENS;
pub const DEFAULT_TOTAL_YIELD: u128 = 3_700_000_000 * WAD;
/// Longest schedule the audit replays (monthly payouts over 100 years)
pub const MAX_AUDIT_ROUNDS: u32 = 1_200;

pub const DEFAULT_AUDIT_ROUNDS: [u32; 4] = [1, 10, 24, 100];
