//! Domain bounds and exit codes.

/// Largest index the device will address.
///
/// F(92) = 7,540,113,804,746,346,429 is well inside `u64`, and every
/// intermediate term the fast doubling loop touches for `k <= 92` stays
/// at or below F(93), which still fits.
pub const MAX_INDEX: u64 = 92;

/// Largest index whose value fits the 128-bit layout.
///
/// F(186) = 332,825,110,087,067,562,321,196,029,789,634,457,848.
pub const MAX_WIDE_INDEX: u64 = 186;

/// Precomputed Fibonacci values for k = 0..=92.
pub const FIB_TABLE: [u64; 93] = {
    let mut table = [0u64; 93];
    table[1] = 1;
    let mut i = 2;
    while i < 93 {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
};

/// Process exit codes used by the benchmark client.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error (I/O, busy device).
    pub const ERROR_GENERIC: i32 = 1;
    /// Engines disagreed during a cross-check sweep.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
