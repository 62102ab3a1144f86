//! Level Rate Table
//!
//! Passive income rate (profit per hour) by player level. Levels are
//! client-advanced; the server only looks rates up.

/// Profit per hour indexed by level.
///
/// Index 0 is unused (levels start at 1). Levels past the end of the
/// table earn the last entry's rate rather than failing.
pub const PROFIT_TABLE: [u64; 16] = [
    0,              // unused
    0,              // level 1
    50,             // level 2
    200,            // level 3
    750,            // level 4
    2_500,          // level 5
    10_000,         // level 6
    40_000,         // level 7
    150_000,        // level 8
    600_000,        // level 9
    2_500_000,      // level 10
    12_000_000,     // level 11
    60_000_000,     // level 12
    300_000_000,    // level 13
    2_000_000_000,  // level 14
    15_000_000_000, // level 15
];

/// Look up the passive income rate for a level.
///
/// Out-of-range levels clamp to the last table entry.
#[inline]
pub fn profit_per_hour(level: u32) -> u64 {
    let index = (level as usize).min(PROFIT_TABLE.len() - 1);
    PROFIT_TABLE[index]
}

// =============================================================================
// TESTS
// =============================================================================
