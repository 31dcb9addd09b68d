//! Turning host counts into prefix lengths.
//!
//! Everything in here is a pure function over [`USABLE_HOSTS`].
use crate::helpe::*;

/// Largest block (smallest prefix) we are willing to hand out.
pub const MIN_PREFIX:   Prefix = 10;
pub const MAX_PREFIX:   Prefix = 32;
/// Point-to-point links never go through the table scan.
pub const LINK_PREFIX:  Prefix = 30;
/// What a `/10` can hold, i.e. the biggest satisfiable request.
pub const MAX_HOSTS:    HostCount = 4_194_302;

/// Usable hosts per prefix length, indexed by `MAX_PREFIX - prefix`.
///
/// Entries for /30, /31 and /32 do NOT follow `2^(32 - p) - 2`.
pub const USABLE_HOSTS: [HostCount; (MAX_PREFIX - MIN_PREFIX + 1) as usize] = [
    1,          // 32
    2,          // 31
    2,          // 30
    6,          // 29
    14,         // 28
    30,         // 27
    62,         // 26
    126,        // 25
    254,        // 24
    510,        // 23
    1022,       // 22
    2046,       // 21
    4094,       // 20
    8190,       // 19
    16382,      // 18
    32766,      // 17
    65534,      // 16
    131070,     // 15
    262142,     // 14
    524286,     // 13
    1048574,    // 12
    2097150,    // 11
    4194302,    // 10
];

/// Looks up the table. `None` outside [`MIN_PREFIX`, `MAX_PREFIX`].
#[inline(always)]
pub fn usable_hosts(prefix: Prefix) -> Option<HostCount> {
    if (MIN_PREFIX..=MAX_PREFIX).contains(&prefix) {
        Some(USABLE_HOSTS[(MAX_PREFIX - prefix) as usize])
    } else { None }
}

/// Number of addresses in a block of the given prefix length.
/// Prefixes longer than 32 are treated as 32.
#[inline(always)]
pub fn block_size(prefix: Prefix) -> AddrSteps {
    1 << (MAX_PREFIX - prefix.min(MAX_PREFIX))
}

/// Scans from /32 towards /10 and returns the first (i.e., smallest)
/// block whose usable host count covers `requested_hosts`.
///
/// With `forbid_31` set, /31 is never returned, even if it would
/// waste less space than /30.
pub fn smallest_prefix_for_hosts(requested_hosts: HostCount, forbid_31: bool) -> Result<Prefix, PlanError> {
    if requested_hosts <= 0 {
        return Err(PlanError::InvalidDemand(requested_hosts));
    }

    (MIN_PREFIX..=MAX_PREFIX)
        .rev()
        .filter(|&p| !(forbid_31 && p == 31))
        .find(|&p| USABLE_HOSTS[(MAX_PREFIX - p) as usize] >= requested_hosts)
        .ok_or(PlanError::CapacityExceeded(requested_hosts))
}

/// The prefix every LAN segment gets under [`Mode::Fixed`]: the one
/// dictated by the largest LAN demand. `None` if there are no LANs.
pub fn flsm_prefix(demands: &[Demand]) -> Result<Option<Prefix>, PlanError> {
    demands.iter()
        .filter(|d| !d.is_point_to_point())
        .map(|d| d.requested_hosts())
        .max()
        .map(|h| smallest_prefix_for_hosts(h, true))
        .transpose()
}

/// Resolves the prefix of a single demand.
///
/// `flsm_prefix` is only looked at in [`Mode::Fixed`], and should come
/// from [`flsm_prefix`] over the whole demand set.
pub fn resolve(demand: &Demand, mode: Mode, flsm_prefix: Option<Prefix>) -> Result<Prefix, PlanError> {
    match demand {
        Demand::PointToPointLink { .. }     => Ok(LINK_PREFIX),
        Demand::LanSegment { hosts, .. }    => match (mode, flsm_prefix) {
            (Mode::Fixed, Some(p))  => Ok(p),
            _                       => smallest_prefix_for_hosts(*hosts, true),
        },
    }
}
