use crate::helpe::*;

/// Checks the demand set before any sizing takes place:
///
/// (i)     every LAN segment asks for a positive number of hosts.
///
/// (ii)    no two demands share a name. Allocations come back in
///         placement order, so names are the only way back to demands.
///
/// Links need no checking: they always want 2 hosts.
pub fn prelude_analysis(demands: &[Demand]) -> Result<(), PlanError> {
    let mut names: HashSet<&str> = HashSet::with_capacity(demands.len());
    for d in demands {
        if let Demand::LanSegment { name, hosts } = d {
            if *hosts <= 0 {
                warn!("Demand `{name}` requests {hosts} hosts");
                return Err(PlanError::InvalidDemand(*hosts));
            }
        }
        if !names.insert(d.name()) {
            return Err(PlanError::DuplicateName(d.name().to_string()));
        }
    }

    Ok(())
}

/// Returns `true` if the allocations are pairwise disjoint, each
/// one aligned to its own size and contained in `block`.
pub fn placement_is_valid(allocations: &[Allocation], block: &BoundingBlock) -> bool {
    if !allocations.iter().all(|a| a.is_aligned() && a.lives_within(block)) {
        return false;
    }

    // Once sorted by start address, it suffices to compare neighbors.
    allocations.iter()
        .sorted_by_key(|a| a.start())
        .tuple_windows()
        .all(|(this, that)| this.end() < that.start())
}
