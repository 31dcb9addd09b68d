use crate::helpe::*;

/// The only mutable state of a run: the lowest address not yet
/// handed out. Owned by a single [`place`] call, never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    next: AddrSteps,
}

impl Cursor {
    pub fn new(block: &BoundingBlock) -> Self {
        Self {
            next: block.first(),
        }
    }

    #[inline(always)]
    pub fn position(&self) -> AddrSteps {
        self.next
    }

    /// Returns the closed range a block of the given prefix would
    /// occupy if placed at the first suitably aligned address.
    /// Does not move the cursor.
    #[inline(always)]
    pub fn candidate(&self, prefix: Prefix) -> (AddrSteps, AddrSteps) {
        let start = roundup_to_network(self.next, prefix);

        (start, start + block_size(prefix) - 1)
    }

    /// Moves past `end`. The cursor never goes backwards.
    #[inline(always)]
    pub fn advance_past(&mut self, end: AddrSteps) {
        debug_assert!(end >= self.next, "Cursor moving backwards");
        self.next = end + 1;
    }
}

/// Rounds `addr` up to the next multiple of the block size
/// of `prefix`. Aligned addresses are left as they are.
#[inline(always)]
pub fn roundup_to_network(addr: AddrSteps, prefix: Prefix) -> AddrSteps {
    addr.div_ceil(block_size(prefix)) * block_size(prefix)
}

/// Sorts jobs by ascending prefix length, that is, "big rocks first".
/// The sort is stable: equal prefixes keep their input order.
#[inline(always)]
pub fn order_jobs(jobs: Vec<SizedJob<'_>>) -> Vec<SizedJob<'_>> {
    jobs.into_iter()
        .sorted_by_key(|j| j.prefix)
        .collect()
}

/// Walks a [`Cursor`] through `block`, placing each job on the first
/// address that is both free and aligned to the job's own size.
///
/// Fails on the first job that would stick out of `block`.
pub fn place(
    jobs:   Vec<SizedJob<'_>>,
    block:  &BoundingBlock,
) -> Result<Vec<Allocation>, PlanError> {
    let mut cursor = Cursor::new(block);
    let mut res = Vec::with_capacity(jobs.len());
    for job in order_jobs(jobs) {
        let (start, end) = cursor.candidate(job.prefix);
        if !block.contains(start, end) {
            warn!(
                "No room inside {block} for {} (/{}), cursor at {}",
                job.name(),
                job.prefix,
                cursor.position()
            );
            return Err(PlanError::OutOfSpace {
                name:   job.name().to_string(),
                prefix: job.prefix,
                block:  block.net(),
            });
        }
        // Containment guarantees the address fits in 32 bits.
        let network_address = Ipv4Addr::from(start as u32);
        debug!(
            "{} -> {network_address}/{} (padding: {})",
            job.name(),
            job.prefix,
            start - cursor.position()
        );
        cursor.advance_past(end);
        res.push(Allocation::new(job.name(), network_address, job.prefix));
    }

    Ok(res)
}
