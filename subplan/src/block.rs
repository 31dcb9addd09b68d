use crate::helpe::*;

impl BoundingBlock {
    /// Creates a block out of an address and a prefix length. Host bits
    /// in `base_address` are allowed and get truncated.
    pub fn new(base_address: Ipv4Addr, base_prefix_length: Prefix) -> Result<Self, PlanError> {
        Ipv4Net::new(base_address, base_prefix_length)
            .map(|net| Self { net: net.trunc() })
            .map_err(|_| PlanError::InvalidBoundingBlock(format!("{base_address}/{base_prefix_length}")))
    }

    #[inline(always)]
    pub fn net(&self) -> Ipv4Net {
        self.net
    }

    #[inline(always)]
    pub fn base_address(&self) -> Ipv4Addr {
        self.net.network()
    }

    #[inline(always)]
    pub fn base_prefix_length(&self) -> Prefix {
        self.net.prefix_len()
    }

    /// First address of the block.
    #[inline(always)]
    pub fn first(&self) -> AddrSteps {
        u32::from(self.net.network()) as AddrSteps
    }

    /// Last (broadcast) address of the block.
    #[inline(always)]
    pub fn last(&self) -> AddrSteps {
        u32::from(self.net.broadcast()) as AddrSteps
    }

    /// Returns `true` if the closed range [`start`, `end`] lies
    /// entirely inside the block.
    #[inline(always)]
    pub fn contains(&self, start: AddrSteps, end: AddrSteps) -> bool {
        start >= self.first() && end <= self.last()
    }
}

/// Accepts `a.b.c.d/p` as well as a bare `a.b.c.d`, which
/// stands for a single-address `/32`.
impl FromStr for BoundingBlock {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || PlanError::InvalidBoundingBlock(s.to_string());
        match s.split_once('/') {
            Some((addr, prefix))    => {
                let addr = addr.parse::<Ipv4Addr>().map_err(|_| bad())?;
                let prefix = prefix.parse::<Prefix>().map_err(|_| bad())?;
                Self::new(addr, prefix).map_err(|_| bad())
            },
            None                    => {
                let addr = s.parse::<Ipv4Addr>().map_err(|_| bad())?;
                Self::new(addr, MAX_PREFIX)
            }
        }
    }
}

impl fmt::Display for BoundingBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.net)
    }
}

impl Allocation {
    pub fn new(name: impl Into<String>, network_address: Ipv4Addr, prefix_length: Prefix) -> Self {
        Self {
            name:               name.into(),
            network_address,
            prefix_length,
        }
    }

    #[inline(always)]
    pub fn num_addresses(&self) -> AddrSteps {
        block_size(self.prefix_length)
    }

    /// First address, as a number.
    #[inline(always)]
    pub fn start(&self) -> AddrSteps {
        u32::from(self.network_address) as AddrSteps
    }

    /// Last address, as a number.
    #[inline(always)]
    pub fn end(&self) -> AddrSteps {
        self.start() + self.num_addresses() - 1
    }

    #[inline(always)]
    pub fn broadcast(&self) -> Ipv4Addr {
        // Saturate for malformed, hand-built allocations that
        // would spill over the end of the address space.
        Ipv4Addr::from(self.end().min(u32::MAX as AddrSteps) as u32)
    }

    #[inline(always)]
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(!((self.num_addresses() - 1) as u32))
    }

    /// First usable host address.
    ///
    /// Blocks of 1 or 2 addresses have no reserved network and
    /// broadcast addresses, all of their addresses are usable.
    pub fn first_usable(&self) -> Ipv4Addr {
        if self.num_addresses() <= 2 {
            self.network_address
        } else {
            Ipv4Addr::from((self.start() + 1) as u32)
        }
    }

    /// Last usable host address. See [`Allocation::first_usable`].
    pub fn last_usable(&self) -> Ipv4Addr {
        if self.num_addresses() <= 2 {
            self.broadcast()
        } else {
            Ipv4Addr::from((self.end() - 1) as u32)
        }
    }

    /// Returns `true` if the network address sits on a
    /// multiple of the block size.
    #[inline(always)]
    pub fn is_aligned(&self) -> bool {
        self.start() % self.num_addresses() == 0
    }

    #[inline(always)]
    pub fn overlaps_with(&self, other: &Self) -> bool {
        self.start() <= other.end() &&
        other.start() <= self.end()
    }

    #[inline(always)]
    pub fn lives_within(&self, block: &BoundingBlock) -> bool {
        block.contains(self.start(), self.end())
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.name, self.network_address, self.prefix_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(addr: &str, prefix: Prefix) -> Allocation {
        Allocation::new("t", addr.parse().unwrap(), prefix)
    }

    #[test]
    fn block_parsing_truncates_host_bits() {
        let b: BoundingBlock = "192.168.5.7/16".parse().unwrap();
        assert_eq!(b.base_address(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(b.base_prefix_length(), 16);
        assert_eq!(b.to_string(), "192.168.0.0/16");
        assert_eq!(b.last() - b.first() + 1, 65536);
    }

    #[test]
    fn bare_address_is_a_single_host_block() {
        let b: BoundingBlock = "10.1.2.3".parse().unwrap();
        assert_eq!(b.base_prefix_length(), 32);
        assert_eq!(b.first(), b.last());
    }

    #[test]
    fn malformed_blocks_are_rejected() {
        for bad in ["", "banana", "10.0.0.0/33", "10.0.0/8", "300.1.1.1/8", "10.0.0.0/-1", "10.0.0.0/"] {
            assert_eq!(
                bad.parse::<BoundingBlock>(),
                Err(PlanError::InvalidBoundingBlock(bad.to_string())),
                "`{bad}` should not parse"
            );
        }
        assert!(BoundingBlock::new(Ipv4Addr::new(10, 0, 0, 0), 40).is_err());
    }

    #[test]
    fn containment_is_inclusive() {
        let b: BoundingBlock = "10.0.0.0/25".parse().unwrap();
        assert!(b.contains(b.first(), b.last()));
        assert!(!b.contains(b.first(), b.last() + 1));
        assert!(!b.contains(b.first() - 1, b.last()));
    }

    #[test]
    fn classic_block_ranges() {
        let a = alloc("192.168.0.32", 28);
        assert_eq!(a.num_addresses(), 16);
        assert_eq!(a.netmask(), Ipv4Addr::new(255, 255, 255, 240));
        assert_eq!(a.broadcast(), Ipv4Addr::new(192, 168, 0, 47));
        assert_eq!(a.first_usable(), Ipv4Addr::new(192, 168, 0, 33));
        assert_eq!(a.last_usable(), Ipv4Addr::new(192, 168, 0, 46));
    }

    #[test]
    fn tiny_block_ranges() {
        // A /30 keeps its network and broadcast addresses out of the
        // usable range, a /31 has no such addresses at all.
        let p30 = alloc("192.168.0.48", 30);
        assert_eq!(p30.first_usable(), Ipv4Addr::new(192, 168, 0, 49));
        assert_eq!(p30.last_usable(), Ipv4Addr::new(192, 168, 0, 50));

        let p31 = alloc("10.0.0.2", 31);
        assert_eq!(p31.first_usable(), Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(p31.last_usable(), Ipv4Addr::new(10, 0, 0, 3));
        assert_eq!(p31.broadcast(), Ipv4Addr::new(10, 0, 0, 3));

        let p32 = alloc("10.0.0.9", 32);
        assert_eq!(p32.first_usable(), p32.network_address);
        assert_eq!(p32.last_usable(), p32.network_address);
        assert_eq!(p32.broadcast(), p32.network_address);
        assert_eq!(p32.netmask(), Ipv4Addr::new(255, 255, 255, 255));
    }

    #[test]
    fn alignment_and_overlap() {
        assert!(alloc("192.168.0.64", 26).is_aligned());
        assert!(!alloc("192.168.0.32", 26).is_aligned());
        assert!(alloc("192.168.0.0", 24).overlaps_with(&alloc("192.168.0.128", 25)));
        assert!(!alloc("192.168.0.0", 25).overlaps_with(&alloc("192.168.0.128", 25)));
    }
}
