use crate::helpe::*;

impl Demand {
    /// A LAN segment needing `hosts` usable addresses.
    pub fn lan(name: impl Into<String>, hosts: HostCount) -> Self {
        Self::LanSegment {
            name:   name.into(),
            hosts,
        }
    }

    /// A point-to-point link between two routers.
    pub fn link(name: impl Into<String>) -> Self {
        Self::PointToPointLink {
            name:   name.into(),
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        match self {
            Self::LanSegment { name, .. }       => name,
            Self::PointToPointLink { name }     => name,
        }
    }

    /// Links always ask for exactly 2 hosts.
    #[inline(always)]
    pub fn requested_hosts(&self) -> HostCount {
        match self {
            Self::LanSegment { hosts, .. }      => *hosts,
            Self::PointToPointLink { .. }       => 2,
        }
    }

    #[inline(always)]
    pub fn is_point_to_point(&self) -> bool {
        matches!(self, Self::PointToPointLink { .. })
    }
}

impl fmt::Display for Demand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LanSegment { name, hosts }    => write!(f, "{name} ({hosts} hosts)"),
            Self::PointToPointLink { name }     => write!(f, "{name} (point-to-point)"),
        }
    }
}

impl<'a> SizedJob<'a> {
    pub fn new(demand: &'a Demand, prefix: Prefix) -> Self {
        Self {
            demand,
            prefix,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &'a str {
        self.demand.name()
    }

    /// Number of addresses (not hosts!) the job occupies.
    #[inline(always)]
    pub fn block_size(&self) -> AddrSteps {
        block_size(self.prefix)
    }
}
