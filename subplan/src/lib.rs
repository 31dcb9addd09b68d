//! Welcome to `subplan`!

mod demand;
mod block;
mod analyze;

pub mod algo;
pub mod sizing;
pub mod topology;
pub mod report;
pub mod helpe;

pub use crate::helpe::*;

/// Our fundamental unit of interest. A [`Demand`] asks for an IPv4 subnet
/// able to hold some number of hosts. It comes in two flavors:
///
/// 1. A [`LanSegment`](Demand::LanSegment) wants `hosts` *usable* addresses,
///     and is sized according to the planning [`Mode`].
/// 2. A [`PointToPointLink`](Demand::PointToPointLink) always wants 2
///     addresses and is always given a `/30`, regardless of mode.
///
/// > ***ATTENTION:*** names are opaque to `subplan`, but they must be
/// > unique within a single run. They are the only way for a caller to
/// > tell which [`Allocation`] answers which [`Demand`], since allocations
/// > come back in placement order, not input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Demand {
    LanSegment {
        name:   String,
        // Signed on purpose: a non-positive count is a caller
        // error we must be able to report, not to wrap around.
        hosts:  HostCount,
    },
    PointToPointLink {
        name:   String,
    },
}

/// A [`Demand`] whose prefix length has been resolved. Lives only
/// between sizing and placement.
#[derive(Debug, Clone, Copy)]
pub struct SizedJob<'a> {
    pub demand: &'a Demand,
    pub prefix: Prefix,
}

/// The address range every subnet of a run must fit inside.
///
/// Always held in its truncated form: `192.168.7.9/16` is
/// stored as `192.168.0.0/16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBlock {
    net: Ipv4Net,
}

/// The output of the engine: one subnet carved out of the
/// [`BoundingBlock`] for the [`Demand`] of the same name.
///
/// Broadcast, netmask and usable range are all derived from
/// these three fields and are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Allocation {
    pub name:               String,
    pub network_address:    Ipv4Addr,
    pub prefix_length:      Prefix,
}
