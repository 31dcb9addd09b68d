//! Routers, their LAN groups and the links between them.
//!
//! A [`Topology`] is the usual way of producing the demand list:
//! every non-empty LAN group becomes a [`Demand::LanSegment`] and
//! every connection a [`Demand::PointToPointLink`].
use crate::helpe::*;

/// How many LAN groups a single router may carry.
pub const GROUPS_PER_ROUTER: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    pub name:   String,
    /// Host count per LAN group; 0 means the group is unused.
    pub groups: [u32; GROUPS_PER_ROUTER],
}

/// An undirected link between two routers, stored in
/// the order it was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub a:  String,
    pub b:  String,
}

impl Connection {
    #[inline(always)]
    pub fn touches(&self, router: &str) -> bool {
        self.a == router || self.b == router
    }

    #[inline(always)]
    pub fn joins(&self, x: &str, y: &str) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Topology {
    // Insertion order matters: it drives demand order, which in
    // turn breaks ties during placement.
    routers:        IndexMap<String, Router>,
    connections:    Vec<Connection>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two routers, three LAN groups and a link between them.
    pub fn example() -> Self {
        let mut res = Self::new();
        res.routers.insert(String::from("Router A"), Router {
            name:   String::from("Router A"),
            groups: [20, 50, 0, 0],
        });
        res.routers.insert(String::from("Router B"), Router {
            name:   String::from("Router B"),
            groups: [10, 0, 0, 0],
        });
        res.connections.push(Connection {
            a:  String::from("Router A"),
            b:  String::from("Router B"),
        });

        res
    }

    pub fn routers(&self) -> impl Iterator<Item = &Router> {
        self.routers.values()
    }

    pub fn router(&self, name: &str) -> Option<&Router> {
        self.routers.get(name)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Registers a new router. Missing groups are unused; more than
    /// [`GROUPS_PER_ROUTER`] groups is an error.
    pub fn add_router(&mut self, name: &str, groups: &[u32]) -> Result<&Router, TopologyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TopologyError::EmptyName);
        }
        if self.routers.contains_key(name) {
            return Err(TopologyError::DuplicateRouter(name.to_string()));
        }
        if groups.len() > GROUPS_PER_ROUTER {
            return Err(TopologyError::TooManyGroups {
                name:   name.to_string(),
                count:  groups.len(),
            });
        }
        let mut padded = [0; GROUPS_PER_ROUTER];
        padded[..groups.len()].copy_from_slice(groups);
        debug!("Router `{name}` added with groups {padded:?}");

        let entry = self.routers.entry(name.to_string())
            .or_insert(Router {
                name:   name.to_string(),
                groups: padded,
            });

        Ok(&*entry)
    }

    /// Removes a router along with every connection touching it.
    pub fn remove_router(&mut self, name: &str) -> Result<Router, TopologyError> {
        let removed = self.routers.shift_remove(name)
            .ok_or_else(|| TopologyError::UnknownRouter(name.to_string()))?;
        self.connections.retain(|c| !c.touches(name));

        Ok(removed)
    }

    pub fn connect(&mut self, a: &str, b: &str) -> Result<&Connection, TopologyError> {
        for r in [a, b] {
            if !self.routers.contains_key(r) {
                return Err(TopologyError::UnknownRouter(r.to_string()));
            }
        }
        if a == b {
            return Err(TopologyError::SelfConnection(a.to_string()));
        }
        if self.connections.iter().any(|c| c.joins(a, b)) {
            return Err(TopologyError::DuplicateConnection(a.to_string(), b.to_string()));
        }
        self.connections.push(Connection {
            a:  a.to_string(),
            b:  b.to_string(),
        });
        debug!("Connection created: {a} <-> {b}");

        Ok(&self.connections[self.connections.len() - 1])
    }

    /// Removes the connection at position `idx` (0-based).
    pub fn disconnect(&mut self, idx: usize) -> Result<Connection, TopologyError> {
        if idx >= self.connections.len() {
            return Err(TopologyError::UnknownConnection(idx));
        }

        Ok(self.connections.remove(idx))
    }

    /// Produces the demand list: LAN groups first, router by router,
    /// then one link per connection.
    ///
    /// Groups are named `<router>-G<n>` (1-based group slot, so gaps
    /// are kept) and links `<a>-<b>-link<k>` (1-based position).
    pub fn demands(&self) -> Vec<Demand> {
        let lans = self.routers.values()
            .flat_map(|r| {
                r.groups.iter()
                    .enumerate()
                    .filter(|&(_, &h)| h > 0)
                    .map(move |(i, &h)| Demand::lan(format!("{}-G{}", r.name, i + 1), h as HostCount))
            });
        let links = self.connections.iter()
            .enumerate()
            .map(|(k, c)| Demand::link(format!("{}-{}-link{}", c.a, c.b, k + 1)));

        lans.chain(links).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_demands() {
        assert_eq!(Topology::example().demands(), vec![
            Demand::lan("Router A-G1", 20),
            Demand::lan("Router A-G2", 50),
            Demand::lan("Router B-G1", 10),
            Demand::link("Router A-Router B-link1"),
        ]);
    }

    #[test]
    fn group_slots_keep_their_numbers() {
        let mut t = Topology::new();
        t.add_router("R", &[0, 0, 7]).unwrap();
        assert_eq!(t.demands(), vec![Demand::lan("R-G3", 7)]);
        assert_eq!(t.router("R").unwrap().groups, [0, 0, 7, 0]);
    }

    #[test]
    fn router_validation() {
        let mut t = Topology::new();
        assert_eq!(t.add_router("   ", &[1]).unwrap_err(), TopologyError::EmptyName);
        t.add_router(" core ", &[1]).unwrap();
        assert!(t.router("core").is_some());
        assert_eq!(
            t.add_router("core", &[]).unwrap_err(),
            TopologyError::DuplicateRouter(String::from("core"))
        );
        assert_eq!(
            t.add_router("edge", &[1, 2, 3, 4, 5]).unwrap_err(),
            TopologyError::TooManyGroups { name: String::from("edge"), count: 5 }
        );
    }

    #[test]
    fn connection_validation() {
        let mut t = Topology::new();
        t.add_router("a", &[]).unwrap();
        t.add_router("b", &[]).unwrap();
        assert_eq!(t.connect("a", "zz").unwrap_err(), TopologyError::UnknownRouter(String::from("zz")));
        assert_eq!(t.connect("a", "a").unwrap_err(), TopologyError::SelfConnection(String::from("a")));
        t.connect("a", "b").unwrap();
        assert_eq!(
            t.connect("b", "a").unwrap_err(),
            TopologyError::DuplicateConnection(String::from("b"), String::from("a"))
        );
        assert_eq!(t.disconnect(3).unwrap_err(), TopologyError::UnknownConnection(3));
        assert_eq!(t.disconnect(0).unwrap().a, "a");
        assert!(t.connections().is_empty());
    }

    #[test]
    fn removing_a_router_prunes_its_links() {
        let mut t = Topology::new();
        for r in ["a", "b", "c"] {
            t.add_router(r, &[2]).unwrap();
        }
        t.connect("a", "b").unwrap();
        t.connect("b", "c").unwrap();
        t.connect("a", "c").unwrap();
        t.remove_router("b").unwrap();
        assert_eq!(t.connections().len(), 1);
        assert!(t.connections()[0].joins("c", "a"));
        // Link numbering follows the surviving positions.
        assert_eq!(t.demands(), vec![
            Demand::lan("a-G1", 2),
            Demand::lan("c-G1", 2),
            Demand::link("a-c-link1"),
        ]);
        assert_eq!(t.remove_router("b").unwrap_err(), TopologyError::UnknownRouter(String::from("b")));
    }
}
