pub use std::{
    collections::HashSet,
    fmt,
    io::{BufRead, BufReader},
    net::Ipv4Addr,
    path::{Path, PathBuf},
    str::FromStr,
    time::Instant,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use indexmap::IndexMap;
pub use clap::ValueEnum;
pub use ipnet::Ipv4Net;
pub use log::{debug, info, warn};

pub use crate::{Allocation, BoundingBlock, Demand, SizedJob,
    analyze::placement_is_valid,
    sizing::*,
    topology::*,
};

/// Number of usable host addresses asked for by a [Demand].
pub type HostCount = i64;

/// Length of an IPv4 network prefix.
pub type Prefix = u8;

/// The unit for address arithmetic. Addresses themselves fit in 32 bits,
/// but the cursor must be able to step *past* `255.255.255.255` without
/// wrapping back to `0.0.0.0`.
pub type AddrSteps = u64;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Mode {
    /// VLSM: every LAN segment gets the smallest block that fits it
    Variable,
    /// FLSM: every LAN segment gets the block that fits the largest one
    Fixed,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Variable  => write!(f, "VLSM"),
            Mode::Fixed     => write!(f, "FLSM"),
        }
    }
}

//---START ERRORS
/// Everything that can go wrong inside the engine. Any of these
/// aborts the whole run: no partial allocation list is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("hosts must be > 0 (got {0})")]
    InvalidDemand(HostCount),
    #[error("{0} hosts is too large for available prefixes (at most {} per subnet)", MAX_HOSTS)]
    CapacityExceeded(HostCount),
    #[error("no room inside base network {block} to allocate {name} (/{prefix})")]
    OutOfSpace {
        name:   String,
        prefix: Prefix,
        block:  Ipv4Net,
    },
    #[error("invalid base network `{0}`")]
    InvalidBoundingBlock(String),
    #[error("demand name `{0}` is used more than once")]
    DuplicateName(String),
}

/// Appears while editing a [Topology].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("router name must not be empty")]
    EmptyName,
    #[error("a router named `{0}` already exists")]
    DuplicateRouter(String),
    #[error("no router named `{0}`")]
    UnknownRouter(String),
    #[error("cannot connect router `{0}` to itself")]
    SelfConnection(String),
    #[error("`{0}` and `{1}` are already connected")]
    DuplicateConnection(String, String),
    #[error("no connection at position {0}")]
    UnknownConnection(usize),
    #[error("router `{name}` declares {count} groups, at most {} are supported", GROUPS_PER_ROUTER)]
    TooManyGroups {
        name:   String,
        count:  usize,
    },
}

/// Appears while reading demands from some external source.
#[derive(Error, Debug)]
pub enum InputError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: {reason}")]
    Parse {
        line:   usize,
        reason: String,
    },
    #[error("line {line}: {source}")]
    Topology {
        line:   usize,
        source: TopologyError,
    },
}
//---END ERRORS

//---START EXTERNAL INTERFACES
// The types listed below read demand lists for `subplan`
// out of plain-text files.
//
// To write your own interface, simply make sure that it
// satisfies the `DemandGen` trait.

/// Defines the interface for reading demands.
pub trait DemandGen {
    fn new(path: PathBuf) -> Self;
    fn path(&self) -> &Path;
    /// Parses a complete demand list out of any buffered source.
    fn parse_from<R: BufRead>(reader: R) -> Result<Vec<Demand>, InputError>;
    fn read_demands(&self) -> Result<Vec<Demand>, InputError> {
        let fd = std::fs::File::open(self.path())?;
        Self::parse_from(BufReader::new(fd))
    }
}

/// A flat CSV of demands:
///
/// ```text
/// name,hosts,kind
/// Office,50,lan
/// Uplink,2,link
/// ```
///
/// `kind` is either `lan` or `link`. The hosts column of a link
/// may be left empty, but if given it must be 2.
pub struct DemandCSVParser {
    pub path: PathBuf,
}

impl DemandCSVParser {
    fn gen_single(row: &str, line: usize) -> Result<Demand, InputError> {
        let bad = |reason: String| InputError::Parse { line, reason };
        let cols: Vec<&str> = row.split(',')
            .map(str::trim)
            .collect();
        if cols.len() != 3 {
            return Err(bad(format!("expected 3 columns, found {}", cols.len())));
        }
        let (name, hosts, kind) = (cols[0], cols[1], cols[2]);
        if name.is_empty() {
            return Err(bad(String::from("empty demand name")));
        }
        match kind.to_ascii_lowercase().as_str() {
            "lan"   => {
                let hosts = hosts.parse::<HostCount>()
                    .map_err(|e| bad(format!("bad host count `{hosts}`: {e}")))?;

                Ok(Demand::lan(name, hosts))
            },
            "link"  => {
                if !hosts.is_empty() && hosts != "2" {
                    return Err(bad(format!("links always request 2 hosts, found `{hosts}`")));
                }

                Ok(Demand::link(name))
            },
            other   => Err(bad(format!("unknown demand kind `{other}`"))),
        }
    }
}

impl DemandGen for DemandCSVParser {
    fn new(path: PathBuf) -> Self {
        Self {
            path
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn parse_from<R: BufRead>(reader: R) -> Result<Vec<Demand>, InputError> {
        let mut res = vec![];
        for (idx, line) in reader.lines()
            .enumerate()
            // First line is the header!
            .skip(1) {
            let line = line?;
            if line.trim().is_empty() { continue; }
            res.push(Self::gen_single(&line, idx + 1)?);
        }

        Ok(res)
    }
}

/// A router/link description, one statement per line:
///
/// ```text
/// # comment
/// router Router_A 20 50
/// router Router_B 10
/// link Router_A Router_B
/// ```
///
/// Underscores in names stand for spaces. Demands are produced
/// by [`Topology::demands`].
pub struct TopologyParser {
    pub path: PathBuf,
}

impl TopologyParser {
    /// Builds the [Topology] itself, for callers that
    /// want more than the demand list.
    pub fn topology_from<R: BufRead>(reader: R) -> Result<Topology, InputError> {
        let mut res = Topology::new();
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let stmt = match line.split_once('#') {
                Some((before, _))   => before,
                None                => line.as_str(),
            };
            let mut words = stmt.split_whitespace();
            let Some(keyword) = words.next() else { continue; };
            let args: Vec<&str> = words.collect();
            let topo_err = |source| InputError::Topology { line: line_no, source };
            match keyword {
                "router"    => {
                    let Some((name, counts)) = args.split_first() else {
                        return Err(InputError::Parse {
                            line:   line_no,
                            reason: String::from("`router` needs a name"),
                        });
                    };
                    let groups = counts.iter()
                        .map(|c| c.parse::<u32>().map_err(|e| InputError::Parse {
                            line:   line_no,
                            reason: format!("bad host count `{c}`: {e}"),
                        }))
                        .collect::<Result<Vec<u32>, InputError>>()?;
                    res.add_router(&Self::unescape(name), &groups)
                        .map_err(topo_err)?;
                },
                "link"      => {
                    if args.len() != 2 {
                        return Err(InputError::Parse {
                            line:   line_no,
                            reason: format!("`link` needs exactly 2 routers, found {}", args.len()),
                        });
                    }
                    res.connect(&Self::unescape(args[0]), &Self::unescape(args[1]))
                        .map_err(topo_err)?;
                },
                other       => {
                    return Err(InputError::Parse {
                        line:   line_no,
                        reason: format!("unknown statement `{other}`"),
                    });
                }
            }
        }

        Ok(res)
    }

    fn unescape(name: &str) -> String {
        name.replace('_', " ")
    }
}

impl DemandGen for TopologyParser {
    fn new(path: PathBuf) -> Self {
        Self {
            path
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn parse_from<R: BufRead>(reader: R) -> Result<Vec<Demand>, InputError> {
        Ok(Self::topology_from(reader)?.demands())
    }
}
//---END EXTERNAL INTERFACES

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum InputType {
    /// A flat `name,hosts,kind` CSV file
    Csv,
    /// A `router`/`link` topology description
    Topology,
}

pub fn read_from_path<T>(file_path: PathBuf) -> Result<Vec<Demand>, InputError>
where T: DemandGen {
    let parser = T::new(file_path);
    let demands = parser.read_demands()?;
    debug!("Read {} demands from {}", demands.len(), parser.path().display());

    Ok(demands)
}
