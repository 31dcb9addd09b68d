//! Human-readable views over a finished allocation list.
//!
//! Nothing in here feeds back into sizing or placement.
use crate::helpe::*;

/// Everything a network table row needs about one [`Allocation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub name:           String,
    pub network:        Ipv4Addr,
    pub prefix:         Prefix,
    pub netmask:        Ipv4Addr,
    pub first_usable:   Ipv4Addr,
    pub last_usable:    Ipv4Addr,
    pub broadcast:      Ipv4Addr,
    pub num_addresses:  AddrSteps,
}

impl Summary {
    pub fn of(a: &Allocation) -> Self {
        Self {
            name:           a.name.clone(),
            network:        a.network_address,
            prefix:         a.prefix_length,
            netmask:        a.netmask(),
            first_usable:   a.first_usable(),
            last_usable:    a.last_usable(),
            broadcast:      a.broadcast(),
            num_addresses:  a.num_addresses(),
        }
    }

    pub fn cidr(&self) -> String {
        format!("{}/{}", self.network, self.prefix)
    }

    /// `[first ; last]`, or `N/A` for a single address.
    pub fn host_range(&self) -> String {
        if self.num_addresses > 1 {
            format!("[{} ; {}]", self.first_usable, self.last_usable)
        } else {
            String::from("N/A")
        }
    }
}

/// The block of the same size sitting right after the last
/// allocation, i.e., where a further subnet of that size would go.
///
/// `None` for an empty list, or if it would run past the end
/// of the IPv4 address space.
pub fn next_network(allocations: &[Allocation]) -> Option<Ipv4Net> {
    let last = allocations.last()?;
    let start = u32::try_from(last.end() + 1).ok()?;

    Ipv4Net::new(Ipv4Addr::from(start), last.prefix_length).ok()
}

/// Network name, prefix, first/last usable address and broadcast.
pub fn render_summary_table(allocations: &[Allocation]) -> String {
    let rows = allocations.iter()
        .map(Summary::of)
        .map(|s| vec![
            s.name.clone(),
            format!("/{}", s.prefix),
            s.first_usable.to_string(),
            s.last_usable.to_string(),
            s.broadcast.to_string(),
        ])
        .collect_vec();

    render_table(
        &["Network name", "Prefix", "First usable IP", "Last usable IP", "Broadcast"],
        &rows,
    )
}

/// Network name, address/prefix, broadcast and host range, followed
/// by an `Extra` row holding [`next_network`].
pub fn render_detail_table(allocations: &[Allocation]) -> String {
    let mut rows = allocations.iter()
        .map(Summary::of)
        .map(|s| vec![
            s.name.clone(),
            s.cidr(),
            s.broadcast.to_string(),
            s.host_range(),
        ])
        .collect_vec();
    if let Some(next) = next_network(allocations) {
        rows.push(vec![
            String::from("Extra"),
            next.to_string(),
            String::from("-"),
            String::from("-"),
        ]);
    }

    render_table(
        &["Network name", "IP + prefix", "Broadcast", "Host range"],
        &rows,
    )
}

fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let widths = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect_vec();
    let line = |cells: Vec<&str>| -> String {
        cells.iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut res = line(header.to_vec());
    res.push('\n');
    res.push_str(&widths.iter().map(|w| "-".repeat(*w)).join("  "));
    res.push('\n');
    for r in rows {
        res.push_str(&line(r.iter().map(String::as_str).collect()));
        res.push('\n');
    }

    res
}
