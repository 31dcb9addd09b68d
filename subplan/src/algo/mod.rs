pub mod packing;

use crate::{
    helpe::*,
    analyze::prelude_analysis,
};
use self::packing::place;

/// Carves one subnet per demand out of `block`.
///
/// Every demand is first given a prefix length according to `mode`
/// (see [`resolve`]). Jobs are then laid out largest-first, each one
/// on the first address past its predecessor that is aligned to its
/// own size.
///
/// Returns the allocations in *placement* order, not input order.
/// On failure, nothing is returned: either every demand fits or
/// the whole run is rejected.
pub fn allocate(
    demands:    &[Demand],
    mode:       Mode,
    block:      &BoundingBlock,
) -> Result<Vec<Allocation>, PlanError> {
    prelude_analysis(demands)?;
    let jobs = size_jobs(demands, mode)?;
    let placed = place(jobs, block)?;
    debug_assert!(placement_is_valid(&placed, block), "Bad placement");

    info!("Generated {} networks. Mode={mode}. Base={block}", placed.len());

    Ok(placed)
}

/// Resolves the prefix of every demand, preserving input order.
pub fn size_jobs(demands: &[Demand], mode: Mode) -> Result<Vec<SizedJob<'_>>, PlanError> {
    // Under FLSM, the largest LAN dictates everyone's size. Links
    // are unaffected either way.
    let flsm = match mode {
        Mode::Fixed     => flsm_prefix(demands)?,
        Mode::Variable  => None,
    };
    if let Some(p) = flsm {
        debug!("FLSM prefix: /{p}");
    }

    demands.iter()
        .map(|d| resolve(d, mode, flsm).map(|p| SizedJob::new(d, p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(s: &str) -> BoundingBlock {
        s.parse().unwrap()
    }

    fn as_cidrs(placed: &[Allocation]) -> Vec<(String, String)> {
        placed.iter()
            .map(|a| (a.name.clone(), format!("{}/{}", a.network_address, a.prefix_length)))
            .collect()
    }

    #[test]
    fn reference_scenario() {
        let demands = vec![
            Demand::lan("A-G1", 20),
            Demand::lan("B-G1", 10),
            Demand::link("A-B-link1"),
        ];
        let placed = allocate(&demands, Mode::Variable, &block("192.168.0.0/16")).unwrap();
        assert_eq!(as_cidrs(&placed), vec![
            (String::from("A-G1"), String::from("192.168.0.0/27")),
            (String::from("B-G1"), String::from("192.168.0.32/28")),
            (String::from("A-B-link1"), String::from("192.168.0.48/30")),
        ]);
    }

    #[test]
    fn output_follows_placement_order() {
        let demands = vec![
            Demand::link("l"),
            Demand::lan("small", 3),
            Demand::lan("big", 100),
        ];
        let placed = allocate(&demands, Mode::Variable, &block("10.0.0.0/24")).unwrap();
        let names: Vec<&str> = placed.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["big", "small", "l"]);
        assert_eq!(placed[0].network_address, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(placed[1].network_address, Ipv4Addr::new(10, 0, 0, 128));
        assert_eq!(placed[2].network_address, Ipv4Addr::new(10, 0, 0, 136));
    }

    #[test]
    fn fixed_mode_sizes_lans_uniformly() {
        let demands = vec![
            Demand::lan("a", 20),
            Demand::lan("b", 50),
            Demand::lan("c", 3),
            Demand::link("l1"),
            Demand::link("l2"),
        ];
        let placed = allocate(&demands, Mode::Fixed, &block("172.16.0.0/16")).unwrap();
        for a in &placed {
            let want = if a.name.starts_with('l') { 30 } else { 26 };
            assert_eq!(a.prefix_length, want, "{a}");
        }
        assert_eq!(as_cidrs(&placed), vec![
            (String::from("a"), String::from("172.16.0.0/26")),
            (String::from("b"), String::from("172.16.0.64/26")),
            (String::from("c"), String::from("172.16.0.128/26")),
            (String::from("l1"), String::from("172.16.0.192/30")),
            (String::from("l2"), String::from("172.16.0.196/30")),
        ]);
    }

    #[test]
    fn fixed_mode_without_lans_is_variable_mode() {
        let demands = vec![Demand::link("l1"), Demand::link("l2")];
        let b = block("10.0.0.0/29");
        assert_eq!(
            allocate(&demands, Mode::Fixed, &b),
            allocate(&demands, Mode::Variable, &b)
        );
    }

    #[test]
    fn bad_demands_abort_before_placement() {
        let b = block("10.0.0.0/8");
        let demands = vec![Demand::lan("a", 10), Demand::lan("b", 0)];
        assert_eq!(allocate(&demands, Mode::Variable, &b), Err(PlanError::InvalidDemand(0)));
        assert_eq!(allocate(&demands, Mode::Fixed, &b), Err(PlanError::InvalidDemand(0)));

        let demands = vec![Demand::lan("huge", MAX_HOSTS + 1)];
        assert_eq!(
            allocate(&demands, Mode::Variable, &b),
            Err(PlanError::CapacityExceeded(MAX_HOSTS + 1))
        );
        assert_eq!(
            allocate(&demands, Mode::Fixed, &b),
            Err(PlanError::CapacityExceeded(MAX_HOSTS + 1))
        );
    }

    #[test]
    fn empty_demand_set_yields_nothing() {
        assert_eq!(allocate(&[], Mode::Variable, &block("10.0.0.0/8")), Ok(vec![]));
    }

    #[test]
    fn sizing_keeps_input_order() {
        let demands = vec![Demand::link("l"), Demand::lan("a", 20)];
        let jobs = size_jobs(&demands, Mode::Variable).unwrap();
        let got: Vec<(&str, Prefix)> = jobs.iter().map(|j| (j.name(), j.prefix)).collect();
        assert_eq!(got, vec![("l", 30), ("a", 27)]);
    }
}
