use jiff::civil::date;

use hub_dispatch::config::{DispatchConfig, UnroutedPolicy};
use hub_dispatch::constructive::assign_packages;
use hub_dispatch::distance::{DistanceMatrix, LocationIndex};
use hub_dispatch::io::{read_distances, read_locations, read_packages};
use hub_dispatch::models::{PackageStatus, PackageStore, Truck};
use hub_dispatch::simulation::{DeliverySimulator, MileageBudget, RoutingIssue};

const ADDRESSES: &str = "\
0,Western Governors University,4001 South 700 East
1,International Peace Gardens,1060 Dalton Ave S
2,Sugar House Park,1330 2100 S
3,Taylorsville-Bennion Heritage City Gov Off,1488 4800 S
4,Salt Lake City Division of Health Services,177 W Price Ave
";

// Lower-triangular, as exported from the planning spreadsheet.
const DISTANCES: &str = "\
0.0
7.2,0.0
3.8,7.1,0.0
11.0,6.4,9.2,0.0
2.2,6.0,4.4,5.6,0.0
";

const PACKAGES: &str = "\
1,195 W Oakland Ave,Salt Lake City,UT,84115,10:30 AM,21
2,1060 Dalton Ave S,Salt Lake City,UT,84104,EOD,44
3,1330 2100 S,Salt Lake City,UT,84106,EOD,2,Can only be on truck 2
4,1488 4800 S,Salt Lake City,UT,84123,EOD,4
5,177 W Price Ave,Salt Lake City,UT,84115,09:00 AM,88
";

struct Inputs {
    locations: LocationIndex,
    distances: DistanceMatrix,
    packages: PackageStore,
}

fn inputs(mirror: bool) -> Inputs {
    let locations = read_locations(ADDRESSES.as_bytes()).expect("address table");
    let mut distances = read_distances(DISTANCES.as_bytes()).expect("distance table");
    if mirror {
        distances.mirror_missing();
    }
    let packages = read_packages(PACKAGES.as_bytes()).expect("package table");
    Inputs {
        locations,
        distances,
        packages,
    }
}

#[test]
fn test_full_run_with_mirrored_table() {
    let Inputs {
        locations,
        distances,
        mut packages,
    } = inputs(true);
    let config = DispatchConfig::default().with_truck_capacity(2);
    let mut fleet = config.build_fleet();
    assign_packages(&mut packages, &mut fleet, config.truck_capacity).expect("fleet");
    assert_eq!(fleet[0].packages(), &[1, 2]);
    assert_eq!(fleet[1].packages(), &[3, 4]);
    assert_eq!(fleet[2].packages(), &[5]);

    let mut budget = MileageBudget::new(config.mileage_cap);
    let report = DeliverySimulator::from_config(&distances, &locations, &config)
        .expect("valid config")
        .deliver_all(&mut fleet, &mut packages, &mut budget);

    // Package 1 ("195 W Oakland Ave") matches no canonical address.
    assert_eq!(
        report.issues,
        vec![RoutingIssue::UnresolvableAddress {
            package: 1,
            address: "195 W Oakland Ave".to_string(),
        }]
    );
    assert_eq!(packages.lookup(1).map(|p| p.status()), Some(PackageStatus::AtHub));
    assert!(fleet[0].packages().is_empty());

    // Truck 1: hub -> 1 (7.2). Truck 2: hub -> 2 (3.8) -> 3 (9.2). Truck 3: hub -> 4 (2.2).
    assert_eq!(report.trucks[0].delivered, vec![2]);
    assert_eq!(report.trucks[1].delivered, vec![3, 4]);
    assert_eq!(report.trucks[2].delivered, vec![5]);
    assert_eq!(report.delivered_count(), 4);
    assert!((report.total_miles() - 22.4).abs() < 1e-9);
    assert!((fleet[1].miles_traveled() - 13.0).abs() < 1e-9);

    // 2.2 miles at 18 mph is 7m20s.
    assert_eq!(
        packages.lookup(5).and_then(|p| p.delivered_at()),
        Some(date(1900, 1, 1).at(8, 7, 20, 0))
    );
    assert!(report.late_packages(&packages).is_empty());
    assert_eq!(
        fleet[2].to_string(),
        "Truck 3: 0 packages, 2.20 miles traveled, current time: 08:07 AM"
    );
}

#[test]
fn test_triangular_table_strands_packages() {
    let Inputs {
        locations,
        distances,
        mut packages,
    } = inputs(false);
    let mut fleet = vec![Truck::new(1)];
    for id in [2, 4] {
        fleet[0].load(&mut packages, id).expect("known");
    }
    let config = DispatchConfig::default().with_unrouted_policy(UnroutedPolicy::Retain);
    let mut budget = MileageBudget::new(140.0);
    let report = DeliverySimulator::from_config(&distances, &locations, &config)
        .expect("valid config")
        .deliver_all(&mut fleet, &mut packages, &mut budget);

    // Row 0 only holds (0, 0); nothing is reachable from the hub.
    assert_eq!(report.delivered_count(), 0);
    assert_eq!(fleet[0].unrouted(), &[2, 4]);
    assert_eq!(report.issues.len(), 2);
    assert!(report
        .issues
        .iter()
        .all(|i| matches!(i, RoutingIssue::OutOfRangeLocation { from: 0, .. })));
}

#[test]
fn test_cap_serves_trucks_in_fleet_order() {
    let Inputs {
        locations,
        distances,
        mut packages,
    } = inputs(true);
    let config = DispatchConfig::default()
        .with_truck_capacity(2)
        .with_mileage_cap(10.0);
    let mut fleet = config.build_fleet();
    assign_packages(&mut packages, &mut fleet, config.truck_capacity).expect("fleet");

    let mut budget = MileageBudget::new(config.mileage_cap);
    let report = DeliverySimulator::from_config(&distances, &locations, &config)
        .expect("valid config")
        .deliver_all(&mut fleet, &mut packages, &mut budget);

    // Truck 1 spends 7.2, so truck 2's first leg (3.8) would reach 11.0.
    // Truck 3's 2.2 leg still fits at 9.4.
    assert_eq!(report.trucks[0].delivered, vec![2]);
    assert!(report.trucks[1].halted);
    assert!(report.trucks[1].delivered.is_empty());
    assert_eq!(fleet[1].packages(), &[3, 4]);
    assert_eq!(report.trucks[2].delivered, vec![5]);
    assert!((budget.used() - 9.4).abs() < 1e-9);
    assert_eq!(report.halted_trucks(), vec![2]);
}
