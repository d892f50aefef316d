use std::collections::BTreeSet;

use super::{clusters_of, world_from};
use crate::error::SimError;
use crate::model::{
    ClusterId, ClusterPartition, ClusterWorld, Color, Health, NodeId, Population,
};
use crate::sim::{SimConfig, SimRng, SimulationDriver, Tick, run_batch};

fn config(n: usize) -> SimConfig {
    SimConfig {
        n,
        check_invariants: true,
        ..SimConfig::default()
    }
}

fn frozen(n: usize, p_inf: f64, p_rec: f64, steps: u64) -> SimConfig {
    SimConfig {
        p_fragm_r: 0.0,
        p_fragm_b: 0.0,
        p_merge_rr: 0.0,
        p_merge_rb: 0.0,
        p_merge_bb: 0.0,
        p_inf,
        p_rec,
        therm: 0,
        steps,
        ..config(n)
    }
}

#[test]
fn frozen_topology_survives_every_phase() {
    let cfg = frozen(10, 0.3, 0.2, 50).with_seed(2024);
    let mut d = SimulationDriver::new(cfg).expect("valid config");
    let initial = clusters_of(d.world().partition());
    let largest = d.world().partition().largest().expect("non-empty");
    let largest_members: BTreeSet<NodeId> = d
        .world()
        .partition()
        .members_of(largest)
        .expect("largest exists")
        .clone();

    d.thermalize().expect("thermalize");
    assert_eq!(clusters_of(d.world().partition()), initial);

    let seeding = d.seed_epidemic().expect("seed");
    assert_eq!(seeding.cluster, largest);
    assert_eq!(seeding.size, largest_members.len());
    let first = *largest_members.first().expect("non-empty cluster");
    assert_eq!(d.world().population().health(first), Health::Infected);
    assert_eq!(d.world().population().infected_count(), seeding.infected);
    assert!(
        d.world()
            .population()
            .infected()
            .iter()
            .all(|n| largest_members.contains(n))
    );

    d.run_epidemic().expect("epidemic");
    assert_eq!(clusters_of(d.world().partition()), initial);
    // 疫情从未离开种子簇
    for node in d.world().population().nodes() {
        if !largest_members.contains(&node.id()) {
            assert_eq!(node.health(), Health::Susceptible);
        }
    }
}

#[test]
fn seeding_picks_smallest_id_among_tied_largest_clusters() {
    let world = world_from(&[4, 4, 2, 2, 7]);
    let mut d = SimulationDriver::from_world(frozen(5, 0.0, 0.0, 0), world, SimRng::new(1))
        .expect("valid config");
    let seeding = d.seed_epidemic().expect("seed");
    assert_eq!(seeding.cluster, ClusterId(2));
    assert_eq!(seeding.size, 2);
    assert_eq!(d.world().population().health(NodeId(2)), Health::Infected);
}

#[test]
fn one_tick_of_certain_transmission_infects_everyone() {
    let mut world = world_from(&[0, 0, 0, 0]);
    assert!(world.infect(NodeId(0)));
    let mut d = SimulationDriver::from_world(frozen(4, 1.0, 0.0, 1), world, SimRng::new(9))
        .expect("valid config");

    let burnout = d.run_epidemic().expect("epidemic");
    assert_eq!(burnout, None);
    assert_eq!(d.now(), Tick(1));
    assert_eq!(d.world().population().infected_count(), 4);
}

#[test]
fn certain_recovery_reports_burnout_at_tick_one() {
    let mut world = world_from(&[0, 0, 0, 0]);
    assert!(world.infect(NodeId(1)));
    let mut d = SimulationDriver::from_world(frozen(4, 0.0, 1.0, 100), world, SimRng::new(3))
        .expect("valid config");

    let burnout = d.run_epidemic().expect("epidemic").expect("burnout");
    assert_eq!(burnout.tick, Tick(1));
    assert_eq!(burnout.recovered_percent, 25.0);
    assert_eq!(d.world().population().infected_count(), 0);
    assert_eq!(d.world().population().recovered_count(), 1);
    assert_eq!(d.now(), Tick(1));
}

#[test]
fn full_run_report_is_consistent() {
    let cfg = SimConfig {
        therm: 500,
        steps: 2000,
        p_rec: 0.2,
        ..config(200)
    }
    .with_seed(42);
    let report = SimulationDriver::new(cfg).expect("valid").run().expect("run");

    assert_eq!(report.seed, 42);
    assert_eq!(report.n, 200);
    assert!(report.seed_cluster_size >= 1);
    assert!(report.seeded_infections >= 1);
    assert!(report.seeded_infections <= report.seed_cluster_size);
    assert!((0.0..=1.0).contains(&report.same_cluster_probability));
    assert!(report.total_recovered <= report.n);
    assert_eq!(
        report.final_ratio,
        report.total_recovered as f64 / report.seed_cluster_size as f64
    );
    match report.burnout {
        Some(b) => {
            assert_eq!(b.tick.0, report.ticks_run);
            assert_eq!(report.infected_remaining, 0);
            assert_eq!(
                b.recovered_percent,
                report.total_recovered as f64 * 100.0 / 200.0
            );
        }
        None => {
            assert_eq!(report.ticks_run, 2000);
            assert!(report.infected_remaining > 0);
        }
    }
}

#[test]
fn identical_seed_reproduces_identical_report() {
    let cfg = SimConfig {
        therm: 300,
        steps: 300,
        ..config(150)
    }
    .with_seed(7);
    let a = SimulationDriver::new(cfg.clone()).expect("valid").run().expect("run");
    let b = SimulationDriver::new(cfg).expect("valid").run().expect("run");
    assert_eq!(a, b);
}

#[test]
fn zero_steps_reports_no_burnout_and_zero_ratio() {
    let cfg = SimConfig {
        therm: 10,
        steps: 0,
        ..config(30)
    }
    .with_seed(1);
    let report = SimulationDriver::new(cfg).expect("valid").run().expect("run");
    assert_eq!(report.ticks_run, 0);
    assert_eq!(report.burnout, None);
    assert_eq!(report.total_recovered, 0);
    assert_eq!(report.final_ratio, 0.0);
}

#[test]
fn invalid_config_is_rejected_before_running() {
    let cfg = SimConfig {
        p_fragm_b: 2.0,
        ..config(10)
    };
    assert!(matches!(
        SimulationDriver::new(cfg),
        Err(SimError::Config(_))
    ));
}

#[test]
fn seeding_an_empty_world_is_an_error() {
    let world = ClusterWorld::new(
        Population::from_colors(Vec::<Color>::new()),
        ClusterPartition::from_assignment(Vec::new()),
    );
    let mut d = SimulationDriver::from_world(frozen(1, 0.0, 0.0, 0), world, SimRng::new(0))
        .expect("valid config");
    assert_eq!(d.seed_epidemic(), Err(SimError::EmptyPartition));
}

#[test]
fn batch_runs_use_distinct_reproducible_streams() {
    let cfg = SimConfig {
        therm: 100,
        steps: 200,
        ..config(60)
    }
    .with_seed(99);

    let a = run_batch(&cfg, 3).expect("batch");
    let b = run_batch(&cfg, 3).expect("batch");
    assert_eq!(a, b);
    assert_eq!(a.seed, 99);
    assert_eq!(a.runs.len(), 3);
    let seeds: BTreeSet<u64> = a.runs.iter().map(|r| r.seed).collect();
    assert_eq!(seeds.len(), 3);
    assert!(a.burnouts <= 3);
    assert_eq!(
        a.burnouts,
        a.runs.iter().filter(|r| r.burnout.is_some()).count()
    );
}
