use crate::sim::{RandomSource, SimRng};

#[test]
fn same_seed_gives_same_stream() {
    let mut a = SimRng::new(12345);
    let mut b = SimRng::new(12345);
    for _ in 0..100 {
        assert_eq!(a.uniform01().to_bits(), b.uniform01().to_bits());
        assert_eq!(a.uniform_int(1000), b.uniform_int(1000));
    }
}

#[test]
fn draws_stay_in_range() {
    let mut rng = SimRng::new(7);
    for _ in 0..10_000 {
        let u = rng.uniform01();
        assert!((0.0..1.0).contains(&u), "uniform01 out of range: {u}");
        assert!(rng.uniform_int(3) < 3);
    }
    for _ in 0..100 {
        assert_eq!(rng.uniform_int(1), 0);
    }
}

#[test]
fn bernoulli_extremes_are_certain() {
    let mut rng = SimRng::new(99);
    for _ in 0..1000 {
        assert!(rng.bernoulli(1.0));
        assert!(!rng.bernoulli(0.0));
    }
}

#[test]
fn fork_is_reproducible_and_independent() {
    let mut m1 = SimRng::new(5);
    let mut m2 = SimRng::new(5);
    let mut c1 = m1.fork();
    let mut c2 = m2.fork();
    assert_eq!(c1.seed(), c2.seed());
    assert_eq!(c1.uniform_int(1 << 30), c2.uniform_int(1 << 30));

    let mut c3 = m1.fork();
    assert_ne!(c1.seed(), c3.seed());
    let _ = c3.uniform01();
}
