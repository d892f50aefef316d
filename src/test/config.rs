use crate::error::ConfigError;
use crate::sim::SimConfig;

#[test]
fn default_config_is_valid() {
    assert_eq!(SimConfig::default().validate(), Ok(()));
}

#[test]
fn zero_population_is_rejected() {
    let cfg = SimConfig {
        n: 0,
        ..SimConfig::default()
    };
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroPopulation));
}

#[test]
fn out_of_range_probability_names_the_parameter() {
    let cfg = SimConfig {
        p_inf: 1.5,
        ..SimConfig::default()
    };
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::ProbabilityOutOfRange {
            name: "p_inf",
            value: 1.5
        })
    );

    let cfg = SimConfig {
        p_merge_rb: -0.1,
        ..SimConfig::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::ProbabilityOutOfRange { name: "p_merge_rb", .. })
    ));
}

#[test]
fn nan_probability_is_rejected() {
    let cfg = SimConfig {
        p_rec: f64::NAN,
        ..SimConfig::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::ProbabilityOutOfRange { name: "p_rec", .. })
    ));
}

#[test]
fn boundary_probabilities_are_accepted() {
    let cfg = SimConfig {
        p_blue: 0.0,
        p_fragm_r: 1.0,
        p_fragm_b: 0.0,
        p_merge_rr: 1.0,
        p_inf: 1.0,
        p_rec: 0.0,
        ..SimConfig::default()
    };
    assert_eq!(cfg.validate(), Ok(()));
}

#[test]
fn config_json_defaults_optional_fields() {
    let raw = r#"
{
    "n": 10, "p_blue": 0.5, "p_fragm_r": 0.1, "p_fragm_b": 0.2,
    "p_merge_rr": 0.3, "p_merge_rb": 0.4, "p_merge_bb": 0.5,
    "p_inf": 0.6, "p_rec": 0.7, "therm": 5, "steps": 6
}
    "#;
    let cfg: SimConfig = serde_json::from_str(raw).expect("parse config");
    assert_eq!(cfg.n, 10);
    assert_eq!(cfg.seed, None);
    assert!(!cfg.check_invariants);
    assert_eq!(cfg.validate(), Ok(()));
}
