use super::*;

#[test]
fn long_source_is_cut_inside_usable_range() {
    let cfg = BackgroundConfig::default();
    let plan = plan_background(120.0, 40.0, &cfg, 1.0).unwrap();
    assert_eq!(
        plan,
        BackgroundPlan::Cut {
            start_secs: 78.0,
            duration_secs: 41.0
        }
    );
    let plan = plan_background(120.0, 40.0, &cfg, 0.0).unwrap();
    assert_eq!(
        plan,
        BackgroundPlan::Cut {
            start_secs: 0.0,
            duration_secs: 41.0
        }
    );
}

#[test]
fn short_source_loops() {
    let plan = plan_background(44.0, 40.0, &BackgroundConfig::default(), 0.5).unwrap();
    assert_eq!(
        plan,
        BackgroundPlan::Loop {
            duration_secs: 41.0
        }
    );
    assert_eq!(plan.duration_secs(), 41.0);
}

#[test]
fn invalid_durations_are_rejected() {
    let cfg = BackgroundConfig::default();
    assert!(plan_background(0.0, 10.0, &cfg, 0.5).is_err());
    assert!(plan_background(10.0, f64::NAN, &cfg, 0.5).is_err());
}
