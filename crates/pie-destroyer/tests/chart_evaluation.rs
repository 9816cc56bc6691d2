use chrono::{TimeZone, Utc};
use pie_destroyer::chart::query::{parse_query, to_query_string};
use pie_destroyer::chart::{
    chargeable_count, BackgroundPattern, ChartSession, ColorScheme, EvaluationConfig,
    EvaluationEngine, OptionChange, OptionSet,
};

fn engine() -> EvaluationEngine {
    EvaluationEngine::new(EvaluationConfig::default())
}

fn everything_on() -> OptionSet {
    OptionSet {
        slices: 20,
        rotation: 270,
        colors: ColorScheme::Ugly,
        three_d: true,
        explode: true,
        hide_labels: true,
        tiny_labels: true,
        random_label_sizes: true,
        shadow: true,
        outline: true,
        background: BackgroundPattern::Houndstooth,
        donut: true,
        large_font: true,
        text_description: true,
    }
}

#[test]
fn default_options_are_clean() {
    let report = engine().derive(&OptionSet::default(), Utc::now());

    assert!(report.violations.is_empty());
    assert!(report.good_practices.is_empty());
    assert_eq!(report.chargeable_count, 0);
    assert!(!report.budget_exhausted());
}

#[test]
fn overloaded_3d_chart_reports_both_in_order() {
    let options = OptionSet {
        slices: 10,
        three_d: true,
        ..OptionSet::default()
    };
    let report = engine().derive(&options, Utc::now());

    assert_eq!(
        report.violations,
        vec![
            "Slice Overload (10 slices make comparison nearly impossible)".to_string(),
            "The Third Dimension (3D distorts angle perception)".to_string(),
        ]
    );
    assert_eq!(report.chargeable_count, 1);
}

#[test]
fn hidden_labels_suppress_the_other_label_complaints() {
    let options = OptionSet {
        hide_labels: true,
        tiny_labels: true,
        random_label_sizes: true,
        ..OptionSet::default()
    };
    let report = engine().derive(&options, Utc::now());

    assert_eq!(
        report.violations,
        vec!["Information Vandalism (missing labels eliminate context)".to_string()]
    );
    assert_eq!(report.chargeable_count, 1);
}

#[test]
fn accessible_choices_list_good_practices_in_order() {
    let options = OptionSet {
        colors: ColorScheme::Colorsafe,
        large_font: true,
        text_description: true,
        ..OptionSet::default()
    };
    let report = engine().derive(&options, Utc::now());

    assert!(report.violations.is_empty());
    assert_eq!(
        report.good_practices,
        vec![
            "Colorblind-safe palette (improves accessibility)".to_string(),
            "Larger font size (improves readability)".to_string(),
            "Text description provided (makes data accessible)".to_string(),
        ]
    );
}

#[test]
fn count_is_uncapped_when_the_guard_is_bypassed() {
    let options = everything_on();

    assert_eq!(chargeable_count(&options), 6);
    let report = engine().derive(&options, Utc::now());
    assert_eq!(report.chargeable_count, 6);
    assert!(report.budget_exhausted());
}

#[test]
fn shared_link_may_exceed_the_budget_and_still_be_cleaned_up() {
    let mut session = ChartSession::with_options(EvaluationConfig::default(), everything_on());
    assert_eq!(session.report().chargeable_count, 6);

    session
        .apply(OptionChange::Outline(false))
        .expect("lowering the count always passes");
    assert_eq!(session.report().chargeable_count, 5);

    assert!(session.apply(OptionChange::Outline(true)).is_err());
    assert_eq!(session.report().chargeable_count, 5);
}

#[test]
fn derivation_is_pure_apart_from_the_clock() {
    let options = everything_on();
    let now = Utc
        .timestamp_millis_opt(1_700_000_000_000)
        .single()
        .expect("valid timestamp");

    let first = engine().derive(&options, now);
    let second = engine().derive(&options, now);
    assert_eq!(first, second);
}

#[test]
fn toggling_on_then_off_restores_options_and_report() {
    let now = Utc
        .timestamp_millis_opt(1_000)
        .single()
        .expect("valid timestamp");
    let mut session = ChartSession::from_query(EvaluationConfig::default(), "s=9&c=neon&sh=1");
    let before_report = session.refresh_at(now).clone();
    let before_options = session.options().clone();

    session
        .apply_at(OptionChange::Explode(true), now)
        .expect("within budget");
    assert_ne!(session.report(), &before_report);

    let after = session
        .apply_at(OptionChange::Explode(false), now)
        .expect("lowering the count always passes")
        .clone();

    assert_eq!(session.options(), &before_options);
    assert_eq!(after, before_report);
}

#[test]
fn switching_a_flag_on_twice_changes_nothing() {
    let mut session = ChartSession::new(EvaluationConfig::default());
    session.apply(OptionChange::ThreeD(true)).expect("first toggle");
    let once = session.options().clone();
    session.apply(OptionChange::ThreeD(true)).expect("second toggle");

    assert_eq!(session.options(), &once);
    assert_eq!(session.report().chargeable_count, 1);
}

#[test]
fn query_round_trips_default_and_everything_on() {
    for options in [OptionSet::default(), everything_on()] {
        let encoded = to_query_string(&options);
        assert_eq!(parse_query(&encoded), options, "round trip of {encoded}");
    }
}

#[test]
fn config_changes_the_budget() {
    let config = EvaluationConfig {
        max_bad_choices: 1,
        ..EvaluationConfig::default()
    };
    let mut session = ChartSession::new(config);

    session.apply(OptionChange::Explode(true)).expect("first bad choice");
    let err = session
        .apply(OptionChange::Shadow(true))
        .expect_err("second bad choice blocked");
    assert!(err.to_string().contains("only select 1 bad options"));
}
