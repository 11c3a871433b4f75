use std::io::Write;
use tempfile::NamedTempFile;
use vibexpr::cli;
use vibexpr::dialect::{Capability, Dialect, DialectProfile};
use vibexpr::expression::{
    BooleanExpression, DateExpression, EqualComparable, ExpressionError, NumberExpression,
    NumericExpression, PointExpression, RangeComparable, SqlExpression, StringExpression,
};
use vibexpr::value::TableRef;

const LEGACY_PROFILE: &str = r#"{
    "name": "legacy",
    "capabilities": ["modulus", "sign", "truncate", "geometry"],
    "literals": { "true_literal": "1", "false_literal": "0" },
    "concat": { "function": "CONCAT" }
}"#;

fn profile_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_profile_from_file_drives_rendering() {
    let file = profile_file(LEGACY_PROFILE);
    let profile = cli::load_profile(Some(file.path())).unwrap();

    assert_eq!(profile.name(), "legacy");
    assert!(profile.supports(Capability::Modulus));
    assert!(!profile.supports(Capability::Xor));

    let t = TableRef::new("t");
    let flag = BooleanExpression::column(t.column("flag"));
    assert_eq!(flag.is(true).to_sql(&profile), "(t.flag = 1)");

    let label = StringExpression::column(t.column("first"))
        .append(" ")
        .append(StringExpression::column(t.column("last")));
    assert_eq!(label.to_sql(&profile), "CONCAT(t.first, ' ', t.last)");

    // Natively supported here, so no fallback
    let x = NumberExpression::column(t.column("x"));
    assert_eq!(x.modulus(3.0).to_sql(&profile), "MOD(t.x, 3.0)");
    assert_eq!(x.log10().to_sql(&profile), "(LN(t.x) / LN(10.0))");
}

#[test]
fn test_invalid_profiles_are_reported() {
    let file = profile_file(r#"{ "name": "odd", "capabilities": ["teleportation"] }"#);
    assert!(cli::load_profile(Some(file.path())).is_err());

    match DialectProfile::from_json("not json") {
        Err(ExpressionError::Profile { .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    match DialectProfile::from_path("/definitely/not/here.json") {
        Err(ExpressionError::Io { path, .. }) => assert_eq!(path, "/definitely/not/here.json"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_validation_flags_unrenderable_trees() {
    let bare = DialectProfile::minimal("bare");
    let shop = TableRef::new("shop");
    let location = PointExpression::column(shop.column("location"));

    // Distance has a formula, but it needs point coordinates
    let near = location
        .distance_to(PointExpression::column(shop.column("depot")))
        .is_less_than(10.0);
    let err = near.try_to_sql(&bare).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Dialect bare cannot express operator point-x (missing capability geometry)"
    );

    let geometry = bare.clone().with_capability(Capability::Geometry);
    assert_eq!(
        near.try_to_sql(&geometry).unwrap(),
        "(SQRT((((ST_X(shop.location) - ST_X(shop.depot)) * (ST_X(shop.location) - ST_X(shop.depot))) + ((ST_Y(shop.location) - ST_Y(shop.depot)) * (ST_Y(shop.location) - ST_Y(shop.depot))))) < 10.0)"
    );
}

#[test]
fn test_every_fallback_renders_for_minimal_dialect() {
    let bare = DialectProfile::minimal("bare");
    let t = TableRef::new("t");
    let x = NumberExpression::column(t.column("x"));
    let s = StringExpression::column(t.column("s"));
    let d = DateExpression::column(t.column("d"));

    let trees: Vec<vibexpr::expression::Expr> = vec![
        x.modulus(2.0).into(),
        x.sign().into(),
        x.round_to(2).into(),
        x.trunc().into(),
        x.log10().into(),
        x.cot().into(),
        x.arcsin().into(),
        x.arccos().into(),
        x.sinh().into(),
        x.cosh().into(),
        x.tanh().into(),
        x.degrees().into(),
        x.radians().into(),
        x.stddev().into(),
        x.variance().into(),
        NumberExpression::greatest_of(vec![x.clone(), 1.0.into()]).into(),
        NumberExpression::least_of(vec![x.clone(), 1.0.into()]).into(),
        s.left_trim().into(),
        s.right_trim().into(),
        s.substring_before("-").into(),
        s.substring_after("-").into(),
        d.first_of_month().into(),
        d.end_of_month().into(),
        d.date_repeat_to(d.add_days(1)).days().into(),
        d.plus_repeat(d.date_repeat_to(d.clone())).into(),
        d.at_time_zone("UTC", chrono::FixedOffset::east_opt(0).unwrap()).into(),
        d.minutes_from(d.add_days(1)).into(),
        d.days_from(d.add_days(1)).into(),
        d.years_from(d.add_years(1)).into(),
        BooleanExpression::column(t.column("a"))
            .xor(BooleanExpression::column(t.column("b")))
            .into(),
    ];
    for tree in trees {
        let sql = tree.try_to_sql(&bare).unwrap();
        for native in [
            "MOD(", "SIGN(", "TRUNC(", "LOG10(", "COT(", "ASIN(", "ACOS(", "SINH(", "COSH(",
            "TANH(", "DEGREES(", "RADIANS(", "STDDEV(", "VARIANCE(", "GREATEST(", "LEAST(",
            "LTRIM(", "RTRIM(", "SUBSTRING_BEFORE(", "SUBSTRING_AFTER(", "DATE_TRUNC(",
            "AT TIME ZONE", " XOR ", "INTERVAL '1 years",
        ] {
            assert!(!sql.contains(native), "{} found in {}", native, sql);
        }
    }
}
