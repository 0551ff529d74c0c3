use std::fs;
use std::path::PathBuf;

use chrono::{Local, TimeZone};
use matchday_terminal::matches::{Kickoff, MatchesPayload, Score};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_backend_dated_payload() {
    let raw = read_fixture("matches_dated.json");
    let payload = MatchesPayload::parse(&raw).expect("fixture should parse");
    assert!(matches!(payload, MatchesPayload::Dated(_)));
    assert_eq!(payload.date(), Some("2024-05-01"));

    let now = Local::now();
    let rows: Vec<_> = payload.matches().iter().map(|m| m.normalize(now)).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].league, "Premier League");
    assert_eq!(rows[0].home, "Arsenal");
    assert_eq!(rows[0].away, "Chelsea");
    assert_eq!(
        rows[0].score,
        Score::Final {
            home: "1".to_string(),
            away: "0".to_string()
        }
    );
    assert_eq!(rows[1].score, Score::Pending);
    assert!(matches!(rows[1].kickoff, Kickoff::At(_)));
}

#[test]
fn parses_loose_list_payload() {
    let raw = read_fixture("matches_loose.json");
    let payload = MatchesPayload::parse(&raw).expect("fixture should parse");
    assert!(matches!(payload, MatchesPayload::List(_)));
    assert_eq!(payload.date(), None);

    let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let rows: Vec<_> = payload.matches().iter().map(|m| m.normalize(now)).collect();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].league, "Serie A");
    assert_eq!(rows[0].home, "Roma");
    assert_eq!(rows[0].away, "Lazio");
    assert_eq!(rows[0].score.to_string(), "2–2");

    assert_eq!(rows[1].league, "Friendly");
    assert_eq!(rows[1].home, "Ajax");
    assert_eq!(rows[1].score.to_string(), "vs");

    assert_eq!(rows[2].league, "—");
    assert_eq!(rows[2].home, "Home");
    assert_eq!(rows[2].away, "Away");
    assert_eq!(rows[2].kickoff, Kickoff::At(now));
}

#[test]
fn league_fallback_order() {
    let raw = r#"[
        {"league_name": "A", "league": {"name": "B"}, "competition": "C"},
        {"league": {"name": "B"}, "competition": "C"},
        {"competition": "C"},
        {"league": {}}
    ]"#;
    let payload = MatchesPayload::parse(raw).unwrap();
    let now = Local::now();
    let leagues: Vec<_> = payload
        .matches()
        .iter()
        .map(|m| m.normalize(now).league)
        .collect();
    assert_eq!(leagues, ["A", "B", "C", "—"]);
}

#[test]
fn team_fallback_order() {
    let raw = r#"[
        {"home_team": "H1", "home": "H2", "away_team": "A1", "away": "A2",
         "teams": {"home": {"name": "H3"}, "away": {"name": "A3"}}},
        {"home": "H2", "away": "A2", "teams": {"home": {"name": "H3"}, "away": {"name": "A3"}}},
        {"teams": {"home": {"name": "H3"}, "away": {"name": "A3"}}}
    ]"#;
    let payload = MatchesPayload::parse(raw).unwrap();
    let now = Local::now();
    let sides: Vec<_> = payload
        .matches()
        .iter()
        .map(|m| {
            let row = m.normalize(now);
            (row.home, row.away)
        })
        .collect();
    assert_eq!(sides[0], ("H1".to_string(), "A1".to_string()));
    assert_eq!(sides[1], ("H2".to_string(), "A2".to_string()));
    assert_eq!(sides[2], ("H3".to_string(), "A3".to_string()));
}

#[test]
fn epoch_millis_kickoff() {
    let payload = MatchesPayload::parse(r#"[{"kickoff": 1714586400000}]"#).unwrap();
    let row = payload.matches()[0].normalize(Local::now());
    let Kickoff::At(at) = row.kickoff else {
        panic!("millis should parse");
    };
    assert_eq!(at.timestamp(), 1_714_586_400);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(MatchesPayload::parse("{\"date\": ").is_err());
    assert!(MatchesPayload::parse("<html>502</html>").is_err());
}
