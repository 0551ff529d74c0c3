//! Wire contract for `/api/matches/*` and the single normalization step that
//! turns a loosely-shaped match record into a display row.
//!
//! The backend (and older builds of it) disagree on field names, so every field
//! is optional and a field of the wrong JSON type is treated as missing rather
//! than failing the whole payload.

use std::fmt;

use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::dates::{parse_timestamp, timestamp_from_millis};

pub const DEFAULT_LEAGUE: &str = "—";
pub const DEFAULT_HOME: &str = "Home";
pub const DEFAULT_AWAY: &str = "Away";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MatchesPayload {
    List(#[serde(deserialize_with = "lenient_items")] Vec<RawMatch>),
    Dated(DatedMatches),
    Other(Value),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatedMatches {
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_items_opt")]
    pub matches: Option<Vec<RawMatch>>,
}

impl MatchesPayload {
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn date(&self) -> Option<&str> {
        match self {
            MatchesPayload::Dated(dated) => dated.date.as_deref().and_then(non_empty),
            _ => None,
        }
    }

    pub fn matches(&self) -> &[RawMatch] {
        match self {
            MatchesPayload::List(items) => items.as_slice(),
            MatchesPayload::Dated(dated) => dated.matches.as_deref().unwrap_or(&[]),
            MatchesPayload::Other(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatch {
    #[serde(default, deserialize_with = "lenient")]
    pub date_utc: Option<TimeValue>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<TimeValue>,
    #[serde(default, deserialize_with = "lenient")]
    pub kickoff: Option<TimeValue>,

    #[serde(default, deserialize_with = "lenient")]
    pub league_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub league: Option<NameRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub competition: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub home_team: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub home: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub away_team: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub away: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub teams: Option<TeamsRef>,

    #[serde(default, deserialize_with = "lenient")]
    pub home_goals: Option<GoalCount>,
    #[serde(default, deserialize_with = "lenient")]
    pub away_goals: Option<GoalCount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameRef {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamsRef {
    #[serde(default, deserialize_with = "lenient")]
    pub home: Option<NameRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub away: Option<NameRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Text(String),
    Millis(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GoalCount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for GoalCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalCount::Int(n) => write!(f, "{n}"),
            GoalCount::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{}", *x as i64),
            GoalCount::Float(x) => write!(f, "{x}"),
            GoalCount::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Kickoff {
    At(DateTime<Local>),
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Score {
    Pending,
    Final { home: String, away: String },
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Pending => f.write_str("vs"),
            Score::Final { home, away } => write!(f, "{home}–{away}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub kickoff: Kickoff,
    pub league: String,
    pub home: String,
    pub away: String,
    pub score: Score,
}

impl RawMatch {
    /// Resolve every fallback chain once. `now` stands in for a missing kickoff.
    pub fn normalize(&self, now: DateTime<Local>) -> MatchRow {
        MatchRow {
            kickoff: self.kickoff_time(now),
            league: self.league_label().unwrap_or(DEFAULT_LEAGUE).to_string(),
            home: self.home_label().unwrap_or(DEFAULT_HOME).to_string(),
            away: self.away_label().unwrap_or(DEFAULT_AWAY).to_string(),
            score: self.score(),
        }
    }

    fn kickoff_time(&self, now: DateTime<Local>) -> Kickoff {
        let first = [&self.date_utc, &self.date, &self.kickoff]
            .into_iter()
            .flatten()
            .find(|v| !matches!(v, TimeValue::Text(s) if s.is_empty()));
        let parsed = match first {
            None => return Kickoff::At(now),
            Some(TimeValue::Text(raw)) => parse_timestamp(raw),
            Some(TimeValue::Millis(ms)) if ms.is_finite() => timestamp_from_millis(*ms as i64),
            Some(TimeValue::Millis(_)) => None,
        };
        parsed.map(Kickoff::At).unwrap_or(Kickoff::Invalid)
    }

    fn league_label(&self) -> Option<&str> {
        first_name([
            self.league_name.as_deref(),
            self.league.as_ref().and_then(|l| l.name.as_deref()),
            self.competition.as_deref(),
        ])
    }

    fn home_label(&self) -> Option<&str> {
        first_name([
            self.home_team.as_deref(),
            self.home.as_deref(),
            self.teams
                .as_ref()
                .and_then(|t| t.home.as_ref())
                .and_then(|h| h.name.as_deref()),
        ])
    }

    fn away_label(&self) -> Option<&str> {
        first_name([
            self.away_team.as_deref(),
            self.away.as_deref(),
            self.teams
                .as_ref()
                .and_then(|t| t.away.as_ref())
                .and_then(|a| a.name.as_deref()),
        ])
    }

    fn score(&self) -> Score {
        match (&self.home_goals, &self.away_goals) {
            (Some(home), Some(away)) => Score::Final {
                home: home.to_string(),
                away: away.to_string(),
            },
            _ => Score::Pending,
        }
    }
}

fn first_name<const N: usize>(chain: [Option<&str>; N]) -> Option<&str> {
    chain.into_iter().flatten().find_map(non_empty)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(de)?;
    Ok(T::deserialize(value).ok())
}

fn lenient_items<'de, D>(de: D) -> Result<Vec<RawMatch>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<Value>::deserialize(de)?;
    Ok(items
        .into_iter()
        .map(raw_match_from)
        .collect())
}

fn lenient_items_opt<'de, D>(de: D) -> Result<Option<Vec<RawMatch>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    match value {
        Value::Array(items) => Ok(Some(items.into_iter().map(raw_match_from).collect())),
        _ => Ok(None),
    }
}

// Only objects carry named fields; derived struct impls would also accept arrays
// positionally, so anything else is an all-defaults record.
fn raw_match_from(item: Value) -> RawMatch {
    match item {
        Value::Object(_) => RawMatch::deserialize(item).unwrap_or_default(),
        _ => RawMatch::default(),
    }
}
