//! Tournament data models and create-request validation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::{TournamentError, TournamentResult};

/// Tournament ID type
pub type TournamentId = i64;

/// Poker site a tournament was played on.
///
/// This is a closed set. Membership is checked with exact, case-sensitive
/// spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    Olybet,
    Tigergaming,
    Optibet,
    Unibet,
    Pokerstars,
    #[serde(rename = "WPTGlobal")]
    WptGlobal,
    #[serde(rename = "888Poker")]
    Poker888,
    #[serde(rename = "ClubGG")]
    ClubGg,
    Winamax,
    #[serde(rename = "ACR")]
    Acr,
    Betsafe,
    Coinpoker,
}

impl Site {
    /// Every accepted site, in display order
    pub const ALL: [Site; 12] = [
        Site::Olybet,
        Site::Tigergaming,
        Site::Optibet,
        Site::Unibet,
        Site::Pokerstars,
        Site::WptGlobal,
        Site::Poker888,
        Site::ClubGg,
        Site::Winamax,
        Site::Acr,
        Site::Betsafe,
        Site::Coinpoker,
    ];

    /// Canonical spelling, as stored and as accepted on input
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Olybet => "Olybet",
            Site::Tigergaming => "Tigergaming",
            Site::Optibet => "Optibet",
            Site::Unibet => "Unibet",
            Site::Pokerstars => "Pokerstars",
            Site::WptGlobal => "WPTGlobal",
            Site::Poker888 => "888Poker",
            Site::ClubGg => "ClubGG",
            Site::Winamax => "Winamax",
            Site::Acr => "ACR",
            Site::Betsafe => "Betsafe",
            Site::Coinpoker => "Coinpoker",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Site::ALL
            .into_iter()
            .find(|site| site.as_str() == s)
            .ok_or_else(|| TournamentError::InvalidSite(Some(s.to_string())))
    }
}

/// A persisted tournament result.
///
/// `site` is kept as text on the read side: rows are trusted as stored and
/// are not re-validated against [`Site`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(rename = "type")]
    pub tournament_type: String,
    pub buy_in: f64,
    pub prize: f64,
    /// In the money: `None` when not recorded
    pub itm: Option<bool>,
    pub site: String,
    pub date: NaiveDate,
}

/// A validated tournament ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewTournament {
    pub name: String,
    pub tournament_type: String,
    pub buy_in: f64,
    pub prize: f64,
    pub itm: Option<bool>,
    pub site: Site,
    pub date: NaiveDate,
}

impl NewTournament {
    /// Attach a store-assigned id
    pub fn with_id(self, id: TournamentId) -> Tournament {
        Tournament {
            id,
            name: self.name,
            tournament_type: self.tournament_type,
            buy_in: self.buy_in,
            prize: self.prize,
            itm: self.itm,
            site: self.site.as_str().to_string(),
            date: self.date,
        }
    }
}

/// Monetary input: either a JSON number or numeric text such as `"100"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Zero and empty text count as "not given"
    fn is_unset(&self) -> bool {
        match self {
            Amount::Number(n) => *n == 0.0,
            Amount::Text(text) => text.is_empty(),
        }
    }

    /// Read the amount as a finite number
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(text) => text.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }

    fn raw(&self) -> String {
        match self {
            Amount::Number(n) => n.to_string(),
            Amount::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

/// Incoming create payload.
///
/// Every field is optional here so that presence can be reported as
/// [`TournamentError::MissingFields`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTournamentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tournament_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_in: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itm: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl CreateTournamentRequest {
    /// Validate the payload and convert it into a [`NewTournament`].
    ///
    /// Checks run in a fixed order and stop at the first failing step:
    ///
    /// 1. `site` must be one of [`Site::ALL`]
    /// 2. `name`, `type`, `buy_in`, `prize` and `date` must be given: not
    ///    absent, not `""`, and for amounts not the number `0`
    /// 3. `buy_in` and `prize` must be finite numbers
    /// 4. `date` must be readable by [`parse_date`]
    ///
    /// `itm` is never checked.
    pub fn validate(self) -> TournamentResult<NewTournament> {
        let site = match self.site.as_deref() {
            Some(site) => site.parse::<Site>()?,
            None => return Err(TournamentError::InvalidSite(None)),
        };

        let mut missing = Vec::new();
        let name = required_text("name", self.name, &mut missing);
        let tournament_type = required_text("type", self.tournament_type, &mut missing);
        let buy_in = required_amount("buy_in", self.buy_in, &mut missing);
        let prize = required_amount("prize", self.prize, &mut missing);
        let date = required_text("date", self.date, &mut missing);

        let (Some(name), Some(tournament_type), Some(buy_in), Some(prize), Some(date)) =
            (name, tournament_type, buy_in, prize, date)
        else {
            return Err(TournamentError::MissingFields(missing));
        };

        let buy_in = parse_amount("buy_in", &buy_in)?;
        let prize = parse_amount("prize", &prize)?;
        let date = parse_date(&date)?;

        Ok(NewTournament {
            name,
            tournament_type,
            buy_in,
            prize,
            itm: self.itm,
            site,
            date,
        })
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = value.filter(|v| !v.is_empty());
    if value.is_none() {
        missing.push(field);
    }
    value
}

fn required_amount(
    field: &'static str,
    value: Option<Amount>,
    missing: &mut Vec<&'static str>,
) -> Option<Amount> {
    let value = value.filter(|v| !v.is_unset());
    if value.is_none() {
        missing.push(field);
    }
    value
}

fn parse_amount(field: &'static str, amount: &Amount) -> TournamentResult<f64> {
    amount.to_f64().ok_or_else(|| TournamentError::InvalidNumber {
        field,
        value: amount.raw(),
    })
}

/// Calendar date layouts, tried in order. Numeric `a/b/c` dates are
/// month-first, matching PostgreSQL's default `DateStyle`.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d", "%m/%d/%Y", "%m-%d-%Y", "%b %d %Y",
    "%b %d, %Y", "%d %b %Y", "%d-%b-%Y", "%Y-%b-%d",
];

/// Timestamp layouts without an offset; only the date part is kept
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a calendar date the way a PostgreSQL `DATE` column reads text input.
///
/// Accepts ISO dates, the common slash, dot and compact variants, month
/// names (`Jan 7 2024`, `7 January 2024`) and timestamps, with or without an
/// RFC 3339 offset.
pub fn parse_date(value: &str) -> TournamentResult<NaiveDate> {
    let value = value.trim();

    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()));

    date.ok_or_else(|| TournamentError::InvalidDate(value.to_string()))
}
