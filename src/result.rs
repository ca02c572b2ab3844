use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

lazy_static! {
    static ref LOG_LINE: Regex = Regex::new(r"^(?:DEBUG|INFO|WARNING|ERROR|CRITICAL)").unwrap();
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Winner {
    Player0,
    Player1,
    Draw,
}

#[derive(Clone, PartialEq, Debug)]
pub struct GameResult {
    pub winner: Winner,
    pub scores: [f64; 2],
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(deserialize_with = "deserialize_winner")]
    winner_pid: Winner,
    players: RawPlayers,
}

#[derive(Deserialize)]
struct RawPlayers {
    #[serde(rename = "0")]
    first: RawPlayer,
    #[serde(rename = "1")]
    second: RawPlayer,
}

#[derive(Deserialize)]
struct RawPlayer {
    score: f64,
}

fn deserialize_winner<'de, D>(deserializer: D) -> std::result::Result<Winner, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    // Numeric equality: `0.0` and `false` both name player 0.
    let pid = match value {
        serde_json::Value::Bool(b) => Some(f64::from(u8::from(b))),
        other => other.as_f64(),
    };
    Ok(match pid {
        Some(p) if p == 0.0 => Winner::Player0,
        Some(p) if p == 1.0 => Winner::Player1,
        _ => Winner::Draw,
    })
}

/// Decodes the engine's report of a single game.
///
/// Lines starting with a log severity are dropped and whatever remains must be
/// exactly one JSON object carrying `winner_pid` and both players' scores.
pub fn parse_result(output: &str) -> Result<GameResult> {
    let json = output
        .lines()
        .filter(|line| !LOG_LINE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n");

    if json.trim().is_empty() {
        return Err(Error::Parse("no JSON in engine output".to_string()));
    }

    let raw: RawResult =
        serde_json::from_str(&json).map_err(|e| Error::Parse(e.to_string()))?;

    Ok(GameResult {
        winner: raw.winner_pid,
        scores: [raw.players.first.score, raw.players.second.score],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_log_lines() {
        let output = "INFO:root:starting game\n\
                      WARNING: slow agent\n\
                      {\"winner_pid\": 0,\n\
                      \"players\": {\"0\": {\"score\": 10, \"hp\": 3}, \"1\": {\"score\": 3}}}\n\
                      ERROR trailing noise\n";
        let result = parse_result(output).unwrap();
        assert_eq!(result.winner, Winner::Player0);
        assert_eq!(result.scores, [10.0, 3.0]);
    }

    #[test]
    fn unknown_winner_is_a_draw() {
        for pid in ["null", "-1", "2", "\"none\""] {
            let output = format!(
                r#"{{"winner_pid": {pid}, "players": {{"0": {{"score": 5}}, "1": {{"score": 5.5}}}}}}"#
            );
            let result = parse_result(&output).unwrap();
            assert_eq!(result.winner, Winner::Draw, "winner_pid = {pid}");
            assert_eq!(result.scores, [5.0, 5.5]);
        }
    }

    #[test]
    fn winner_compares_numerically() {
        let cases = [
            ("0.0", Winner::Player0),
            ("false", Winner::Player0),
            ("1.0", Winner::Player1),
            ("true", Winner::Player1),
            ("0.5", Winner::Draw),
        ];
        for (pid, expected) in cases {
            let output = format!(
                r#"{{"winner_pid": {pid}, "players": {{"0": {{"score": 1}}, "1": {{"score": 2}}}}}}"#
            );
            assert_eq!(parse_result(&output).unwrap().winner, expected, "winner_pid = {pid}");
        }
    }

    #[test]
    fn second_player_win() {
        let output = r#"{"winner_pid": 1, "players": {"0": {"score": 0}, "1": {"score": 7}}}"#;
        assert_eq!(parse_result(output).unwrap().winner, Winner::Player1);
    }

    #[test]
    fn only_log_lines_is_an_error() {
        let output = "INFO started\nINFO finished\n";
        assert!(matches!(parse_result(output), Err(Error::Parse(_))));
        assert!(matches!(parse_result(""), Err(Error::Parse(_))));
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let cases = [
            "not json at all",
            r#"{"players": {"0": {"score": 1}, "1": {"score": 2}}}"#,
            r#"{"winner_pid": 0, "players": {"0": {"score": 1}}}"#,
            r#"{"winner_pid": 0, "players": {"0": {"score": "high"}, "1": {"score": 2}}}"#,
        ];
        for case in cases {
            assert!(
                matches!(parse_result(case), Err(Error::Parse(_))),
                "accepted {case}"
            );
        }
    }
}
