use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{error::Result, ranking::RankingTable};

/// Writes the standings as a JSON object keyed by agent name, best score first.
pub fn write_ranking(path: &Path, ranking: &RankingTable) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    ranking.serialize(&mut serializer)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{GameResult, Winner};
    use std::io::BufReader;

    fn read_ranking(path: &Path) -> Result<RankingTable> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    #[test]
    fn round_trip_keeps_tallies_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final_ranking.json");

        let mut ranking = RankingTable::new(["a", "b", "c"]);
        let results = [
            ("a", "b", Winner::Player1, [1.0, 12.5]),
            ("a", "c", Winner::Draw, [4.0, 4.0]),
            ("b", "c", Winner::Player0, [3.0, 0.0]),
        ];
        for (x, y, winner, scores) in results {
            ranking
                .apply_result(x, y, &GameResult { winner, scores })
                .unwrap();
        }

        write_ranking(&path, &ranking).unwrap();
        let decoded = read_ranking(&path).unwrap();

        for (name, tally) in ranking.iter() {
            assert_eq!(decoded.get(name), Some(tally), "{name}");
        }
        let order: Vec<_> = decoded.agents().collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[test]
    fn writes_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let mut ranking = RankingTable::new(["b", "a"]);
        ranking
            .apply_result(
                "b",
                "a",
                &GameResult {
                    winner: Winner::Player1,
                    scores: [3.0, 10.0],
                },
            )
            .unwrap();
        write_ranking(&path, &ranking).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let expected = r#"{
    "a": {
        "Wins": 1,
        "Losses": 0,
        "Draws": 0,
        "score": 10
    },
    "b": {
        "Wins": 0,
        "Losses": 1,
        "Draws": 0,
        "score": 3
    }
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_tournament_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let ranking = RankingTable::new(["x", "y"]);
        write_ranking(&path, &ranking).unwrap();

        let decoded = read_ranking(&path).unwrap();
        assert_eq!(decoded, ranking);
    }
}
