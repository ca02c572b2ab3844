use serde::{Deserialize, Serialize, Serializer};

/// Largest magnitude below which every integer is exactly representable.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentTally {
    #[serde(rename = "Wins")]
    pub wins: u64,
    #[serde(rename = "Losses")]
    pub losses: u64,
    #[serde(rename = "Draws")]
    pub draws: u64,
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
}

/// Whole-number scores are written as JSON integers, the way the engine
/// reports them.
fn serialize_score<S>(score: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if score.fract() == 0.0 && score.abs() < MAX_EXACT_INT {
        serializer.serialize_i64(*score as i64)
    } else {
        serializer.serialize_f64(*score)
    }
}

impl std::ops::Add for AgentTally {
    type Output = AgentTally;

    fn add(self, other: AgentTally) -> Self::Output {
        AgentTally {
            wins: self.wins + other.wins,
            losses: self.losses + other.losses,
            draws: self.draws + other.draws,
            score: self.score + other.score,
        }
    }
}

impl std::ops::AddAssign for AgentTally {
    fn add_assign(&mut self, other: AgentTally) {
        *self = *self + other;
    }
}

impl std::iter::Sum for AgentTally {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(AgentTally::default(), |a, b| a + b)
    }
}

impl AgentTally {
    pub const ONE_WIN: AgentTally = AgentTally {
        wins: 1,
        losses: 0,
        draws: 0,
        score: 0.0,
    };
    pub const ONE_LOSS: AgentTally = AgentTally {
        wins: 0,
        losses: 1,
        draws: 0,
        score: 0.0,
    };
    pub const ONE_DRAW: AgentTally = AgentTally {
        wins: 0,
        losses: 0,
        draws: 1,
        score: 0.0,
    };

    pub fn with_score(self, score: f64) -> AgentTally {
        AgentTally { score, ..self }
    }

    pub fn games(&self) -> u64 {
        self.wins + self.losses + self.draws
    }
}

impl std::fmt::Display for AgentTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wins: {}, Losses: {}, Draws: {}, score: {}",
            self.wins, self.losses, self.draws, self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_adds_every_field() {
        let total: AgentTally = [
            AgentTally::ONE_WIN.with_score(3.0),
            AgentTally::ONE_DRAW.with_score(1.5),
            AgentTally::ONE_LOSS,
        ]
        .into_iter()
        .sum();

        assert_eq!(
            total,
            AgentTally {
                wins: 1,
                losses: 1,
                draws: 1,
                score: 4.5
            }
        );
        assert_eq!(total.games(), 3);
    }

    #[test]
    fn serializes_with_output_field_names() {
        let json = serde_json::to_value(AgentTally::ONE_WIN.with_score(10.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Wins": 1, "Losses": 0, "Draws": 0, "score": 10})
        );
    }

    #[test]
    fn fractional_score_stays_a_float() {
        let json = serde_json::to_string(&AgentTally::ONE_DRAW.with_score(12.5)).unwrap();
        assert_eq!(json, r#"{"Wins":0,"Losses":0,"Draws":1,"score":12.5}"#);

        let json = serde_json::to_string(&AgentTally::ONE_LOSS.with_score(-3.0)).unwrap();
        assert_eq!(json, r#"{"Wins":0,"Losses":1,"Draws":0,"score":-3}"#);
    }
}
