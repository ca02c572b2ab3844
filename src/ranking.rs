use std::{collections::HashMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{
    error::{Error, Result},
    result::{GameResult, Winner},
    stats::AgentTally,
};

/// Per-agent tallies keyed by agent name.
///
/// Agents are registered up front and the key set never changes afterwards;
/// updates naming an unregistered agent are rejected. Registration order is
/// kept so that ties in the final standings come out in a stable order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankingTable {
    order: Vec<String>,
    tallies: HashMap<String, AgentTally>,
}

impl RankingTable {
    pub fn new<I, S>(agents: I) -> RankingTable
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = RankingTable::default();
        for name in agents {
            table.insert(name.into(), AgentTally::default());
        }
        table
    }

    fn insert(&mut self, name: String, tally: AgentTally) {
        if self.tallies.insert(name.clone(), tally).is_none() {
            self.order.push(name);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AgentTally> {
        self.tallies.get(name)
    }

    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    fn tally_mut(&mut self, name: &str) -> Result<&mut AgentTally> {
        self.tallies
            .get_mut(name)
            .ok_or_else(|| Error::Aggregation(name.to_string()))
    }

    /// Records one game where `agent1` played as player 0 and `agent2` as player 1.
    pub fn apply_result(&mut self, agent1: &str, agent2: &str, result: &GameResult) -> Result<()> {
        if !self.tallies.contains_key(agent2) {
            return Err(Error::Aggregation(agent2.to_string()));
        }

        let (first, second) = match result.winner {
            Winner::Player0 => (AgentTally::ONE_WIN, AgentTally::ONE_LOSS),
            Winner::Player1 => (AgentTally::ONE_LOSS, AgentTally::ONE_WIN),
            Winner::Draw => (AgentTally::ONE_DRAW, AgentTally::ONE_DRAW),
        };

        *self.tally_mut(agent1)? += first.with_score(result.scores[0]);
        *self.tally_mut(agent2)? += second.with_score(result.scores[1]);
        Ok(())
    }

    /// Adds every tally of `partial` into this table. Nothing is applied if
    /// `partial` names an agent this table does not know.
    pub fn merge(&mut self, partial: &RankingTable) -> Result<()> {
        if let Some(unknown) = partial.agents().find(|a| !self.tallies.contains_key(*a)) {
            return Err(Error::Aggregation(unknown.to_string()));
        }
        for (name, tally) in partial.iter() {
            *self.tally_mut(name)? += *tally;
        }
        Ok(())
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentTally)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), &self.tallies[name]))
    }

    /// Entries sorted by descending score, ties kept in registration order.
    pub fn standings(&self) -> Vec<(&str, &AgentTally)> {
        let mut standings: Vec<_> = self.iter().collect();
        standings.sort_by(|x, y| y.1.score.total_cmp(&x.1.score));
        standings
    }
}

impl Serialize for RankingTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let standings = self.standings();
        let mut map = serializer.serialize_map(Some(standings.len()))?;
        for (name, tally) in standings {
            map.serialize_entry(name, tally)?;
        }
        map.end()
    }
}

struct RankingTableVisitor;

impl<'de> Visitor<'de> for RankingTableVisitor {
    type Value = RankingTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of agent names to tallies")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<RankingTable, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = RankingTable::default();
        while let Some((name, tally)) = access.next_entry::<String, AgentTally>()? {
            table.insert(name, tally);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for RankingTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<RankingTable, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RankingTableVisitor)
    }
}
