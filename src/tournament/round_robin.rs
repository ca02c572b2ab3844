use std::collections::BTreeMap;

use itertools::Itertools;
use log::{error, info, warn};

use crate::{
    ranking::RankingTable,
    stats::AgentTally,
    tournament::{Tournament, UnitResult, UnitTicket},
};

/// Every agent plays every other agent once per unit, one unit per pair.
pub struct RoundRobin {
    agent_names: Vec<String>,
    num_matches: u32,
    pairs: Vec<[usize; 2]>,
    next_pair: usize,
    ranking: RankingTable,
    failed: Vec<UnitTicket>,
}

impl RoundRobin {
    pub fn new(agent_names: Vec<String>, num_matches: u32) -> RoundRobin {
        let pairs = (0..agent_names.len())
            .tuple_combinations()
            .map(|(i, j)| [i, j])
            .collect();
        RoundRobin {
            ranking: RankingTable::new(agent_names.iter().cloned()),
            agent_names,
            num_matches,
            pairs,
            next_pair: 0,
            failed: Vec::new(),
        }
    }

    fn pair_names(&self, ticket: &UnitTicket) -> (&str, &str) {
        let [a, b] = ticket.agents;
        (self.agent_names[a].as_str(), self.agent_names[b].as_str())
    }

    /// Games each agent is missing because a unit it played in failed.
    pub fn missing_games(&self) -> BTreeMap<&str, u64> {
        let mut missing = BTreeMap::new();
        for ticket in &self.failed {
            for i in ticket.agents {
                *missing.entry(self.agent_names[i].as_str()).or_default() +=
                    u64::from(self.num_matches);
            }
        }
        missing
    }
}

impl Tournament for RoundRobin {
    fn next(&mut self) -> Option<UnitTicket> {
        let agents = *self.pairs.get(self.next_pair)?;
        let ticket = UnitTicket {
            id: self.next_pair as u64,
            agents,
        };
        self.next_pair += 1;
        Some(ticket)
    }

    fn unit_started(&mut self, ticket: &UnitTicket) {
        let (a, b) = self.pair_names(ticket);
        info!("Started unit {}: {a} vs {b}", ticket.id);
    }

    fn unit_complete(&mut self, result: UnitResult) {
        let [i, j] = result.ticket.agents;
        let (a, b) = (&self.agent_names[i], &self.agent_names[j]);
        let merged = result
            .outcome
            .and_then(|partial| self.ranking.merge(&partial));
        if let Err(e) = merged {
            error!("Unit {} ({a} vs {b}) failed: {e}", result.ticket.id);
            self.failed.push(result.ticket);
        }
    }

    fn print_interval_report(&self) {
        if !self.failed.is_empty() {
            warn!("{} units failed so far", self.failed.len());
        }
    }

    fn tournament_complete(&self) {
        let total: AgentTally = self.ranking.iter().map(|(_, tally)| *tally).sum();
        info!(
            "{} games recorded over {} units",
            total.games() / 2,
            self.pairs.len() - self.failed.len()
        );
        if self.failed.is_empty() {
            return;
        }
        warn!(
            "{} of {} units failed; their games are not counted",
            self.failed.len(),
            self.pairs.len()
        );
        for (agent, games) in self.missing_games() {
            warn!("{agent} is missing {games} games");
        }
    }

    fn expected_unit_count(&self) -> u64 {
        self.pairs.len() as u64
    }

    fn ranking(&self) -> &RankingTable {
        &self.ranking
    }
}
