use crate::{error::Error, ranking::RankingTable};
use chrono::{DateTime, Utc};

mod reporter_wrapper;
mod round_robin;

pub use reporter_wrapper::ReporterWrapper;
pub use round_robin::RoundRobin;

/// One pair's batch of games, scheduled as a single unit of work.
#[derive(Debug, Clone)]
pub struct UnitTicket {
    pub id: u64,
    pub agents: [usize; 2],
}

#[derive(Debug)]
pub struct UnitResult {
    pub ticket: UnitTicket,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub outcome: Result<RankingTable, Error>,
}

pub trait Tournament {
    fn next(&mut self) -> Option<UnitTicket>;
    fn unit_started(&mut self, ticket: &UnitTicket);
    fn unit_complete(&mut self, result: UnitResult);
    fn print_interval_report(&self);
    fn tournament_complete(&self);
    fn expected_unit_count(&self) -> u64;
    fn ranking(&self) -> &RankingTable;
}
