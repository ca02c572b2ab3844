use chrono::{DateTime, Utc};
use log::info;

use crate::{
    ranking::RankingTable,
    tournament::{Tournament, UnitResult, UnitTicket},
};

pub struct ReporterWrapper {
    inner: Box<dyn Tournament>,
    report_interval: u64,
    started: DateTime<Utc>,
    completed: u64,
}

impl ReporterWrapper {
    pub fn new(inner: Box<dyn Tournament>, report_interval: u64) -> ReporterWrapper {
        ReporterWrapper {
            inner,
            report_interval,
            started: Utc::now(),
            completed: 0,
        }
    }

    fn print_standings(&self) {
        if self.ranking().is_empty() {
            info!("No agents entered");
            return;
        }
        for (rank, (name, tally)) in self.ranking().standings().into_iter().enumerate() {
            info!("{:>4} {name}: {tally}", rank + 1);
        }
    }
}

impl Tournament for ReporterWrapper {
    fn next(&mut self) -> Option<UnitTicket> {
        self.inner.as_mut().next()
    }
    fn unit_started(&mut self, ticket: &UnitTicket) {
        self.inner.as_mut().unit_started(ticket)
    }
    fn unit_complete(&mut self, result: UnitResult) {
        let elapsed = result.finished - result.started;
        info!(
            "Unit {} finished in {:.2}s",
            result.ticket.id,
            elapsed.num_milliseconds() as f64 / 1000.0
        );
        self.inner.as_mut().unit_complete(result);

        self.completed += 1;
        let expected = self.expected_unit_count().max(1);
        info!(
            "Unit done: {:.2}%",
            self.completed as f64 / expected as f64 * 100.0
        );

        if self.report_interval > 0 && self.completed % self.report_interval == 0 {
            self.print_interval_report();
        }
    }
    fn print_interval_report(&self) {
        info!(
            "Standings after {} of {} units:",
            self.completed,
            self.expected_unit_count()
        );
        self.print_standings();
        self.inner.print_interval_report()
    }
    fn tournament_complete(&self) {
        let elapsed = Utc::now() - self.started;
        info!(
            "Total execution time: {:.2} seconds",
            elapsed.num_milliseconds() as f64 / 1000.0
        );
        self.print_standings();
        self.inner.tournament_complete()
    }
    fn expected_unit_count(&self) -> u64 {
        self.inner.as_ref().expected_unit_count()
    }
    fn ranking(&self) -> &RankingTable {
        self.inner.as_ref().ranking()
    }
}
