use chrono::Utc;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};
use std::thread;

use crate::{
    agent::Agent,
    engine::EngineCommand,
    error::Result,
    ranking::RankingTable,
    result,
    tournament::{Tournament, UnitResult, UnitTicket},
};

enum Event {
    Started(UnitTicket),
    Finished(UnitResult),
}

pub struct Runner {
    agents: Vec<Agent>,
    engine: EngineCommand,
    num_matches: u32,
    concurrency: usize,
}

impl Runner {
    pub fn new(
        agents: Vec<Agent>,
        engine: EngineCommand,
        num_matches: u32,
        concurrency: usize,
    ) -> Runner {
        Runner {
            agents,
            engine,
            num_matches,
            concurrency: concurrency.max(1),
        }
    }

    /// Drives `tournament` to completion. Units are played on a pool of worker
    /// threads; the tournament itself is only touched from the calling thread.
    pub fn run(&self, tournament: &mut dyn Tournament) {
        let tickets: Vec<UnitTicket> = std::iter::from_fn(|| tournament.next()).collect();
        info!(
            "Scheduling {} units on {} workers",
            tickets.len(),
            self.concurrency.min(tickets.len())
        );

        let (ticket_tx, ticket_rx) = crossbeam_channel::unbounded();
        for ticket in tickets.iter().cloned() {
            if ticket_tx.send(ticket).is_err() {
                break;
            }
        }
        drop(ticket_tx);

        let (event_tx, event_rx) = crossbeam_channel::unbounded();

        thread::scope(|s| {
            for _ in 0..self.concurrency.min(tickets.len()) {
                let ticket_rx = ticket_rx.clone();
                let event_tx = event_tx.clone();
                s.spawn(move || self.worker(ticket_rx, event_tx));
            }
            drop(event_tx);

            for event in event_rx.iter() {
                match event {
                    Event::Started(ticket) => tournament.unit_started(&ticket),
                    Event::Finished(result) => tournament.unit_complete(result),
                }
            }
        });

        tournament.tournament_complete();
    }

    fn worker(&self, tickets: Receiver<UnitTicket>, events: Sender<Event>) {
        for ticket in tickets.iter() {
            if events.send(Event::Started(ticket.clone())).is_err() {
                return;
            }
            let started = Utc::now();
            let outcome = self.play_unit(&ticket);
            let result = UnitResult {
                ticket,
                started,
                finished: Utc::now(),
                outcome,
            };
            if events.send(Event::Finished(result)).is_err() {
                return;
            }
        }
    }

    /// Plays every game of one pair into a table private to this unit.
    fn play_unit(&self, ticket: &UnitTicket) -> Result<RankingTable> {
        let [first, second] = ticket.agents.map(|i| &self.agents[i]);
        let mut table = RankingTable::new([first.name.as_str(), second.name.as_str()]);
        for game in 0..self.num_matches {
            let output = self.engine.play(first, second)?;
            let result = result::parse_result(&output)?;
            debug!(
                "Game {}/{} {} vs {}: {:?}",
                game + 1,
                self.num_matches,
                first.name,
                second.name,
                result
            );
            table.apply_result(&first.name, &second.name, &result)?;
        }
        Ok(table)
    }
}
