use agentarena::{agent, cli, error, output, runner, tournament, tournament::Tournament};
use clap::Parser;
use log::{info, warn};

fn main() -> error::Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .ok();

    let cli_options = cli::CliOptions::parse();
    info!("{:#?}", &cli_options);

    if cli_options.num_matches == 0 {
        warn!("--num-matches is 0, no games will be played");
    }

    let agents = agent::discover(&cli_options.agent_folder, &cli_options.agent_ext)?;
    info!(
        "Running tournament between {} agents with {} matches per pair",
        agents.len(),
        cli_options.num_matches
    );
    if agents.len() < 2 {
        warn!(
            "Found {} agents in {}, at least two are needed to play",
            agents.len(),
            cli_options.agent_folder.display()
        );
    }

    let agent_names: Vec<String> = agents.iter().map(|a| a.name.clone()).collect();

    let mut tournament: Box<dyn Tournament> = Box::new(tournament::RoundRobin::new(
        agent_names,
        cli_options.num_matches,
    ));

    tournament = Box::new(tournament::ReporterWrapper::new(
        tournament,
        cli_options.report_interval,
    ));

    let r = runner::Runner::new(
        agents,
        cli_options.engine_command(),
        cli_options.num_matches,
        cli_options.concurrency(),
    );
    r.run(tournament.as_mut());

    output::write_ranking(&cli_options.output_file, tournament.ranking())?;
    info!("Ranking written to {}", cli_options.output_file.display());

    Ok(())
}
