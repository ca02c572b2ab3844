use std::{path::PathBuf, thread, time::Duration};

use clap::Parser;

use crate::engine::EngineCommand;

#[derive(Parser, Debug, Clone)]
#[command(name = "agentarena", about = "Run a round-robin tournament of agents")]
pub struct CliOptions {
    /// Path to the config file handed to the engine
    #[arg(long, default_value = "./config.json")]
    pub config_file: PathBuf,

    /// Path to the folder containing agent source files
    #[arg(long, default_value = "./agents")]
    pub agent_folder: PathBuf,

    /// Number of matches to run per pair of agents
    #[arg(long, default_value_t = 5)]
    pub num_matches: u32,

    /// Path to the output JSON file
    #[arg(long, default_value = "final_ranking.json")]
    pub output_file: PathBuf,

    /// Game engine executable
    #[arg(long, default_value = "coderone-dungeon")]
    pub engine: String,

    /// Extra argument passed to the engine before `--config` (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    /// File extension identifying agent sources
    #[arg(long, default_value = "py")]
    pub agent_ext: String,

    /// Number of pairs played in parallel [default: available cores]
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Kill a game after this many seconds
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Log interim standings every N finished pairs (0 disables)
    #[arg(long, default_value_t = 0)]
    pub report_interval: u64,
}

impl CliOptions {
    pub fn engine_command(&self) -> EngineCommand {
        EngineCommand {
            program: self.engine.clone(),
            args: self.engine_args.clone(),
            config_file: self.config_file.clone(),
            timeout: self
                .timeout
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .map(Duration::from_secs_f64),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
            .unwrap_or_else(|| thread::available_parallelism().map_or(1, |n| n.get()))
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CliOptions::parse_from(["agentarena"]);
        assert_eq!(options.config_file, PathBuf::from("./config.json"));
        assert_eq!(options.agent_folder, PathBuf::from("./agents"));
        assert_eq!(options.num_matches, 5);
        assert_eq!(options.output_file, PathBuf::from("final_ranking.json"));
        assert_eq!(options.agent_ext, "py");
        assert!(options.concurrency() >= 1);

        let engine = options.engine_command();
        assert_eq!(engine.program, "coderone-dungeon");
        assert!(engine.args.is_empty());
        assert_eq!(engine.timeout, None);
    }

    #[test]
    fn engine_flags() {
        let options = CliOptions::parse_from([
            "agentarena",
            "--engine",
            "python3",
            "--engine-arg",
            "-m",
            "--engine-arg",
            "dungeon",
            "--timeout",
            "2.5",
            "--concurrency",
            "0",
            "--num-matches",
            "0",
        ]);
        let engine = options.engine_command();
        assert_eq!(engine.program, "python3");
        assert_eq!(engine.args, ["-m", "dungeon"]);
        assert_eq!(engine.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(options.concurrency(), 1);
        assert_eq!(options.num_matches, 0);
    }
}
