use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::Result;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Agent {
    pub name: String,
    pub path: PathBuf,
}

/// Finds every `*.{extension}` file directly inside `dir`, sorted by name.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<Agent>> {
    let mut agents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != extension) {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        agents.push(Agent {
            name: name.to_string(),
            path,
        });
    }
    agents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(agents)
}
