use crate::{
    agent::Agent,
    error::{Error, Result},
};
use log::{debug, error, trace, warn};
use std::{
    io::{self, Read},
    path::PathBuf,
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::Duration,
};
use wait_timeout::ChildExt;

#[cfg(unix)]
use std::os::unix::process::CommandExt;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EngineCommand {
    pub program: String,
    /// Launcher arguments placed before `--config`.
    pub args: Vec<String>,
    pub config_file: PathBuf,
    pub timeout: Option<Duration>,
}

impl EngineCommand {
    /// Plays one game with `first` as player 0 and `second` as player 1 and
    /// returns everything the engine wrote to stdout.
    pub fn play(&self, first: &Agent, second: &Agent) -> Result<String> {
        trace!("{} < {} vs {}", self.program, first.name, second.name);

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("--config")
            .arg(&self.config_file)
            .arg(&first.path)
            .arg(&second.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn().map_err(|source| Error::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // On timeout the readers are left detached: a descendant that escaped
        // the kill may still hold the pipes open.
        let status = self.wait(&mut child)?;

        let stdout = join(stdout)?;
        let stderr = join(stderr)?;
        if !stderr.is_empty() {
            debug!(
                "{} stderr ({} vs {}):\n{}",
                self.program,
                first.name,
                second.name,
                String::from_utf8_lossy(&stderr)
            );
        }

        if status.code().is_none() {
            return Err(Error::Crashed {
                program: self.program.clone(),
            });
        }
        if !status.success() {
            warn!(
                "{} exited with {status} ({} vs {})",
                self.program, first.name, second.name
            );
        }

        String::from_utf8(stdout)
            .map_err(|_| Error::Parse("engine output is not valid UTF-8".to_string()))
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };
        if let Some(status) = child.wait_timeout(timeout)? {
            return Ok(status);
        }

        warn!("Timed out waiting for {}, attempting to kill...", self.program);
        match kill_tree(child) {
            Ok(_) => {
                child.wait()?;
            }
            Err(_) => error!("Failed to kill {}, giving up", self.program),
        }
        Err(Error::Timeout {
            program: self.program.clone(),
            timeout,
        })
    }
}

/// Kills the engine together with everything it spawned.
#[cfg(unix)]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    let pgid = child.id() as libc::pid_t;
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } == 0 {
        return Ok(());
    }
    child.kill()
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    child.kill()
}

fn drain<R>(pipe: Option<R>) -> thread::JoinHandle<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join(handle: thread::JoinHandle<io::Result<Vec<u8>>>) -> Result<Vec<u8>> {
    let bytes = handle
        .join()
        .map_err(|_| io::Error::other("engine output reader panicked"))??;
    Ok(bytes)
}
