use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Child, Command, Stdio};

use super::backend::{MediaPlayer, Playback};

/// Player that runs an external program with the preview path as last argument
/// e.g. `cvlc --play-and-exit <file>`; all output is discarded
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(program: String, args: Vec<String>) -> Self {
        CommandPlayer { program, args }
    }
}

impl MediaPlayer for CommandPlayer {
    fn play(&self, path: &Path) -> Result<Box<dyn Playback>> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program))?;

        log::debug!("Started {} (pid {}) for {:?}", self.program, child.id(), path);
        Ok(Box::new(ChildPlayback { child: Some(child) }))
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Running player process; reaped once it has exited
pub struct ChildPlayback {
    child: Option<Child>,
}

impl Playback for ChildPlayback {
    fn try_finished(&mut self) -> Result<bool> {
        let Some(child) = self.child.as_mut() else {
            return Ok(true);
        };
        match child.try_wait().context("Failed to poll player process")? {
            Some(status) => {
                log::debug!("Player exited with {}", status);
                self.child = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn stop(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        // kill() fails if the process exited in the meantime; wait() still reaps it
        if let Err(e) = child.kill() {
            log::debug!("Player kill: {}", e);
        }
        child.wait().context("Failed to reap player process")?;
        log::debug!("Player stopped");
        Ok(())
    }
}

impl Drop for ChildPlayback {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
