//! Invocation of the external docking executable
//!
//! Docking itself happens in an external AutoDock Vina compatible program.
//! Each job is one blocking subprocess call: the engine passes the config,
//! ligand, and output paths on the command line, captures stdout and stderr,
//! and enforces a wall-clock timeout. The combined output is the job's log
//! and the input to affinity extraction.

use log::debug;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Wall-clock limit for a single docking job.
pub const DOCKING_TIMEOUT: Duration = Duration::from_secs(600);

/// Poll interval while waiting for a job to finish.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Errors that can occur while running a docking job
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to launch docking executable {executable}: {source}")]
    Spawn {
        executable: PathBuf,
        source: std::io::Error,
    },

    #[error("docking run exited with {status}: {stderr}")]
    NonZeroExit { status: ExitStatus, stderr: String },

    #[error("docking run exceeded the {0:?} timeout")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle on the external docking executable
#[derive(Debug, Clone)]
pub struct VinaEngine {
    executable: PathBuf,
    timeout: Duration,
}

impl VinaEngine {
    pub fn new<P: Into<PathBuf>>(executable: P, timeout: Duration) -> Self {
        Self {
            executable: executable.into(),
            timeout,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Probe whether the executable can be launched at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    /// Run one docking job and return the combined stdout/stderr text.
    ///
    /// On success the combined output is also written to `log_path`. On a
    /// non-zero exit or a timeout no log file is written and no result is
    /// produced; a timed-out child is killed and reaped before returning.
    pub fn dock(
        &self,
        config: &Path,
        ligand: &Path,
        output: &Path,
        log_path: &Path,
    ) -> Result<String, EngineError> {
        debug!(
            "Running {} --config {} --ligand {} --out {}",
            self.executable.display(),
            config.display(),
            ligand.display(),
            output.display()
        );

        let mut child = Command::new(&self.executable)
            .arg("--config")
            .arg(config)
            .arg("--ligand")
            .arg(ligand)
            .arg("--out")
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                executable: self.executable.clone(),
                source,
            })?;

        // Drain both pipes off-thread so a chatty child cannot deadlock
        // against a full pipe buffer while we wait on it.
        let stdout_reader = child.stdout.take().map(drain_pipe);
        let stderr_reader = child.stderr.take().map(drain_pipe);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(EngineError::Timeout(self.timeout));
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        };

        let stdout = collect_pipe(stdout_reader);
        let stderr = collect_pipe(stderr_reader);

        if !status.success() {
            return Err(EngineError::NonZeroExit {
                status,
                stderr: stderr.trim_end().to_string(),
            });
        }

        let combined = stdout + &stderr;
        fs::write(log_path, &combined)?;

        Ok(combined)
    }
}

fn drain_pipe<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut text = String::new();
        let _ = pipe.read_to_string(&mut text);
        text
    })
}

fn collect_pipe(reader: Option<JoinHandle<String>>) -> String {
    reader
        .map(|handle| handle.join().unwrap_or_default())
        .unwrap_or_default()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::{tempdir, TempDir};

    /// Write an executable shell script standing in for the docking tool.
    fn stub_engine(script: &str) -> (TempDir, VinaEngine) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vina");
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let engine = VinaEngine::new(&path, Duration::from_secs(5));
        (dir, engine)
    }

    fn job_paths(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf, PathBuf) {
        (
            dir.path().join("config.txt"),
            dir.path().join("ligand.pdbqt"),
            dir.path().join("ligand_out.pdbqt"),
            dir.path().join("ligand_log.txt"),
        )
    }

    #[test]
    fn captures_combined_output_and_writes_log() {
        let (dir, engine) = stub_engine("echo '   1   -7.2   0.0   0.0'\necho 'from stderr' >&2");
        let (config, ligand, output, log_path) = job_paths(&dir);

        let combined = engine.dock(&config, &ligand, &output, &log_path).unwrap();

        assert!(combined.contains("-7.2"));
        assert!(combined.contains("from stderr"));
        assert_eq!(fs::read_to_string(&log_path).unwrap(), combined);
    }

    #[test]
    fn non_zero_exit_writes_no_log() {
        let (dir, engine) = stub_engine("echo 'boom' >&2\nexit 3");
        let (config, ligand, output, log_path) = job_paths(&dir);

        let result = engine.dock(&config, &ligand, &output, &log_path);

        match result {
            Err(EngineError::NonZeroExit { stderr, .. }) => assert!(stderr.contains("boom")),
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
        assert!(!log_path.exists());
    }

    #[test]
    fn timeout_kills_the_child() {
        let (dir, engine) = stub_engine("sleep 30");
        let engine = VinaEngine::new(engine.executable(), Duration::from_millis(200));
        let (config, ligand, output, log_path) = job_paths(&dir);

        let started = Instant::now();
        let result = engine.dock(&config, &ligand, &output, &log_path);

        assert!(matches!(result, Err(EngineError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!log_path.exists());
    }

    #[test]
    fn missing_executable_is_a_spawn_error() {
        let dir = tempdir().unwrap();
        let engine = VinaEngine::new(dir.path().join("no-such-vina"), Duration::from_secs(1));
        let (config, ligand, output, log_path) = job_paths(&dir);

        let result = engine.dock(&config, &ligand, &output, &log_path);

        assert!(matches!(result, Err(EngineError::Spawn { .. })));
        assert!(!engine.is_available());
    }
}
