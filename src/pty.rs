//! PTY session: an opaque wrapper around the host pseudo-terminal.

use std::io::{Read, Write};
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::config::TerminalConfig;

/// Shared handle to the PTY writer. The pane's reader thread uses a clone to
/// flush terminal reports without going through the session.
pub(crate) type PtyWriter = Arc<Mutex<Option<Box<dyn Write + Send>>>>;

/// A live shell process behind a pseudo-terminal.
///
/// Reads happen on the handle returned by [`PtySession::open`]; everything
/// else (writes, resize, liveness, shutdown) goes through the session.
pub struct PtySession {
    master: Box<dyn portable_pty::MasterPty + Send>,
    writer: PtyWriter,
    child: Mutex<Box<dyn portable_pty::Child + Send + Sync>>,
}

impl PtySession {
    /// Spawn the configured shell on a fresh PTY of the given size. Returns
    /// the session and the blocking read handle for the reader task.
    pub fn open(
        cols: usize,
        rows: usize,
        config: &TerminalConfig,
    ) -> Result<(Self, Box<dyn Read + Send>), Box<dyn std::error::Error>> {
        let pty_system = portable_pty::native_pty_system();
        let pair = pty_system.openpty(portable_pty::PtySize {
            rows: rows as u16,
            cols: cols as u16,
            pixel_width: 0,
            pixel_height: 0,
        })?;

        let shell_line = config.shell.clone().unwrap_or_else(default_shell);
        let mut parts = shell_line.split_whitespace();
        let shell_program = parts.next().unwrap_or("sh").to_owned();
        let mut cmd = portable_pty::CommandBuilder::new(&shell_program);
        for arg in parts {
            cmd.arg(arg);
        }
        if let Some(ref dir) = config.working_directory {
            cmd.cwd(dir);
        }

        let child = pair.slave.spawn_command(cmd)?;
        debug!("spawned {shell_program} on a {cols}x{rows} pty");
        drop(pair.slave);

        let reader = pair.master.try_clone_reader()?;
        let writer = pair.master.take_writer()?;

        let session = Self {
            master: pair.master,
            writer: Arc::new(Mutex::new(Some(writer))),
            child: Mutex::new(child),
        };
        Ok((session, reader))
    }

    /// Shared writer handle for the reader task's report flush-back.
    pub(crate) fn writer_handle(&self) -> PtyWriter {
        Arc::clone(&self.writer)
    }

    /// Write input bytes to the shell. Fails quietly after `close`.
    pub fn write(&self, data: &[u8]) -> std::io::Result<()> {
        let mut writer = self.writer.lock();
        match writer.as_mut() {
            Some(w) => {
                w.write_all(data)?;
                w.flush()
            }
            None => Ok(()),
        }
    }

    pub fn resize(&self, cols: usize, rows: usize) {
        let result = self.master.resize(portable_pty::PtySize {
            rows: rows as u16,
            cols: cols as u16,
            pixel_width: 0,
            pixel_height: 0,
        });
        if let Err(e) = result {
            warn!("pty resize to {cols}x{rows} failed: {e}");
        }
    }

    /// Whether the shell process has terminated.
    pub fn has_exited(&self) -> bool {
        match self.child.lock().try_wait() {
            Ok(None) => false,
            Ok(Some(_)) | Err(_) => true,
        }
    }

    /// Close the writer (the child sees EOF on stdin) and kill the child.
    /// The reader task terminates on the resulting EOF. Idempotent.
    pub fn close(&self) {
        self.writer.lock().take();
        let mut child = self.child.lock();
        if let Ok(None) = child.try_wait() {
            if let Err(e) = child.kill() {
                debug!("kill after close failed: {e}");
            }
        }
    }
}

impl Drop for PtySession {
    fn drop(&mut self) {
        self.close();
    }
}

fn default_shell() -> String {
    #[cfg(target_os = "windows")]
    {
        "cmd.exe".to_owned()
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("SHELL").unwrap_or_else(|_| "sh".to_owned())
    }
}
