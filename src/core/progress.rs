//! Background progress spinner for long-running refreshes.
//!
//! The spinner runs on its own thread and owns the stderr status line. It is
//! controlled through two channels: a one-shot stop signal and a pause/resume
//! toggle. [`ProgressSpinner::finish`] joins the thread after clearing the
//! line, so the caller can print its own success or failure message without
//! interleaving.

use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const FRAME_INTERVAL: Duration = Duration::from_millis(200);

/// Handle to a running stderr spinner.
pub struct ProgressSpinner {
    stop_tx: Sender<()>,
    pause_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl ProgressSpinner {
    /// Starts drawing `message` frames on stderr.
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        let (stop_tx, stop_rx) = mpsc::channel();
        let (pause_tx, pause_rx) = mpsc::channel();
        let handle = thread::spawn(move || run(&message, &stop_rx, &pause_rx));

        Self {
            stop_tx,
            pause_tx,
            handle,
        }
    }

    /// Suspends frame drawing; the status line is left as-is.
    pub fn pause(&self) {
        let _ = self.pause_tx.send(());
    }

    /// Resumes frame drawing after a pause.
    pub fn resume(&self) {
        let _ = self.pause_tx.send(());
    }

    /// Stops the spinner and waits until the status line has been cleared.
    pub fn finish(self) {
        let _ = self.stop_tx.send(());
        let _ = self.handle.join();
    }
}

fn run(message: &str, stop_rx: &Receiver<()>, pause_rx: &Receiver<()>) {
    let mut frame = 0usize;
    let mut paused = false;

    loop {
        match stop_rx.recv_timeout(FRAME_INTERVAL) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        loop {
            match pause_rx.try_recv() {
                Ok(()) => paused = !paused,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if !paused {
            eprint!("\r{message} {}", FRAMES[frame % FRAMES.len()]);
            let _ = io::stderr().flush();
            frame += 1;
        }
    }

    // Erase the status line so the next message starts on a clean line.
    eprint!("\r{:width$}\r", "", width = message.len() + 2);
    let _ = io::stderr().flush();
}
