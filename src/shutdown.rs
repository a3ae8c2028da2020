use std::io;

use tokio::sync::watch;

/// Loop-side view of the shutdown flag.
#[derive(Clone, Debug)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

/// Requests shutdown. Held by the signal listener, or by tests.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Shutdown {
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been requested. A dropped trigger never
    /// counts as a request.
    pub async fn requested(&mut self) {
        if self.rx.wait_for(|&stop| stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Installs SIGTERM/SIGINT listeners and returns the flag they flip.
///
/// The listeners stay installed after the first signal. A second one means
/// the loop is stuck, so the process exits without waiting for it.
pub fn listen_for_signals() -> io::Result<Shutdown> {
    let (trigger, shutdown) = channel();
    let signals = install_handlers()?;
    tokio::spawn(async move {
        let name = forward_signals(signals, trigger).await;
        tracing::warn!(signal = name, "second signal before shutdown finished, exiting");
        std::process::exit(0);
    });
    Ok(shutdown)
}

trait SignalSource {
    /// Waits for the next signal and returns its name.
    async fn recv(&mut self) -> &'static str;
}

/// Flips the flag on the first signal, then returns the name of the next.
async fn forward_signals<S: SignalSource>(
    mut signals: S,
    trigger: ShutdownTrigger,
) -> &'static str {
    let name = signals.recv().await;
    tracing::info!(signal = name, "shutdown requested");
    trigger.trigger();
    signals.recv().await
}

#[cfg(unix)]
struct UnixSignals {
    term: tokio::signal::unix::Signal,
    int: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl SignalSource for UnixSignals {
    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            Some(()) = self.term.recv() => "SIGTERM",
            Some(()) = self.int.recv() => "SIGINT",
            else => std::future::pending().await,
        }
    }
}

#[cfg(unix)]
fn install_handlers() -> io::Result<UnixSignals> {
    use tokio::signal::unix::{SignalKind, signal};

    Ok(UnixSignals {
        term: signal(SignalKind::terminate())?,
        int: signal(SignalKind::interrupt())?,
    })
}

#[cfg(not(unix))]
struct CtrlC;

#[cfg(not(unix))]
impl SignalSource for CtrlC {
    async fn recv(&mut self) -> &'static str {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c listener failed");
            std::future::pending::<()>().await;
        }
        "ctrl-c"
    }
}

#[cfg(not(unix))]
fn install_handlers() -> io::Result<CtrlC> {
    Ok(CtrlC)
}
