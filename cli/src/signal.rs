//! Audible feedback on a terminal

use checkin_flow::{Signal, SignalPlayer};
use std::io::Write;

/// Rings the terminal bell: once for an admission, twice for a refusal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl TerminalBell {
    const fn pattern(signal: Signal) -> &'static str {
        match signal {
            Signal::Success => "\x07",
            Signal::Error => "\x07\x07",
        }
    }
}

impl SignalPlayer for TerminalBell {
    fn play(&self, signal: Signal) {
        tracing::info!(?signal, "Signal");

        let mut stderr = std::io::stderr().lock();
        if let Err(error) = stderr
            .write_all(Self::pattern(signal).as_bytes())
            .and_then(|()| stderr.flush())
        {
            tracing::debug!(%error, "Could not ring the bell");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_rings_twice() {
        assert_eq!(TerminalBell::pattern(Signal::Success).len(), 1);
        assert_eq!(TerminalBell::pattern(Signal::Error).len(), 2);
    }
}
