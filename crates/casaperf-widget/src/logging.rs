//! Tracing subscriber setup.
//!
//! Installs one `tracing-subscriber` fmt layer filtered at the configured
//! level. In the browser each event is written to the developer console;
//! native builds (tests, tooling) write to stderr.

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed, e.g. when a
/// second widget bundle boots on the same page.
pub fn init(level: Level) -> bool {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .with_writer(writer::make_writer());

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(layer)
        .try_init()
        .is_ok()
}

#[cfg(target_arch = "wasm32")]
mod writer {
    use std::io::{self, Write};

    use tracing_subscriber::fmt::MakeWriter;

    /// Buffers one formatted event and logs it to the console on drop.
    pub struct ConsoleWriter {
        buffer: Vec<u8>,
    }

    impl Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buffer);
            let line = line.trim_end();
            if !line.is_empty() {
                web_sys::console::log_1(&line.into());
            }
        }
    }

    pub struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter { buffer: Vec::new() }
        }
    }

    pub fn make_writer() -> MakeConsoleWriter {
        MakeConsoleWriter
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod writer {
    pub fn make_writer() -> fn() -> std::io::Stderr {
        std::io::stderr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        init(Level::DEBUG);
        assert!(!init(Level::INFO));
    }
}
