//! `tracing` subscriber setup for native and browser builds.

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "portfolio_site=info";

/// Install the global subscriber. Calling it again is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() -> Result<()> {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(DEFAULT_DIRECTIVE.parse()?))
        .try_init();

    if installed.is_err() {
        debug!("Logging already initialised");
    }
    Ok(())
}

/// Install the global subscriber, writing to the browser console. Calling
/// it again is harmless.
#[cfg(target_arch = "wasm32")]
pub fn init() -> Result<()> {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_DIRECTIVE))
        .with_writer(console::MakeConsoleWriter)
        .without_time()
        .with_ansi(false)
        .try_init();

    if installed.is_err() {
        debug!("Logging already initialised");
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;
    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    /// Buffers one formatted event and hands it to the console method
    /// matching its level when dropped.
    pub struct ConsoleWriter {
        level: Level,
        buffer: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
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
            let text = String::from_utf8_lossy(&self.buffer);
            let line = JsValue::from_str(text.trim_end());
            if self.level == Level::ERROR {
                web_sys::console::error_1(&line);
            } else if self.level == Level::WARN {
                web_sys::console::warn_1(&line);
            } else if self.level == Level::INFO {
                web_sys::console::info_1(&line);
            } else {
                web_sys::console::debug_1(&line);
            }
        }
    }

    pub struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buffer: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buffer: Vec::new(),
            }
        }
    }
}
