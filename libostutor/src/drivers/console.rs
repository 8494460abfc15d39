//! Console — общий приёмник вывода / shared output sink
//!
//! Все процессы демо пишут в одну консоль, как в общий терминал.
//! Every demo process writes to one console, like a shared terminal.
//! Writers hold `&Console`; the lock serialises them.

use std::io::{self, Write as _};

use core::fmt;
use spin::Mutex;

struct ConsoleInner {
    echo: bool,
    buf: String,
}

impl fmt::Write for ConsoleInner {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.echo {
            io::stdout().write_all(s.as_bytes()).ok();
        }
        self.buf.push_str(s);
        Ok(())
    }
}

pub struct Console {
    inner: Mutex<ConsoleInner>,
}

impl Console {
    /// Пишет в stdout и запоминает / Echoes to stdout and records.
    pub const fn stdout() -> Self {
        Self::with_echo(true)
    }

    /// Только запоминает / Records only.
    pub const fn capture() -> Self {
        Self::with_echo(false)
    }

    const fn with_echo(echo: bool) -> Self {
        Self { inner: Mutex::new(ConsoleInner { echo, buf: String::new() }) }
    }

    pub fn print(&self, s: &str) {
        use fmt::Write;
        self.inner.lock().write_str(s).ok();
    }

    /// Внутренняя функция для макроса kprint!
    /// Internal function for kprint! macro
    pub fn _print(&self, args: fmt::Arguments) {
        use fmt::Write;
        self.inner.lock().write_fmt(args).ok();
    }

    pub fn contents(&self) -> String {
        self.inner.lock().buf.clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.inner.lock().buf.lines().map(String::from).collect()
    }

    pub fn flush(&self) {
        if self.inner.lock().echo {
            io::stdout().flush().ok();
        }
    }
}
