//! Process — то, что видит программа / what a program sees

use core::fmt;

use log::trace;

use super::{ForkResult, Pid, Scheduler};
use crate::drivers::Console;

pub struct Process<'a> {
    pid: Pid,
    parent: Option<Pid>,
    /// Исходы fork() этого процесса от начала программы.
    /// fork() outcomes of this process since program start.
    history: Vec<ForkResult>,
    cursor: usize,
    scheduler: &'a Scheduler,
    console: &'a Console,
    line: String,
    output: Vec<String>,
}

impl<'a> Process<'a> {
    pub(super) fn new(
        pid: Pid,
        parent: Option<Pid>,
        history: Vec<ForkResult>,
        scheduler: &'a Scheduler,
        console: &'a Console,
    ) -> Self {
        Self {
            pid,
            parent,
            history,
            cursor: 0,
            scheduler,
            console,
            line: String::new(),
            output: Vec::new(),
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn parent(&self) -> Option<Pid> {
        self.parent
    }

    /// Пока true, вывод глушится / Output is muted while true.
    pub fn is_replaying(&self) -> bool {
        self.cursor < self.history.len()
    }

    pub fn fork(&mut self) -> ForkResult {
        if let Some(&outcome) = self.history.get(self.cursor) {
            self.cursor += 1;
            return outcome;
        }
        let mut child_history = self.history.clone();
        child_history.push(ForkResult::Child);
        let child = self.scheduler.spawn(Some(self.pid), child_history);
        trace!("[sched] pid {} forked pid {}", self.pid, child);

        let outcome = ForkResult::Parent { child };
        self.history.push(outcome);
        self.cursor += 1;
        outcome
    }

    /// Внутренняя функция для макроса kprint!
    /// Internal function for kprint! macro
    pub fn _print(&mut self, args: fmt::Arguments) {
        if self.is_replaying() {
            return;
        }
        let text = args.to_string();
        self.console.print(&text);
        for ch in text.chars() {
            if ch == '\n' {
                self.output.push(core::mem::take(&mut self.line));
            } else {
                self.line.push(ch);
            }
        }
    }

    pub(super) fn exit(mut self) -> (Pid, Vec<String>) {
        if !self.line.is_empty() {
            self.output.push(core::mem::take(&mut self.line));
        }
        (self.pid, self.output)
    }
}
