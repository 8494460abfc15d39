//! Scheduler — модель fork() / a model of fork()
//!
//! Каждый fork() даёт два продолжения: родителя и ребёнка.
//! Every fork() yields two continuations: parent and child.
//!
//! Процессы выполняются по очереди из FIFO run queue. Ребёнок заново
//! исполняет программу и «проигрывает» исходы fork() предков без вывода,
//! после чего продолжает вживую.
//! Processes run one at a time from a FIFO run queue. A child re-executes
//! the program, replays its ancestors' fork() outcomes with output muted,
//! then continues live. Programs must therefore be deterministic given the
//! fork() outcomes they observe.

pub mod demo;
mod process;
mod tree;

use core::fmt;
use std::collections::VecDeque;

use log::debug;
use spin::Mutex;

use crate::drivers::Console;

pub use process::Process;
pub use tree::{ProcessRecord, ProcessTree};

/// Идентификатор процесса / Process identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(pub u32);

impl Pid {
    pub const INIT: Pid = Pid(1);
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Что вернул fork() / What fork() returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkResult {
    /// Мы родитель / We are the parent
    Parent { child: Pid },
    /// Мы ребёнок / We are the child
    Child,
}

impl ForkResult {
    pub fn is_child(self) -> bool {
        self == ForkResult::Child
    }
}

/// Процесс в очереди / Queued process
struct Task {
    pid: Pid,
    parent: Option<Pid>,
    history: Vec<ForkResult>,
}

struct RunQueue {
    next_pid: u32,
    ready: VecDeque<Task>,
    tree: ProcessTree,
}

pub struct Scheduler {
    state: Mutex<RunQueue>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RunQueue {
                next_pid: Pid::INIT.0,
                ready: VecDeque::new(),
                tree: ProcessTree::default(),
            }),
        }
    }

    /// Запустить программу как init и всех её потомков до конца.
    /// Run the program as init, then every descendant, to completion.
    pub fn run<F>(self, console: &Console, program: F) -> ProcessTree
    where
        F: Fn(&mut Process<'_>),
    {
        self.spawn(None, Vec::new());
        while let Some(task) = self.next_task() {
            debug!("[sched] run pid {} (replaying {} forks)", task.pid, task.history.len());
            let mut process = Process::new(task.pid, task.parent, task.history, &self, console);
            program(&mut process);
            let (pid, output) = process.exit();
            debug!("[sched] pid {} exited, {} lines", pid, output.len());
            self.state.lock().tree.set_output(pid, output);
        }
        console.flush();
        self.state.into_inner().tree
    }

    /// Поставить новый процесс в очередь / Enqueue a new process.
    fn spawn(&self, parent: Option<Pid>, history: Vec<ForkResult>) -> Pid {
        let mut q = self.state.lock();
        let pid = Pid(q.next_pid);
        q.next_pid += 1;
        q.tree.insert(pid, parent);
        q.ready.push_back(Task { pid, parent, history });
        pid
    }

    fn next_task(&self) -> Option<Task> {
        self.state.lock().ready.pop_front()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
