//! Демо-программы / Demo programs

use super::Process;
use crate::kprintln;

/// Вложенные fork(): 6 процессов / Nested fork(): 6 processes.
///
/// ```text
/// main ─┬─ fork ── parent ─┬─ fork ── parent: hello1
///       │                  └─ child ── fork
///       └─ child ── fork ─┬─ parent: hello3
///                         └─ child ── fork
/// ```
pub fn nested_fork(p: &mut Process<'_>) {
    kprintln!(p, "\n\n------Start of program----\n");

    if !p.fork().is_child() {
        if !p.fork().is_child() {
            kprintln!(p, "Inside Parent2, hello1");
        } else {
            p.fork();
        }
        kprintln!(p, "Inside Parent 1, hello2");
    } else {
        if !p.fork().is_child() {
            kprintln!(p, "Inside Child 1 Parent 1, hello3");
        } else {
            p.fork();
        }
        kprintln!(p, "Inside Child 1, hello4");
    }

    kprintln!(p, "Inside Main, Final. hello5");
}

/// `n` fork() подряд: 2^n процессов / `n` fork() in a row: 2^n processes.
pub fn sequential_forks(n: u32) -> impl Fn(&mut Process<'_>) {
    move |p| {
        for _ in 0..n {
            p.fork();
        }
        let pid = p.pid();
        kprintln!(p, "pid {} done", pid);
    }
}
