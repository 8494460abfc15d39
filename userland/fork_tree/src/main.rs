//! fork_tree — дерево процессов от вложенных fork()
//! fork_tree — the process tree produced by nested fork()

use libostutor::{
    drivers::Console,
    kprintln,
    sched::{demo, Scheduler},
};
use log::info;

fn main() {
    log_init::init();
    let console = Console::stdout();

    let tree = Scheduler::new().run(&console, demo::nested_fork);
    info!("[sched] {} processes, depth {}", tree.len(), tree.depth());

    kprintln!(console, "\nProcess tree:");
    console.print(&tree.render());
    kprintln!(console, "{} processes, {} execution paths", tree.len(), tree.leaf_count());
    console.flush();
}
