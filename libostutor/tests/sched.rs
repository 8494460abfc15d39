use aok::{OK, Void};
use libostutor::{
    drivers::Console,
    sched::{demo, ForkResult, Pid, Scheduler},
};
use log::info;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
    log_init::init();
}

#[test]
fn test_no_fork_single_process() -> Void {
    let con = Console::capture();
    let tree = Scheduler::new().run(&con, demo::sequential_forks(0));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.depth(), 0);
    assert_eq!(con.lines(), vec!["pid 1 done"]);
    OK
}

#[test]
fn test_sequential_forks_double() -> Void {
    for n in 0..=6u32 {
        let con = Console::capture();
        let tree = Scheduler::new().run(&con, demo::sequential_forks(n));
        assert_eq!(tree.len(), 1 << n, "n = {n}");
        assert_eq!(tree.depth(), n as usize);
        assert_eq!(con.lines().len(), 1 << n);
        assert_eq!(tree.leaf_count(), 1 << n, "n = {n}");
        assert_eq!(tree.childless().count(), if n == 0 { 1 } else { 1 << (n - 1) });
    }
    OK
}

#[test]
fn test_fork_returns_both_sides() -> Void {
    let con = Console::capture();
    let tree = Scheduler::new().run(&con, |p| {
        let r = p.fork();
        let pid = p.pid();
        match r {
            ForkResult::Parent { child } => libostutor::kprintln!(p, "parent {} of {}", pid, child),
            ForkResult::Child => libostutor::kprintln!(p, "child {}", pid),
        }
    });
    assert_eq!(con.lines(), vec!["parent 1 of 2", "child 2"]);
    assert_eq!(tree.get(Pid(2)).and_then(|r| r.parent), Some(Pid(1)));
    OK
}

#[test]
fn test_nested_fork_tree() -> Void {
    let con = Console::capture();
    let tree = Scheduler::new().run(&con, demo::nested_fork);
    info!("\n{}", tree.render());

    assert_eq!(tree.len(), 6);
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.leaf_count(), 6);
    let childless: Vec<Pid> = tree.childless().map(|r| r.pid).collect();
    assert_eq!(childless, vec![Pid(5), Pid(6)]);

    let children = |pid: u32| tree.get(Pid(pid)).map(|r| r.children.clone()).unwrap_or_default();
    assert_eq!(children(1), vec![Pid(2), Pid(3)]);
    assert_eq!(children(2), vec![Pid(4)]);
    assert_eq!(children(3), vec![Pid(5)]);
    assert_eq!(children(4), vec![Pid(6)]);

    let output = |pid: u32| tree.get(Pid(pid)).map(|r| r.output.clone()).unwrap_or_default();
    assert_eq!(
        output(1),
        vec![
            "",
            "",
            "------Start of program----",
            "",
            "Inside Parent2, hello1",
            "Inside Parent 1, hello2",
            "Inside Main, Final. hello5",
        ]
    );
    assert_eq!(
        output(2),
        vec!["Inside Child 1 Parent 1, hello3", "Inside Child 1, hello4", "Inside Main, Final. hello5"]
    );
    for pid in [3, 5] {
        assert_eq!(output(pid), vec!["Inside Parent 1, hello2", "Inside Main, Final. hello5"]);
    }
    for pid in [4, 6] {
        assert_eq!(output(pid), vec!["Inside Child 1, hello4", "Inside Main, Final. hello5"]);
    }

    // banner once, hello5 from every process
    let lines = con.lines();
    assert_eq!(lines.iter().filter(|l| l.starts_with("------Start")).count(), 1);
    assert_eq!(&lines[..4], ["", "", "------Start of program----", ""]);
    assert_eq!(lines.iter().filter(|l| l.ends_with("hello5")).count(), 6);
    OK
}

#[test]
fn test_render_indents_children() -> Void {
    let con = Console::capture();
    let tree = Scheduler::new().run(&con, demo::sequential_forks(1));
    assert_eq!(tree.render(), "pid 1: pid 1 done\n  pid 2: pid 2 done\n");
    OK
}
