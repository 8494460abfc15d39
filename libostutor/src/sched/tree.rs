//! ProcessTree — кто кого породил / who forked whom

use std::collections::BTreeMap;
use core::fmt::Write;

use super::Pid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub parent: Option<Pid>,
    /// В порядке fork() / In fork() order
    pub children: Vec<Pid>,
    pub output: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessTree {
    records: BTreeMap<Pid, ProcessRecord>,
}

impl ProcessTree {
    pub(super) fn insert(&mut self, pid: Pid, parent: Option<Pid>) {
        if let Some(p) = parent.and_then(|p| self.records.get_mut(&p)) {
            p.children.push(pid);
        }
        self.records.insert(pid, ProcessRecord { pid, parent, children: Vec::new(), output: Vec::new() });
    }

    pub(super) fn set_output(&mut self, pid: Pid, output: Vec<String>) {
        if let Some(r) = self.records.get_mut(&pid) {
            r.output = output;
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.records.get(&pid)
    }

    pub fn root(&self) -> Option<&ProcessRecord> {
        self.records.values().find(|r| r.parent.is_none())
    }

    /// По возрастанию pid / In pid order
    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.values()
    }

    /// Процессы без детей / Processes that never forked
    pub fn childless(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.values().filter(|r| r.children.is_empty())
    }

    /// Листья дерева исполнения / Leaves of the execution tree.
    ///
    /// Every fork() splits one path into two and every process ends exactly
    /// one path, so a path with `n` fork() calls contributes `2^n` leaves.
    pub fn leaf_count(&self) -> usize {
        self.records.len()
    }

    /// Рёбер на самом длинном пути от корня / Edges on the longest root path
    pub fn depth(&self) -> usize {
        self.root().map_or(0, |r| self.depth_from(r.pid))
    }

    fn depth_from(&self, pid: Pid) -> usize {
        self.records
            .get(&pid)
            .map_or(0, |r| r.children.iter().map(|&c| 1 + self.depth_from(c)).max().unwrap_or(0))
    }

    /// ```text
    /// pid 1: Inside Parent2, hello1 | ...
    ///   pid 2: ...
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root() {
            self.render_into(&mut out, root.pid, 0);
        }
        out
    }

    fn render_into(&self, out: &mut String, pid: Pid, indent: usize) {
        let Some(r) = self.records.get(&pid) else { return };
        let _ = writeln!(out, "{:indent$}pid {}: {}", "", r.pid, r.output.join(" | "), indent = indent * 2);
        for &c in &r.children {
            self.render_into(out, c, indent + 1);
        }
    }
}
