//! Ошибки / Errors

use core::fmt;

use thiserror::Error;

/// Уровень page table, на котором оборвался обход.
/// Page-table level at which a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Directory,
    Table,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Directory => f.write_str("directory"),
            Level::Table => f.write_str("table"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("address {addr:#010x} not mapped: {level} index {index} not present")]
    NotMapped { addr: u32, level: Level, index: u32 },

    #[error("address {addr:#010x} already mapped")]
    AlreadyMapped { addr: u32 },

    #[error("invalid layout: {0}")]
    InvalidLayout(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArg(&'static str),

    #[error("out of physical frames")]
    NoMemory,

    #[error("frame {0:#010x} does not belong to the allocator")]
    InvalidFrame(u32),
}

pub type Result<T> = core::result::Result<T, Error>;
