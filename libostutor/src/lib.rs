//! libostutor — учебные модели ОС / teaching models of OS concepts
//!
//! Два сюжета / Two topics:
//!   mm    — разбор виртуального адреса и двухуровневые page tables
//!           virtual address decomposition and two-level page tables
//!   sched — дерево процессов от повторных fork()
//!           the process tree produced by repeated fork()
//!
//! Использование / Usage:
//!   use libostutor::mm::{AddressLayout, VirtAddr};
//!   let fields = AddressLayout::DEFAULT.decompose(0x123456);

pub mod drivers;
pub mod error;
pub mod mm;
pub mod sched;

pub use error::{Error, Level, Result};
