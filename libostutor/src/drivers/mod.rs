//! Host-side drivers
//!
//! Минимально необходимые / Minimum required:
//!   - Console — вывод демо-программ в stdout и/или в буфер
//!               demo output to stdout and/or a capture buffer

pub mod console;

pub use console::Console;

/// Макрос для вывода в любой приёмник с методом `_print`.
/// Print macro for any sink that has a `_print` method.
///
/// ```
/// use libostutor::{drivers::Console, kprintln};
/// let con = Console::capture();
/// kprintln!(con, "dir index = {}", 0);
/// assert_eq!(con.contents(), "dir index = 0\n");
/// ```
#[macro_export]
macro_rules! kprint {
    ($dst:expr, $($arg:tt)*) => {
        $dst._print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! kprintln {
    ($dst:expr)               => ($crate::kprint!($dst, "\n"));
    ($dst:expr, $($arg:tt)*)  => ($crate::kprint!($dst, "{}\n", format_args!($($arg)*)));
}
