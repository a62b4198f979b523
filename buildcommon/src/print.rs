//! Printing system
//!
//! Status lines go to stderr, so stdout stays free for workflow commands
//! read by the Actions runner.
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static COLOR: AtomicBool = AtomicBool::new(true);

/// Enable verbose printing
pub fn verbose_on() {
    VERBOSE.store(true, Ordering::Relaxed);
}

/// Disable colored printing
pub fn color_off() {
    COLOR.store(false, Ordering::Relaxed);
}

/// Automatically enable colored printing if stderr is a terminal
pub fn auto_color() {
    if !std::io::stderr().is_terminal() {
        color_off();
    }
}

/// Check if colored printing is enabled
#[inline]
pub fn is_colored() -> bool {
    COLOR.load(Ordering::Relaxed)
}

#[doc(hidden)]
pub mod __priv {
    pub static RED: &str = "\x1b[1;31m";
    pub static GREEN: &str = "\x1b[1;32m";
    pub static YELLOW: &str = "\x1b[1;33m";
    pub static MAGENTA: &str = "\x1b[1;35m";
    pub static RESET: &str = "\x1b[0m";

    #[inline]
    pub fn is_verbose() -> bool {
        super::VERBOSE.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Write one status line to stderr
    pub fn status_line(color: &str, status: &str, message: std::fmt::Arguments) {
        use std::io::Write;
        let mut s = std::io::stderr().lock();
        if super::is_colored() {
            let _ = write!(&mut s, "{}{:>12}{} ", color, status, RESET);
        } else {
            let _ = write!(&mut s, "{:>12} ", status);
        }
        let _ = writeln!(&mut s, "{}", message);
    }
}

/// Log a status line using info color
#[macro_export]
macro_rules! infoln {
    ($status:expr, $($args:tt)*) => {
        $crate::print::__priv::status_line(
            $crate::print::__priv::GREEN,
            &{ $status },
            format_args!($($args)*),
        )
    };
}

/// Log a status line using error color
#[macro_export]
macro_rules! errorln {
    ($status:expr, $($args:tt)*) => {
        $crate::print::__priv::status_line(
            $crate::print::__priv::RED,
            &{ $status },
            format_args!($($args)*),
        )
    };
}

/// Log a status line using hint color
#[macro_export]
macro_rules! hintln {
    ($status:expr, $($args:tt)*) => {
        $crate::print::__priv::status_line(
            $crate::print::__priv::YELLOW,
            &{ $status },
            format_args!($($args)*),
        )
    };
}

/// Log a line using verbose color, if verbose is enabled
#[macro_export]
macro_rules! verboseln {
    ($($args:tt)*) => {
        if $crate::print::__priv::is_verbose() {
            $crate::print::__priv::status_line(
                $crate::print::__priv::MAGENTA,
                "VERBOSE",
                format_args!($($args)*),
            )
        }
    };
}
