use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
    sync::Mutex,
};

use chrono::{Datelike, Timelike};

pub struct LoggingState {
    writer: BufWriter<std::fs::File>,
}

impl LoggingState {
    pub fn create(logs_dir: &Path) -> Option<LoggingState> {
        std::fs::create_dir_all(logs_dir).ok()?;

        // Current date+time
        let now = chrono::Local::now();
        let log_file_name = format!(
            "{}-{}-{}-{}-{}-{}.log",
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second()
        );
        let log_file_path = logs_dir.join(log_file_name);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file_path)
            .ok()?;

        Some(LoggingState {
            writer: BufWriter::new(file),
        })
    }

    pub fn write_str(&mut self, s: &str) {
        let _ = self.writer.write_all(s.as_bytes());
        let _ = self.writer.flush();
    }
}

/// Log file sink. Empty until [`logger_init`] is called,
/// in which case messages only go to the terminal.
pub static LOGGER: Mutex<Option<LoggingState>> = Mutex::new(None);

/// Starts mirroring all printed messages into a
/// timestamped file inside `logs_dir`.
///
/// If the file can't be created, file logging
/// stays off and nothing else happens.
pub fn logger_init(logs_dir: &Path) {
    let state = LoggingState::create(logs_dir);
    if let Ok(mut logger) = LOGGER.lock() {
        *logger = state;
    }
}

#[doc(hidden)]
pub fn write_to_log(text: &str) {
    if let Ok(mut logger) = LOGGER.lock() {
        if let Some(logger) = &mut *logger {
            logger.write_str(text);
        }
    }
}

/// Print an informational message.
/// Saved to a log file.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        let plain_text = format!("[info] {}\n", format_args!($($arg)*));

        if cfg!(windows) {
            print!("{plain_text}")
        } else {
            println!("{} {}", colored::Colorize::yellow("[info]"), format_args!($($arg)*))
        }

        $crate::print::write_to_log(&plain_text);
    };
}

/// Print an error message.
/// Saved to a log file.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        let plain_text = format!("[error] {}\n", format_args!($($arg)*));

        if cfg!(windows) {
            eprint!("{plain_text}")
        } else {
            eprintln!("{} {}", colored::Colorize::red("[error]"), format_args!($($arg)*))
        }

        $crate::print::write_to_log(&plain_text);
    };
}

/// Print a point message, ie. a small step in some process.
/// Saved to a log file.
#[macro_export]
macro_rules! pt {
    ($($arg:tt)*) => {
        let plain_text = format!("[plain] {}\n", format_args!($($arg)*));

        if cfg!(windows) {
            println!("- {}", format_args!($($arg)*))
        } else {
            println!("{} {}", colored::Colorize::bold("-"), format_args!($($arg)*))
        }

        $crate::print::write_to_log(&plain_text);
    };
}
