use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use chrono::Local;

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

struct Logger {
    file: Option<File>,
    echo: bool,
}

/// Initialize the global logger. Truncates `<log_dir>/quickstart.log`.
/// With `echo`, every line is mirrored to stderr.
///
/// Until this is called every log function is a no-op.
pub fn init(log_dir: &Path, echo: bool) {
    fs::create_dir_all(log_dir).ok();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_dir.join("quickstart.log"))
        .ok();

    LOGGER.set(Mutex::new(Logger { file, echo })).ok();
}

fn write_log(level: &str, prefix: &str, msg: &str) {
    let Some(logger) = LOGGER.get() else { return };
    let ts = Local::now().format("%H:%M:%S");
    let line = if prefix.is_empty() {
        format!("[{}] [{}] {}", ts, level, msg)
    } else {
        format!("[{}] [{}] [{}] {}", ts, level, prefix, msg)
    };

    let Ok(mut l) = logger.lock() else { return };
    if let Some(file) = l.file.as_mut() {
        writeln!(file, "{}", line).ok();
    }
    if l.echo {
        eprintln!("{}", line);
    }
}

pub fn info(msg: &str) {
    write_log("INFO", "", msg);
}

pub fn warn(msg: &str) {
    write_log("WARN", "", msg);
}

pub fn error(msg: &str) {
    write_log("ERROR", "", msg);
}

/// Log under a component prefix, e.g. `info_p("win32", ..)`.
pub fn info_p(prefix: &str, msg: &str) {
    write_log("INFO", prefix, msg);
}

pub fn warn_p(prefix: &str, msg: &str) {
    write_log("WARN", prefix, msg);
}
