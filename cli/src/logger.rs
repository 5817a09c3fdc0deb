use log::{LevelFilter, Log, Metadata, Record};

/// Writes `maze-paths [LEVEL] target: message` lines to stderr.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "maze-paths [{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Install the logger. Calling it again only adjusts the level.
pub fn init(level: LevelFilter) {
    // set_logger fails only if a logger is already installed.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
