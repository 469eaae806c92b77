use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

/// Starts the global logger: rotated files under `logs/`, everything echoed
/// to stdout and warnings duplicated to stderr.
///
/// The returned handle must be kept alive for as long as logging is needed.
pub fn setup_logging(base_level: &str) -> LoggerHandle {
    Logger::try_with_str(base_level)
        .unwrap_or_else(|e| panic!("Invalid log specification '{}': {}", base_level, e))
        .log_to_file(
            FileSpec::default()
                .directory("logs")
                .basename("tracer")
                .suffix("log"),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::All)
        .rotate(
            Criterion::Size(1024 * 1024), //1MB
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e))
}
