use mgkit_logger::{LevelFilter, Logger, LoggerError};
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

// A process holds one global subscriber, so the whole sequence runs in one test.
#[test]
#[serial]
fn file_logging_then_second_init_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("mgkit-test")
        .console(false)
        .level(LevelFilter::INFO)
        .directory(&log_dir)
        .init()?;
    assert!(logger.writes_files());

    tracing::info!(path = "lib/a.dart", "hello from integration test");

    let err = Logger::builder().name("mgkit-test-second").init().unwrap_err();
    assert!(matches!(err, LoggerError::Subscriber { .. }));

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");
    let content = fs::read_to_string(log_file)?;
    assert!(content.contains("hello from integration test"));
    Ok(())
}
