//! Event log reopen tests
//!
//! Every CLI invocation opens logs.duckdb afresh, so opening an existing
//! database must skip applied migrations and keep earlier entries.
//!
//! Run with: cargo test --test connection_retry_test -- --nocapture

use std::time::Instant;

use tempfile::TempDir;

use swapguard_core::{EntryPoint, LogEvent, LoggingService};

#[test]
fn test_reopen_keeps_entries() {
    let temp_dir = TempDir::new().unwrap();

    for round in 0..3 {
        let start = Instant::now();
        let service = LoggingService::new(temp_dir.path(), EntryPoint::Cli, "test")
            .unwrap_or_else(|e| panic!("open {} failed: {}", round, e));
        println!("Round {}: opened in {:?}", round, start.elapsed());

        service
            .log(LogEvent::new("command_executed").with_command(format!("round_{}", round)))
            .unwrap();
        assert_eq!(service.count().unwrap(), round + 1);
    }
}

#[test]
fn test_reopen_preserves_error_entries() {
    let temp_dir = TempDir::new().unwrap();

    {
        let service = LoggingService::new(temp_dir.path(), EntryPoint::Library, "test").unwrap();
        service
            .log(
                LogEvent::new("amount_check_fallback")
                    .with_token("ETH")
                    .with_error("InvalidDecimal"),
            )
            .unwrap();
        service.log_command("status").unwrap();
    }

    let service = LoggingService::new(temp_dir.path(), EntryPoint::Cli, "test").unwrap();
    let errors = service.get_errors(10).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].token.as_deref(), Some("ETH"));
    assert_eq!(errors[0].entry_point, "library");
    assert_eq!(service.count().unwrap(), 2);
}
