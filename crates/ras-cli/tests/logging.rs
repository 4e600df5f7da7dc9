//! Integration test for the logging setup.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use ras_cli::logging::{LogConfig, LogFormat, init_logging_with_writer};

#[derive(Clone, Default)]
struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_library_events_reach_json_writer() {
    let output = CapturedOutput::default();
    let config = LogConfig::from_verbosity(1)
        .with_env_filter(false)
        .with_ansi(false)
        .with_format(LogFormat::Json);
    let writer = output.clone();
    init_logging_with_writer(&config, move || writer.clone());

    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("Muncie.p01");
    std::fs::write(
        &plan,
        "Plan Title=Base\nUNET D1 Cores=0\nUNET D2 Cores=0\nPS Cores=0\n",
    )
    .unwrap();
    ras_project::set_core_count(&plan, 4).unwrap();
    tracing::debug!("filtered out at info level");

    let text = output.text();
    assert!(text.contains("set plan core count"), "{text}");
    assert!(text.contains("\"cores\":4"), "{text}");
    assert!(!text.contains("filtered out"), "{text}");
}
