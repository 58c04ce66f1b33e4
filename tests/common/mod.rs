use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

pub struct CliOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

/// Runs `parkqwik_cli` against a throwaway home with instant services.
pub struct BookingHarness {
    home: TempDir,
}

impl BookingHarness {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp dir");
        let config = r#"{
  "plain_mode": true,
  "location_delay_ms": 0,
  "payment_delay_ms": 0,
  "tracking_interval_ms": 0
}"#;
        std::fs::write(home.path().join("config.json"), config).expect("write config");
        Self { home }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("parkqwik_cli").expect("binary exists");
        cmd.env("PARKQWIK_HOME", self.home())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    #[allow(dead_code)]
    pub fn run_wizard(
        &self,
        menu_sequences: &[&str],
        text_inputs: &[&str],
        confirmations: &[&str],
    ) -> CliOutput {
        let mut cmd = self.command();
        cmd.env("PARKQWIK_TEST_MENU_EVENTS", menu_sequences.join("|"));
        cmd.env("PARKQWIK_TEST_TEXT_INPUTS", text_inputs.join("|"));
        cmd.env("PARKQWIK_TEST_CONFIRMATIONS", confirmations.join("|"));
        let output = cmd.output().expect("run wizard");
        if !output.status.success() {
            panic!(
                "wizard failed: status={}\nstdout:\n{}\nstderr:\n{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
