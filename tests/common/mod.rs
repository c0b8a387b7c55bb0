//! Shared fixtures: a throwaway config, log file and fake lookup programs.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Lookup script mimicking geoiplookup output for documentation addresses
pub const FAKE_LOOKUP: &str = r#"#!/bin/sh
case "$1" in
  203.0.113.*) echo "GeoIP Country Edition: CN, China" ;;
  198.51.100.*) echo "GeoIP Country Edition: RU, Russian Federation" ;;
  8.8.8.8) echo "GeoIP Country Edition: US, United States" ;;
  81.2.69.*) echo "GeoIP Country Edition: GB, United Kingdom" ;;
  2.2.2.2) echo "GeoIP Country Edition: FR, France" ;;
  *) echo "GeoIP Country Edition: IP Address not found" ;;
esac
"#;

/// IPv6 lookup script
pub const FAKE_LOOKUP6: &str = r#"#!/bin/sh
case "$1" in
  2001:db8:cafe:*) echo "GeoIP Country V6 Edition: DE, Germany" ;;
  *) echo "GeoIP Country V6 Edition: IP Address not found" ;;
esac
"#;

pub struct TestEnv {
    tmp: TempDir,
    pub config: PathBuf,
    pub log: PathBuf,
}

impl TestEnv {
    /// Environment with both lookup programs installed and `policy` as the
    /// mode/country_codes part of the config.
    pub fn new(policy: &str) -> Self {
        let env = Self::bare();
        let v4 = env.install("geoiplookup", FAKE_LOOKUP);
        let v6 = env.install("geoiplookup6", FAKE_LOOKUP6);
        env.write_config(policy, &v4, &v6);
        env
    }

    /// Environment whose resolver paths point at nothing
    pub fn without_resolver(policy: &str) -> Self {
        let env = Self::bare();
        let v4 = env.tmp.path().join("missing/geoiplookup");
        let v6 = env.tmp.path().join("missing/geoiplookup6");
        env.write_config(policy, &v4, &v6);
        env
    }

    fn bare() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let config = tmp.path().join("config.yaml");
        let log = tmp.path().join("geogate.log");
        Self { tmp, config, log }
    }

    /// Write an executable script into the environment
    pub fn install(&self, name: &str, script: &str) -> PathBuf {
        let path = self.tmp.path().join(name);
        fs::write(&path, script).expect("write lookup script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod lookup script");
        path
    }

    pub fn write_config(&self, policy: &str, v4: &Path, v6: &Path) {
        let yaml = format!(
            "{}\nresolver:\n  ipv4: {}\n  ipv6: {}\nlog:\n  file: {}\n",
            policy,
            v4.display(),
            v6.display(),
            self.log.display()
        );
        fs::write(&self.config, yaml).expect("write config");
    }

    /// Run geogate non-interactively against this environment
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_geogate"))
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .stdin(Stdio::null())
            .env_remove("GEOGATE_CONFIG")
            .output()
            .expect("Failed to execute geogate")
    }

    pub fn log_content(&self) -> String {
        fs::read_to_string(&self.log).unwrap_or_default()
    }
}

pub fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("geogate exited by signal")
}
