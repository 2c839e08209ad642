//! Configuration loading tests
//!
//! Covers the three-layer resolution: process environment over TOML
//! settings over typed defaults. Tests that touch the process
//! environment are serialized and restore it on drop.

use ipgate::config::load_config;
use rstest::rstest;
use serial_test::serial;
use std::io::Write;

const RESTRICTION_ENV_KEYS: &[&str] = &[
    "RESTRICT_IPS",
    "ALLOWED_IPS",
    "ALLOWED_IP_RANGES",
    "ALLOW_ADMIN",
    "ALLOW_AUTHENTICATED",
    "RESTRICT_ADMIN_BY_IPS",
    "ALLOWED_ADMIN_IPS",
    "ALLOWED_ADMIN_IP_RANGES",
];

/// Sets environment variables for one test and removes them on drop,
/// so a failing assertion cannot leak state into the next test.
struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    fn set(vars: &[(&str, &str)]) -> Self {
        // SAFETY: tests mutating the environment are marked #[serial],
        // so no other thread reads or writes it concurrently.
        for (key, value) in vars {
            unsafe { std::env::set_var(key, value) };
        }
        Self {
            keys: vars.iter().map(|(key, _)| key.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            unsafe { std::env::remove_var(key) };
        }
    }
}

fn settings_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn assert_clean_env() {
    for key in RESTRICTION_ENV_KEYS {
        assert!(
            std::env::var(key).is_err(),
            "test environment already has {key} set"
        );
    }
}

const FULL_SETTINGS: &str = r#"
[restriction]
restrict_ips = true
allow_admin = true
allow_authenticated = true
allowed_ips = ["192.168.0.1"]
allowed_ip_ranges = ["192.168.0.0/24"]
restrict_admin_by_ips = true
allowed_admin_ips = ["192.168.0.1"]
allowed_admin_ip_ranges = ["192.168.0.0/24"]
"#;

#[test]
#[serial]
fn test_default_config() {
    assert_clean_env();

    let config = load_config(None).unwrap();
    let restriction = config.restriction;
    assert!(!restriction.restrict_ips);
    assert!(!restriction.allow_admin);
    assert!(!restriction.allow_authenticated);
    assert!(!restriction.restrict_admin_by_ips);
    assert!(restriction.allowed_ips.is_empty());
    assert!(restriction.allowed_ip_ranges.is_empty());
    assert!(restriction.allowed_admin_ips.is_empty());
    assert!(restriction.allowed_admin_ip_ranges.is_empty());
}

#[test]
#[serial]
fn test_settings_file() {
    assert_clean_env();

    let file = settings_file(FULL_SETTINGS);
    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();

    let restriction = config.restriction;
    assert!(restriction.restrict_ips);
    assert!(restriction.allow_admin);
    assert!(restriction.allow_authenticated);
    assert!(restriction.restrict_admin_by_ips);
    assert_eq!(restriction.allowed_ips, vec!["192.168.0.1"]);
    assert_eq!(restriction.allowed_ip_ranges, vec!["192.168.0.0/24"]);
    assert_eq!(restriction.allowed_admin_ips, vec!["192.168.0.1"]);
    assert_eq!(restriction.allowed_admin_ip_ranges, vec!["192.168.0.0/24"]);
}

#[test]
#[serial]
fn test_environment_trumps_settings() {
    assert_clean_env();

    let settings = r#"
[restriction]
restrict_ips = false
allow_admin = false
allow_authenticated = false
allowed_ips = ["192.168.0.1"]
allowed_ip_ranges = ["192.168.0.0/24"]
restrict_admin_by_ips = false
allowed_admin_ips = ["192.168.0.1"]
allowed_admin_ip_ranges = ["192.168.0.0/24"]
"#;
    let file = settings_file(settings);

    let _env = EnvGuard::set(&[
        ("RESTRICT_IPS", "true"),
        ("ALLOW_ADMIN", "true"),
        ("ALLOW_AUTHENTICATED", "true"),
        ("ALLOWED_IPS", "192.168.0.2"),
        ("ALLOWED_IP_RANGES", "192.168.0.0/20"),
        ("RESTRICT_ADMIN_BY_IPS", "true"),
        ("ALLOWED_ADMIN_IPS", "192.168.0.2"),
        ("ALLOWED_ADMIN_IP_RANGES", "192.168.0.0/20"),
    ]);

    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    let restriction = config.restriction;
    assert!(restriction.restrict_ips);
    assert!(restriction.allow_admin);
    assert!(restriction.allow_authenticated);
    assert!(restriction.restrict_admin_by_ips);
    assert_eq!(restriction.allowed_ips, vec!["192.168.0.2"]);
    assert_eq!(restriction.allowed_ip_ranges, vec!["192.168.0.0/20"]);
    assert_eq!(restriction.allowed_admin_ips, vec!["192.168.0.2"]);
    assert_eq!(restriction.allowed_admin_ip_ranges, vec!["192.168.0.0/20"]);
}

#[rstest]
#[case("true", true)]
#[case("TRUE", true)]
#[case("True", true)]
#[case("1", true)]
#[case("false", false)]
#[case("0", false)]
#[case("yes", false)]
#[case("on", false)]
#[case("", false)]
#[case("banana", false)]
#[serial]
fn test_env_bool_parsing(#[case] value: &str, #[case] expected: bool) {
    assert_clean_env();

    let _env = EnvGuard::set(&[("RESTRICT_IPS", value)]);
    let config = load_config(None).unwrap();
    assert_eq!(config.restriction.restrict_ips, expected);
}

#[test]
#[serial]
fn test_malformed_env_bool_overrides_settings() {
    assert_clean_env();

    // A present but malformed override resolves to false; it never
    // falls through to the file value.
    let file = settings_file("[restriction]\nrestrict_ips = true\n");
    let _env = EnvGuard::set(&[("RESTRICT_IPS", "banana")]);

    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    assert!(!config.restriction.restrict_ips);
}

#[test]
#[serial]
fn test_env_list_splitting() {
    assert_clean_env();

    let _env = EnvGuard::set(&[
        ("ALLOWED_IPS", " 127.0.0.1 ,,192.168.0.1 , "),
        ("ALLOWED_IP_RANGES", "10.0.0.0/8, 172.16.0.0/12"),
    ]);

    let config = load_config(None).unwrap();
    assert_eq!(
        config.restriction.allowed_ips,
        vec!["127.0.0.1", "192.168.0.1"]
    );
    assert_eq!(
        config.restriction.allowed_ip_ranges,
        vec!["10.0.0.0/8", "172.16.0.0/12"]
    );
}

#[test]
#[serial]
fn test_empty_env_list_overrides_settings() {
    assert_clean_env();

    let file = settings_file("[restriction]\nallowed_ips = [\"192.168.0.1\"]\n");
    let _env = EnvGuard::set(&[("ALLOWED_IPS", "")]);

    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    assert!(config.restriction.allowed_ips.is_empty());
}

#[test]
#[serial]
fn test_unset_env_falls_through_to_settings() {
    assert_clean_env();

    let file = settings_file("[restriction]\nallowed_ips = [\"192.168.0.1\"]\n");
    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.restriction.allowed_ips, vec!["192.168.0.1"]);
}

#[test]
#[serial]
fn test_no_cidr_validation_at_load_time() {
    assert_clean_env();

    // Malformed entries load fine; they are handled at match time.
    let _env = EnvGuard::set(&[("ALLOWED_IP_RANGES", "not-a-range,127.0.0.1/30")]);
    let config = load_config(None).unwrap();
    assert_eq!(
        config.restriction.allowed_ip_ranges,
        vec!["not-a-range", "127.0.0.1/30"]
    );
}
