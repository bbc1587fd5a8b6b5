use super::load::{default_config_path, default_music_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn defaults_match_recognized_formats_and_caps() {
    let s = Settings::default();
    assert_eq!(
        s.library.extensions,
        vec!["mp3", "m4a", "flac", "wav", "ogg", "aac", "wma"]
    );
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(DEFAULT_MAX_DEPTH));
    assert_eq!(s.library.max_files, DEFAULT_MAX_FILES);
    assert_eq!(s.scan.progress_interval, 50);
    assert!(!s.scan.filename_heuristics);
    assert!(!s.scan.extract_artwork);
    assert_eq!(s.output.format, OutputFormat::List);
    assert!(s.validate().is_ok());
}

#[test]
fn worker_count_is_capped_unless_explicit() {
    let auto = ScanSettings::default();
    let n = auto.worker_count();
    assert!(n >= 1 && n <= MAX_AUTO_WORKERS);

    let explicit = ScanSettings {
        concurrency: Some(64),
        ..ScanSettings::default()
    };
    assert_eq!(explicit.worker_count(), 64);
}

#[test]
fn validate_rejects_zero_caps() {
    let mut s = Settings::default();
    s.library.max_files = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.max_depth = Some(0);
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.scan.progress_interval = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.scan.concurrency = Some(0);
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec![" . ".to_string(), String::new()];
    assert!(s.validate().is_err());
}

#[test]
fn resolve_config_path_prefers_riffle_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RIFFLE_CONFIG_PATH", "/tmp/riffle-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/riffle-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("riffle")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("riffle")
            .join("config.toml")
    );
}

#[cfg(unix)]
#[test]
fn default_music_dir_prefers_existing_xdg_music_dir() {
    let _lock = env_lock();
    let xdg = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    std::fs::create_dir(home.path().join("Music")).unwrap();

    let _g1 = EnvGuard::set("XDG_MUSIC_DIR", xdg.path().to_str().unwrap());
    let _g2 = EnvGuard::set("HOME", home.path().to_str().unwrap());
    assert_eq!(default_music_dir().unwrap(), xdg.path());

    let _g3 = EnvGuard::set("XDG_MUSIC_DIR", "/definitely/not/here");
    assert_eq!(default_music_dir().unwrap(), home.path().join("Music"));
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
root = "/srv/music"
extensions = ["mp3", "flac"]
recursive = false
include_hidden = false
follow_links = true
max_depth = 4
max_files = 200
display_fields = ["filename", "year"]
display_separator = "::"

[scan]
concurrency = 2
progress_interval = 10
filename_heuristics = true
extract_artwork = true
file_timeout_ms = 1500

[logging]
level = "riffle=debug"

[output]
format = "json"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RIFFLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RIFFLE__SCAN__PROGRESS_INTERVAL");

    let s = Settings::load().unwrap();
    assert_eq!(
        s.library.root.as_deref(),
        Some(std::path::Path::new("/srv/music"))
    );
    assert_eq!(
        s.library.extensions,
        vec!["mp3".to_string(), "flac".to_string()]
    );
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(4));
    assert_eq!(s.library.max_files, 200);
    assert!(matches!(
        s.library.display_fields[0],
        TrackDisplayField::Filename
    ));
    assert!(matches!(s.library.display_fields[1], TrackDisplayField::Year));
    assert_eq!(s.library.display_separator, "::");
    assert_eq!(s.scan.concurrency, Some(2));
    assert_eq!(s.scan.progress_interval, 10);
    assert!(s.scan.filename_heuristics);
    assert!(s.scan.extract_artwork);
    assert_eq!(s.scan.file_timeout_ms, Some(1500));
    assert_eq!(s.logging.level, "riffle=debug");
    assert_eq!(s.output.format, OutputFormat::Json);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[scan]
progress_interval = 50
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RIFFLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("RIFFLE__SCAN__PROGRESS_INTERVAL", "7");

    let s = Settings::load().unwrap();
    assert_eq!(s.scan.progress_interval, 7);
}
