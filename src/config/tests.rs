use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
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
fn resolve_config_path_prefers_adagio_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ADAGIO_CONFIG_PATH", "/tmp/adagio-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/adagio-test-config.toml")
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
            .join("adagio")
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
            .join("adagio")
            .join("config.toml")
    );
}

#[test]
fn settings_default_matches_documented_values() {
    let s = Settings::default();
    assert_eq!(s.playback.volume, 50);
    assert!(!s.playback.repeat);
    assert!(!s.playback.shuffle);
    assert_eq!(s.progress.update_interval_ms, 1000);
    assert_eq!(s.ui.volume_step, 5);
    assert!(!s.library.recursive);
    assert_eq!(
        s.library.extensions,
        vec![
            "mp3".to_string(),
            "flac".to_string(),
            "wav".to_string(),
            "ogg".to_string()
        ]
    );
    assert!(s.music.dir.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[music]
dir = "/srv/music"

[playback]
volume = 80
repeat = true
shuffle = true

[progress]
update_interval_ms = 250

[ui]
header_text = "hello"
volume_step = 10

[library]
extensions = ["mp3"]
recursive = true
include_hidden = true
follow_links = true
max_depth = 3
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ADAGIO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ADAGIO__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.music.dir.as_deref(), Some(std::path::Path::new("/srv/music")));
    assert_eq!(s.playback.volume, 80);
    assert!(s.playback.repeat);
    assert!(s.playback.shuffle);
    assert_eq!(s.progress.update_interval_ms, 250);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.volume_step, 10);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ADAGIO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ADAGIO__PLAYBACK__VOLUME", "25");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 25);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.playback.volume = 150;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.progress.update_interval_ms = 0;
    assert!(s.validate().is_err());
}
