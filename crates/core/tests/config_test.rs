use sirish_core::config::Config;

fn with_env_vars<F, T>(vars: &[(&str, &str)], f: F) -> T
where
    F: FnOnce() -> T,
{
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    let result = f();
    for (key, _) in vars {
        std::env::remove_var(key);
    }
    result
}

// Environment variables are process-wide, so every override is checked from a
// single test to keep this binary free of races.
#[test]
fn test_environment_overrides_file_values() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sirish.toml");
    std::fs::write(
        &path,
        "show_banner = true\n[generation]\nsuffix = \"fromfile\"\ncreate_tx = true\n",
    )
    .expect("write config");

    let config = with_env_vars(
        &[
            ("SIRISH_GENERATION__SUFFIX", "fromenv"),
            ("SIRISH_GENERATION__CREATE_TX", "false"),
            ("SIRISH_SHOW_BANNER", "false"),
        ],
        || Config::from_file(&path),
    )
    .expect("load config");

    assert_eq!(config.generation.suffix, "fromenv");
    assert!(!config.generation.create_tx);
    assert!(!config.show_banner);
    assert!(config.generation.format_imports);

    let config = Config::from_file(&path).expect("load config without env");
    assert_eq!(config.generation.suffix, "fromfile");
    assert!(config.generation.create_tx);
}
