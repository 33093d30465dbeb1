//! Integration tests for nodecache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Toolchain programs that do not exist, so every probe degrades and
    /// the signature is a stable "; ; "
    const MISSING_TOOLCHAIN: &str = r#"
        [toolchain]
        runtime = "nodecache-test-missing-node"
        package_manager = "nodecache-test-missing-npm"
        alt_package_manager = "nodecache-test-missing-yarn"
    "#;

    struct Workspace {
        temp: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            fs::create_dir_all(temp.path().join("build")).unwrap();
            fs::create_dir_all(temp.path().join("cache")).unwrap();
            fs::write(temp.path().join("config.toml"), MISSING_TOOLCHAIN).unwrap();
            Self { temp }
        }

        fn build(&self) -> PathBuf {
            self.temp.path().join("build")
        }

        fn cache(&self) -> PathBuf {
            self.temp.path().join("cache")
        }

        fn write(&self, path: &Path, content: &str) {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn cmd(&self, sub: &str) -> Command {
            let mut cmd = nodecache();
            cmd.env("NODECACHE_CONFIG", self.temp.path().join("config.toml"))
                .arg(sub)
                .arg("--build-dir")
                .arg(self.build())
                .arg("--cache-dir")
                .arg(self.cache());
            cmd
        }
    }

    fn nodecache() -> Command {
        let mut cmd = cargo_bin_cmd!("nodecache");
        cmd.env_remove("NODE_MODULES_CACHE");
        cmd
    }

    #[test]
    fn help_displays() {
        nodecache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Node.js dependency cache"));
    }

    #[test]
    fn version_displays() {
        nodecache()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("nodecache"));
    }

    #[test]
    fn signature_with_missing_toolchain_degrades() {
        let ws = Workspace::new();
        nodecache()
            .env("NODECACHE_CONFIG", ws.temp.path().join("config.toml"))
            .arg("signature")
            .assert()
            .success()
            .stdout("; ; \n")
            .stderr(predicate::str::contains("version unavailable"));
    }

    #[test]
    fn dirs_defaults_without_package_json() {
        let ws = Workspace::new();
        nodecache()
            .args(["dirs", "--build-dir"])
            .arg(ws.build())
            .assert()
            .success()
            .stdout(predicate::str::contains("3 cacheDirectories (default)"))
            .stdout(predicate::str::contains("bower_components"));
    }

    #[test]
    fn dirs_reads_package_json() {
        let ws = Workspace::new();
        ws.write(
            &ws.build().join("package.json"),
            r#"{"cacheDirectories": ["node_modules"], "cache_directories": ["legacy"]}"#,
        );
        nodecache()
            .args(["dirs", "--format", "json", "--build-dir"])
            .arg(ws.build())
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""source": "package.json""#))
            .stdout(predicate::str::contains("node_modules"))
            .stdout(predicate::str::contains("legacy").not());
    }

    #[test]
    fn save_then_restore_round_trip() {
        let ws = Workspace::new();
        ws.write(&ws.build().join(".npm/_cacache/index"), "npm");

        ws.cmd("save")
            .assert()
            .success()
            .stderr(predicate::str::contains("Saving 3 cacheDirectories (default):"))
            .stderr(predicate::str::contains("- bower_components (nothing to cache)"));

        assert_eq!(
            fs::read_to_string(ws.cache().join("node/signature")).unwrap(),
            "; ; "
        );
        assert!(ws.cache().join("node/.npm/_cacache/index").exists());
        assert!(!ws.build().join(".npm").exists());

        ws.cmd("restore")
            .assert()
            .success()
            .stderr(predicate::str::contains("Loading 3 from cacheDirectories (default):"))
            .stdout(predicate::str::contains("restored 1 of 3 directories"));

        assert!(ws.build().join(".npm/_cacache/index").exists());
    }

    #[test]
    fn restore_without_cache_is_skipped() {
        let ws = Workspace::new();
        ws.cmd("restore")
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Skipping cache restore (new runtime signature)",
            ));
    }

    #[test]
    fn disabled_restore_reports_json() {
        let ws = Workspace::new();
        ws.write(&ws.cache().join("node/signature"), "; ; ");

        ws.cmd("restore")
            .args(["--format", "json"])
            .env("NODE_MODULES_CACHE", "false")
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""status": "disabled""#));
    }

    #[test]
    fn disabled_save_clears_cache() {
        let ws = Workspace::new();
        ws.write(&ws.cache().join("node/signature"), "; ; ");
        ws.write(&ws.build().join(".cache/yarn/v6/pkg"), "yarn");

        ws.cmd("save")
            .env("NODE_MODULES_CACHE", "false")
            .assert()
            .success()
            .stderr(predicate::str::contains("Skipping cache save (disabled by config)"));

        assert!(!ws.cache().join("node").exists());
        assert!(!ws.build().join(".cache/yarn").exists());
    }

    #[test]
    fn status_reports_valid_after_save() {
        let ws = Workspace::new();
        ws.cmd("save").assert().success();
        ws.cmd("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("valid"));
    }

    #[test]
    fn missing_build_dir_fails() {
        let ws = Workspace::new();
        nodecache()
            .env("NODECACHE_CONFIG", ws.temp.path().join("config.toml"))
            .args(["restore", "--build-dir", "/nonexistent/nodecache-build", "--cache-dir"])
            .arg(ws.cache())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path not found"));
    }

    #[test]
    fn missing_explicit_config_fails() {
        nodecache()
            .args(["--config", "/nonexistent/nodecache.toml", "signature"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Configuration file not found"));
    }

    #[test]
    fn slug_removes_package_manager_caches() {
        let ws = Workspace::new();
        ws.write(&ws.build().join(".npm/x"), "x");
        ws.write(&ws.build().join("node_modules/y"), "y");

        nodecache()
            .args(["slug", "--build-dir"])
            .arg(ws.build())
            .assert()
            .success()
            .stdout(predicate::str::contains("removed .npm"));

        assert!(!ws.build().join(".npm").exists());
        assert!(ws.build().join("node_modules/y").exists());
    }
}
