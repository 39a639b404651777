//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Source tree of the `chibios-demo` fixture
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Copies a fixture into a fresh temporary directory so tests can write
/// generated configs next to the template
pub fn copy_fixture(name: &str) -> TempDir {
    let source = fixture_path(name);
    let dir = TempDir::new().expect("Failed to create temp dir");

    for entry in WalkDir::new(&source) {
        let entry = entry.expect("Failed to walk fixture");
        let relative = entry
            .path()
            .strip_prefix(&source)
            .expect("Fixture entry outside fixture root");
        let target = dir.path().join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).expect("Failed to create fixture directory");
        } else {
            fs::copy(entry.path(), &target).expect("Failed to copy fixture file");
        }
    }

    dir
}

/// Entries the demo platform resolves to, mandatory directories included
#[allow(dead_code)]
pub fn expected_demo_entries(root: &Path) -> Vec<String> {
    [
        "os/hal/ports/common/ARMCMx/nvic.c",
        "os/hal/ports/DEMO/hal_lld.c",
        "os/hal/ports/DEMO/hal_st_lld.c",
        "os/hal/ports/common/ARMCMx",
        "os/hal/ports/DEMO",
        "os/hal/ports/DEMO/LLD/GPIOv1/hal_pal_lld.c",
        "os/hal/ports/DEMO/LLD/GPIOv1",
        "os/hal/ports/common/fallback/hal_wdg_lld.c",
        "os/hal/dox",
        "os/hal/src",
        "os/hal/include",
        "os/hal/lib/peripherals/flash",
        "os/hal/lib/peripherals/sensors",
    ]
    .iter()
    .map(|entry| format!("{}/{}", root.display(), entry))
    .collect()
}
