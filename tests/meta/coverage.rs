//! Structural checks: unit tests mirror src, every test file tests something, benches are registered

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Relative paths of every directory and `.rs` file below `dir`
    fn rust_tree(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Ok(relative) = path.strip_prefix(base) else {
                return Err(io::Error::other("Entry outside base directory"));
            };
            let relative = relative.to_string_lossy().replace('\\', "/");

            if path.is_dir() {
                found.insert(relative);
                rust_tree(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                found.insert(relative);
            }
        }
        Ok(())
    }

    fn tree_of(root: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let root = Path::new(root);
        if let Err(error) = rust_tree(root, root, &mut found) {
            assert!(!root.exists(), "Failed to scan {}: {error}", root.display());
        }
        found
    }

    fn is_module_glue(path: &str) -> bool {
        path == "main.rs" || path == "lib.rs" || path.ends_with("mod.rs")
    }

    // Tests every source module has a mirrored unit test file
    // Verified by adding an untested module under src
    #[test]
    fn test_src_modules_have_unit_tests() {
        let tests = tree_of("tests/unit");
        let missing: Vec<_> = tree_of("src")
            .into_iter()
            .filter(|path| !is_module_glue(path) && !tests.contains(path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source modules without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives its source module
    // Verified by deleting a source module while keeping its tests
    #[test]
    fn test_unit_tests_have_src_modules() {
        let src = tree_of("src");
        let orphaned: Vec<_> = tree_of("tests/unit")
            .into_iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(path))
            .map(|path| format!("  - tests/unit/{path}"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit tests without a source module:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every test file below tests/ declares at least one test
    // Verified by emptying a unit test file
    #[test]
    fn test_test_files_contain_tests() {
        let empty: Vec<_> = tree_of("tests")
            .into_iter()
            .filter(|path| path.ends_with(".rs") && path != "main.rs" && !path.ends_with("mod.rs"))
            .filter(|path| {
                fs::read_to_string(Path::new("tests").join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(empty.is_empty(), "Test files without tests:\n{}", empty.join("\n"));
    }

    // Tests each bench file has a harness-free entry in the manifest
    // Verified by removing a bench table from Cargo.toml
    #[test]
    fn test_benches_registered() {
        let manifest = fs::read_to_string("Cargo.toml").unwrap();
        for bench in tree_of("benches") {
            let name = bench.trim_end_matches(".rs");
            assert!(
                manifest.contains(&format!("[[bench]]\nname = \"{name}\"\nharness = false")),
                "benches/{bench} is not registered with harness = false"
            );
        }
    }
}
