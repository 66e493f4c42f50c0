//! Structural checks that the unit test tree mirrors `src/`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Files that organize modules or start a binary carry no logic of their own
    fn is_structural(file_name: &str) -> bool {
        matches!(file_name, "main.rs" | "lib.rs" | "mod.rs")
    }

    /// Module paths like `algorithm::board` for every non-structural `.rs` file
    fn module_paths(root: &Path) -> Result<BTreeSet<String>, io::Error> {
        let mut modules = BTreeSet::new();
        walk(root, &mut Vec::new(), &mut modules)?;
        Ok(modules)
    }

    fn walk(
        dir: &Path,
        prefix: &mut Vec<String>,
        modules: &mut BTreeSet<String>,
    ) -> Result<(), io::Error> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
                continue;
            };

            if path.is_dir() {
                prefix.push(name);
                walk(&path, prefix, modules)?;
                prefix.pop();
            } else if let Some(stem) = name.strip_suffix(".rs") {
                if !is_structural(&name) {
                    let mut segments = prefix.clone();
                    segments.push(stem.to_owned());
                    modules.insert(segments.join("::"));
                }
            }
        }
        Ok(())
    }

    fn unit_file(module: &str) -> String {
        format!("{UNIT_DIR}/{}.rs", module.replace("::", "/"))
    }

    // Tests every source module has a unit test file at the mirrored path
    // Verified by deleting a unit test file
    #[test]
    fn test_all_src_modules_have_unit_tests() {
        let src = module_paths(Path::new(SRC_DIR)).unwrap_or_default();
        let unit = module_paths(Path::new(UNIT_DIR)).unwrap_or_default();
        assert!(!src.is_empty(), "no source modules found under {SRC_DIR}");

        let missing: Vec<_> = src.difference(&unit).map(|m| unit_file(m)).collect();
        assert!(
            missing.is_empty(),
            "Source modules without unit tests:\n  {}",
            missing.join("\n  ")
        );
    }

    // Tests no unit test file outlives the module it covers
    // Verified by adding a unit test file with no source module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = module_paths(Path::new(SRC_DIR)).unwrap_or_default();
        let unit = module_paths(Path::new(UNIT_DIR)).unwrap_or_default();

        let orphaned: Vec<_> = unit.difference(&src).map(|m| unit_file(m)).collect();
        assert!(
            orphaned.is_empty(),
            "Unit test files with no source module:\n  {}",
            orphaned.join("\n  ")
        );
    }

    // Tests each unit test file exercises the module it mirrors
    // Verified by importing a sibling module instead
    #[test]
    fn test_unit_tests_import_their_module() {
        let unit = module_paths(Path::new(UNIT_DIR)).unwrap_or_default();
        let mut unrelated = Vec::new();

        for module in &unit {
            let path = unit_file(module);
            let content = fs::read_to_string(&path).unwrap_or_default();
            let leaf = module.rsplit("::").next().unwrap_or(module);
            if !content.contains(&format!("exitfield::{module}")) && !content.contains(leaf) {
                unrelated.push(path);
            }
        }

        assert!(
            unrelated.is_empty(),
            "Unit test files that never reference their module:\n  {}",
            unrelated.join("\n  ")
        );
    }

    // Tests every test source outside harness entry points defines a test
    // Verified by removing the #[test] attribute from a test function
    #[test]
    fn test_all_test_files_contain_tests() {
        let mut empty = Vec::new();
        collect_files_without_tests(Path::new("tests"), &mut empty).unwrap_or_default();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] functions:\n  {}",
            empty.join("\n  ")
        );
    }

    fn collect_files_without_tests(dir: &Path, empty: &mut Vec<String>) -> Result<(), io::Error> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                collect_files_without_tests(&path, empty)?;
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".rs") || name == "main.rs" || name == "mod.rs" {
                continue;
            }
            if !fs::read_to_string(&path)?.contains("#[test]") {
                empty.push(path.display().to_string());
            }
        }
        Ok(())
    }
}
