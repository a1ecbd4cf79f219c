//! File system walking utilities

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Files larger than this are skipped while walking directories
pub const MAX_WALKED_FILE_SIZE: u64 = 1024 * 1024;

/// Walk a directory and return every regular file worth scanning, sorted.
///
/// `.gitignore`, `.ignore` and global git excludes are honoured. Hidden files
/// are included, the `.git` directory is not.
pub fn walk_directory(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .ignore(true)
        .parents(true)
        .require_git(false)
        .build();

    for entry in walker.flatten() {
        let path = entry.path();

        if path.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };

        if !metadata.is_file() {
            continue;
        }

        if metadata.len() > MAX_WALKED_FILE_SIZE {
            tracing::debug!(path = %path.display(), size = metadata.len(), "Skipping large file");
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_walk_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("app.js"), "console.log(1)").unwrap();
        fs::create_dir(root.join("lib")).unwrap();
        fs::write(root.join("lib/util.py"), "x = 1").unwrap();

        let files = walk_directory(root);

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("app.js")));
        assert!(files.iter().any(|f| f.ends_with("util.py")));
    }

    #[test]
    fn test_walk_respects_gitignore() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join(".gitignore"), "build/\n").unwrap();
        fs::create_dir(root.join("build")).unwrap();
        fs::write(root.join("build/out.js"), "eval(x)").unwrap();
        fs::write(root.join("main.js"), "let a = 1").unwrap();

        let files = walk_directory(root);

        assert!(files.iter().any(|f| f.ends_with("main.js")));
        assert!(!files.iter().any(|f| f.ends_with("out.js")));
    }

    #[test]
    fn test_walk_skips_git_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git/config"), "[core]").unwrap();
        fs::write(root.join("index.php"), "<?php echo 1;").unwrap();

        let files = walk_directory(root);

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("index.php"));
    }
}
