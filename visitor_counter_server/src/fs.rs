use std::io::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Recusivly list files in directory
pub fn list_files_recursively(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    let mut traverse = |paths_in: &mut Vec<PathBuf>| -> Result<Vec<PathBuf>> {
        let mut paths_out = vec![];
        for path in paths_in.drain(..) {
            for entry in fs::read_dir(path)? {
                let path = entry?.path();
                if path.is_dir() {
                    paths_out.push(path);
                } else {
                    files.push(path);
                }
            }
        }
        Ok(paths_out)
    };

    let mut paths = vec![path.as_ref().to_path_buf()];
    for _ in 0..256 { // Avoid infinite loop for linked files/dirs
        if paths.is_empty() { break }
        paths = traverse(&mut paths)?;
    }
    files.sort();
    Ok(files)
}

/// Url path ("/a/b.js") of a file relative to the served root.
pub fn route_for(root: impl AsRef<Path>, file: impl AsRef<Path>) -> Option<String> {
    let relative = file.as_ref().strip_prefix(root).ok()?;
    let parts = relative.components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(format!("/{}", parts.join("/")))
}
