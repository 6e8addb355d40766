//! edds2png - Command-line tool for converting EDDS textures to PNG.
//!
//! Accepts any mix of `.edds` files and directories; directories are
//! expanded non-recursively. Conversions run sequentially and failures are
//! collected and reported together after every file has been attempted.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

/// Convert EDDS compressed textures to PNG images
#[derive(Parser)]
#[command(name = "edds2png")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// EDDS files and/or directories containing them
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let inputs = collect_inputs(&cli.paths)?;
    if inputs.is_empty() {
        println!("No .edds files to convert");
        return Ok(());
    }

    let mut failures: Vec<(PathBuf, edds_convert::Error)> = Vec::new();
    for input in &inputs {
        match edds_convert::convert_file(input) {
            Ok(output) => println!("{} -> {}", input.display(), output.display()),
            Err(e) => failures.push((input.clone(), e)),
        }
    }

    if !failures.is_empty() {
        eprintln!("\n{} of {} conversions failed:", failures.len(), inputs.len());
        for (path, error) in &failures {
            eprintln!("  {}: {}", path.display(), error);
        }
        anyhow::bail!("{} conversion(s) failed", failures.len());
    }

    Ok(())
}

/// Expand the argument list into the files to convert.
///
/// Directories contribute their `.edds` entries (non-recursive); paths
/// named directly are kept only if they carry the extension themselves.
/// The filter is case-insensitive.
fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && has_edds_extension(p))
                .collect();
            entries.sort();
            inputs.extend(entries);
        } else if has_edds_extension(path) {
            inputs.push(path.clone());
        }
    }

    Ok(inputs)
}

fn has_edds_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("edds"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter_is_case_insensitive() {
        assert!(has_edds_extension(Path::new("a/b/tex.edds")));
        assert!(has_edds_extension(Path::new("tex.EDDS")));
        assert!(has_edds_extension(Path::new("tex.Edds")));
        assert!(!has_edds_extension(Path::new("tex.dds")));
        assert!(!has_edds_extension(Path::new("edds")));
    }

    #[test]
    fn test_directory_expansion_skips_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.edds", "b.EDDS", "c.edds", "d.png", "e.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/nested.edds"), b"x").unwrap();

        let inputs = collect_inputs(&[dir.path().to_path_buf()]).unwrap();

        // Three .edds files, non-recursive, others ignored.
        assert_eq!(inputs.len(), 3);
        assert!(inputs.iter().all(|p| has_edds_extension(p)));
        assert!(inputs.iter().all(|p| p.parent() == Some(dir.path())));
    }

    #[test]
    fn test_direct_file_arguments_filtered() {
        let paths = vec![PathBuf::from("one.edds"), PathBuf::from("two.tga")];
        let inputs = collect_inputs(&paths).unwrap();

        assert_eq!(inputs, vec![PathBuf::from("one.edds")]);
    }
}
