//! The three sample grammars the tool ships with.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{debug, info};

pub const SAMPLES: [(&str, &str); 3] = [
    (
        "grammar1.txt",
        "# Sample grammar 1\n\
         S → 0A0 | 1B1 | BB\n\
         A → C\n\
         B → S | A\n\
         C → S | ε\n",
    ),
    (
        "grammar2.txt",
        "# Sample grammar 2\n\
         S → aAa | bBb | ε\n\
         A → C | a\n\
         B → C | b\n\
         C → CDE | ε\n\
         D → A | B | ab\n",
    ),
    (
        "grammar3.txt",
        "# Sample grammar 3\n\
         S → ASA | aB\n\
         A → B | S\n\
         B → b | ε\n",
    ),
];

/// Writes the samples into `dir`, leaving existing files alone, and returns
/// their paths.
pub fn write_samples(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create `{}`", dir.display()))?;

    let mut paths = Vec::with_capacity(SAMPLES.len());
    for (name, contents) in SAMPLES {
        let path = dir.join(name);
        if path.exists() {
            debug!("Keeping existing `{}`", path.display());
        } else {
            fs::write(&path, contents)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            info!("Created `{}`", path.display());
        }
        paths.push(path);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgsimp::loader::parse_grammar;

    #[test]
    fn samples_are_valid() {
        for (name, contents) in SAMPLES {
            let g = parse_grammar(contents).unwrap_or_else(|e| panic!("{}: {}", name, e));
            assert!(g.eliminate_epsilon_productions().is_ok());
        }
    }

    #[test]
    fn existing_files_are_kept() {
        let dir = std::env::temp_dir().join(format!("cfgsimp-samples-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("grammar1.txt"), "S → a\n").unwrap();

        let paths = write_samples(&dir).unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.exists()));
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "S → a\n");
        assert_eq!(fs::read_to_string(&paths[2]).unwrap(), SAMPLES[2].1);

        fs::remove_dir_all(&dir).unwrap();
    }
}
