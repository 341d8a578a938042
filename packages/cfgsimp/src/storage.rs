use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::info;

use crate::grammars::ContextFreeGrammar;

pub const OUTPUT_SUFFIX: &str = "_no_epsilon";

/// `dir/name.txt` becomes `dir/name_no_epsilon.txt`, or lands in
/// `output_dir` when one is given.
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "grammar".into(), |s| s.to_string_lossy());
    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Writes `grammar` under a comment header. The file is valid loader input.
pub fn write_grammar(mut writer: impl Write, grammar: &ContextFreeGrammar) -> io::Result<()> {
    writeln!(writer, "# Grammar without ε-productions")?;
    if let Some(start_symbol) = grammar.start_symbol() {
        writeln!(writer, "# Start symbol: {}", start_symbol)?;
    }
    writeln!(writer)?;
    write!(writer, "{}", grammar)?;

    writer.flush()
}

pub fn save_grammar(path: &Path, grammar: &ContextFreeGrammar) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    write_grammar(io::BufWriter::new(fs::File::create(path)?), grammar)?;
    info!("Saved grammar to `{}`", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_grammar;

    #[test]
    fn output_path_keeps_extension() {
        assert_eq!(
            output_path(Path::new("grammars/g1.txt"), None),
            PathBuf::from("grammars/g1_no_epsilon.txt")
        );
        assert_eq!(
            output_path(Path::new("g1"), Some(Path::new("out"))),
            PathBuf::from("out/g1_no_epsilon")
        );
    }

    #[test]
    fn written_grammar_loads_back() {
        let g = parse_grammar("S → aS | ε\nA → b").unwrap();

        let mut buffer = Vec::new();
        write_grammar(&mut buffer, &g).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Grammar without ε-productions\n# Start symbol: S\n\n"));
        assert_eq!(parse_grammar(&text).unwrap(), g);
    }
}
