#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use libsnakediff::{
        diff::{Edit, apply_edits, compute_edit_script, edit_distance},
        input_processing::{Granularity, InputProcessor, Token},
        render::TextEdit,
    };
    use pretty_assertions::assert_eq;
    use std::{fs, path::Path, process::Command};
    use test_case::test_case;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// Generate a string representation of an edit script so it can be compared using `insta`.
    fn generate_snapshot_edits_string(edits: &[Edit<'_, char>]) -> String {
        edits
            .iter()
            .map(|edit| {
                if edit.is_deletion() {
                    format!("delete [{}, {})", edit.start.index, edit.end.index)
                } else {
                    let text: String = edit.replacement.iter().collect();
                    format!("insert {:?} at {}", text, edit.start.index)
                }
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    #[test]
    fn test_classic_example_edit_script() {
        let (source, dest) = (chars("ABCABBA"), chars("CBABAC"));
        let edits = compute_edit_script(&source, &dest);
        assert_snapshot!(generate_snapshot_edits_string(&edits), @r#"
        delete [0, 1)
        insert "A" at 1
        insert "C" at 2
        insert "B" at 4
        delete [5, 6)
        "#);
    }

    /// The expected distances are the lengths of the inputs minus twice their longest common
    /// subsequence.
    #[test_case("CBABAC", "ABCABBA", 5 ; "classic example")]
    #[test_case("", "0", 1 ; "insert into empty")]
    #[test_case("1111", "0", 5 ; "nothing in common")]
    #[test_case("AC", "AAC", 1 ; "single insertion")]
    #[test_case("000000000", "0001111", 10 ; "shared prefix")]
    #[test_case("", "", 0 ; "both empty")]
    #[test_case("same", "same", 0 ; "equal inputs")]
    fn test_scenarios(dest: &str, source: &str, distance: usize) {
        let (source, dest) = (chars(source), chars(dest));
        let edits = compute_edit_script(&source, &dest);
        assert_eq!(apply_edits(&dest, &edits), source);
        assert_eq!(edit_distance(&edits), distance);
    }

    #[test_case(Granularity::Char)]
    #[test_case(Granularity::Grapheme)]
    #[test_case(Granularity::Word)]
    #[test_case(Granularity::Line)]
    fn test_token_diff_reconstructs_new_text(granularity: Granularity) {
        let old_text = "fn main() {\n    println!(\"hello\");\n}\n";
        let new_text = "fn main() {\n    let name = \"world\";\n    println!(\"hello {name}\");\n}\n";
        let processor = InputProcessor {
            granularity,
            ..Default::default()
        };
        let old = processor.process(old_text);
        let new = processor.process(new_text);
        let edits = libsnakediff::diff::compute_edit_script_with_newlines(
            &new,
            &old,
            Token::is_newline,
        );

        let rebuilt: String = apply_edits(&old, &edits).iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, new_text);

        // Every edit starts on the line the old text says it does.
        for edit in &edits {
            let prefix: String = old[..edit.start.index].iter().map(|t| t.text).collect();
            assert_eq!(edit.start.line, prefix.matches('\n').count());
            let text_edit = TextEdit::from_edit(edit, &old);
            assert_eq!(text_edit.start, edit.start);
        }
    }

    fn run_cli(old: &Path, new: &Path, extra: &[&str]) -> std::process::Output {
        run_cli_with_env(old, new, extra, &[])
    }

    fn run_cli_with_env(
        old: &Path,
        new: &Path,
        extra: &[&str],
        env: &[(&str, &str)],
    ) -> std::process::Output {
        Command::new(env!("CARGO_BIN_EXE_snakediff"))
            .envs(env.iter().copied())
            .arg("--no-config")
            .args(extra)
            .arg(old)
            .arg(new)
            .output()
            .unwrap()
    }

    #[test]
    fn test_cli_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        let new = dir.path().join("new.txt");
        fs::write(&old, "a\nb\nc\n").unwrap();
        fs::write(&new, "a\nB\nc\n").unwrap();

        let output = run_cli(&old, &new, &["-g", "line", "-r", "json", "--exit-code"]);
        assert_eq!(output.status.code(), Some(1));

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let edits = value["edits"].as_array().unwrap();
        let deleted: String = edits.iter().filter_map(|e| e["deleted"].as_str()).collect();
        let inserted: String = edits.iter().filter_map(|e| e["inserted"].as_str()).collect();
        assert_eq!(deleted, "b\n");
        assert_eq!(inserted, "B\n");
    }

    #[test]
    fn test_cli_env_overrides_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        let new = dir.path().join("new.txt");
        fs::write(&old, "one two").unwrap();
        fs::write(&new, "one too").unwrap();

        let output = run_cli_with_env(
            &old,
            &new,
            &[],
            &[
                ("SNAKEDIFF_FORMATTING__DEFAULT", "json"),
                ("SNAKEDIFF_INPUT_PROCESSING__GRANULARITY", "char"),
            ],
        );
        assert!(output.status.success());

        // Char granularity only touches the differing letter.
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let edits = value["edits"].as_array().unwrap();
        let deleted: String = edits.iter().filter_map(|e| e["deleted"].as_str()).collect();
        let inserted: String = edits.iter().filter_map(|e| e["inserted"].as_str()).collect();
        assert_eq!(deleted, "w");
        assert_eq!(inserted, "o");
    }

    #[test]
    fn test_cli_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        let new = dir.path().join("new.txt");
        fs::write(&old, "same\n").unwrap();
        fs::write(&new, "same\n").unwrap();

        let output = run_cli(&old, &new, &["--exit-code", "--color", "off"]);
        assert_eq!(output.status.code(), Some(0));
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_cli_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        fs::write(&old, "x").unwrap();
        let output = run_cli(&old, &dir.path().join("missing.txt"), &[]);
        assert!(!output.status.success());
    }
}
