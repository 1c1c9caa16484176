//! Tests for shared/local option resolution.

use std::path::Path;

use crate::config::{LineOptions, OutputConfig, resolve};

fn shared() -> LineOptions {
    LineOptions::new()
        .with_sep("|")
        .with_output_file("shared.txt")
}

#[test]
fn untouched_local_scope_defers_to_shared() {
    let config = resolve(&shared(), &LineOptions::new());
    assert_eq!(config.separator(), "|");
    assert_eq!(config.output_file(), Some(Path::new("shared.txt")));
}

#[test]
fn local_sep_override_takes_whole_local_scope() {
    let local = LineOptions::new().with_sep(",");
    let config = resolve(&shared(), &local);
    assert_eq!(config.separator(), ",");
    // The shared output file must not leak into the local winner.
    assert_eq!(config.output_file(), None);
    assert!(config.is_stdout());
}

#[test]
fn local_output_file_override_takes_whole_local_scope() {
    let local = LineOptions::new().with_output_file("local.txt");
    let config = resolve(&shared(), &local);
    assert_eq!(config.output_file(), Some(Path::new("local.txt")));
    // Local sep is still its default, unescaped to a newline.
    assert_eq!(config.separator(), "\n");
}

#[test]
fn precedence_never_mixes_fields() {
    for (sep_set, out_set) in [(false, false), (true, false), (false, true), (true, true)] {
        let mut local = LineOptions::new();
        if sep_set {
            local = local.with_sep(";");
        }
        if out_set {
            local = local.with_output_file("local.txt");
        }

        let config = resolve(&shared(), &local);
        let expected = if sep_set || out_set {
            OutputConfig::new(
                if sep_set { ";" } else { "\n" },
                out_set.then(|| "local.txt".into()),
            )
        } else {
            OutputConfig::new("|", Some("shared.txt".into()))
        };
        assert_eq!(config, expected, "sep_set={sep_set}, out_set={out_set}");
    }
}

#[test]
fn both_scopes_default_resolves_to_newline_on_stdout() {
    let config = resolve(&LineOptions::new(), &LineOptions::new());
    assert_eq!(config.separator(), "\n");
    assert!(config.is_stdout());
}

#[test]
fn winning_separator_is_unescaped() {
    let local = LineOptions::new().with_sep("\\t");
    assert_eq!(resolve(&LineOptions::new(), &local).separator(), "\t");

    let shared = LineOptions::new().with_sep("\\x2c ");
    assert_eq!(resolve(&shared, &LineOptions::new()).separator(), ", ");
}
