use crate::cli::{EmptyOutputPath, OutputFile, Separator};
use sarge::ArgumentType;
use std::path::PathBuf;

#[test]
fn separator_keeps_escapes_verbatim() {
    let parsed = <Separator as ArgumentType>::from_value(Some("\\t"))
        .expect("some")
        .expect("ok");
    assert_eq!(parsed, Separator("\\t".to_string()));
}

#[test]
fn separator_without_value_is_empty_not_default() {
    let parsed = <Separator as ArgumentType>::from_value(None)
        .expect("some")
        .expect("ok");
    assert_eq!(parsed, Separator(String::new()));
}

#[test]
fn output_file_keeps_the_path_as_typed() {
    let parsed = <OutputFile as ArgumentType>::from_value(Some(" out/report.txt "))
        .expect("some")
        .expect("ok");
    assert_eq!(parsed, OutputFile(PathBuf::from(" out/report.txt ")));
}

#[test]
fn output_file_without_a_path_is_rejected() {
    let empty = <OutputFile as ArgumentType>::from_value(Some("")).expect("some");
    assert_eq!(empty, Err(EmptyOutputPath));

    let missing = <OutputFile as ArgumentType>::from_value(None).expect("some");
    assert_eq!(missing, Err(EmptyOutputPath));
}

#[test]
fn absent_flags_have_no_default_value() {
    assert!(<Separator as ArgumentType>::default_value().is_none());
    assert!(<OutputFile as ArgumentType>::default_value().is_none());
}
