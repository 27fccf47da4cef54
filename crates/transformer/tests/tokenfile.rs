use anyhow::Result;
use pretty_assertions::assert_eq;

use imt_core::split_token_list;
use imt_transformer::{extract_tokens, make_tokenfile_info, TokenFileOptions, TransformError};

fn code() -> String {
    [
        "var obj = { foo: 1 };",
        "obj[\"bar\"] = 2;",
        "obj.baz = \"message\";",
        "\"/**/var a = { b: 1 }; \"",
        "\"var c = { d: 1 }; \"",
    ]
    .join("\n")
}

fn options(tokens: &[&str], diff: bool) -> TokenFileOptions {
    TokenFileOptions {
        tokens: split_token_list(&tokens.join(",")),
        diff,
        ..Default::default()
    }
}

#[test]
fn extracts_in_first_occurrence_order() -> Result<()> {
    assert_eq!(extract_tokens(&code())?, vec!["foo", "bar", "baz", "a", "b"]);

    Ok(())
}

#[test]
fn sloppy_mode_scripts() -> Result<()> {
    assert_eq!(extract_tokens("with (o) { o.foo = 1; }")?, vec!["foo"]);
    assert_eq!(extract_tokens("var a = 010; o.bar = a;")?, vec!["bar"]);
    assert_eq!(
        extract_tokens("x = \"/**/with (o) { o.baz = 1; }\";")?,
        vec!["o", "baz"]
    );

    Ok(())
}

#[test]
fn destructuring_reads_properties() -> Result<()> {
    assert_eq!(extract_tokens("var { qux } = o;")?, vec!["qux"]);

    Ok(())
}

#[test]
fn whole_keeps_reviewed_lines() -> Result<()> {
    let tokens = ["foo", "#bar", "c # comment", " ", "a"];

    assert_eq!(
        make_tokenfile_info(&code(), &options(&tokens, false))?,
        vec!["#b: length of token is less than 2", "#bar", "a", "baz", "foo"]
    );

    Ok(())
}

#[test]
fn diff_shows_added_and_removed() -> Result<()> {
    let tokens = ["foo", "#bar", "c # comment", " ", "a"];

    assert_eq!(
        make_tokenfile_info(&code(), &options(&tokens, true))?,
        vec!["+ #b: length of token is less than 2", "+ baz", "- c # comment"]
    );

    Ok(())
}

#[test]
fn no_new_tokens_no_diff() -> Result<()> {
    let tokens = ["b", "#bar", "a", "baz", "foo"];

    assert_eq!(
        make_tokenfile_info(&code(), &options(&tokens, true))?,
        Vec::<String>::new()
    );

    Ok(())
}

#[test]
fn merged_file_is_stable() -> Result<()> {
    let first = make_tokenfile_info(&code(), &options(&[], false))?;
    let lines = first.iter().map(String::as_str).collect::<Vec<_>>();

    assert_eq!(make_tokenfile_info(&code(), &options(&lines, false))?, first);
    assert!(make_tokenfile_info(&code(), &options(&lines, true))?.is_empty());

    Ok(())
}

#[test]
fn reserved_names_and_tokenfile() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tokenfile = dir.path().join("tokens.txt");
    std::fs::write(&tokenfile, "foo\r\n#baz: reviewed\r\n")?;

    let lines = make_tokenfile_info(
        "o.foo = o.baz + o.qux + o.length;",
        &TokenFileOptions {
            tokenfile: Some(tokenfile),
            reserved_names: vec!["qux".to_string()],
            ..Default::default()
        },
    )?;

    assert_eq!(
        lines,
        vec![
            "#baz: reviewed",
            "#length: used in array property, string property, function property",
            "#qux: used in custom reserved",
            "foo",
        ]
    );

    Ok(())
}

#[test]
fn missing_tokenfile() {
    let err = make_tokenfile_info(
        "o.foo = 1;",
        &TokenFileOptions {
            tokenfile: Some("/no/such/tokens.txt".into()),
            ..Default::default()
        },
    )
    .unwrap_err();

    assert!(matches!(
        err,
        TransformError::Config(imt_core::Error::MissingFile(_))
    ));
}

#[test]
fn unparsable_program() {
    let err = make_tokenfile_info("var = ;", &TokenFileOptions::default()).unwrap_err();

    assert!(matches!(err, TransformError::Parse { .. }));
}
