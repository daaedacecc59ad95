//! Tests for [`Document`] and front-matter stripping.

use rstest::{fixture, rstest};

use crate::{Document, Engine, ErrorKind, ParserOptions, strip_front_matter};

#[fixture]
fn engine() -> Engine {
    Engine::new(ParserOptions::default()).expect("default options are valid")
}

#[rstest]
#[case::dashes("---\ntitle: Home\n---\np Hi", "\n\n\np Hi")]
#[case::dots("---\ntitle: Home\n...\np Hi", "\n\n\np Hi")]
#[case::empty_block("---\n---\np", "\n\np")]
#[case::crlf("---\r\na: 1\r\n---\r\np", "\n\n\np")]
#[case::not_leading("p\n---\na: 1\n---\n", "p\n---\na: 1\n---\n")]
#[case::unterminated("---\ntitle: Home\np Hi", "---\ntitle: Home\np Hi")]
fn front_matter_is_blanked(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(strip_front_matter(source), expected);
}

#[rstest]
fn stripped_documents_keep_line_numbers(engine: Engine) {
    let document = Document::new(&engine, "page.slim", "---\nlayout: a\n---\nbr", true)
        .expect("template parses");
    assert_eq!(document.source_lines().len(), 4);
    assert_eq!(document.source_line(4), Some("br"));
    assert_eq!(document.source_line(0), None);
    assert_eq!(document.source_line(5), None);
    let tag = document
        .tree()
        .iter()
        .filter_map(|node| node.as_sexp())
        .find(|sexp| sexp.is(&["html", "tag"]))
        .expect("br tag");
    assert_eq!(tag.line(), 4);
}

#[rstest]
fn front_matter_is_kept_unless_requested(engine: Engine) {
    let document = Document::new(&engine, "page.slim", "p ---", false).expect("template parses");
    assert_eq!(document.source(), "p ---");
    assert_eq!(document.file(), "page.slim");
}

#[rstest]
fn syntax_errors_name_the_file(engine: Engine) {
    let error = Document::new(&engine, "broken.slim", "?oops", false)
        .expect_err("template is rejected");
    assert_eq!(error.kind(), &ErrorKind::UnknownLineIndicator);
    assert_eq!(error.file(), Some("broken.slim"));
}
