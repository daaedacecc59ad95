//! Tests for [`Parser`], [`convert`] and [`inject_lines`].

use rstest::rstest;
use slim_lint_core::Position;

use super::{find_all, parse, tag};
use crate::{ErrorKind, Node, Parser, ParserOptions, Sexp, Shortcut};

fn parse_error(source: &str) -> crate::SyntaxError {
    Parser::new(ParserOptions::default())
        .expect("default options are valid")
        .parse(source)
        .expect_err("template should be rejected")
}

fn assert_lines_never_decrease(sexp: &Sexp) {
    let mut previous = 0;
    for child in sexp {
        let line = child.line();
        assert!(line >= 1, "line must be positive in {sexp}");
        assert!(line >= previous, "line went backwards in {sexp}");
        previous = line;
        if let Some(nested) = child.as_sexp() {
            assert_lines_never_decrease(nested);
        }
    }
}

#[test]
fn inline_text_tag_has_canonical_shape() {
    let tree = parse("p Hello");
    assert_eq!(
        tree.to_string(),
        r#"[:multi, [:html, :tag, "p", [:html, :attrs], [:slim, :text, :inline, [:multi, [:slim, :interpolate, "Hello"]]]], [:newline]]"#
    );
}

#[test]
fn every_physical_line_gets_one_marker() {
    let source = "doctype html\nhtml\n  head\n\n  body\n    p Hi\n    / gone\n      still gone\n";
    let tree = parse(source);
    let markers = find_all(&tree, &Sexp::is_newline);
    assert_eq!(markers.len(), 8);
    assert_lines_never_decrease(&tree);
    assert_eq!(tag(&tree, "body").line(), 5);
    assert_eq!(tag(&tree, "p").line(), 6);
}

#[test]
fn nested_tags_record_their_spans() {
    let tree = parse("div\n  span.note Hi");
    let span = tag(&tree, "span");
    assert_eq!(span.start(), Position::new(2, 3));
    assert_eq!(span.line(), 2);
    let name = span.atom_at(2).expect("tag name atom");
    assert_eq!(name.start(), Position::new(2, 3));
    assert_eq!(name.finish(), Position::new(2, 7));
}

#[test]
fn shortcuts_expand_to_static_attributes() {
    let tree = parse(".note#main");
    let div = tag(&tree, "div");
    let attrs = div.sexp_at(3).expect("attribute list");
    assert_eq!(
        attrs.to_string(),
        r#"[:html, :attrs, [:html, :attr, "class", [:static, "note"]], [:html, :attr, "id", [:static, "main"]]]"#
    );
}

#[test]
fn custom_shortcut_can_set_tag_and_attribute() {
    let options = ParserOptions::default().with_shortcut("@", Shortcut::tag("input").with_attr("role"));
    let raw = Parser::new(options)
        .expect("valid options")
        .parse("@search")
        .expect("template parses");
    let tree = crate::convert(&raw);
    let input = tag(&tree, "input");
    assert_eq!(
        input.sexp_at(3).map(ToString::to_string).as_deref(),
        Some(r#"[:html, :attrs, [:html, :attr, "role", [:static, "search"]]]"#)
    );
}

#[test]
fn delimited_attributes_cover_every_value_kind() {
    let tree = parse(r#"a(href="/home" data=user.id checked) Home"#);
    let attrs = tag(&tree, "a").sexp_at(3).expect("attribute list");
    assert_eq!(
        attrs.to_string(),
        concat!(
            r#"[:html, :attrs, "#,
            r#"[:html, :attr, "href", [:escape, true, [:slim, :interpolate, "/home"]]], "#,
            r#"[:html, :attr, "data", [:slim, :attrvalue, true, "user.id"]], "#,
            r#"[:html, :attr, "checked", [:multi]]]"#
        )
    );
}

#[test]
fn code_attributes_respect_nested_brackets() {
    let tree = parse("a(href=url_for(page, [1, 2]) title=t(:x)) Go");
    let values = find_all(&tree, &|sexp| sexp.is(&["slim", "attrvalue"]));
    let codes: Vec<&str> = values.iter().filter_map(|sexp| sexp.str_at(3)).collect();
    assert_eq!(codes, vec!["url_for(page, [1, 2])", "t(:x)"]);
}

#[test]
fn attribute_lists_may_span_lines() {
    let tree = parse("a(href=\"/\"\n  title=\"x\")\np");
    assert_eq!(find_all(&tree, &Sexp::is_newline).len(), 3);
    assert_eq!(tag(&tree, "p").line(), 3);
}

#[test]
fn broken_lines_keep_line_numbers() {
    let tree = parse("= link_to 'x',\n    path\np");
    let output = find_all(&tree, &|sexp| sexp.is(&["slim", "output"]))
        .into_iter()
        .next()
        .expect("output statement");
    assert_eq!(output.str_at(3), Some("link_to 'x',\npath"));
    assert_eq!(output.bool_at(2), Some(true));
    assert_eq!(tag(&tree, "p").line(), 3);
}

#[test]
fn text_block_continuations_are_separated_at_line_ends() {
    let tree = parse("p\n  | Hello\n    World");
    let pieces = find_all(&tree, &|sexp| sexp.is(&["slim", "interpolate"]));
    let texts: Vec<&str> = pieces.iter().filter_map(|sexp| sexp.str_at(2)).collect();
    assert_eq!(texts, vec!["Hello", "\n", "World"]);
    assert_eq!(pieces.first().map(|sexp| sexp.start()), Some(Position::new(2, 5)));
    assert_eq!(pieces.get(1).map(|sexp| sexp.start()), Some(Position::new(2, 10)));
    assert_eq!(pieces.get(2).map(|sexp| sexp.start()), Some(Position::new(3, 5)));
}

#[test]
fn tabs_expand_to_the_configured_width() {
    let tree = parse("div\n\tp\n    span");
    let div = tag(&tree, "div");
    let nested = find_all(div, &|sexp| sexp.is(&["html", "tag"]));
    assert_eq!(nested.len(), 3);
}

#[rstest]
#[case("ul\n  \tli\n    li")]
#[case("ul\n \tli\n\tli")]
#[case("ul\n\tli\n   \tli")]
fn tabs_after_spaces_round_up_to_the_next_stop(#[case] source: &str) {
    let tree = parse(source);
    let list = tag(&tree, "ul");
    let items = find_all(list, &|sexp| sexp.is(&["html", "tag"]) && sexp.str_at(2) == Some("li"));
    assert_eq!(items.len(), 2);
}

#[test]
fn tab_stops_do_not_match_narrower_space_indents() {
    let error = parse_error("ul\n  \tli\n   li");
    assert_eq!(error.kind(), &ErrorKind::MalformedIndentation);
    assert_eq!(error.line(), 3);
}

#[test]
fn byte_order_mark_and_crlf_are_accepted() {
    let tree = parse("\u{feff}p\r\nspan\r\n");
    assert_eq!(tag(&tree, "p").start(), Position::new(1, 1));
    assert_eq!(tag(&tree, "span").line(), 2);
}

#[test]
fn embedded_engine_keeps_its_text() {
    let tree = parse("javascript:\n  alert(1)\np");
    let embedded = find_all(&tree, &|sexp| sexp.is(&["slim", "embedded"]))
        .into_iter()
        .next()
        .expect("embedded block");
    assert_eq!(embedded.str_at(2), Some("javascript"));
    assert!(embedded.sexp_at(4).is_some_and(|attrs| attrs.is(&["html", "attrs"])));
    assert_eq!(tag(&tree, "p").line(), 3);
}

#[test]
fn block_expansion_nests_inline() {
    let tree = parse("ul: li Item");
    let ul = tag(&tree, "ul");
    assert_eq!(find_all(ul, &|sexp| sexp.is(&["html", "tag"])).len(), 2);
}

#[test]
fn output_modifiers_add_spaces() {
    let tree = parse("=> name");
    let statics = find_all(&tree, &Sexp::is_static);
    assert_eq!(statics.len(), 1);
}

#[test]
fn doctype_and_comments_have_dedicated_nodes() {
    let tree = parse("doctype html\n/! note\n/[if IE]\n  p");
    assert!(!find_all(&tree, &|sexp| sexp.is(&["html", "doctype"])).is_empty());
    assert!(!find_all(&tree, &|sexp| sexp.is(&["html", "comment"])).is_empty());
    let condition = find_all(&tree, &|sexp| sexp.is(&["html", "condcomment"]));
    assert_eq!(condition.first().and_then(|sexp| sexp.str_at(2)), Some("if IE"));
}

#[test]
fn conversion_extends_lists_over_their_children() {
    let tree = parse("div\n  p\n    span");
    let div = tag(&tree, "div");
    assert_eq!(div.finish().line, 3);
    assert!(tree.iter().all(|node| match node {
        Node::Sexp(sexp) => sexp.finish() >= sexp.start(),
        Node::Atom(atom) => atom.finish() >= atom.start(),
    }));
}

#[rstest]
#[case::malformed("div\n  p\n    span\n a", ErrorKind::MalformedIndentation, 4)]
#[case::unexpected("doctype html\n  p", ErrorKind::UnexpectedIndentation, 2)]
#[case::unknown("?oops", ErrorKind::UnknownLineIndicator, 1)]
#[case::closed("img/ text", ErrorKind::TextAfterClosedTag, 1)]
#[case::empty_attribute("a(href=)", ErrorKind::EmptyAttribute, 1)]
#[case::unclosed_list("a(href=\"x\"", ErrorKind::ExpectedClosingDelimiter(')'), 1)]
#[case::unclosed_quote("a(href=\"x)", ErrorKind::ExpectedClosingQuote('"'), 1)]
#[case::block_expansion("ul: | text", ErrorKind::ExpectedTag, 1)]
fn syntax_errors_report_kind_and_line(
    #[case] source: &str,
    #[case] kind: ErrorKind,
    #[case] line: u32,
) {
    let error = parse_error(source);
    assert_eq!(error.kind(), &kind);
    assert_eq!(error.line(), line);
    assert!(error.file().is_none());
}

#[test]
fn syntax_error_display_names_the_file() {
    let error = parse_error("?oops").with_file("views/index.slim");
    let message = error.to_string();
    assert!(message.contains("views/index.slim"), "{message}");
    assert!(message.contains("line 1"), "{message}");
    assert_eq!(error.source_line(), "?oops");
}

#[test]
fn invalid_shortcut_options_are_rejected() {
    let options = ParserOptions::default().with_shortcut("", Shortcut::attr("x"));
    assert!(Parser::new(options).is_err());
}
