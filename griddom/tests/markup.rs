use griddom::{parse_fragment, Content, Element, InlineStyle, MarkupError, Overflow};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_nested_table() {
    let nodes = parse_fragment(
        r#"<table width="100%" border="0"><colgroup><col columnname="a" style="width:80px"></colgroup><tbody></tbody></table>"#,
    )
    .unwrap();

    assert_eq!(nodes.len(), 1);
    let table = &nodes[0];
    assert_eq!(table.tag, "table");
    assert_eq!(table.get_attr("width"), Some("100%"));
    assert_eq!(table.child_elements().len(), 2);

    let col = &table.child_elements()[0].child_elements()[0];
    assert_eq!(col.tag, "col");
    assert_eq!(col.get_attr("columnname"), Some("a"));
    assert_eq!(col.style.width, Some(80));
}

#[test]
fn test_parse_drops_whitespace_between_tags() {
    let nodes = parse_fragment("<tr>\n   <td>1</td>   <td>2</td>\n</tr>").unwrap();
    let tr = &nodes[0];
    assert_eq!(tr.child_elements().len(), 2);
    assert_eq!(tr.text_content(), "12");
}

#[test]
fn test_parse_void_and_self_closing() {
    let nodes = parse_fragment(r#"<col style="width:10px"><col/><td edit-type="text"/>"#).unwrap();
    assert_eq!(nodes.len(), 3);
    assert!(nodes.iter().all(|n| n.child_elements().is_empty()));
    assert_eq!(nodes[2].get_attr("edit-type"), Some("text"));
}

#[test]
fn test_parse_unquoted_and_bare_attributes() {
    let nodes = parse_fragment("<input type=checkbox checked>").unwrap();
    assert_eq!(nodes[0].get_attr("type"), Some("checkbox"));
    assert_eq!(nodes[0].get_attr("checked"), Some(""));
}

#[test]
fn test_parse_entities() {
    let nodes = parse_fragment(r#"<td title="a &quot;b&quot;">x &lt; y &amp;&#39;z&#x41;</td>"#).unwrap();
    assert_eq!(nodes[0].get_attr("title"), Some("a \"b\""));
    assert_eq!(nodes[0].text_content(), "x < y &'zA");
}

#[test]
fn test_parse_id_attribute_becomes_element_id() {
    let nodes = parse_fragment(r#"<tr id="row-7"></tr>"#).unwrap();
    assert_eq!(nodes[0].id, "row-7");
}

#[test]
fn test_parse_skips_comments() {
    let nodes = parse_fragment("<!-- header --><tr></tr>").unwrap();
    assert_eq!(nodes.len(), 1);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        parse_fragment("<tr><td></tr>"),
        Err(MarkupError::MismatchedClose { .. })
    ));
    assert!(matches!(
        parse_fragment("</td>"),
        Err(MarkupError::UnexpectedClose { .. })
    ));
    assert_eq!(
        parse_fragment("<tr><td>"),
        Err(MarkupError::Unclosed("td".to_string()))
    );
    assert!(matches!(
        parse_fragment("<tr class=\"a\""),
        Err(MarkupError::UnterminatedTag(0))
    ));
    assert!(matches!(
        parse_fragment("<!-- open"),
        Err(MarkupError::UnterminatedComment(0))
    ));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_serialize_round_trip_keeps_attribute_order() {
    let markup = r#"<table width="100%" border="0" cellspacing="1"><tbody><tr key="1"><td edit-type="text">a</td></tr></tbody></table>"#;
    let nodes = parse_fragment(markup).unwrap();
    assert_eq!(nodes[0].to_markup(), markup);
}

#[test]
fn test_serialize_omits_generated_ids() {
    let el = Element::div().class("table_container");
    assert_eq!(el.to_markup(), r#"<div class="table_container"></div>"#);
}

#[test]
fn test_serialize_void_has_no_close_tag() {
    let el = Element::new("col").style(InlineStyle::new().width(30));
    assert_eq!(el.to_markup(), r#"<col style="width:30px">"#);
}

#[test]
fn test_serialize_escapes() {
    let el = Element::new("td")
        .attr("title", "\"q\" & <x>")
        .child(Element::text("1 < 2"));
    assert_eq!(
        el.to_markup(),
        r#"<td title="&quot;q&quot; &amp; &lt;x&gt;">1 &lt; 2</td>"#
    );
}

#[test]
fn test_set_inner_markup_replaces_children() {
    let mut el = Element::div().child(Element::new("span"));
    el.set_inner_markup("<table><tbody></tbody></table>").unwrap();
    assert_eq!(el.inner_markup(), "<table><tbody></tbody></table>");
}

#[test]
fn test_set_inner_markup_failure_leaves_element_untouched() {
    let mut el = Element::div().child(Element::new("span"));
    assert!(el.set_inner_markup("<table>").is_err());
    assert_eq!(el.inner_markup(), "<span></span>");
}

#[test]
fn test_set_inner_markup_empty_clears() {
    let mut el = Element::div().child(Element::new("span"));
    el.set_inner_markup("").unwrap();
    assert_eq!(el.content, Content::None);
}

// ============================================================================
// Inline style
// ============================================================================

#[test]
fn test_inline_style_parse_known_and_other() {
    let style = InlineStyle::parse("width: 120px; overflow:hidden; color:red; top:-4px");
    assert_eq!(style.width, Some(120));
    assert_eq!(style.overflow, Some(Overflow::Hidden));
    assert_eq!(style.top, Some(-4));
    assert_eq!(style.other, vec![("color".to_string(), "red".to_string())]);
    assert_eq!(style.to_css(), "width:120px;top:-4px;overflow:hidden;color:red");
}

#[test]
fn test_inline_style_non_pixel_width_is_preserved() {
    let style = InlineStyle::parse("width:100%");
    assert_eq!(style.width, None);
    assert_eq!(style.to_css(), "width:100%");
}

#[test]
fn test_typed_write_shadows_raw_declaration() {
    let mut nodes = parse_fragment(r#"<col style="width:100%;color:red">"#).unwrap();
    let col = &mut nodes[0];
    col.style.width = Some(80);

    assert_eq!(col.to_markup(), r#"<col style="width:80px;color:red">"#);

    col.style.width = None;
    assert_eq!(col.style.to_css(), "width:100%;color:red");
}

#[test]
fn test_inline_style_later_declaration_wins() {
    let style = InlineStyle::parse("width:80px;width:100%");
    assert_eq!(style.width, None);
    assert_eq!(style.to_css(), "width:100%");

    let style = InlineStyle::parse("width:100%;width:80px");
    assert_eq!(style.width, Some(80));
    assert!(style.other.is_empty());
    assert_eq!(style.to_css(), "width:80px");
}
