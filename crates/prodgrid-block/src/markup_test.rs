use super::*;

const AUTHORED: &str = r#"
<div class="product-list block" data-cq-tags="red, blue" data-block-status="loaded">
  <div>
    <div>Folder</div>
    <div><p><a href="https://publish.example.com/content/dam/luma3/men.html">/content/dam/luma3/men</a></p></div>
  </div>
  <div>
    <div><p>Tags</p></div>
    <div><p>red</p><p> blue </p></div>
  </div>
  <div>
    <div>Heading  Text</div>
    <div>Shop &amp; Save</div>
  </div>
  <div><div>orphan</div></div>
</div>
"#;

fn authored() -> AuthoredBlock {
    AuthoredBlock::from_block(&parse_block(AUTHORED))
}

#[test]
fn parse_block_reads_container_attributes() {
    let block = parse_block(AUTHORED);
    assert_eq!(
        block.attrs().first(),
        Some(&("class".to_owned(), "product-list block".to_owned()))
    );
    assert!(block.inner_html().starts_with("<div>"));
    assert!(block.inner_html().ends_with("</div>"));
}

#[test]
fn parse_block_wraps_bare_fragments() {
    let block = parse_block("<div><div>a</div></div><div><div>b</div></div>");
    assert!(block.attrs().is_empty());
    assert_eq!(
        block.inner_html(),
        "<div><div>a</div></div><div><div>b</div></div>"
    );
}

#[test]
fn parse_block_wraps_plain_text() {
    let block = parse_block("  /content/cat/shirts ");
    assert_eq!(block.inner_html(), "/content/cat/shirts");
}

#[test]
fn first_anchor_reads_href_and_text() {
    let anchor = authored().first_anchor().unwrap();
    assert_eq!(
        anchor.href,
        "https://publish.example.com/content/dam/luma3/men.html"
    );
    assert_eq!(anchor.text, "/content/dam/luma3/men");
}

#[test]
fn first_anchor_without_href_has_empty_href() {
    let block = AuthoredBlock::new(vec![], "<a> <span>/content/cat</span> </a>");
    let anchor = block.first_anchor().unwrap();
    assert_eq!(anchor.href, "");
    assert_eq!(anchor.text, "/content/cat");
}

#[test]
fn first_anchor_absent() {
    assert!(AuthoredBlock::new(vec![], "<p>no links</p>")
        .first_anchor()
        .is_none());
}

#[test]
fn dataset_uses_camel_case_keys() {
    let dataset = authored().dataset();
    assert_eq!(dataset.get("cqTags").map(String::as_str), Some("red, blue"));
    assert_eq!(
        dataset.get("blockStatus").map(String::as_str),
        Some("loaded")
    );
    assert!(!dataset.contains_key("class"));
}

#[test]
fn read_block_config_prefers_link_targets() {
    let config = authored().read_block_config();
    assert_eq!(
        config.get("folder"),
        Some(&ConfigValue::Single(
            "https://publish.example.com/content/dam/luma3/men.html".to_owned()
        ))
    );
}

#[test]
fn read_block_config_splits_paragraphs_into_list() {
    let config = authored().read_block_config();
    assert_eq!(
        config.get("tags"),
        Some(&ConfigValue::List(vec!["red".to_owned(), "blue".to_owned()]))
    );
}

#[test]
fn read_block_config_normalizes_keys_and_decodes_text() {
    let config = authored().read_block_config();
    assert_eq!(
        config.get("heading-text"),
        Some(&ConfigValue::Single("Shop & Save".to_owned()))
    );
}

#[test]
fn read_block_config_skips_single_cell_rows() {
    let config = authored().read_block_config();
    assert!(!config.contains_key("orphan"));
    assert_eq!(config.len(), 3);
}

#[test]
fn read_block_config_keeps_colon_keys() {
    let block = AuthoredBlock::new(vec![], "<div><div>cq:tags</div><div>luma:men</div></div>");
    assert_eq!(
        block.read_block_config().get("cq:tags").and_then(ConfigValue::first),
        Some("luma:men")
    );
}

#[test]
fn read_block_config_lists_multiple_links() {
    let block = AuthoredBlock::new(
        vec![],
        r#"<div><div>Reference</div><div><a href="/a">a</a> <a href="/b">b</a></div></div>"#,
    );
    assert_eq!(
        block.read_block_config().get("reference"),
        Some(&ConfigValue::List(vec!["/a".to_owned(), "/b".to_owned()]))
    );
}

#[test]
fn find_blocks_returns_matching_blocks_in_order() {
    let page = r#"
        <main>
          <div class="section">
            <div class="product-list"><div><div>folder</div><div>/content/a</div></div></div>
            <div class="columns"><div>x</div></div>
            <div class="product-list block" data-cq-tags="red"><div><div>folder</div><div>/content/b</div></div></div>
          </div>
        </main>
    "#;
    let blocks = find_blocks(page, "product-list");
    assert_eq!(blocks.len(), 2);
    let folders: Vec<_> = blocks
        .iter()
        .map(|b| {
            AuthoredBlock::from_block(b)
                .read_block_config()
                .get("folder")
                .and_then(ConfigValue::first)
                .map(str::to_owned)
        })
        .collect();
    assert_eq!(
        folders,
        vec![Some("/content/a".to_owned()), Some("/content/b".to_owned())]
    );
    assert_eq!(
        AuthoredBlock::from_block(&blocks[1])
            .dataset()
            .get("cqTags")
            .map(String::as_str),
        Some("red")
    );
}

#[test]
fn find_blocks_ignores_class_prefixes() {
    let page = r#"<div class="product-list-wrapper"><div class="product-list-item">x</div></div>"#;
    assert!(find_blocks(page, "product-list").is_empty());
}

#[test]
fn find_blocks_stops_at_unterminated_block() {
    let page = r#"<div class="product-list"><div><div>folder</div>"#;
    assert!(find_blocks(page, "product-list").is_empty());
}

#[test]
fn text_content_collapses_whitespace_and_decodes() {
    assert_eq!(
        text_content("<p>  Tom &amp;\n <b>Jerry</b>&nbsp;</p>"),
        "Tom & Jerry"
    );
}

#[test]
fn parse_attrs_handles_quote_styles() {
    let attrs = parse_attrs(r#" href="/a" title='t &amp; u' data-x=plain hidden"#);
    assert_eq!(
        attrs,
        vec![
            ("href".to_owned(), "/a".to_owned()),
            ("title".to_owned(), "t & u".to_owned()),
            ("data-x".to_owned(), "plain".to_owned()),
            ("hidden".to_owned(), String::new()),
        ]
    );
}

#[test]
fn child_divs_returns_inner_markup_of_top_level_children() {
    let html = r#"<div><div>a</div><div>b</div></div> text <div class="x">c</div>"#;
    assert_eq!(child_divs(html), vec!["<div>a</div><div>b</div>", "c"]);
}
