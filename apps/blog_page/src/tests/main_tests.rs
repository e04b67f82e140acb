use super::*;

const LAYOUT: &str = include_str!("../../page_layout.toml");

#[test]
fn parses_targets_and_overrides() {
    let args = Args::try_parse_from([
        "blog_page",
        "--layout",
        "site.toml",
        "--posts-url",
        "http://127.0.0.1:9/posts.json",
        "--json",
        "#blog",
        "About",
    ])
    .expect("parse args");

    assert_eq!(args.layout, Some(PathBuf::from("site.toml")));
    assert_eq!(args.posts_url.as_deref(), Some("http://127.0.0.1:9/posts.json"));
    assert!(args.json);
    assert_eq!(args.targets, vec!["#blog", "About"]);
}

#[test]
fn bundled_layout_loads() {
    let layout = PageLayout::from_toml_str(LAYOUT).expect("layout");
    let document = Document::from_layout(&layout).expect("document");
    assert!(document.is_synchronized());
}

#[tokio::test]
async fn text_output_marks_active_and_focused_sections() {
    let layout = PageLayout::from_toml_str(LAYOUT).expect("layout");
    let mut page = Page::new(&layout, Arc::new(page_core::MissingPostSource)).expect("page");
    page.activate_target("about").expect("about");

    let text = render_text(page.document());

    assert!(text.contains("[*] About (#about)"));
    assert!(text.contains("[ ] Home (#home)"));
    assert!(text.contains("* section about (focused)"));
    assert!(text.contains("  section home\n"));
}

#[tokio::test]
async fn json_snapshot_includes_errors() {
    let layout = PageLayout::from_toml_str(LAYOUT).expect("layout");
    let mut page = Page::new(&layout, Arc::new(page_core::MissingPostSource)).expect("page");
    page.activate_target("#blog").expect("blog");
    let errors: Vec<_> = page
        .settle()
        .await
        .iter()
        .filter_map(|outcome| match outcome {
            FeedOutcome::Failed(err) => Some(ErrorReport::from(err)),
            _ => None,
        })
        .collect();

    let value = serde_json::to_value(Snapshot {
        document: page.document(),
        errors,
    })
    .expect("serialize");

    assert_eq!(value["errors"][0]["code"], "fetch_failed");
    assert_eq!(value["document"]["focused"], "blog");
    assert_eq!(value["document"]["sections"][1]["post_list"], serde_json::json!([]));
}
