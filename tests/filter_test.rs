use html_node_filter::filter::{strip_blacklisted, whitelist};
use html_node_filter::outlinks::{effective_base, extract_outlinks, parse_base_url, LinkParams};
use html_node_filter::text::extract_text;
use html_node_filter::{
    dom, filter_html, Directives, MatchPolicy, NodeFilter, Options, ParseRecord, ParseStatus, RuleSet,
};

const BASE: &str = "http://example.com/a/";

const PAGE: &str = r#"
    <html><body>
        <div id="nav"><a href="/home">Home</a> <a href="/about">About</a></div>
        <div id="content">
            <h1 id="title">Big Headline</h1>
            <p>First <a href="one.html">paragraph</a> of the story.</p>
            <div class="ad">Buy <a href="http://ads.example.net/x">now</a></div>
            <p>Second paragraph.</p>
        </div>
        <div class="main">Main column</div>
        <div id="footer">Copyright</div>
    </body></html>
"#;

fn options(mode: &str, list: &str) -> Options {
    Options {
        exclude_mode: Some(mode.to_string()),
        exclude_list: Some(list.to_string()),
        ..Options::default()
    }
}

fn words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

fn is_subsequence(needle: &[&str], haystack: &[&str]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|w| rest.any(|h| h == w))
}

#[test]
fn unconfigured_filter_matches_unfiltered_extraction() {
    let root = dom::parse(PAGE);
    let engine = NodeFilter::new(&Options::default());
    assert!(!engine.is_enabled());

    let result = engine.run(&root, BASE, Directives::default()).expect("expected Ok(_)");

    let base = parse_base_url(BASE).expect("expected Ok(_)");
    let expected_links = extract_outlinks(&effective_base(&root, &base), &root, &LinkParams::default());
    assert_eq!(result.text, extract_text(Some(&root)));
    assert_eq!(result.outlinks, expected_links);
    assert!(result.fields.is_empty());
}

#[test]
fn blacklist_strips_matched_subtree_entirely() {
    let html = r#"<body><div id="Content">Hello <script>x()</script> World</div><p>Tail</p></body>"#;
    let result = filter_html(html, BASE, &options("blacklist", "div;id;content")).expect("expected Ok(_)");

    assert_eq!(result.text, "Tail");
    assert!(!result.text.contains("Hello"));
    assert!(!result.text.contains("World"));
}

#[test]
fn whitelist_keeps_only_matched_text() {
    let html = r#"<body><div class="main">A</div><div class="other">B</div></body>"#;
    let result = filter_html(html, BASE, &options("whitelist", "div;class;main")).expect("expected Ok(_)");

    assert_eq!(result.text, "A");
}

#[test]
fn blacklist_removes_links_of_stripped_content() {
    let result = filter_html(PAGE, BASE, &options("blacklist", "div;id;nav|div;class;ad")).expect("expected Ok(_)");

    let urls: Vec<&str> = result.outlinks.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(urls, vec!["http://example.com/a/one.html"]);
    assert_eq!(
        result.text,
        "Big Headline First paragraph of the story. Second paragraph. Main column Copyright"
    );
}

#[test]
fn whitelist_text_is_subsequence_of_unfiltered_text() {
    let root = dom::parse(PAGE);
    let rules = RuleSet::parse("div;class;ad|h1;id;title|div;id;footer").expect("expected Ok(_)");

    let kept = extract_text(Some(&whitelist(&root, &rules, MatchPolicy::FirstMatch)));
    let full = extract_text(Some(&root));

    assert_eq!(kept, "Big Headline Buy now Copyright");
    assert!(is_subsequence(&words(&kept), &words(&full)));
}

#[test]
fn blacklist_strip_is_idempotent() {
    let root = dom::parse(PAGE);
    let rules = RuleSet::parse("div;id;nav|p;class;none|div;class;ad").expect("expected Ok(_)");

    let mut once = root.clone();
    strip_blacklisted(&mut once, &rules, MatchPolicy::FirstMatch);
    let mut twice = once.clone();
    strip_blacklisted(&mut twice, &rules, MatchPolicy::AllMatches);

    assert_eq!(once, twice);
    assert_ne!(once, root);
}

#[test]
fn matching_is_case_insensitive_but_whole_value() {
    let html = r#"<body><DIV ID="CONTENT">upper</DIV><div class="main wide">partial</div><p>rest</p></body>"#;

    let result = filter_html(html, BASE, &options("blacklist", "div;id;content|div;class;main")).expect("expected Ok(_)");

    assert_eq!(result.text, "partial rest");
}

#[test]
fn select_copy_captures_before_exclusion() {
    let engine = NodeFilter::new(&Options {
        select_copy: Some("h1;id;title".to_string()),
        ..options("blacklist", "div;id;content")
    });
    let root = dom::parse(PAGE);

    let result = engine.run(&root, BASE, Directives::default()).expect("expected Ok(_)");

    assert_eq!(result.fields.get("h1_id_title").map(String::as_str), Some("Big Headline"));
    assert!(!result.text.contains("Big Headline"));
}

#[test]
fn base_tag_overrides_document_base() {
    let html = r#"<html><head><base href="http://other.com/"></head>
        <body><div id="nav">skip</div><a href="x.html">x</a></body></html>"#;

    let result = filter_html(html, BASE, &options("blacklist", "div;id;nav")).expect("expected Ok(_)");

    assert_eq!(result.outlinks.len(), 1);
    assert_eq!(result.outlinks[0].url, "http://other.com/x.html");
}

#[test]
fn malformed_base_url_fails_the_whole_document() {
    let engine = NodeFilter::new(&Options {
        select_copy: Some("h1;id;title".to_string()),
        ..options("blacklist", "div;id;nav")
    });
    let root = dom::parse(PAGE);
    let mut record = ParseRecord::new("http://example.com/a/", "not a url");
    record.text = "parser text".to_string();
    record.parse_meta.insert("charset".to_string(), "utf-8".to_string());

    let out = engine.filter(record, &root, Directives::default());

    assert!(!out.is_success());
    assert!(matches!(out.status, ParseStatus::Failed { ref message } if message.contains("not a url")));
    assert!(out.text.is_empty());
    assert!(out.outlinks.is_empty());
    assert!(out.content_meta.is_empty());
    assert_eq!(out.url, "http://example.com/a/");
}

#[test]
fn filtering_never_modifies_the_input_tree() {
    let root = dom::parse(PAGE);
    let before = root.clone();

    for mode in ["blacklist", "whitelist"] {
        let engine = NodeFilter::new(&Options {
            select_copy: Some("p;class;none".to_string()),
            ..options(mode, "div;id;content|div;class;main")
        });
        let record = ParseRecord::new(BASE, BASE);
        let out = engine.filter(record, &root, Directives::default());
        assert!(out.is_success());
    }

    assert_eq!(root, before);
}

#[test]
fn filter_merges_fields_and_keeps_parser_metadata() {
    let engine = NodeFilter::new(&Options {
        select_copy: Some("h1;id;title".to_string()),
        ..options("whitelist", "div;class;main")
    });
    let root = dom::parse(PAGE);
    let mut record = ParseRecord::new(BASE, BASE);
    record.title = "Page title".to_string();
    record.parse_meta.insert("charset".to_string(), "utf-8".to_string());

    let out = engine.filter(record, &root, Directives::default());

    assert_eq!(out.text, "Main column");
    assert!(out.outlinks.is_empty());
    assert_eq!(out.title, "Page title");
    assert_eq!(out.parse_meta.get("charset").map(String::as_str), Some("utf-8"));
    assert_eq!(out.content_meta.get("h1_id_title").map(String::as_str), Some("Big Headline"));
}

#[test]
fn one_filter_serves_many_threads() {
    let engine = std::sync::Arc::new(NodeFilter::new(&options("blacklist", "div;id;nav")));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || {
                let html = format!(r#"<body><div id="nav">menu</div><p>doc {i}</p></body>"#);
                let root = dom::parse(&html);
                engine.run(&root, BASE, Directives::default()).map(|r| r.text)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let text = handle.join().expect("thread panicked").expect("expected Ok(_)");
        assert_eq!(text, format!("doc {i}"));
    }
}

#[test]
fn matching_folds_non_ascii_attribute_values() {
    let html = r#"<body><div id="über">gone</div><p>kept</p></body>"#;
    let result = filter_html(html, BASE, &options("blacklist", "div;id;ÜBER")).expect("expected Ok(_)");
    assert_eq!(result.text, "kept");

    let selected = filter_html(
        r#"<body><h1 class="Überschrift">Titel</h1></body>"#,
        BASE,
        &Options {
            select_copy: Some("h1;class;überschrift".to_string()),
            ..Options::default()
        },
    )
    .expect("expected Ok(_)");
    assert_eq!(selected.fields.get("h1_class_überschrift").map(String::as_str), Some("Titel"));
}

#[test]
fn script_and_data_urls_are_not_outlinks() {
    let html = r#"<body><div id="nav">menu</div>
        <a href="javascript:void(0)">js</a>
        <img src="data:image/gif;base64,R0lGOD" alt="pixel">
        <a href="story.html">story</a></body>"#;

    let result = filter_html(html, BASE, &options("blacklist", "div;id;nav")).expect("expected Ok(_)");

    let urls: Vec<&str> = result.outlinks.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(urls, vec!["http://example.com/a/story.html"]);
}
