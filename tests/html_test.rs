use mail_body_extract::html_to_text;

#[test]
fn test_strips_style_and_script() {
    let html = "<html><head><style>p { color: red; }</style>\
                <script type=\"text/javascript\">track();</script></head>\
                <body><p>Hi</p></body></html>";

    assert_eq!(html_to_text(html), "Hi");
}

#[test]
fn test_line_breaks() {
    assert_eq!(html_to_text("one<br>two<br/>three<BR />four"), "one\ntwo\nthree\nfour");
}

#[test]
fn test_paragraphs_and_divs() {
    assert_eq!(
        html_to_text("<p>First</p><p>Second</p><div>a</div><div>b</div>"),
        "First\n\nSecond\n\na\nb"
    );
}

#[test]
fn test_entities() {
    assert_eq!(
        html_to_text("Tom&nbsp;&amp;&nbsp;Jerry &lt;3 &gt; it&#39;s &quot;ok&quot;"),
        "Tom & Jerry <3 > it's \"ok\""
    );
}

#[test]
fn test_entities_decoded_after_tag_stripping() {
    assert_eq!(html_to_text("&lt;b&gt;not bold&lt;/b&gt;"), "<b>not bold</b>");
}

#[test]
fn test_collapses_blank_lines() {
    let html = "<p>Top</p>\r\n\r\n\r\n<p>Bottom</p>";

    assert_eq!(html_to_text(html), "Top\n\nBottom");
}

#[test]
fn test_plain_text_untouched() {
    assert_eq!(html_to_text("  just text  "), "just text");
}
