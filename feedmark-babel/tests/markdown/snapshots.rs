//! Whole-document conversions, pinned as inline snapshots.

use feedmark_babel::html_to_markdown;
use insta::assert_snapshot;

#[test]
fn test_news_article() {
    let html = r#"<p>The <strong>Direct</strong> airs <em>tomorrow</em>&nbsp;at 16:00.</p>
<h2>What to expect</h2>
<ul>
  <li>New <a href="https://news.test/games">games</a></li>
  <li>Release dates</li>
</ul>
<figure><img src="https://news.test/img/direct banner.jpg" alt="Banner [EN]"></figure>
<p>Source: <u>press release</u></p>"#;

    assert_snapshot!(html_to_markdown(html), @r"
    The **Direct** airs *tomorrow* at 16:00.

    ## What to expect

    - New [games](https://news.test/games)
    - Release dates

    ![Banner \[EN\]](https://news.test/img/direct%20banner.jpg)

    Source: press release
    ");
}

#[test]
fn test_code_sample() {
    let html = "<p>Run <code>make_all</code>:</p><pre><code>cargo build --release\n./target/release/app *</code></pre>";

    assert_snapshot!(html_to_markdown(html), @r"
    Run `make_all`:

    ```
    cargo build --release
    ./target/release/app *
    ```
    ");
}

#[test]
fn test_blockquote_and_ordered_list() {
    let html = "<blockquote><p>Quoted</p><p>twice</p></blockquote><ol><li>one</li><li>two</li><li>three</li></ol>";

    assert_snapshot!(html_to_markdown(html), @r"
    > Quoted
    > twice

    1. one
    2. two
    3. three
    ");
}
