//! HTML for the quiz pages.

use std::fmt::Write;

use crate::quiz::{QuizRound, StatusReport};

const HEAD: &str = r#"<head><meta name="viewport" content="width=device-width, initial-scale=1" />
<style>
body {
    font-family: 'Roboto';
}
pre {
    white-space: pre-wrap;
    font: inherit;
}
.answer {
    color: white;
}
.answer:hover {
    color: blue;
}
</style></head>"#;

pub fn footer() -> &'static str {
    r#"<p><a href="randpoem">Random</a> <a href="list">List All</a></p>"#
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn list(report: &StatusReport) -> String {
    let mut html = format!("<p>Correct: {}/{}</p>", report.correct, report.total);
    for entry in &report.entries {
        let label = if entry.correct { "Correct" } else { "Wrong" };
        let _ = write!(html, r#"<a href="poem?q={i}">{i}</a>: {label}<br>"#, i = entry.index);
    }
    html.push_str(footer());
    html
}

/// The question page. The full poem is hidden until revealed and the answer
/// is drawn in the page colour until hovered.
pub fn poem(round: &QuizRound) -> String {
    let mut html = String::from(HEAD);
    let _ = write!(
        html,
        r#"<a href="{url}">Poem</a>
<button onclick='document.querySelector("div").style.display="block";'>View Whole</button>
<div style="display:none">{body}<hr></div>
<pre>{excerpt}</pre>
<div class="answer">
{title}
</br>
 {author}
</div>
<div><a href="correct?q={i}">Correct</a> <a href="wrong?q={i}">Wrong</a></div>"#,
        url = escape(&round.url),
        body = round.content.body_html,
        excerpt = escape(&round.excerpt),
        title = escape(&round.content.title),
        author = escape(&round.content.author),
        i = round.index,
    );
    html.push_str(footer());
    html
}

pub fn complete() -> String {
    format!("<p>You've answered all of them correctly!</p>{}", footer())
}
