//! The source sites the quiz knows how to read.
//!
//! Adding a site means adding one `.with(...)` line here.

use super::registry::AdapterRegistry;
use super::rules::{MarkerRule, SelectorRule};

pub const BARTLEBY_START: &str = "<!-- BEGIN CHAPTER -->";
pub const BARTLEBY_END: &str = "<!-- END CHAPTER -->";

/// Registry covering every known source.
pub fn known_sources() -> AdapterRegistry {
    AdapterRegistry::empty()
        .with(
            "www.poetryfoundation.org",
            SelectorRule::new(".poem").strip(r#"[style="display: none;"]"#).inner(),
        )
        .with("www.poemhunter.com", SelectorRule::new(".KonaBody p").inner())
        .with("www.poets.org", SelectorRule::new("pre").author("span.node-title").direct_text())
        .with(
            "www.bartleby.com",
            MarkerRule::new(
                BARTLEBY_START,
                BARTLEBY_END,
                SelectorRule::new("form table > tbody > tr > td > table").nth(4),
            ),
        )
        .with("www.daypoems.net", SelectorRule::new(".poem").strip("h1, h3, b, a"))
        .with("english.emory.edu", SelectorRule::new("td:first-child > p:not(:nth-child(2))").strip("b, a"))
        .with("www.poetry-archive.com", SelectorRule::new("dl").wrap_definitions())
        .with("boppin.com", SelectorRule::new("dl").wrap_definitions().strip("p"))
        .with("www.rc.umd.edu", SelectorRule::new(".node-content p"))
        .with("mural.uv.es", SelectorRule::new("p[align=center]").title("b", 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::dom::Page;
    use crate::extract::rules::PoemParts;

    fn run(host: &str, html: &str) -> PoemParts {
        let registry = known_sources();
        let page = Page::parse(html.as_bytes()).unwrap();
        registry.dispatch(host).unwrap().extract(&page).unwrap()
    }

    #[test]
    fn test_poetryfoundation_strips_hidden() {
        let parts = run(
            "www.poetryfoundation.org",
            r#"<title>Dover Beach by Matthew Arnold</title>
               <div class="poem"><div>The sea is calm tonight.</div><div style="display: none;">share</div><div>The tide is full</div></div>"#,
        );
        assert_eq!(parts.title, "Dover Beach by Matthew Arnold");
        assert_eq!(parts.body_html, "<div>The sea is calm tonight.</div><div>The tide is full</div>");
        assert!(parts.body_text.is_none());
    }

    #[test]
    fn test_poemhunter_first_paragraph_inner() {
        let parts = run(
            "www.poemhunter.com",
            r#"<div class="KonaBody"><p>Because I could not stop<br>for Death</p><p>ad</p></div>"#,
        );
        assert_eq!(parts.body_html, "Because I could not stop<br>for Death");
    }

    #[test]
    fn test_poets_org_direct_text_and_author() {
        let parts = run(
            "www.poets.org",
            "<title>Mending Wall</title><span class=\"node-title\"> Robert Frost </span><span class=\"node-title\">x</span><pre>Something there is\nthat doesn't love a wall</pre>",
        );
        assert_eq!(parts.author, "Robert Frost");
        assert_eq!(parts.body_html, "<pre>Something there is\nthat doesn't love a wall</pre>");
        assert_eq!(parts.body_text.as_deref(), Some("Something there is\nthat doesn't love a wall"));
    }

    #[test]
    fn test_bartleby_markers() {
        let parts = run(
            "www.bartleby.com",
            "<title>Bartleby</title><!-- BEGIN CHAPTER --><tr><td>Hail to thee</td></tr><!-- END CHAPTER -->",
        );
        assert_eq!(parts.body_html, "<table><!-- BEGIN CHAPTER --><tr><td>Hail to thee</td></tr></table>");
    }

    #[test]
    fn test_bartleby_structural_fallback() {
        let nested: String = (0..5)
            .map(|i| format!("<tr><td><table><tbody><tr><td>block {i}</td></tr></tbody></table></td></tr>"))
            .collect();
        let html = format!("<!-- END CHAPTER --><!-- BEGIN CHAPTER --><form><table><tbody>{nested}</tbody></table></form>");

        let parts = run("www.bartleby.com", &html);
        assert!(parts.body_html.starts_with("<table>"));
        assert!(parts.body_html.contains("block 4"));
        assert!(!parts.body_html.contains("block 3"));
    }

    #[test]
    fn test_daypoems_strips_headings_and_links() {
        let parts = run(
            "www.daypoems.net",
            r#"<div class="poem"><h1>Title</h1><h3>Author</h3><b>by</b>Line one<br>Line <a href="/x">two</a></div>"#,
        );
        assert_eq!(parts.body_html, "<div class=\"poem\">Line one<br>Line </div>");
    }

    #[test]
    fn test_emory_skips_second_paragraph() {
        let parts = run(
            "english.emory.edu",
            "<table><tr><td><p>First <b>stanza</b> <a href=\"n\">note</a></p><p>Second</p></td><td><p>Other column</p></td></tr></table>",
        );
        assert_eq!(parts.body_html, "<p>First  </p>");
    }

    #[test]
    fn test_poetry_archive_wraps_definitions() {
        let parts = run("www.poetry-archive.com", "<dl><dt>Line one</dt><dd>Line two</dd></dl>");
        assert_eq!(parts.body_html, "<dl><div><dt>Line one</dt></div><div><dd>Line two</dd></div></dl>");
    }

    #[test]
    fn test_boppin_strips_paragraphs() {
        let parts = run("boppin.com", "<dl><dt>Line one</dt><dd>Line two<p>footer</p></dd></dl>");
        assert!(!parts.body_html.contains("footer"));
        assert!(parts.body_html.contains("<div><dt>Line one</dt></div>"));
    }

    #[test]
    fn test_rc_umd_first_node_paragraph() {
        let parts = run(
            "www.rc.umd.edu",
            r#"<div class="node-content"><p>It is an ancient Mariner</p><p>second</p></div>"#,
        );
        assert_eq!(parts.body_html, "<p>It is an ancient Mariner</p>");
    }

    #[test]
    fn test_mural_title_from_third_bold() {
        let parts = run(
            "mural.uv.es",
            r#"<title>page</title><b>a</b><b>b</b><b>Kubla Khan</b><p>intro</p><p align="center">In Xanadu did Kubla Khan</p>"#,
        );
        assert_eq!(parts.title, "Kubla Khan");
        assert_eq!(parts.body_html, "<p align=\"center\">In Xanadu did Kubla Khan</p>");
    }

    #[test]
    fn test_mural_title_missing_is_empty() {
        let parts = run("mural.uv.es", r#"<p align="center">In Xanadu</p>"#);
        assert_eq!(parts.title, "");
    }
}
