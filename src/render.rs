//! Static HTML pages for the library site.
//!
//! `review_html` comes straight from the feeds and is written unescaped. The
//! feeds are our own accounts and are treated as trusted markup.

use crate::feed::types::{Entry, Source};
use std::fmt::Write;

/// Everything about a page that is not an entry.
#[derive(Debug, Clone)]
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub library_name: &'a str,
    pub stylesheet: &'a str,
}

impl<'a> PageMeta<'a> {
    pub fn for_source(source: Source, library_name: &'a str) -> Self {
        let title = source.page_title();
        Self {
            title,
            library_name,
            stylesheet: stylesheet_for(title),
        }
    }
}

/// Films get their own stylesheet; every other page shares the books one.
pub fn stylesheet_for(title: &str) -> &'static str {
    if title.eq_ignore_ascii_case("films") {
        "css/films.css"
    } else {
        "css/books.css"
    }
}

/// Render `entries` in the order given. `generated` is shown verbatim.
pub fn render_page(page: &PageMeta<'_>, entries: &[Entry], generated: &str) -> String {
    let mut out = String::new();
    // writes into a String cannot fail
    let _ = write!(
        out,
        r#"<!doctype html>
<html>
<head>
  <meta charset="UTF-8">
  <title>{title} • {library}</title>
  <link rel="stylesheet" href="{css}">
</head>
<body>
  <a href="index.html" class="back-home-btn">← Back to Home</a>
  <h1>{title}</h1>
  <p>Generated {generated}</p>
"#,
        title = page.title,
        library = page.library_name,
        css = page.stylesheet,
        generated = generated,
    );

    for entry in entries {
        render_entry(&mut out, entry);
    }

    out.push_str("</body>\n</html>");
    out
}

fn render_entry(out: &mut String, entry: &Entry) {
    out.push_str("<div class=\"entry\">\n");
    if entry.link.is_empty() {
        let _ = writeln!(out, "<h2>{}</h2>", entry.title);
    } else {
        let _ = writeln!(out, "<h2><a href=\"{}\">{}</a></h2>", entry.link, entry.title);
    }

    if let Some(stars) = entry.rating_stars.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "<p class=\"rating\">{}</p>", stars);
    }
    if !entry.review_html.is_empty() {
        let _ = writeln!(out, "<p class=\"review\">{}</p>", entry.review_html);
    }

    out.push_str("</div>\n<hr>\n");
}
