use std::collections::HashSet;

/// Strip question markup down to inline formatting.
///
/// Scripts, event handlers and every attribute are removed; `<code>`, `<em>`
/// and friends survive so questions about code still read correctly.
#[must_use]
pub fn sanitize_markup(html: &str) -> String {
    let tags: HashSet<&str> = [
        "b", "br", "code", "em", "i", "kbd", "pre", "span", "strong", "sub", "sup",
    ]
    .into_iter()
    .collect();

    ammonia::Builder::new()
        .tags(tags)
        .generic_attributes(HashSet::new())
        .clean(html)
        .to_string()
}
