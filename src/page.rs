use regex::RegexBuilder;

/// Appends `fragments` to the end of the element whose id is `container_id`,
/// like `appendChild` would. Returns `None` when the page has no such element.
pub(crate) fn inject(page: &str, container_id: &str, fragments: &[String]) -> Option<String> {
    // the id value may be quoted or bare (`id=post-list`)
    let id = regex::escape(container_id);
    let open = RegexBuilder::new(&format!(
        r#"<([a-z][a-z0-9-]*)\b[^>]*\sid\s*=\s*(?:["']{id}["'][^>]*|{id}(?:\s[^>]*)?)>"#
    ))
    .case_insensitive(true)
    .build()
    .ok()?;
    let caps = open.captures(page)?;
    let open_end = caps.get(0)?.end();
    let tag = &caps[1];

    let insert_at = if caps[0].ends_with("/>") {
        // `<div id="x"/>` has no content to append to
        open_end
    } else {
        open_end + closing_tag_offset(&page[open_end..], tag).unwrap_or(0)
    };

    let mut out =
        String::with_capacity(page.len() + fragments.iter().map(String::len).sum::<usize>());
    out.push_str(&page[..insert_at]);
    for fragment in fragments {
        out.push_str(fragment);
    }
    out.push_str(&page[insert_at..]);
    Some(out)
}

/// Offset of the `</tag>` that closes an element whose content starts `content`.
fn closing_tag_offset(content: &str, tag: &str) -> Option<usize> {
    let tags = RegexBuilder::new(&format!(r"</?{}\b[^>]*>", regex::escape(tag)))
        .case_insensitive(true)
        .build()
        .ok()?;
    let mut depth = 1usize;
    for m in tags.find_iter(content) {
        let s = m.as_str();
        if s.starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return Some(m.start());
            }
        } else if !s.ends_with("/>") {
            depth += 1;
        }
    }
    None
}
