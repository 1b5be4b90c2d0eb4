//! Plain-text and title extraction from HTML documents.
//!
//! The extractor is a single left-to-right byte scan rather than a real HTML
//! parser: tags are dropped, `<script>` and `<style>` content is dropped
//! wholesale, and every closed tag contributes one space so adjacent text
//! blocks do not glue together.

/// Extract the visible text of an HTML document.
///
/// Tags, script bodies and style bodies are removed; each `>` emits a single
/// space; runs of ASCII whitespace in the remaining text are collapsed to one
/// space.
pub fn extract_text(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());

    let mut in_tag = false;
    let mut in_script = false;
    let mut in_style = false;

    for (i, &c) in bytes.iter().enumerate() {
        if c == b'<' {
            in_tag = true;

            // Look ahead a few bytes to recognize script/style boundaries.
            let end = (i + 10).min(bytes.len());
            let lower = bytes[i..end].to_ascii_lowercase();

            if lower.starts_with(b"<script") {
                in_script = true;
            } else if lower.starts_with(b"</script") {
                in_script = false;
            } else if lower.starts_with(b"<style") {
                in_style = true;
            } else if lower.starts_with(b"</style") {
                in_style = false;
            }

            continue;
        }

        if c == b'>' {
            in_tag = false;
            out.push(b' ');
            continue;
        }

        if !in_tag && !in_script && !in_style {
            out.push(c);
        }
    }

    // Collapse whitespace runs. Only whole multi-byte characters were dropped
    // above (tag delimiters are ASCII), so the buffer is still valid UTF-8.
    let mut normalized = Vec::with_capacity(out.len());
    let mut last_space = true;
    for &c in &out {
        if c.is_ascii_whitespace() {
            if !last_space {
                normalized.push(b' ');
                last_space = true;
            }
        } else {
            normalized.push(c);
            last_space = false;
        }
    }

    String::from_utf8_lossy(&normalized).into_owned()
}

/// Extract the title of an HTML document.
///
/// Prefers the `<title>` element, with the site-name suffix after `" — "` or
/// `" - "` stripped (e.g. "Моцарт — Википедия" becomes "Моцарт"). Falls back
/// to the first `<h1>` run through [`extract_text`], then to `"Untitled"`.
pub fn extract_title(html: &str) -> String {
    let lower = html.to_ascii_lowercase();

    let open = lower.find("<title>").or_else(|| lower.find("<title "));

    if let Some(open) = open {
        if let Some(gt) = html[open..].find('>') {
            let start = open + gt + 1;
            if let Some(end) = lower[start..].find("</title>") {
                let mut title = &html[start..start + end];

                if let Some(pos) = title.find(" — ") {
                    title = &title[..pos];
                }
                if let Some(pos) = title.find(" - ") {
                    title = &title[..pos];
                }

                return title.to_string();
            }
        }
    }

    if let Some(open) = lower.find("<h1") {
        if let Some(gt) = html[open..].find('>') {
            let start = open + gt + 1;
            if let Some(end) = lower[start..].find("</h1>") {
                return extract_text(&html[start..start + end]);
            }
        }
    }

    "Untitled".to_string()
}
