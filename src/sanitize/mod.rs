/// Strips the markdown fence artifacts models commonly wrap HTML in, then
/// trims. Substring replacement, not a parser: a document that legitimately
/// displays triple backticks loses them too. Accepted heuristic.
pub fn clean(raw: &str) -> String {
    raw.replace("```html", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_html_fence() {
        assert_eq!(clean("```html\n<p>x</p>\n```"), "<p>x</p>");
    }

    #[test]
    fn strips_bare_fences() {
        assert_eq!(clean("```\n<div>hi</div>\n```"), "<div>hi</div>");
    }

    #[test]
    fn unfenced_input_is_only_trimmed() {
        assert_eq!(clean("  <!DOCTYPE html><html></html>\n"), "<!DOCTYPE html><html></html>");
    }

    #[test]
    fn idempotent() {
        let once = clean("```html\n<b>ok</b>\n```");
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn leaves_markup_alone() {
        let doc = "<script>if (a < b) { go(); }</script>";
        assert_eq!(clean(doc), doc);
    }
}
