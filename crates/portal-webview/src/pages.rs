//! Inline pages shown while the site loads or after it failed.

/// Spinner shown until the site finishes its first load.
pub fn loading_page() -> String {
    r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Loading</title>
<style>
html,body{height:100%;margin:0;background:#fff;}
body{display:flex;align-items:center;justify-content:center;}
.spinner{width:36px;height:36px;border:4px solid #ddd;border-top-color:#007AFF;border-radius:50%;animation:spin .8s linear infinite;}
@keyframes spin{to{transform:rotate(360deg);}}
</style></head>
<body><div class="spinner" role="progressbar" aria-label="Loading"></div></body></html>"#
        .to_string()
}

/// Static page replacing the whole view after a load failure.
pub fn error_page(description: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Error</title>
<style>
html,body{{height:100%;margin:0;background:#fff;font-family:-apple-system,system-ui,sans-serif;}}
body{{display:flex;align-items:center;justify-content:center;}}
.error{{max-width:32em;padding:24px;text-align:center;color:#333;}}
h1{{font-size:18px;color:#d00;}}
</style></head>
<body><div class="error"><h1>Error loading page</h1><p>{}</p></div></body></html>"#,
        escape_html(description)
    )
}

fn escape_html(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_shows_description() {
        let page = error_page("could not resolve host: example.invalid");
        assert!(page.contains("Error loading page"));
        assert!(page.contains("could not resolve host: example.invalid"));
        assert!(!page.contains("<script"));
    }

    #[test]
    fn error_page_escapes_markup() {
        let page = error_page("<script>alert('x')</script> & more");
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn loading_page_has_spinner() {
        assert!(loading_page().contains("class=\"spinner\""));
    }
}
