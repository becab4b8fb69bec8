/// The single page served by this relay: one text input, one submit control,
/// and the last completion (or error text) rendered below.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>prompt-relay</title>
</head>
<body>
  <h1>prompt-relay</h1>
  <form method="post" action="/">
    <input type="text" name="prompt" size="60" autofocus>
    <button type="submit">Send</button>
  </form>
{RESPONSE}</body>
</html>
"#;

/// Render the page, optionally with a completion (or error text) below the
/// form. The text is escaped before it lands in the HTML.
pub fn render(response: Option<&str>) -> String {
    let slot = match response {
        Some(text) => format!("  <pre>{}</pre>\n", escape_html(text)),
        None => String::new(),
    };
    PAGE_TEMPLATE.replace("{RESPONSE}", &slot)
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
