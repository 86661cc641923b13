use persona_core::{KnowledgeBase, MatchResult};

use crate::output::decision_label;

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;display:flex;color:#222}\
aside{width:16rem;padding:1.5rem;background:#f4f5f7;min-height:100vh}\
main{flex:1;max-width:46rem;margin:0 auto;padding:1.5rem}\
h1,.tagline,footer{text-align:center}\
.welcome{background:#e6f4ea;padding:.75rem;border-radius:.4rem}\
.warning{background:#fff4e5;padding:.75rem;border-radius:.4rem}\
form{display:flex;gap:.5rem;margin:1rem 0}\
input[type=text]{flex:4;padding:.5rem}\
.reset{flex:1;text-align:center;padding:.5rem;border:1px solid #ccc;border-radius:.4rem;text-decoration:none;color:inherit}\
.answer.miss{color:#555}";

/// Escapes text for interpolation into HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
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

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>PersonaSynth</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

const HEADER: &str = "<h1>🤖 PersonaSynth</h1>\n\
<p class=\"tagline\">Chat with your own AI avatar trained on your personality</p>\n<hr>\n";

const SIDEBAR: &str = "<aside>\n<h3>About PersonaSynth</h3>\n\
<p>Simulates context-aware personality conversations from a curated set of question/answer pairs.</p>\n\
<ul>\n<li>📚 Curated Q&amp;A pairs</li>\n<li>⚡ Fast, offline, no API needed</li>\n\
<li>🎯 Built for demos and projects</li>\n</ul>\n</aside>\n";

pub fn render_no_data(kb: &KnowledgeBase) -> String {
    let warning = format!(
        "No data found in {}. Please add Q&A data to get started.",
        kb.source().display()
    );
    layout(&format!(
        "<main>\n{HEADER}<p class=\"warning\">{}</p>\n</main>",
        escape_html(&warning)
    ))
}

/// Renders the chat page. `result` is `None` when no query was submitted.
pub fn render_page(query: &str, result: Option<&MatchResult>) -> String {
    let answer = result
        .map(|r| {
            format!(
                "<p class=\"answer {}\"><b>🧠 Answer:</b> {}</p>\n",
                decision_label(r.decision),
                escape_html(&r.answer)
            )
        })
        .unwrap_or_default();

    let body = format!(
        "{SIDEBAR}<main>\n{HEADER}\
         <p class=\"welcome\">👋 Welcome to PersonaSynth! Type a question below to chat with your AI twin.</p>\n\
         <form method=\"get\" action=\"/\">\n\
         <input type=\"text\" name=\"query\" value=\"{}\" placeholder=\"Ask me anything about myself:\" \
         aria-label=\"Ask me anything about myself\" onchange=\"this.form.submit()\" autofocus>\n\
         <a class=\"reset\" href=\"/\">🔄 Reset</a>\n\
         </form>\n\
         {answer}<hr>\n<footer>🔧 Powered by <i>Rust, axum &amp; TF-IDF</i></footer>\n</main>",
        escape_html(query)
    );
    layout(&body)
}
