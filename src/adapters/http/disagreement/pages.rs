//! Server-rendered HTML for the demo page.
//!
//! One form, one results layout: decision, intent, counterarguments and
//! recommendations in the wide column; biases and impacts in the narrow one.

use std::fmt::Write;

use crate::domain::disagreement::{DisagreementReport, MAX_CONTEXT_CHARS, MAX_DECISION_CHARS};

/// Decision prefilled in the form.
pub const DEMO_DECISION: &str = "We should launch Product X in 3 months; it's a no-brainer and will capture market share quickly. Let's push marketing spend ASAP and scale integrations.";
/// Context prefilled in the form.
pub const DEMO_CONTEXT: &str = "Budget limited to $500k; priority: growth";

const TITLE: &str = "AI That Disagrees With You (Intelligently)";

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem auto;max-width:72rem;padding:0 1rem;color:#1f2328}\
textarea{width:100%;font:inherit;padding:.5rem}\
button{font:inherit;padding:.5rem 1.25rem;margin-top:.75rem;cursor:pointer}\
.cols{display:grid;grid-template-columns:2fr 1fr;gap:2rem;margin-top:2rem}\
.error{background:#ffebe9;border:1px solid #ff8182;padding:.75rem;border-radius:6px}\
.success{background:#dafbe1;border:1px solid #4ac26b;padding:.75rem;border-radius:6px;margin-top:2rem}\
.caption{color:#59636e;font-size:.875rem;margin:.25rem 0}\
pre{background:#f6f8fa;padding:.75rem;border-radius:6px;overflow-x:auto}";

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The input form, optionally with an error banner above it.
pub fn render_form_page(decision: &str, context: &str, error: Option<&str>, mode: &str) -> String {
    let mut body = String::new();
    push_header(&mut body, mode);
    if let Some(error) = error {
        let _ = write!(body, "<p class=\"error\">{}</p>", escape_html(error));
    }
    push_form(&mut body, decision, context);
    layout(&body)
}

/// The form followed by the rendered report.
pub fn render_report_page(
    report: &DisagreementReport,
    decision: &str,
    context: &str,
    mode: &str,
) -> String {
    let mut body = String::new();
    push_header(&mut body, mode);
    push_form(&mut body, decision, context);

    body.push_str("<div class=\"cols\"><section>");

    body.push_str("<h2>Original Decision</h2>");
    let _ = write!(body, "<p>{}</p>", escape_html(&report.intent.decision));

    body.push_str("<h2>Structured Intent</h2>");
    let intent_json = serde_json::to_string_pretty(&report.intent).unwrap_or_default();
    let _ = write!(body, "<pre>{}</pre>", escape_html(&intent_json));

    body.push_str("<h2>Counterarguments (Devil's Advocate)</h2><ol>");
    for c in &report.counterarguments {
        let _ = write!(body, "<li>{}</li>", escape_html(&c.text));
    }
    body.push_str("</ol>");

    body.push_str("<h2>De-risk Recommendations</h2><ul>");
    for r in &report.recommendations {
        let _ = write!(body, "<li>{}</li>", escape_html(r));
    }
    body.push_str("</ul></section><aside>");

    body.push_str("<h2>Bias Detection</h2>");
    let _ = write!(body, "<p>{}</p>", report.bias.flag_labels().join(", "));
    for e in &report.bias.explanations {
        let _ = write!(body, "<p class=\"caption\">{}</p>", escape_html(e));
    }

    body.push_str("<h2>Second-Order Impacts (summary)</h2><ul>");
    for imp in &report.impacts {
        let _ = write!(
            body,
            "<li><strong>{}</strong> ({}) \u{2192} {}</li>",
            escape_html(&imp.area),
            escape_html(&imp.scenario),
            escape_html(&imp.impact)
        );
    }
    body.push_str("</ul></aside></div>");

    let _ = write!(
        body,
        "<p class=\"success\">Done ({}). Use the recommendations to adjust the decision or run again with altered assumptions.</p>",
        escape_html(&report.mode.label())
    );

    layout(&body)
}

fn push_header(body: &mut String, mode: &str) {
    let _ = write!(body, "<h1>{} \u{2014} POC</h1>", TITLE);
    let _ = write!(
        body,
        "<p>Constructive devil's advocate agentic demo. Enter a decision, and the system will challenge it. ({} mode)</p>",
        escape_html(mode)
    );
}

fn push_form(body: &mut String, decision: &str, context: &str) {
    let _ = write!(
        body,
        "<form method=\"post\" action=\"/run\">\
<label for=\"decision\">Enter a decision (one paragraph)</label>\
<textarea id=\"decision\" name=\"decision\" rows=\"6\" maxlength=\"{}\">{}</textarea>\
<label for=\"context\">Optional context (constraints, goals, timeframe)</label>\
<textarea id=\"context\" name=\"context\" rows=\"3\" maxlength=\"{}\">{}</textarea>\
<button type=\"submit\">Run AI Disagreement</button></form>",
        MAX_DECISION_CHARS,
        escape_html(decision),
        MAX_CONTEXT_CHARS,
        escape_html(context)
    );
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>AI That Disagrees - POC</title><style>{}</style></head><body>{}</body></html>",
        STYLE, body
    )
}
