//! Inline HTML pages

use crate::types::listing::INPUT_FIELDS;

/// Human-readable labels, aligned with [`INPUT_FIELDS`].
const FIELD_LABELS: [&str; 18] = [
    "Number of bedrooms",
    "Number of bathrooms",
    "Living area (sq ft)",
    "Lot area (sq ft)",
    "Number of floors",
    "Waterfront present (0/1)",
    "Number of views",
    "Condition of the house",
    "Grade of the house",
    "Area of the basement (sq ft)",
    "Built year",
    "Renovation year (0 if never)",
    "Postal code",
    "Latitude",
    "Longitude",
    "Lot area after renovation (sq ft)",
    "Number of schools nearby",
    "Distance from the airport",
];

const PAGE_STYLE: &str = r#"
        body { font-family: system-ui, sans-serif; max-width: 640px; margin: 2rem auto; color: #222; }
        h1 { font-size: 1.5rem; }
        form { display: grid; grid-template-columns: 1fr 1fr; gap: 0.5rem 1rem; }
        label { align-self: center; }
        input { padding: 0.3rem; }
        button { grid-column: span 2; padding: 0.6rem; margin-top: 1rem; }
        .result { font-size: 1.4rem; margin: 1.5rem 0; }
"#;

/// Escape text for inclusion in HTML content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = title,
        style = PAGE_STYLE,
        body = body
    )
}

/// Input form posting every field to `/predict`.
pub fn render_index() -> String {
    let inputs: String = INPUT_FIELDS
        .iter()
        .zip(FIELD_LABELS.iter())
        .map(|(name, label)| {
            format!(
                "        <label for=\"{name}\">{label}</label>\n        <input id=\"{name}\" name=\"{name}\" type=\"text\" inputmode=\"decimal\" required>\n",
                name = name,
                label = label
            )
        })
        .collect();

    let body = format!(
        "    <h1>House Price Prediction</h1>\n    <form action=\"/predict\" method=\"post\">\n{}        <button type=\"submit\">Predict</button>\n    </form>",
        inputs
    );

    page("House Price Prediction", &body)
}

/// Result page showing the prediction or the error text.
pub fn render_result(text: &str) -> String {
    let body = format!(
        "    <h1>Predicted House Price</h1>\n    <p class=\"result\">{}</p>\n    <a href=\"/\">Predict another</a>",
        escape_html(text)
    );

    page("Prediction Result", &body)
}
