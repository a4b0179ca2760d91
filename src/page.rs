//! The single HTML page: the prospect form and an optional result banner.

use crate::predictor::Banner;
use crate::prospect::{
    Bounds, Choice, Gender, ProspectInput, VehicleAge, YesNo, AGE, ANNUAL_PREMIUM, REGION_CODE,
    SALES_CHANNEL, SENTINEL, VINTAGE,
};
use std::fmt::Write;

pub const TITLE: &str = "Vehicle Insurance Response Predictor";

const STYLE: &str = "\
body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.8rem}\
select,input{width:100%;padding:.3rem}\
button{margin-top:1.2rem;padding:.5rem 1.5rem}\
.banner{margin-top:1.2rem;padding:.8rem;border-radius:.3rem}\
.success{background:#e3f6e8;color:#1c6b33}\
.error{background:#fbe4e4;color:#8a1f1f}\
.warning{background:#fff5d6;color:#7a5a00}";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn select<T: Choice>(html: &mut String, name: &str, label: &str, current: Option<T>) {
    let _ = write!(
        html,
        "<label for=\"{name}\">{}</label><select id=\"{name}\" name=\"{name}\">\
         <option value=\"\"{}>{}</option>",
        escape(label),
        if current.is_none() { " selected" } else { "" },
        SENTINEL,
    );
    for &(value, _, _) in T::OPTIONS {
        let selected = if current == Some(value) { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            value.key(),
            escape(value.label())
        );
    }
    html.push_str("</select>");
}

fn number(html: &mut String, name: &str, label: &str, bounds: Bounds, value: f64) {
    let _ = write!(
        html,
        "<label for=\"{name}\">{}</label><input type=\"number\" id=\"{name}\" name=\"{name}\" \
         min=\"{}\" step=\"{}\" value=\"",
        escape(label),
        bounds.min,
        bounds.step,
    );
    // A cleared or unparseable entry is shown empty again.
    if value.is_finite() {
        let _ = write!(html, "{value}");
    }
    html.push('"');
    if let Some(max) = bounds.max {
        let _ = write!(html, " max=\"{max}\"");
    }
    html.push_str(" required>");
}

/// Renders the page, re-selecting the submitted values.
pub fn render(input: &ProspectInput, banner: Option<&Banner>) -> String {
    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{TITLE}</title><style>{STYLE}</style></head><body>\
         <h1>{TITLE}</h1><hr><h2>Fill Out the Details</h2>\
         <form method=\"post\" action=\"/predict\">"
    );

    select::<Gender>(&mut html, "gender", "Your Gender", input.gender);
    number(&mut html, "age", "Your Age", AGE, input.age);
    select::<YesNo>(
        &mut html,
        "driving_license",
        "Do you have a Driving License?",
        input.driving_license,
    );
    number(
        &mut html,
        "region_code",
        "Your Region Code",
        REGION_CODE,
        input.region_code,
    );
    select::<YesNo>(
        &mut html,
        "previously_insured",
        "Are you previously insured?",
        input.previously_insured,
    );
    select::<VehicleAge>(
        &mut html,
        "vehicle_age",
        "What's your vehicle age?",
        input.vehicle_age,
    );
    select::<YesNo>(
        &mut html,
        "vehicle_damage",
        "Has your vehicle ever been damaged?",
        input.vehicle_damage,
    );
    number(
        &mut html,
        "annual_premium",
        "Your Annual Premium",
        ANNUAL_PREMIUM,
        input.annual_premium,
    );
    number(
        &mut html,
        "sales_channel",
        "Policy Sales Channel",
        SALES_CHANNEL,
        input.sales_channel,
    );
    number(
        &mut html,
        "vintage",
        "Vintage (Days with company)",
        VINTAGE,
        input.vintage,
    );

    html.push_str("<button type=\"submit\">Predict</button></form>");

    if let Some(b) = banner {
        let _ = write!(
            html,
            "<div class=\"banner {}\" role=\"status\">{}</div>",
            b.tone.css_class(),
            escape(&b.message)
        );
    }

    html.push_str("</body></html>");
    html
}
