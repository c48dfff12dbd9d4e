//! Human-readable reports. Boundary layer only; nothing here feeds back
//! into the engine.

use std::fmt::Write;

use crate::compress::compress;
use crate::framework::{CodeField, MatchResult, Query, YearPrint};

/// Confirmation of the parsed input followed by one paragraph per result,
/// or the single generic no-match message.
pub fn render_report(query: &Query, results: &[MatchResult]) -> String {
    let mut out = String::new();
    render_echo(&mut out, query);
    if results.is_empty() {
        out.push_str("\nNo known encoding framework matches this label.\n");
        return out;
    }
    for result in results {
        out.push('\n');
        render_result(&mut out, result);
    }
    out
}

fn render_echo(out: &mut String, query: &Query) {
    let _ = writeln!(out, "House: {}", query.house);
    let code = match &query.code {
        CodeField::Code(text) => text.as_str(),
        CodeField::Blank => "(blank)",
        CodeField::Unreadable => "(unreadable)",
        CodeField::Unspecified => "(unspecified)",
    };
    let _ = writeln!(out, "Product code: {}", code);
    if let Some(logo) = query.attrs.logo {
        let _ = writeln!(out, "Logo style: {:?}", logo);
    }
    if let Some(maker) = query.attrs.maker {
        let _ = writeln!(out, "Maker: {}", maker);
    }
    if let Some(sizing) = query.attrs.sizing {
        let _ = writeln!(out, "Sizing notation: {:?}", sizing);
    }
    if let Some(typeface) = query.attrs.typeface {
        let _ = writeln!(out, "Typeface: {:?}", typeface);
    }
    if let YearPrint::Digits(digits) = &query.attrs.year_print {
        let _ = writeln!(out, "Year print: {}", digits);
    }
}

fn render_result(out: &mut String, result: &MatchResult) {
    let _ = writeln!(out, "Framework: {}", result.framework);
    if let Some(code) = &result.canonical_code {
        let _ = writeln!(out, "  Code reads {}", code);
    }
    if result.counterfeit_possible && result.occurrences.is_empty() {
        let _ = writeln!(
            out,
            "  This exact code appears in the known-counterfeit table and matches no \
             legitimate collection. Treat the garment as suspect."
        );
        return;
    }
    if let Some(maker) = result.maker {
        let _ = write!(out, "  Made by {}", maker);
        for alternate in &result.alternate_makers {
            let _ = write!(out, ", or {}", alternate);
        }
        out.push('\n');
    }
    for label in [&result.garment, &result.fabric, &result.size].into_iter().flatten() {
        let _ = writeln!(out, "  {}", label);
    }
    for group in &result.occurrences {
        let _ = write!(out, "  {}: ", group.line);
        let tokens = compress(&group.collections);
        for (position, token) in tokens.iter().enumerate() {
            if position > 0 {
                out.push_str("; ");
            }
            let _ = write!(out, "{}", token);
        }
        out.push('\n');
    }
    if result.exception {
        let _ = writeln!(out, "  Note: a documented encoding exception applies to this code.");
    }
    if result.counterfeit_possible {
        let _ = writeln!(out, "  Note: this exact code also appears in the counterfeit table.");
    }
}
