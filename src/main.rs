//! Command line front end.
//!
//! ```text
//! millesime <house> <code> [--logo STYLE] [--maker MAKER] [--sizing NOTATION]
//!           [--typeface FACE] [--year-print DIGITS] [--json]
//! ```
//!
//! `<code>` is the product code as printed, or one of `blank`, `unreadable`,
//! `unspecified`. Settings (log filter, output format) come from an optional
//! `millesime.toml` next to the binary, overridable with `MILLESIME_*`
//! environment variables.

use std::env;
use std::process;
use std::str::FromStr;

use config::{Config, Environment, File};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use millesime::catalog::{House, Registry};
use millesime::error::{MillesimeError, Result};
use millesime::framework::{CodeField, Query, YearPrint};
use millesime::render::render_report;

struct Settings {
    log: String,
    json: bool,
}

fn load_settings() -> Result<Settings> {
    let settings = Config::builder()
        .set_default("log", "info")?
        .set_default("format", "text")?
        .add_source(File::with_name("millesime").required(false))
        .add_source(Environment::with_prefix("MILLESIME"))
        .build()?;
    Ok(Settings {
        log: settings.get_string("log")?,
        json: settings.get_string("format")? == "json",
    })
}

fn parse_code(text: &str) -> CodeField {
    match text.to_ascii_lowercase().as_str() {
        "blank" => CodeField::Blank,
        "unreadable" => CodeField::Unreadable,
        "unspecified" => CodeField::Unspecified,
        _ => CodeField::code(text),
    }
}

fn parse_query(mut args: env::Args) -> Result<(Query, bool)> {
    let usage = || {
        MillesimeError::Input(
            "usage: millesime <house> <code> [--logo STYLE] [--maker MAKER] \
             [--sizing NOTATION] [--typeface FACE] [--year-print DIGITS] [--json]"
                .to_owned(),
        )
    };
    args.next(); // program name
    let house = House::from_str(&args.next().ok_or_else(usage)?)?;
    let code = parse_code(&args.next().ok_or_else(usage)?);
    let mut query = Query::new(house, code);
    let mut json = false;
    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| MillesimeError::Input(format!("{name} needs a value")))
        };
        match flag.as_str() {
            "--logo" => query = query.with_logo(value("--logo")?.parse()?),
            "--maker" => query = query.with_maker(value("--maker")?.parse()?),
            "--sizing" => query = query.with_sizing(value("--sizing")?.parse()?),
            "--typeface" => query = query.with_typeface(value("--typeface")?.parse()?),
            "--year-print" => {
                query = query.with_year_print(YearPrint::Digits(value("--year-print")?))
            }
            "--json" => json = true,
            other => return Err(MillesimeError::Input(format!("unknown flag: {other}"))),
        }
    }
    Ok((query, json))
}

fn run() -> Result<()> {
    let settings = load_settings()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log)),
        )
        .init();

    let (query, json_flag) = parse_query(env::args())?;
    let registry = Registry::standard()?;
    debug!(house = %query.house, "identifying");
    let results = registry.identify(&query);

    if json_flag || settings.json {
        let rendered = serde_json::to_string_pretty(&results)
            .map_err(|e| MillesimeError::Invariant(e.to_string()))?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(&query, &results));
    }
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{error}");
        process::exit(1);
    }
}
