use anyhow::{bail, Context, Result};
use std::env;
use std::path::Path;

use spendscope::error::Error;
use spendscope::{RuleSet, Session};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let file = args[1].clone();
    let mut export_path: Option<String> = None;
    let mut rules_path: Option<String> = None;
    let mut suggest_text: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--export" => {
                export_path = Some(take_value(&args, &mut i, "--export")?);
            }
            "--rules" => {
                rules_path = Some(take_value(&args, &mut i, "--rules")?);
            }
            "--suggest" => {
                suggest_text = Some(take_value(&args, &mut i, "--suggest")?);
            }
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    let rules = match rules_path {
        Some(path) => RuleSet::from_file(&path)
            .with_context(|| format!("Failed to load rules from {path}"))?,
        None => RuleSet::default(),
    };

    println!("💰 Spendscope - Personal Finance Report");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n📂 Loading {file}...");
    let session = Session::open_with_rules(Path::new(&file), &rules)
        .with_context(|| format!("Failed to process {file}"))?;
    println!("✓ {} transactions after cleaning", session.len());

    print_summary(&session);
    print_forecast(&session);
    print_anomalies(&session);

    println!("\n💡 Tip: {}", session.advice());

    if let Some(text) = suggest_text {
        match session.suggest(&text) {
            Ok(category) => println!("\n🔮 Suggested category for \"{text}\": {category}"),
            Err(Error::InsufficientData(msg)) => println!("\n🔮 No suggestion: {msg}"),
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = export_path {
        session
            .export(Path::new(&path))
            .with_context(|| format!("Failed to export to {path}"))?;
        println!("\n💾 Exported categorized table to {path}");
    }

    Ok(())
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .with_context(|| format!("{flag} requires a value"))
}

fn print_summary(session: &Session) {
    println!("\n📊 Summary by category");
    match session.summary() {
        Ok(summary) => {
            for (category, total) in summary.sorted_totals() {
                println!("   {:<14} {:>12.2}", category.as_str(), total);
            }
            println!("   Mean transaction: {:.2}", summary.mean);
            match summary.savings_ratio {
                Some(ratio) => println!("   Savings ratio (income/food): {ratio:.2}"),
                None => println!("   Savings ratio: not available"),
            }
        }
        Err(Error::InsufficientData(msg)) => println!("   ⚠️  {msg}"),
        Err(e) => println!("   ⚠️  {e}"),
    }
}

fn print_forecast(session: &Session) {
    println!("\n📉 Next-month forecast");
    match session.forecast() {
        Ok(forecast) => {
            for point in &forecast.points {
                println!(
                    "   {}  actual {:>12.2}  fitted {:>12.2}",
                    point.month, point.actual, point.fitted
                );
            }
            println!("   Projected next month: {:.2}", forecast.predicted);
        }
        Err(Error::InsufficientData(msg)) => println!("   ⚠️  {msg}"),
        Err(e) => println!("   ⚠️  {e}"),
    }
}

fn print_anomalies(session: &Session) {
    println!("\n🚨 Anomalies (|z| ≥ 2)");
    match session.anomalies() {
        Ok(anomalies) if anomalies.is_empty() => println!("   none"),
        Ok(anomalies) => {
            for a in anomalies {
                println!(
                    "   {}  {:>12.2}  z={:+.2}  {}",
                    a.date, a.amount, a.z_score, a.description
                );
            }
        }
        Err(e) => println!("   ⚠️  {e}"),
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <file.csv|file.xlsx> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --export <out.csv>    Write the categorized table back to CSV");
    eprintln!("  --rules <rules.json>  Use a custom ordered keyword rule set");
    eprintln!("  --suggest <text>      Suggest a category for a description");
}
