//! Parse command - structure a single receipt text file.

use std::fmt::Write as _;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::debug;

use fapiao_core::{Bill, MerchantPolicy, ReceiptParser};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file ("-" reads from stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Merchant extraction policy
    #[arg(long, value_enum, default_value = "entity-first")]
    merchant_policy: MerchantPolicyArg,

    /// Reference date for "never later than now" date selection
    /// (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    reference_date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (header + one row)
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum MerchantPolicyArg {
    /// Organization entities first, then the first plausible line
    EntityFirst,
    /// Always the first non-empty line
    FirstLine,
}

impl From<MerchantPolicyArg> for MerchantPolicy {
    fn from(arg: MerchantPolicyArg) -> Self {
        match arg {
            MerchantPolicyArg::EntityFirst => MerchantPolicy::EntityFirst,
            MerchantPolicyArg::FirstLine => MerchantPolicy::FirstLine,
        }
    }
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;

    let mut parser = ReceiptParser::new().with_merchant_policy(args.merchant_policy.into());
    if let Some(date) = args.reference_date {
        parser = parser.with_reference_date(date);
    }

    let bill = parser.parse_to_bill(&text);
    debug!("parsed bill {}", bill.id);

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&bill)?,
        OutputFormat::Csv => render_csv(&bill)?,
        OutputFormat::Text => render_text(&bill),
    };

    match args.output {
        Some(path) => fs::write(&path, rendered)?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(fs::read_to_string(input)?)
}

fn render_csv(bill: &Bill) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(bill)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush CSV: {err}"))?;
    Ok(String::from_utf8(bytes)?)
}

fn render_text(bill: &Bill) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", style("Merchant:").bold(), bill.merchant_name);
    let _ = writeln!(
        out,
        "{} {}",
        style("Total:").bold(),
        bill.total_amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(
        out,
        "{} {}",
        style("Subtotal:").bold(),
        bill.subtotal_amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(
        out,
        "{} {}",
        style("Date:").bold(),
        bill.purchase_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(
        out,
        "{} {} ({})",
        style("Category:").bold(),
        bill.category,
        bill.category.zh_label()
    );

    out
}
