use std::{io::Write, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use engine::{
    Category, Engine, EngineError, FormPayload, Storage, TransactionKind, ValidationErrors,
    money::format_amount,
};
use uuid::Uuid;

use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "spendlog")]
#[command(about = "Record income and expenses and summarize where the money goes")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the data directory.
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new transaction.
    Add(AddArgs),
    /// Change fields of an existing transaction.
    Edit(EditArgs),
    /// Delete a transaction.
    Delete { id: Uuid },
    /// List transactions, newest first.
    List,
    /// Current month totals, last twelve months and category breakdown.
    Summary,
    /// Write the listing as CSV.
    Export {
        /// Destination file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the available categories.
    Categories,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long, allow_hyphen_values = true)]
    amount: String,
    /// `YYYY-MM-DD`, defaults to today.
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "expense")]
    kind: TransactionKind,
    #[arg(long)]
    category: Option<Category>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    id: Uuid,
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    kind: Option<TransactionKind>,
    #[arg(long)]
    category: Option<Category>,
}

/// How a command ended.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Done,
    /// The form did not validate; nothing was stored.
    Rejected(ValidationErrors),
}

pub fn run<S: Storage>(
    command: Command,
    engine: &mut Engine<S>,
    out: &mut impl Write,
) -> Result<Outcome> {
    match command {
        Command::Add(args) => {
            let payload = FormPayload {
                amount: args.amount,
                date: args
                    .date
                    .unwrap_or_else(|| engine::today().format("%Y-%m-%d").to_string()),
                description: args.description,
                kind: args.kind,
                category: args.category,
            };
            match engine.create(payload) {
                Ok(id) => writeln!(out, "added {id}")?,
                Err(EngineError::Invalid(errors)) => return Ok(Outcome::Rejected(errors)),
                Err(err) => return Err(err.into()),
            }
        }
        Command::Edit(args) => {
            let Some(mut payload) = engine.edit_form(args.id) else {
                tracing::info!("no transaction {}, nothing to edit", args.id);
                writeln!(out, "no transaction {}", args.id)?;
                return Ok(Outcome::Done);
            };
            if let Some(amount) = args.amount {
                payload.amount = amount;
            }
            if let Some(date) = args.date {
                payload.date = date;
            }
            if let Some(description) = args.description {
                payload.description = description;
            }
            if let Some(kind) = args.kind {
                payload.kind = kind;
            }
            if args.category.is_some() {
                payload.category = args.category;
            }
            match engine.edit(args.id, payload) {
                Ok(_) => writeln!(out, "updated {}", args.id)?,
                Err(EngineError::Invalid(errors)) => return Ok(Outcome::Rejected(errors)),
                Err(err) => return Err(err.into()),
            }
        }
        Command::Delete { id } => {
            if engine.remove(id)? {
                writeln!(out, "deleted {id}")?;
            } else {
                writeln!(out, "no transaction {id}")?;
            }
        }
        Command::List => print_list(engine, out)?,
        Command::Summary => print_summary(engine, out)?,
        Command::Export { output } => {
            let data = engine.export_csv()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, data)?;
                    tracing::info!("exported {} transactions to {}", engine.all().len(), path.display());
                }
                None => out.write_all(&data)?,
            }
        }
        Command::Categories => {
            for category in Category::ALL {
                writeln!(out, "{category}")?;
            }
        }
    }

    Ok(Outcome::Done)
}

fn print_list<S: Storage>(engine: &Engine<S>, out: &mut impl Write) -> Result<()> {
    let transactions = engine.sorted();
    if transactions.is_empty() {
        writeln!(out, "no transactions")?;
        return Ok(());
    }

    for tx in transactions {
        let signed = match tx.kind {
            TransactionKind::Income => tx.amount,
            TransactionKind::Expense => -tx.amount,
        };
        writeln!(
            out,
            "{}  {:<17}  {:>12}  {}  [{}]",
            tx.date.format("%Y-%m-%d"),
            tx.category.label(),
            format_amount(signed),
            tx.description,
            tx.id
        )?;
    }
    Ok(())
}

fn print_summary<S: Storage>(engine: &Engine<S>, out: &mut impl Write) -> Result<()> {
    let totals = engine.month_totals();
    writeln!(out, "This month")?;
    writeln!(out, "  {:<17}  {:>12}", "Income", format_amount(totals.total_income))?;
    writeln!(out, "  {:<17}  {:>12}", "Expenses", format_amount(totals.total_expenses))?;
    writeln!(out, "  {:<17}  {:>12}", "Net", format_amount(totals.net_income))?;

    writeln!(out)?;
    writeln!(out, "Last 12 months")?;
    for bucket in engine.monthly_expenses() {
        writeln!(out, "  {:<17}  {:>12}", bucket.label, format_amount(bucket.amount))?;
    }

    writeln!(out)?;
    writeln!(out, "By category")?;
    let breakdown = engine.category_breakdown();
    if breakdown.is_empty() {
        writeln!(out, "  no expenses")?;
    }
    for row in breakdown {
        writeln!(out, "  {:<17}  {:>12}", row.category.label(), format_amount(row.amount))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use engine::{Field, MemoryStorage};

    use super::*;

    fn engine() -> Engine<MemoryStorage> {
        Engine::builder().storage(MemoryStorage::new()).build()
    }

    fn parse(args: &[&str]) -> Command {
        let argv = std::iter::once("spendlog").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().command
    }

    fn run_capture(engine: &mut Engine<MemoryStorage>, args: &[&str]) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = run(parse(args), engine, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_then_list() {
        let mut engine = engine();
        let (outcome, _) = run_capture(
            &mut engine,
            &[
                "add",
                "--amount",
                "40",
                "--date",
                "2026-10-05",
                "--description",
                "Dinner",
                "--category",
                "food & dining",
            ],
        );
        assert_eq!(outcome, Outcome::Done);

        let (_, listing) = run_capture(&mut engine, &["list"]);
        assert!(listing.starts_with("2026-10-05  Food & Dining"));
        assert!(listing.contains("-40.00  Dinner"));
    }

    #[test]
    fn add_reports_every_invalid_field() {
        let mut engine = engine();
        let (outcome, _) = run_capture(&mut engine, &["add", "--amount", "-5", "--date", ""]);

        let Outcome::Rejected(errors) = outcome else {
            panic!("expected rejection");
        };
        assert!(errors.contains(Field::Amount));
        assert!(errors.contains(Field::Date));
        assert!(errors.contains(Field::Description));
        assert!(errors.contains(Field::Category));
        assert!(engine.all().is_empty());
    }

    #[test]
    fn edit_overrides_only_given_fields() {
        let mut engine = engine();
        run_capture(
            &mut engine,
            &[
                "add",
                "--amount",
                "10",
                "--date",
                "2026-01-02",
                "--description",
                "Bus",
                "--category",
                "Transportation",
            ],
        );
        let id = engine.all()[0].id.to_string();

        let (outcome, _) = run_capture(&mut engine, &["edit", &id, "--amount", "12.5"]);
        assert_eq!(outcome, Outcome::Done);

        let tx = &engine.all()[0];
        assert_eq!(tx.amount, 12.5);
        assert_eq!(tx.description, "Bus");
        assert_eq!(tx.category, Category::Transportation);
    }

    #[test]
    fn delete_unknown_id_is_not_an_error() {
        let mut engine = engine();
        let id = Uuid::new_v4().to_string();
        let (outcome, output) = run_capture(&mut engine, &["delete", &id]);
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(output, format!("no transaction {id}\n"));
    }

    #[test]
    fn summary_always_lists_twelve_months() {
        let mut engine = engine();
        let (_, output) = run_capture(&mut engine, &["summary"]);

        let months = output
            .lines()
            .skip_while(|line| *line != "Last 12 months")
            .skip(1)
            .take_while(|line| !line.is_empty())
            .count();
        assert_eq!(months, 12);
        assert!(output.contains("  no expenses"));
    }

    #[test]
    fn unknown_category_is_rejected_by_the_parser() {
        let argv = ["spendlog", "add", "--amount", "1", "--category", "Groceries"];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
