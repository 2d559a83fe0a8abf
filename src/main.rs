use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand};
use uuid::Uuid;

mod academics;
mod chat;
mod dataset;
mod ledger;
mod models;
mod report;

use chat::Responder;
use dataset::Dataset;
use ledger::{default_intervention_rules, roster_band, standing_for, Ledger};
use models::{DisciplinaryEntry, MarkKind, Role, RosterBand, Severity};

#[derive(Parser)]
#[command(name = "smart-mentor")]
#[command(about = "Smart College Mentor portal: disciplinary ledger and campus chatbot", long_about = None)]
struct Cli {
    /// JSON dataset override; falls back to SMART_MENTOR_DATA, then the seed
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one person's disciplinary record
    Record {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        severity: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List point standings across the roster
    #[command(group(
        ArgGroup::new("scope")
            .args(["band", "role"])
            .multiple(false)
    ))]
    Roster {
        #[arg(long)]
        band: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Academic snapshot for one person
    Academics {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        course: Option<String>,
    },
    /// Record a new disciplinary entry
    Assign {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        kind: String,
        #[arg(long)]
        severity: String,
        #[arg(long)]
        points: i32,
        #[arg(long)]
        description: String,
        #[arg(long)]
        issued_by: Option<String>,
        #[arg(long)]
        context: Option<String>,
    },
    /// Talk to the campus chatbot
    Chat {
        /// Cosmetic delay before each reply, in milliseconds
        #[arg(long, default_value_t = 0)]
        typing_delay_ms: u64,
    },
    /// Ask the chatbot a single question
    Ask {
        message: String,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Import disciplinary entries from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Export the ledger to a CSV file
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dataset = Dataset::load(cli.data.as_deref())?;
    let mut ledger = Ledger::new(dataset.entries.clone(), default_intervention_rules());

    match cli.command {
        Commands::Record {
            subject,
            kind,
            severity,
            search,
            json,
        } => {
            let kind = kind
                .map(|value| MarkKind::parse(&value).context("invalid --kind value"))
                .transpose()?;
            let severity = severity
                .map(|value| Severity::parse(&value).context("invalid --severity value"))
                .transpose()?;

            let entries: Vec<&DisciplinaryEntry> = ledger
                .filter_entries(kind, severity, search.as_deref(), |id| {
                    dataset.display_name(id)
                })
                .into_iter()
                .filter(|entry| entry.subject_id == subject)
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            let total = ledger.total_points(&subject);
            println!(
                "{}: {} points across {} entries ({})",
                dataset.display_name(&subject),
                total,
                ledger.entries_for(&subject).len(),
                standing_for(total).label()
            );

            if let Some(rule) = ledger.recommend_intervention(total) {
                println!("Suggestion ({}): {}", rule.category, rule.suggestion);
            }

            for notice in ledger.advisories(total) {
                println!("! {notice}");
            }

            if entries.is_empty() {
                println!("No black marks on record");
            } else {
                for entry in entries {
                    println!(
                        "- {} [{}] {} ({} pts): {}",
                        entry.occurred_on,
                        entry.kind.label(),
                        entry.severity.label(),
                        entry.points,
                        entry.description
                    );
                }
            }
        }
        Commands::Roster { band, role, json } => {
            let band = band
                .map(|value| RosterBand::parse(&value).context("invalid --band value"))
                .transpose()?;
            let role = match role {
                Some(value) => Role::parse(&value).context("invalid --role value")?,
                None => Role::Student,
            };

            let roster: Vec<models::Person> = dataset
                .people
                .iter()
                .filter(|person| person.role == role)
                .cloned()
                .collect();

            let standings: Vec<models::SubjectStanding> = ledger
                .rank_subjects(&roster)
                .into_iter()
                .filter(|standing| band.map_or(true, |wanted| standing.band == wanted))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
                return Ok(());
            }

            if standings.is_empty() {
                println!("No one matches this view.");
                return Ok(());
            }

            for standing in standings {
                println!(
                    "- {} ({}) {} points across {} entries, {}",
                    standing.name,
                    standing.email,
                    standing.points,
                    standing.entry_count,
                    standing.band.label()
                );
            }
        }
        Commands::Academics { subject, course } => {
            println!("Academic snapshot for {}:", dataset.display_name(&subject));
            println!(
                "- attendance rate: {:.1}%",
                academics::attendance_rate(&dataset.attendance, &subject, course.as_deref())
            );
            println!(
                "- average grade: {:.1}%",
                academics::average_grade(&dataset.grades, &subject, course.as_deref())
            );

            for listed in dataset.courses.iter() {
                if course.as_deref().is_some_and(|wanted| wanted != listed.id) {
                    continue;
                }
                println!(
                    "- {} syllabus completion: {:.1}%",
                    listed.code,
                    academics::syllabus_completion(dataset.syllabus(&listed.id))
                );
            }
        }
        Commands::Assign {
            subject,
            kind,
            severity,
            points,
            description,
            issued_by,
            context,
        } => {
            let entry = DisciplinaryEntry {
                id: Uuid::new_v4(),
                subject_id: subject.clone(),
                kind: MarkKind::parse(&kind).context("invalid --kind value")?,
                severity: Severity::parse(&severity).context("invalid --severity value")?,
                points,
                description,
                occurred_on: Utc::now().date_naive(),
                issued_by,
                context,
            };

            ledger.record(entry)?;

            let total = ledger.total_points(&subject);
            println!(
                "{} has been assigned {} black mark points.",
                dataset.display_name(&subject),
                points
            );
            println!(
                "Now at {} points: {} ({})",
                total,
                standing_for(total).label(),
                roster_band(total).label()
            );
            if let Some(rule) = ledger.recommend_intervention(total) {
                println!("Suggestion ({}): {}", rule.category, rule.suggestion);
            }
        }
        Commands::Chat { typing_delay_ms } => {
            run_chat(typing_delay_ms)?;
        }
        Commands::Ask { message, json } => {
            let mut responder = Responder::default();
            let reply = responder.respond(&message);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "message": message,
                        "reply": reply,
                    }))?
                );
            } else {
                println!("{reply}");
            }
        }
        Commands::Report { out } => {
            let rendered = report::build_report(&dataset, &ledger);
            std::fs::write(&out, rendered)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Import { csv } => {
            let imported = dataset::import_entries_csv(&csv)?;
            let count = imported.len();

            let mut subjects: Vec<String> = Vec::new();
            for entry in imported {
                if !subjects.contains(&entry.subject_id) {
                    subjects.push(entry.subject_id.clone());
                }
                ledger.record(entry)?;
            }

            println!("Imported {count} entries from {}.", csv.display());
            for subject in subjects {
                println!(
                    "- {}: {} points",
                    dataset.display_name(&subject),
                    ledger.total_points(&subject)
                );
            }
        }
        Commands::Export { out } => {
            dataset::export_entries_csv(&out, ledger.entries())?;
            println!("Ledger exported to {}.", out.display());
        }
    }

    Ok(())
}

fn run_chat(typing_delay_ms: u64) -> anyhow::Result<()> {
    let mut responder = Responder::default();
    let mut transcript: Vec<(String, String)> = Vec::new();

    println!("{}", chat::GREETING);
    println!("(type 'exit' to quit)");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if message.is_empty() {
            continue;
        }

        if typing_delay_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(typing_delay_ms));
        }

        let reply = responder.respond(message);
        println!("\n{reply}\n");
        transcript.push((message.to_string(), reply));
    }

    if !transcript.is_empty() {
        println!("({} exchanges this session)", transcript.len());
    }

    Ok(())
}
