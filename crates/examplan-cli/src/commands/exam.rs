use chrono::NaiveDate;
use clap::Subcommand;
use examplan_core::{AdminKeys, CatalogStore, Config, ExamDuration, Notifier};

#[derive(Subcommand)]
pub enum ExamAction {
    /// Register an exam with its confirmed slots
    Register {
        /// Subject name
        subject: String,
        /// Exam type (required when the subject declares types)
        #[arg(long)]
        exam_type: Option<String>,
        /// Slot selections as MOMENT=DATE, e.g. 10=2025-03-03
        #[arg(long = "slot", required = true)]
        slots: Vec<String>,
        /// Exam duration: 1h, 1:30, or 2h
        #[arg(long, value_parser = parse_duration)]
        duration: ExamDuration,
    },
    /// Remove one confirmed slot (requires the admin key)
    Remove {
        /// Subject name
        subject: String,
        /// Slot date (YYYY-MM-DD)
        date: NaiveDate,
        /// Slot time range (HH:MM-HH:MM)
        time: String,
        /// Admin key
        #[arg(long)]
        key: String,
    },
    /// List registered exams
    List {
        /// Restrict to one subject
        subject: Option<String>,
    },
}

fn parse_duration(raw: &str) -> Result<ExamDuration, String> {
    match raw {
        "1h" => Ok(ExamDuration::OneHour),
        "1:30" => Ok(ExamDuration::NinetyMinutes),
        "2h" => Ok(ExamDuration::TwoHours),
        other => Err(format!("invalid duration '{other}' (expected 1h, 1:30, or 2h)")),
    }
}

fn parse_selection(raw: &str) -> Result<(String, NaiveDate), Box<dyn std::error::Error>> {
    let (moment, date) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid slot '{raw}' (expected MOMENT=DATE)"))?;
    Ok((moment.to_string(), date.parse()?))
}

/// Deliver a notification if the webhook is configured; never fatal.
fn notify_best_effort<F, Fut>(config: &Config, send: F)
where
    F: FnOnce(Notifier) -> Fut,
    Fut: std::future::Future<Output = Result<(), examplan_core::NotifyError>>,
{
    match Notifier::from_config(&config.notify) {
        Ok(Some(notifier)) => {
            let outcome = tokio::runtime::Runtime::new()
                .map_err(|e| e.to_string())
                .and_then(|rt| rt.block_on(send(notifier)).map_err(|e| e.to_string()));
            if let Err(e) = outcome {
                eprintln!("warning: notification failed: {e}");
            }
        }
        Ok(None) => {}
        Err(e) => eprintln!("warning: notification misconfigured: {e}"),
    }
}

pub fn run(action: ExamAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ExamAction::Register {
            subject,
            exam_type,
            slots,
            duration,
        } => {
            let selections = slots
                .iter()
                .map(|s| parse_selection(s))
                .collect::<Result<Vec<_>, _>>()?;

            let mut store = CatalogStore::open_default()?;
            let id = store
                .catalog
                .register_exam(&subject, exam_type, &selections, duration)?;
            store.save()?;
            println!("registered exam {id}");

            let config = Config::load_or_default();
            let exam = store.catalog.subjects[&subject]
                .exams
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .expect("exam registered above");
            notify_best_effort(&config, |notifier| async move {
                notifier.exam_registered(&subject, &exam).await
            });
        }
        ExamAction::Remove {
            subject,
            date,
            time,
            key,
        } => {
            let config = Config::load_or_default();
            let keys = AdminKeys::resolve(&config.auth);
            if !keys.verify_admin(&key) {
                return Err("admin key rejected".into());
            }

            let mut store = CatalogStore::open_default()?;
            store.catalog.remove_slot(&subject, date, &time)?;
            store.save()?;
            println!("removed slot {date} {time} from {subject}");

            notify_best_effort(&config, |notifier| async move {
                notifier.slot_removed(&subject, date, &time).await
            });
        }
        ExamAction::List { subject } => {
            let store = CatalogStore::open_default()?;
            for (name, data) in &store.catalog.subjects {
                if subject.as_deref().is_some_and(|s| s != name) {
                    continue;
                }
                for exam in &data.exams {
                    let exam_type = exam.exam_type.as_deref().unwrap_or("ordinary");
                    println!("{name} [{exam_type}] {} ({})", exam.id, exam.duration);
                    for slot in &exam.slots {
                        println!("  {} {}", slot.date, slot.time);
                    }
                }
            }
        }
    }
    Ok(())
}
