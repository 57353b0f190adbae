use chrono::NaiveDate;
use clap::Args;
use examplan_core::{Candidate, CatalogStore, Config, RecommendationEngine, StudiedExam};

#[derive(Args)]
pub struct RecommendArgs {
    /// Subject name
    pub subject: String,
    /// Date of any confirmed slot of the exam (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Time range of that slot (HH:MM-HH:MM)
    pub time: String,
    /// Print the ranking as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = CatalogStore::open_default()?;
    let config = Config::load_or_default();

    let subject = store
        .catalog
        .subjects
        .get(&args.subject)
        .ok_or_else(|| format!("unknown subject: {}", args.subject))?;
    let exam = store
        .catalog
        .find_exam(&args.subject, args.date, &args.time)
        .ok_or_else(|| {
            format!(
                "no exam with a slot on {} at {} for '{}'",
                args.date, args.time, args.subject
            )
        })?;
    if exam.slots.is_empty() {
        return Err(examplan_core::ValidationError::NoCandidateSlots(args.subject).into());
    }

    let candidates: Vec<Candidate> = exam
        .slots
        .iter()
        .map(|s| Candidate::new(s.date, Some(s.time.clone())))
        .collect();
    let studied = StudiedExam {
        moment: None,
        weight: Some(subject.weight_for(exam.exam_type.as_deref())),
    };

    let engine = RecommendationEngine::with_factors(&store.catalog, config.scoring.factors());
    let ranking = engine.recommend(&candidates, &studied);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
    } else {
        for (rank, scored) in ranking.iter().enumerate() {
            let time = exam
                .slots
                .iter()
                .find(|s| s.date == scored.date)
                .map(|s| s.time.as_str())
                .unwrap_or("");
            println!("{:>2}. {} {} {:.2}", rank + 1, scored.date, time, scored.score);
        }
    }
    Ok(())
}
