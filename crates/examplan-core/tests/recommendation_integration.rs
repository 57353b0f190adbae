//! End-to-end properties of the recommendation engine over realistic
//! calendars, including a seeded randomized calendar for the invariants
//! that must hold regardless of input shape.

use chrono::{Duration, NaiveDate, Weekday};
use rand::Rng;
use rand_pcg::Pcg64;
use uuid::Uuid;

use examplan_core::{
    Candidate, Catalog, Exam, ExamDuration, ExamSlot, Moment, RecommendationEngine, StudiedExam,
    Subject,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Three subjects across two weeks, moments on Monday/Wednesday/Friday.
fn semester_catalog() -> Catalog {
    let mut catalog = Catalog::default();
    for (id, weekday, time, weight) in [
        ("1", Weekday::Mon, "08:00-09:00", 1.0),
        ("2", Weekday::Mon, "09:00-10:00", 1.2),
        ("3", Weekday::Wed, "10:00-11:00", 1.0),
        ("4", Weekday::Fri, "12:00-13:00", 0.8),
    ] {
        catalog.moments.insert(
            id.to_string(),
            Moment {
                weekday,
                time: time.to_string(),
                weight,
            },
        );
    }

    let mut add_subject = |name: &str, weights: Vec<f64>, types: Vec<&str>, slots: Vec<(NaiveDate, &str)>| {
        let exams = if slots.is_empty() {
            vec![]
        } else {
            vec![Exam {
                id: Uuid::new_v4(),
                exam_type: types.first().map(|t| t.to_string()),
                slots: slots
                    .into_iter()
                    .map(|(d, t)| ExamSlot {
                        date: d,
                        time: t.to_string(),
                    })
                    .collect(),
                duration: ExamDuration::NinetyMinutes,
            }]
        };
        catalog.subjects.insert(
            name.to_string(),
            Subject {
                weights,
                exam_types: types.into_iter().map(str::to_owned).collect(),
                moments: vec!["1".into(), "2".into(), "3".into(), "4".into()],
                exams,
            },
        );
    };

    add_subject(
        "algebra",
        vec![2.0, 3.0],
        vec!["partial", "final"],
        vec![(date(2025, 3, 3), "08:00-09:00")],
    );
    add_subject(
        "history",
        vec![1.5],
        vec![],
        vec![
            (date(2025, 3, 3), "09:00-10:00"),
            (date(2025, 3, 12), "10:00-11:00"),
        ],
    );
    add_subject("drawing", vec![1.0], vec![], vec![]);
    catalog
}

#[test]
fn scores_are_bounded_and_complete() {
    let catalog = semester_catalog();
    let engine = RecommendationEngine::new(&catalog);

    let candidates: Vec<Candidate> = (0..10)
        .map(|i| Candidate::new(date(2025, 3, 3) + Duration::days(i * 2), None))
        .collect();
    let scored = engine.recommend(
        &candidates,
        &StudiedExam {
            moment: None,
            weight: Some(2.0),
        },
    );

    assert_eq!(scored.len(), candidates.len());
    assert!(scored.iter().all(|s| (0.0..=100.0).contains(&s.score)));
    // Sorted descending by score
    assert!(scored.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn lower_cost_means_strictly_higher_score() {
    let catalog = semester_catalog();
    let engine = RecommendationEngine::new(&catalog);

    // The crowded Monday carries two heavy exams already; a free Friday two
    // weeks out must not tie with it.
    let scored = engine.recommend(
        &[
            Candidate::new(date(2025, 3, 3), None),
            Candidate::new(date(2025, 3, 21), None),
        ],
        &StudiedExam {
            moment: None,
            weight: Some(3.0),
        },
    );

    assert_eq!(scored[0].date, date(2025, 3, 21));
    assert!(scored[0].score > scored[1].score);
}

#[test]
fn studied_exam_moment_fallback_affects_cost() {
    let catalog = semester_catalog();
    let engine = RecommendationEngine::new(&catalog);

    // Candidate without a time: the exam's supplied moment "3" lands right
    // next to the existing ordinal pair on the crowded Monday.
    let with_supplied = engine.recommend(
        &[
            Candidate::new(date(2025, 3, 3), None),
            Candidate::new(date(2025, 3, 21), None),
        ],
        &StudiedExam {
            moment: Some("3".to_string()),
            weight: Some(1.0),
        },
    );
    let without = engine.recommend(
        &[
            Candidate::new(date(2025, 3, 3), None),
            Candidate::new(date(2025, 3, 21), None),
        ],
        &StudiedExam {
            moment: None,
            weight: Some(1.0),
        },
    );

    let monday_with = with_supplied
        .iter()
        .find(|s| s.date == date(2025, 3, 3))
        .unwrap();
    let monday_without = without.iter().find(|s| s.date == date(2025, 3, 3)).unwrap();
    // Extending the consecutive run can only make the crowded day worse
    assert!(monday_with.score <= monday_without.score);
}

#[test]
fn missing_weight_defaults_to_neutral() {
    let catalog = semester_catalog();
    let engine = RecommendationEngine::new(&catalog);

    let explicit = engine.recommend(
        &[
            Candidate::new(date(2025, 3, 4), None),
            Candidate::new(date(2025, 3, 18), None),
        ],
        &StudiedExam {
            moment: None,
            weight: Some(1.0),
        },
    );
    let defaulted = engine.recommend(
        &[
            Candidate::new(date(2025, 3, 4), None),
            Candidate::new(date(2025, 3, 18), None),
        ],
        &StudiedExam::default(),
    );

    assert_eq!(explicit, defaulted);
}

#[test]
fn randomized_calendar_keeps_invariants() {
    let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7);
    let mut catalog = semester_catalog();

    // Sprinkle extra confirmed exams over six weeks
    let start = date(2025, 3, 3);
    let times = ["08:00-09:00", "09:00-10:00", "10:00-11:00", "12:00-13:00"];
    let mut extra = Vec::new();
    for _ in 0..25 {
        let day = start + Duration::days(rng.gen_range(0..42));
        let time = times[rng.gen_range(0..times.len())];
        extra.push(ExamSlot {
            date: day,
            time: time.to_string(),
        });
    }
    catalog
        .subjects
        .get_mut("drawing")
        .unwrap()
        .exams
        .push(Exam {
            id: Uuid::new_v4(),
            exam_type: None,
            slots: extra,
            duration: ExamDuration::OneHour,
        });

    let engine = RecommendationEngine::new(&catalog);
    let candidates: Vec<Candidate> = (0..14)
        .map(|i| Candidate::new(start + Duration::days(i * 3), None))
        .collect();
    let exam = StudiedExam {
        moment: None,
        weight: Some(2.5),
    };

    let first = engine.recommend(&candidates, &exam);
    let second = engine.recommend(&candidates, &exam);

    assert_eq!(first, second, "engine carries no hidden state");
    assert_eq!(first.len(), candidates.len());
    assert!(first.iter().all(|s| (0.0..=100.0).contains(&s.score)));
    assert!(first.iter().any(|s| s.score == 100.0));
    assert!(first.iter().any(|s| s.score == 0.0));
}

#[test]
fn recommend_flow_from_confirmed_slots() {
    // The full surrounding-application flow: pick an exam, use its
    // confirmed slots as candidates, resolve its weight from the subject.
    let catalog = semester_catalog();
    let subject = &catalog.subjects["history"];
    let exam = catalog
        .find_exam("history", date(2025, 3, 3), "09:00-10:00")
        .unwrap();

    let candidates: Vec<Candidate> = exam
        .slots
        .iter()
        .map(|s| Candidate::new(s.date, Some(s.time.clone())))
        .collect();
    let studied = StudiedExam {
        moment: None,
        weight: Some(subject.weight_for(exam.exam_type.as_deref())),
    };

    let engine = RecommendationEngine::new(&catalog);
    let scored = engine.recommend(&candidates, &studied);

    assert_eq!(scored.len(), 2);
    // The lone Wednesday slot beats doubling down on the crowded Monday
    assert_eq!(scored[0].date, date(2025, 3, 12));
}
