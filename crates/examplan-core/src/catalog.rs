//! Catalog types for subjects, exams, and moments.
//!
//! A *moment* is a recurring weekly slot (weekday + time range) with a
//! scheduling-weight multiplier. Subjects declare which moments they may use,
//! a weight per exam type, and the exams already confirmed on the calendar.
//!
//! Subjects and moments live in `BTreeMap`s so that lookups that scan the
//! catalog (moment resolution, slot expansion) are deterministic: when two
//! moments share a time, the lowest id wins.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Categorical exam duration, as confirmed at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamDuration {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1:30")]
    NinetyMinutes,
    #[serde(rename = "2h")]
    TwoHours,
}

impl std::fmt::Display for ExamDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ExamDuration::OneHour => "1h",
            ExamDuration::NinetyMinutes => "1:30",
            ExamDuration::TwoHours => "2h",
        };
        f.write_str(label)
    }
}

/// A confirmed (date, time range) pair for an exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSlot {
    pub date: NaiveDate,
    /// Time range as "HH:MM-HH:MM", matched verbatim against moment times.
    pub time: String,
}

/// An exam belonging to exactly one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    /// `None` means the subject's ordinary exam type (weight index 0).
    #[serde(default)]
    pub exam_type: Option<String>,
    pub slots: Vec<ExamSlot>,
    pub duration: ExamDuration,
}

/// A recurring weekly time slot with a scheduling-weight multiplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Moment {
    pub weekday: Weekday,
    /// Time range as "HH:MM-HH:MM".
    pub time: String,
    #[serde(default = "default_moment_weight")]
    pub weight: f64,
}

fn default_moment_weight() -> f64 {
    1.0
}

/// A subject with its weight table and confirmed exams.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    /// Weights aligned positionally with `exam_types`.
    #[serde(default)]
    pub weights: Vec<f64>,
    /// Exam type names; index 0 is the ordinary type.
    #[serde(default)]
    pub exam_types: Vec<String>,
    /// Moment ids this subject is allowed to use.
    #[serde(default)]
    pub moments: Vec<String>,
    #[serde(default)]
    pub exams: Vec<Exam>,
}

impl Subject {
    /// Resolve the weight for an exam type.
    ///
    /// Finds the type in `exam_types`, falling back to index 0 when the type
    /// is unknown or absent; indices past the end of the weight list fall
    /// back to the first weight, and an empty weight list is neutral 1.0.
    pub fn weight_for(&self, exam_type: Option<&str>) -> f64 {
        let idx = exam_type
            .and_then(|t| self.exam_types.iter().position(|x| x == t))
            .unwrap_or(0);
        self.weights
            .get(idx)
            .or_else(|| self.weights.first())
            .copied()
            .unwrap_or(1.0)
    }
}

/// A concrete date/time offer expanded from a subject's moments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub moment: String,
    pub date: NaiveDate,
    pub time: String,
}

/// The full exam calendar: subjects keyed by name, moments keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub subjects: BTreeMap<String, Subject>,
    #[serde(default)]
    pub moments: BTreeMap<String, Moment>,
}

impl Catalog {
    /// Resolve a moment id for a time range and weekday.
    ///
    /// First pass requires both time and weekday to match; if nothing does,
    /// relax to the first moment with a matching time regardless of weekday.
    pub fn resolve_moment(&self, time: &str, weekday: Weekday) -> Option<&str> {
        self.moments
            .iter()
            .find(|(_, m)| m.time == time && m.weekday == weekday)
            .or_else(|| self.moments.iter().find(|(_, m)| m.time == time))
            .map(|(id, _)| id.as_str())
    }

    /// Multiplier for a (possibly unresolved) moment id. Unknown or absent
    /// moments are neutral 1.0.
    pub fn moment_weight(&self, moment: Option<&str>) -> f64 {
        moment
            .and_then(|id| self.moments.get(id))
            .map(|m| m.weight)
            .unwrap_or(1.0)
    }

    /// Total number of registered exams across all subjects.
    pub fn exam_count(&self) -> usize {
        self.subjects.values().map(|s| s.exams.len()).sum()
    }

    /// Register an exam for a subject.
    ///
    /// `selections` pairs a moment id with a concrete date; the slot time is
    /// taken from the moment. Subjects that declare exam types require one.
    pub fn register_exam(
        &mut self,
        subject: &str,
        exam_type: Option<String>,
        selections: &[(String, NaiveDate)],
        duration: ExamDuration,
    ) -> Result<Uuid, ValidationError> {
        let subject_data = self
            .subjects
            .get(subject)
            .ok_or_else(|| ValidationError::UnknownSubject(subject.to_string()))?;

        if !subject_data.exam_types.is_empty() && exam_type.is_none() {
            return Err(ValidationError::MissingExamType(subject.to_string()));
        }

        let mut slots = Vec::with_capacity(selections.len());
        for (moment_id, date) in selections {
            if !subject_data.moments.iter().any(|m| m == moment_id) {
                return Err(ValidationError::UnknownMoment {
                    subject: subject.to_string(),
                    moment: moment_id.clone(),
                });
            }
            let moment = self
                .moments
                .get(moment_id)
                .ok_or_else(|| ValidationError::UnknownMoment {
                    subject: subject.to_string(),
                    moment: moment_id.clone(),
                })?;
            slots.push(ExamSlot {
                date: *date,
                time: moment.time.clone(),
            });
        }

        let exam = Exam {
            id: Uuid::new_v4(),
            exam_type,
            slots,
            duration,
        };
        let id = exam.id;
        self.subjects
            .get_mut(subject)
            .expect("subject existence checked above")
            .exams
            .push(exam);
        Ok(id)
    }

    /// Remove one confirmed (date, time) slot from a subject's exams.
    ///
    /// Exams left with no slots are removed entirely. Errors when no slot
    /// matched.
    pub fn remove_slot(
        &mut self,
        subject: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<(), ValidationError> {
        let subject_data = self
            .subjects
            .get_mut(subject)
            .ok_or_else(|| ValidationError::UnknownSubject(subject.to_string()))?;

        let mut removed = false;
        for exam in &mut subject_data.exams {
            let before = exam.slots.len();
            exam.slots.retain(|s| !(s.date == date && s.time == time));
            if exam.slots.len() != before {
                removed = true;
            }
        }
        subject_data.exams.retain(|e| !e.slots.is_empty());

        if removed {
            Ok(())
        } else {
            Err(ValidationError::SlotNotFound {
                subject: subject.to_string(),
                date,
                time: time.to_string(),
            })
        }
    }

    /// Empty every subject's exam list.
    pub fn clear_exams(&mut self) {
        for subject in self.subjects.values_mut() {
            subject.exams.clear();
        }
    }

    /// Locate the exam holding a confirmed slot on (date, time).
    pub fn find_exam(&self, subject: &str, date: NaiveDate, time: &str) -> Option<&Exam> {
        self.subjects.get(subject)?.exams.iter().find(|exam| {
            exam.slots
                .iter()
                .any(|s| s.date == date && s.time == time)
        })
    }

    /// Expand a subject's moments into concrete date/time offers over a
    /// horizon of days starting at `from` (inclusive on both ends).
    pub fn available_slots(
        &self,
        subject: &str,
        from: NaiveDate,
        horizon_days: u32,
    ) -> Result<Vec<AvailableSlot>, ValidationError> {
        let subject_data = self
            .subjects
            .get(subject)
            .ok_or_else(|| ValidationError::UnknownSubject(subject.to_string()))?;

        let mut offers = Vec::new();
        for day in 0..=i64::from(horizon_days) {
            let date = from + Duration::days(day);
            for moment_id in &subject_data.moments {
                if let Some(moment) = self.moments.get(moment_id) {
                    if moment.weekday == date.weekday() {
                        offers.push(AvailableSlot {
                            moment: moment_id.clone(),
                            date,
                            time: moment.time.clone(),
                        });
                    }
                }
            }
        }
        Ok(offers)
    }
}
