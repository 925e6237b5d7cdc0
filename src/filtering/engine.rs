//! Filter-and-paginate engine.
//!
//! Pure and synchronous: no I/O, inputs are borrowed and never mutated. The
//! only failure is an ordering comparison between a coercible and a
//! non-coercible operand, which aborts the whole evaluation.

use std::cmp::Ordering;

use serde_json::Value;

use crate::filtering::coerce::{strict_equals, to_epoch_millis, to_number};
use crate::filtering::types::{
    Condition, FilterClause, FilterError, PageRequest, PageResult, Question, Submission,
};

/// Keep submissions matching every clause, then cut one page out of them.
pub fn filter_and_paginate(
    submissions: &[Submission],
    clauses: &[FilterClause],
    page: PageRequest,
) -> Result<PageResult, FilterError> {
    let mut kept = Vec::new();
    for submission in submissions {
        if matches_all(submission, clauses)? {
            kept.push(submission);
        }
    }

    Ok(paginate(&kept, page))
}

/// Whether `submission` satisfies every clause. Stops at the first failure.
pub fn matches_all(submission: &Submission, clauses: &[FilterClause]) -> Result<bool, FilterError> {
    for clause in clauses {
        if !clause_passes(submission, clause)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn clause_passes(submission: &Submission, clause: &FilterClause) -> Result<bool, FilterError> {
    // A clause on a question the submission does not have excludes it.
    let Some(question) = submission.question(&clause.id) else {
        return Ok(false);
    };

    match clause.condition {
        Condition::Equals => Ok(strict_equals(question.answer(), &clause.value)),
        Condition::DoesNotEqual => Ok(!strict_equals(question.answer(), &clause.value)),
        Condition::GreaterThan => Ok(compare(question, clause)? == Some(Ordering::Greater)),
        Condition::LessThan => Ok(compare(question, clause)? == Some(Ordering::Less)),
        Condition::Unknown => Ok(false),
    }
}

/// Order the coerced answer against the coerced clause value.
///
/// `None` means the clause cannot pass: the question is unanswered or neither
/// side coerced.
fn compare(question: &Question, clause: &FilterClause) -> Result<Option<Ordering>, FilterError> {
    if question.answer().is_null() {
        return Ok(None);
    }

    let coerce: fn(&Value) -> Option<f64> = if question.is_date() {
        to_epoch_millis
    } else {
        to_number
    };

    match (coerce(question.answer()), coerce(&clause.value)) {
        (Some(answer), Some(filter)) => Ok(answer.partial_cmp(&filter)),
        (None, None) => Ok(None),
        _ => Err(FilterError::TypeMismatch {
            question_id: clause.id.clone(),
            answer: question.answer().clone(),
            filter: clause.value.clone(),
        }),
    }
}

fn paginate(kept: &[&Submission], page: PageRequest) -> PageResult {
    let limit = page.limit.max(1);
    let responses: Vec<Submission> = kept
        .iter()
        .skip(page.offset)
        .take(limit)
        .map(|s| (*s).clone())
        .collect();

    PageResult {
        total_responses: responses.len(),
        page_count: kept.len().div_ceil(limit),
        responses,
    }
}
