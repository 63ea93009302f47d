//! Form-level validation for user submissions.
//!
//! Checks mirror what the submission forms enforce: required fields and
//! minimum lengths. Enum membership needs no checking here, the domain
//! types already make illegal kinds unrepresentable. Failures surface as
//! [`Error::Validation`] with one issue per offending field and are never
//! fatal.

use domains::{Alert, Business, Error, Post, Result, ValidationIssue};

const MIN_TITLE: usize = 3;
const MIN_DESC: usize = 10;

pub fn post(post: &Post) -> Result<()> {
    let mut issues = Vec::new();
    check_required("author", &post.author, &mut issues);
    check_min_len("title", &post.title, MIN_TITLE, &mut issues);
    check_min_len("desc", &post.desc, MIN_DESC, &mut issues);
    finish(issues)
}

pub fn alert(alert: &Alert) -> Result<()> {
    let mut issues = Vec::new();
    check_required("author", &alert.author, &mut issues);
    check_min_len("title", &alert.title, MIN_TITLE, &mut issues);
    check_min_len("desc", &alert.desc, MIN_DESC, &mut issues);
    finish(issues)
}

pub fn business(business: &Business) -> Result<()> {
    let mut issues = Vec::new();
    check_min_len("name", &business.name, MIN_TITLE, &mut issues);
    check_min_len("description", &business.description, MIN_DESC, &mut issues);
    check_required("address", &business.address, &mut issues);
    check_required("bairro", &business.bairro, &mut issues);
    finish(issues)
}

/// A feed post only needs non-blank content; images are optional.
pub fn feed_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::validation(
            "content",
            "required",
            "content must not be empty",
        ));
    }
    Ok(())
}

fn check_required(field: &str, value: &str, issues: &mut Vec<ValidationIssue>) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(
            field,
            "required",
            format!("{field} is required"),
        ));
    }
}

fn check_min_len(field: &str, value: &str, min: usize, issues: &mut Vec<ValidationIssue>) {
    if value.trim().chars().count() < min {
        issues.push(ValidationIssue::new(
            field,
            "min_length",
            format!("{field} must be at least {min} characters"),
        ));
    }
}

fn finish(issues: Vec<ValidationIssue>) -> Result<()> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(issues))
    }
}
