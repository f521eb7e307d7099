use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::{
    create_task_request::CreateTaskRequest,
    field::Field,
    task::{NewTask, TaskPatch},
    task_priority::TaskPriority,
    task_status::TaskStatus,
    update_task_request::UpdateTaskRequest,
    update_task_status_request::UpdateTaskStatusRequest,
    validation_error::ValidationError,
};

pub const TITLE_MAX_LENGTH: usize = 255;

const MISSING_FIELD: &str = "Missing data for required field.";
const NULL_FIELD: &str = "Field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";
const UNKNOWN_FIELD: &str = "Unknown field.";
const INVALID_DATETIME: &str = "Not a valid datetime.";
const PAST_DUE_DATE: &str = "Due date cannot be in the past";

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn validate_create(
    request: CreateTaskRequest,
    now: DateTime<Utc>,
) -> Result<NewTask, ValidationError> {
    let mut errors = ValidationError::new();
    report_unknown(request.unknown, &mut errors);

    let title = match text("title", request.title, &mut errors) {
        Some(Field::Value(title)) => check_title(title, &mut errors),
        Some(Field::Null) => {
            errors.add("title", NULL_FIELD);
            None
        }
        Some(Field::Missing) => {
            errors.add("title", MISSING_FIELD);
            None
        }
        None => None,
    };
    let description = text("description", request.description, &mut errors).and_then(nullable);
    let priority = text("priority", request.priority, &mut errors)
        .and_then(|field| required_value("priority", field, &mut errors))
        .and_then(|text| check_enum::<TaskPriority>("priority", &text, &TaskPriority::ALL, &mut errors));
    let due_date = check_due_date(request.due_date, now, &mut errors).flatten();

    let new_task = NewTask {
        title: title.unwrap_or_default(),
        description: description.flatten(),
        status: None,
        priority,
        due_date,
    };
    errors.into_result(new_task)
}

pub fn validate_update(
    request: UpdateTaskRequest,
    now: DateTime<Utc>,
) -> Result<TaskPatch, ValidationError> {
    let mut errors = ValidationError::new();
    report_unknown(request.unknown, &mut errors);

    let title = text("title", request.title, &mut errors)
        .and_then(|field| required_value("title", field, &mut errors))
        .and_then(|title| check_title(title, &mut errors));
    let description = text("description", request.description, &mut errors).and_then(nullable);
    let status = text("status", request.status, &mut errors)
        .and_then(|field| required_value("status", field, &mut errors))
        .and_then(|text| check_enum::<TaskStatus>("status", &text, &TaskStatus::ALL, &mut errors));
    let priority = text("priority", request.priority, &mut errors)
        .and_then(|field| required_value("priority", field, &mut errors))
        .and_then(|text| check_enum::<TaskPriority>("priority", &text, &TaskPriority::ALL, &mut errors));
    let due_date = check_due_date(request.due_date, now, &mut errors);

    let patch = TaskPatch {
        title,
        description,
        status,
        priority,
        due_date,
    };
    errors.into_result(patch)
}

pub fn validate_status_update(
    request: UpdateTaskStatusRequest,
) -> Result<TaskStatus, ValidationError> {
    let mut errors = ValidationError::new();
    report_unknown(request.unknown, &mut errors);

    let status = match text("status", request.status, &mut errors) {
        Some(Field::Value(text)) => check_enum::<TaskStatus>("status", &text, &TaskStatus::ALL, &mut errors),
        Some(Field::Null) => {
            errors.add("status", NULL_FIELD);
            None
        }
        Some(Field::Missing) => {
            errors.add("status", MISSING_FIELD);
            None
        }
        None => None,
    };

    match status {
        Some(status) if errors.is_empty() => Ok(status),
        _ => Err(errors),
    }
}

/// Accepts RFC 3339 timestamps, and offset-less ISO-8601 ones read as UTC
/// (`T` or space separated, seconds optional).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

fn report_unknown(unknown: BTreeMap<String, Value>, errors: &mut ValidationError) {
    for name in unknown.into_keys() {
        errors.add(name, UNKNOWN_FIELD);
    }
}

/// Narrows a raw JSON field to text. Non-strings are reported and yield `None`.
fn text(name: &str, field: Field<Value>, errors: &mut ValidationError) -> Option<Field<String>> {
    match field {
        Field::Missing => Some(Field::Missing),
        Field::Null => Some(Field::Null),
        Field::Value(Value::String(text)) => Some(Field::Value(text)),
        Field::Value(_) => {
            errors.add(name, NOT_A_STRING);
            None
        }
    }
}

fn check_title(title: String, errors: &mut ValidationError) -> Option<String> {
    let length = title.chars().count();
    if (1..=TITLE_MAX_LENGTH).contains(&length) {
        Some(title)
    } else {
        errors.add(
            "title",
            format!("Length must be between 1 and {TITLE_MAX_LENGTH}."),
        );
        None
    }
}

fn check_enum<T>(field: &str, text: &str, allowed: &[T], errors: &mut ValidationError) -> Option<T>
where
    T: FromStr + ToString,
{
    match text.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            let choices: Vec<String> = allowed.iter().map(ToString::to_string).collect();
            errors.add(field, format!("Must be one of: {}.", choices.join(", ")));
            None
        }
    }
}

/// `None` when absent or invalid, `Some(None)` to clear, `Some(Some(_))` for a valid date.
fn check_due_date(
    field: Field<Value>,
    now: DateTime<Utc>,
    errors: &mut ValidationError,
) -> Option<Option<DateTime<Utc>>> {
    match field {
        Field::Missing => None,
        Field::Null => Some(None),
        Field::Value(value) => match value.as_str().and_then(parse_timestamp) {
            None => {
                errors.add("due_date", INVALID_DATETIME);
                None
            }
            Some(due_date) if due_date < now => {
                errors.add("due_date", PAST_DUE_DATE);
                None
            }
            Some(due_date) => Some(Some(due_date)),
        },
    }
}

/// Present values pass through; an explicit null is reported.
fn required_value(name: &str, field: Field<String>, errors: &mut ValidationError) -> Option<String> {
    match field {
        Field::Missing => None,
        Field::Null => {
            errors.add(name, NULL_FIELD);
            None
        }
        Field::Value(value) => Some(value),
    }
}

fn nullable(field: Field<String>) -> Option<Option<String>> {
    match field {
        Field::Missing => None,
        Field::Null => Some(None),
        Field::Value(value) => Some(Some(value)),
    }
}
