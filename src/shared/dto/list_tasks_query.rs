use serde::Deserialize;

use crate::{task_filter::TaskFilter, task_priority::TaskPriority, task_status::TaskStatus};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Query string of `GET /api/tasks`. Values are kept as text so bad input
/// falls back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl ListTasksQuery {
    pub fn page(&self) -> i64 {
        match parse_number(self.page.as_deref()) {
            Some(page) if page >= 1 => page,
            _ => DEFAULT_PAGE,
        }
    }

    pub fn per_page(&self) -> i64 {
        match parse_number(self.per_page.as_deref()) {
            Some(per_page) if (1..=MAX_PER_PAGE).contains(&per_page) => per_page,
            _ => DEFAULT_PER_PAGE,
        }
    }

    /// Returns `None` when a filter names a value outside its enum: such a
    /// filter can match no stored task.
    pub fn filter(&self) -> Option<TaskFilter> {
        let status = match non_empty(self.status.as_deref()) {
            Some(text) => Some(text.parse::<TaskStatus>().ok()?),
            None => None,
        };
        let priority = match non_empty(self.priority.as_deref()) {
            Some(text) => Some(text.parse::<TaskPriority>().ok()?),
            None => None,
        };
        Some(TaskFilter { status, priority })
    }
}

fn parse_number(value: Option<&str>) -> Option<i64> {
    value?.trim().parse().ok()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn query(page: Option<&str>, per_page: Option<&str>) -> ListTasksQuery {
        ListTasksQuery {
            page: page.map(String::from),
            per_page: per_page.map(String::from),
            ..ListTasksQuery::default()
        }
    }

    #[rstest]
    #[case(None, 1)]
    #[case(Some("3"), 3)]
    #[case(Some("0"), 1)]
    #[case(Some("-4"), 1)]
    #[case(Some("abc"), 1)]
    fn page_is_clamped(#[case] raw: Option<&str>, #[case] expected: i64) {
        assert_eq!(query(raw, None).page(), expected);
    }

    #[rstest]
    #[case(None, 20)]
    #[case(Some("1"), 1)]
    #[case(Some("100"), 100)]
    #[case(Some("101"), 20)]
    #[case(Some("0"), 20)]
    #[case(Some("ten"), 20)]
    fn per_page_is_clamped(#[case] raw: Option<&str>, #[case] expected: i64) {
        assert_eq!(query(None, raw).per_page(), expected);
    }

    #[test]
    fn filter_parses_known_values_and_ignores_empty_ones() {
        let q = ListTasksQuery {
            status: Some("completed".into()),
            priority: Some(String::new()),
            ..ListTasksQuery::default()
        };

        assert_eq!(
            q.filter(),
            Some(TaskFilter {
                status: Some(TaskStatus::Completed),
                priority: None,
            })
        );
    }

    #[test]
    fn unknown_filter_value_matches_nothing() {
        let q = ListTasksQuery {
            priority: Some("urgent".into()),
            ..ListTasksQuery::default()
        };

        assert_eq!(q.filter(), None);
    }
}
