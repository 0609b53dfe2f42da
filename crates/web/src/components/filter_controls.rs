//! Status filter bar above the task table.

use taskboard_core::{LANDING_PATH, StatusFilter};

/// One button in the filter bar.
#[derive(Debug, Clone)]
pub struct FilterOptionView {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Dashboard URL showing `filter`.
///
/// "All" is the bare dashboard path; statuses are percent-encoded
/// (`In Progress` becomes `In%20Progress`).
#[must_use]
pub fn dashboard_href(filter: StatusFilter) -> String {
    match filter {
        StatusFilter::All => LANDING_PATH.to_string(),
        StatusFilter::Only(_) => format!(
            "{LANDING_PATH}?status={}",
            urlencoding::encode(filter.as_query())
        ),
    }
}

/// All filter options with `active` highlighted.
#[must_use]
pub fn filter_options(active: StatusFilter) -> Vec<FilterOptionView> {
    StatusFilter::OPTIONS
        .iter()
        .map(|option| FilterOptionView {
            label: option.label(),
            href: dashboard_href(*option),
            active: *option == active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::TaskStatus;

    #[test]
    fn test_dashboard_href() {
        assert_eq!(dashboard_href(StatusFilter::All), "/dashboard");
        assert_eq!(
            dashboard_href(StatusFilter::Only(TaskStatus::InProgress)),
            "/dashboard?status=In%20Progress"
        );
    }

    #[test]
    fn test_exactly_one_option_active() {
        let options = filter_options(StatusFilter::Only(TaskStatus::Completed));
        let labels: Vec<_> = options.iter().map(|o| o.label).collect();
        assert_eq!(labels, ["All Tasks", "Pending", "In Progress", "Completed"]);

        let active: Vec<_> = options.iter().filter(|o| o.active).map(|o| o.label).collect();
        assert_eq!(active, ["Completed"]);
    }
}
