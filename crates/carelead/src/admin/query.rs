use serde::{Deserialize, Serialize};

use super::record::ApplicationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        ApplicationStatus::parse(raw).map(Self::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Date,
    Name,
    Status,
}

impl SortField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "date" => Some(Self::Date),
            "name" => Some(Self::Name),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Filter, sort, and page selection for one admin tab.
///
/// Every change other than picking a page sends the admin back to page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserQuery {
    search: String,
    status: StatusFilter,
    date: DateFilter,
    sort_field: SortField,
    sort_direction: SortDirection,
    page: usize,
}

impl Default for BrowserQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            date: DateFilter::All,
            sort_field: SortField::Date,
            sort_direction: SortDirection::Desc,
            page: 1,
        }
    }
}

impl BrowserQuery {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn date(&self) -> DateFilter {
        self.date
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_date(&mut self, date: DateFilter) {
        self.date = date;
        self.page = 1;
    }

    pub fn set_sort_field(&mut self, field: SortField) {
        self.sort_field = field;
        self.page = 1;
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
        self.page = 1;
    }

    /// Clicking a sortable column: same column flips direction, new column starts descending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            let flipped = match self.sort_direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
            self.set_sort_direction(flipped);
        } else {
            self.sort_field = field;
            self.set_sort_direction(SortDirection::Desc);
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Builds a query from URL parameters; filters are applied in declaration order, the page last.
    pub fn from_params(params: &BrowserQueryParams) -> Result<Self, QueryError> {
        let mut query = Self::default();

        if let Some(search) = &params.search {
            query.set_search(search.clone());
        }
        if let Some(raw) = &params.status {
            let status = StatusFilter::parse(raw)
                .ok_or_else(|| QueryError::invalid("status", raw))?;
            query.set_status(status);
        }
        if let Some(raw) = &params.date {
            let date = DateFilter::parse(raw).ok_or_else(|| QueryError::invalid("date", raw))?;
            query.set_date(date);
        }
        if let Some(raw) = &params.sort {
            let field = SortField::parse(raw).ok_or_else(|| QueryError::invalid("sort", raw))?;
            query.set_sort_field(field);
        }
        if let Some(raw) = &params.direction {
            let direction = SortDirection::parse(raw)
                .ok_or_else(|| QueryError::invalid("direction", raw))?;
            query.set_sort_direction(direction);
        }
        if let Some(page) = params.page {
            query.set_page(page);
        }

        Ok(query)
    }
}

/// Raw URL parameters of the admin list and export routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowserQueryParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid {parameter} '{value}'")]
pub struct QueryError {
    pub parameter: &'static str,
    pub value: String,
}

impl QueryError {
    fn invalid(parameter: &'static str, value: &str) -> Self {
        Self {
            parameter,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> BrowserQuery {
        let mut query = BrowserQuery::default();
        query.set_page(3);
        query
    }

    #[test]
    fn every_filter_or_sort_change_resets_the_page() {
        let changes: [fn(&mut BrowserQuery); 6] = [
            |query| query.set_search("ada"),
            |query| query.set_status(StatusFilter::Only(ApplicationStatus::Pending)),
            |query| query.set_date(DateFilter::Week),
            |query| query.set_sort_field(SortField::Name),
            |query| query.set_sort_direction(SortDirection::Asc),
            |query| query.toggle_sort(SortField::Date),
        ];

        for change in changes {
            let mut query = on_page_three();
            change(&mut query);
            assert_eq!(query.page(), 1);
        }
    }

    #[test]
    fn page_never_drops_below_one() {
        let mut query = BrowserQuery::default();
        query.set_page(0);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn toggle_sort_flips_direction_on_same_column() {
        let mut query = BrowserQuery::default();
        query.toggle_sort(SortField::Date);
        assert_eq!(query.sort_direction(), SortDirection::Asc);
        query.toggle_sort(SortField::Name);
        assert_eq!(query.sort_field(), SortField::Name);
        assert_eq!(query.sort_direction(), SortDirection::Desc);
    }

    #[test]
    fn params_keep_requested_page() {
        let params = BrowserQueryParams {
            search: Some("smith".to_string()),
            status: Some("pending".to_string()),
            sort: Some("name".to_string()),
            page: Some(2),
            ..BrowserQueryParams::default()
        };
        let query = BrowserQuery::from_params(&params).expect("params parse");
        assert_eq!(query.page(), 2);
        assert_eq!(
            query.status(),
            StatusFilter::Only(ApplicationStatus::Pending)
        );
        assert_eq!(query.sort_field(), SortField::Name);
    }

    #[test]
    fn params_reject_unknown_values() {
        let params = BrowserQueryParams {
            date: Some("year".to_string()),
            ..BrowserQueryParams::default()
        };
        assert_eq!(
            BrowserQuery::from_params(&params),
            Err(QueryError {
                parameter: "date",
                value: "year".to_string()
            })
        );
    }
}
