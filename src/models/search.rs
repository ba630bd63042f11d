use serde::{Deserialize, Serialize};

use crate::domain::Gender;

/// Optional search filters. Blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub age_from: Option<i32>,
    pub age_to: Option<i32>,
    pub gender: Option<Gender>,
    pub city: Option<String>,
}

impl SearchCriteria {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_blank(self.name.as_deref()).is_none()
            && non_blank(self.surname.as_deref()).is_none()
            && self.age_from.is_none()
            && self.age_to.is_none()
            && self.gender.is_none()
            && non_blank(self.city.as_deref()).is_none()
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_do_not_count_as_criteria() {
        let criteria = SearchCriteria {
            name: Some("  ".to_string()),
            city: Some(String::new()),
            ..SearchCriteria::default()
        };
        assert!(criteria.is_empty());

        let criteria = SearchCriteria {
            age_to: Some(30),
            ..SearchCriteria::default()
        };
        assert!(!criteria.is_empty());
    }
}
