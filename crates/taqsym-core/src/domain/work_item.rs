use super::required;
use crate::error::ValidationError;

/// A work item (task) as stored by the work-item backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub owner_id: i64,
}

/// A validated request to create a work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkItem {
    title: String,
    description: String,
    owner_id: i64,
}

impl NewWorkItem {
    pub fn new(title: String, description: String, owner_id: i64) -> Result<Self, ValidationError> {
        let title = required("title", title)?;
        let description = required("description", description)?;
        if owner_id <= 0 {
            return Err(ValidationError::NotPositive { field: "user_id" });
        }

        Ok(Self {
            title,
            description,
            owner_id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title() {
        let err = NewWorkItem::new(String::new(), "desc".to_string(), 1).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "title" });
    }

    #[test]
    fn test_owner_must_be_positive() {
        let err = NewWorkItem::new("t".to_string(), "d".to_string(), 0).unwrap_err();
        assert_eq!(err, ValidationError::NotPositive { field: "user_id" });
    }

    #[test]
    fn test_valid_item() {
        let item = NewWorkItem::new("Write docs".to_string(), "API".to_string(), 7).unwrap();
        assert_eq!(item.title(), "Write docs");
        assert_eq!(item.description(), "API");
        assert_eq!(item.owner_id(), 7);
    }
}
