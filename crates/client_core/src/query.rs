/// The raw text the user is typing. Edits never validate or trigger I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStore {
    text: String,
}

impl QueryStore {
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn query(&self) -> &str {
        &self.text
    }

    /// Direct handle for widgets that edit the string in place.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Trimmed query, or `None` when there is nothing worth sending.
    pub fn submittable(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
