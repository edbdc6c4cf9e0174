use crate::models::ChatContext;

pub const MAX_VISIBLE_SNIPPETS: usize = 5;
pub const MAX_SNIPPET_CHARS: usize = 100;

/// Source of the context sent with every chat message.
///
/// Implementations must not fail: a source that cannot be read is left out
/// and the rest of the context is still returned.
pub trait PageContextProvider: Send + Sync {
    fn gather(&self) -> ChatContext;
}

/// Returns the same context on every call.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    context: ChatContext,
}

impl StaticContext {
    pub fn new(context: ChatContext) -> Self {
        Self { context }
    }
}

impl PageContextProvider for StaticContext {
    fn gather(&self) -> ChatContext {
        self.context.clone()
    }
}

/// Splits `"Monday - Upper Body"` into day and focus at the first hyphen.
pub fn parse_workout_heading(heading: &str) -> Option<(String, String)> {
    let (day, focus) = heading.split_once('-')?;
    Some((day.trim().to_string(), focus.trim().to_string()))
}

/// Splits `"Breakfast: Oatmeal"` into meal name and description at the first colon.
pub fn parse_meal_row(row: &str) -> Option<(String, String)> {
    let (meal, description) = row.split_once(':')?;
    Some((meal.trim().to_string(), description.trim().to_string()))
}

pub fn truncate_snippet(text: &str) -> String {
    text.chars().take(MAX_SNIPPET_CHARS).collect()
}
