//! File-name field shared between the user and the auto-suggester

/// The editable file name plus the last value the sequencer suggested.
///
/// The user has diverged whenever `text != last_suggested`; automatic
/// refreshes never touch a diverged field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameField {
    text: String,
    last_suggested: String,
}

impl NameField {
    /// Start with the field showing `suggestion`
    pub fn new(suggestion: impl Into<String>) -> Self {
        let suggestion = suggestion.into();
        Self {
            text: suggestion.clone(),
            last_suggested: suggestion,
        }
    }

    /// Current field contents as typed (untrimmed)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn last_suggested(&self) -> &str {
        &self.last_suggested
    }

    /// Whether the user has typed something other than the suggestion
    pub fn is_user_edited(&self) -> bool {
        self.text.trim() != self.last_suggested
    }

    /// Record a user edit
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Timer refresh: adopt `suggestion` only if the user has not diverged.
    ///
    /// Returns true when the visible text changed.
    pub fn refresh(&mut self, suggestion: &str) -> bool {
        if self.is_user_edited() || suggestion == self.last_suggested {
            return false;
        }
        self.text = suggestion.to_string();
        self.last_suggested = suggestion.to_string();
        true
    }

    /// Settings change: replace the text if it still shows the old
    /// suggestion, and advance the suggestion either way.
    ///
    /// Returns true when the visible text changed.
    pub fn resuggest(&mut self, suggestion: &str) -> bool {
        let follow = !self.is_user_edited() && self.text != suggestion;
        if follow {
            self.text = suggestion.to_string();
        }
        self.last_suggested = suggestion.to_string();
        follow
    }

    /// After a save the old name is taken; show the new suggestion.
    pub fn reset(&mut self, suggestion: &str) {
        self.text = suggestion.to_string();
        self.last_suggested = suggestion.to_string();
    }
}
