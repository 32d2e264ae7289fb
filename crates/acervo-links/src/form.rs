use acervo_core::VideoMetadata;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Title,
    Description,
    Thumbnail,
}

/// Authoring form for a catalog item, as the user has filled it so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDraft {
    pub url: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
}

impl ContentDraft {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Copies resolved metadata into fields that are still empty.
    ///
    /// Anything the user already typed is left alone. Incoming descriptions
    /// are cut to `description_limit` characters. Returns the fields filled.
    pub fn apply_metadata(
        &mut self,
        metadata: &VideoMetadata,
        description_limit: Option<usize>,
    ) -> Vec<DraftField> {
        let mut filled = Vec::new();

        if fill(&mut self.title, metadata.title.as_deref()) {
            filled.push(DraftField::Title);
        }

        let description = metadata
            .description
            .as_deref()
            .map(|text| truncate_chars(text, description_limit));
        if fill(&mut self.description, description.as_deref()) {
            filled.push(DraftField::Description);
        }

        if fill(&mut self.thumbnail, metadata.thumbnail.as_deref()) {
            filled.push(DraftField::Thumbnail);
        }

        filled
    }
}

fn fill(field: &mut String, value: Option<&str>) -> bool {
    match value {
        Some(value) if field.trim().is_empty() && !value.trim().is_empty() => {
            *field = value.to_string();
            true
        }
        _ => false,
    }
}

fn truncate_chars(text: &str, limit: Option<usize>) -> String {
    match limit {
        Some(limit) => text.chars().take(limit).collect(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(
        title: Option<&str>,
        description: Option<&str>,
        thumbnail: Option<&str>,
    ) -> VideoMetadata {
        VideoMetadata {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            thumbnail: thumbnail.map(str::to_string),
        }
    }

    #[test]
    fn keeps_user_entered_title() {
        let mut draft = ContentDraft::new("https://youtu.be/dQw4w9WgXcQ");
        draft.title = "Y".to_string();

        let filled = draft.apply_metadata(&metadata(Some("X"), None, None), None);
        assert_eq!(draft.title, "Y");
        assert!(filled.is_empty());
    }

    #[test]
    fn fills_only_empty_fields() {
        let mut draft = ContentDraft::new("https://vimeo.com/76979871");
        draft.description = "my notes".to_string();
        draft.title = "   ".to_string();

        let filled = draft.apply_metadata(
            &metadata(Some("Sintel"), Some("An open movie"), Some("https://i.vimeocdn.com/1.jpg")),
            None,
        );
        assert_eq!(draft.title, "Sintel");
        assert_eq!(draft.description, "my notes");
        assert_eq!(draft.thumbnail, "https://i.vimeocdn.com/1.jpg");
        assert_eq!(filled, vec![DraftField::Title, DraftField::Thumbnail]);
    }

    #[test]
    fn truncates_description_on_char_boundary() {
        let mut draft = ContentDraft::new("https://vimeo.com/76979871");
        draft.apply_metadata(&metadata(None, Some("Tarô e acervo"), None), Some(4));
        assert_eq!(draft.description, "Tarô");
    }

    #[test]
    fn empty_metadata_changes_nothing() {
        let mut draft = ContentDraft::new("https://example.com");
        let before = draft.clone();
        assert!(draft.apply_metadata(&VideoMetadata::default(), Some(10)).is_empty());
        assert_eq!(draft, before);
    }
}
