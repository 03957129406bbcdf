use super::action::{available_actions, find_action, validate_actions};
use super::DocumentId;

/// Ordered action keys chosen for one document. Only catalog keys are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedActionSet {
    document_id: Option<DocumentId>,
    keys: Vec<&'static str>,
    whole_catalog: bool,
}

impl SelectedActionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unknown keys are dropped; order is preserved.
    pub fn from_keys<S: AsRef<str>>(document_id: DocumentId, keys: &[S]) -> Self {
        Self {
            document_id: Some(document_id),
            keys: validate_actions(keys),
            whole_catalog: false,
        }
    }

    pub fn all(document_id: DocumentId) -> Self {
        Self {
            document_id: Some(document_id),
            keys: available_actions().iter().map(|a| a.key).collect(),
            whole_catalog: true,
        }
    }

    /// Made with the `all` keyword rather than by listing numbers.
    pub fn is_all(&self) -> bool {
        self.whole_catalog
    }

    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    pub fn document_id(&self) -> Option<DocumentId> {
        self.document_id
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_for(&self, document_id: DocumentId) -> bool {
        self.document_id == Some(document_id)
    }

    pub fn action_names(&self) -> Vec<&'static str> {
        self.keys
            .iter()
            .filter_map(|key| find_action(key))
            .map(|a| a.name)
            .collect()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid selection format: {0}")]
    InvalidFormat(String),
    #[error("no valid action numbers in selection")]
    NoValidActions,
    #[error("unrecognized selection input")]
    Unrecognized,
}

/// Parses `all` or comma-separated 1-based action numbers. Numbers outside the
/// catalog are dropped as long as at least one valid number remains.
pub fn parse_selection(
    input: &str,
    document_id: DocumentId,
) -> Result<SelectedActionSet, SelectionError> {
    let input = input.trim();

    if input.eq_ignore_ascii_case("all") {
        return Ok(SelectedActionSet::all(document_id));
    }

    if !input.chars().any(|c| c.is_ascii_digit()) {
        return Err(SelectionError::Unrecognized);
    }

    let numbers = input
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>()
                .map_err(|_| SelectionError::InvalidFormat(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let actions = available_actions();
    let keys: Vec<&'static str> = numbers
        .into_iter()
        .filter(|n| (1..=actions.len() as i64).contains(n))
        .map(|n| actions[(n - 1) as usize].key)
        .collect();

    if keys.is_empty() {
        return Err(SelectionError::NoValidActions);
    }

    Ok(SelectedActionSet {
        document_id: Some(document_id),
        keys,
        whole_catalog: false,
    })
}
