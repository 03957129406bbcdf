use axum::Json;
use serde::Serialize;

use crate::domain::available_actions;

#[derive(Serialize)]
pub struct ActionSummary {
    pub number: usize,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Serialize)]
pub struct ActionsResponse {
    pub actions: Vec<ActionSummary>,
}

/// Catalog in menu order; `number` is what a selection message refers to.
pub async fn list_actions_handler() -> Json<ActionsResponse> {
    let actions = available_actions()
        .iter()
        .enumerate()
        .map(|(i, action)| ActionSummary {
            number: i + 1,
            key: action.key,
            name: action.name,
            description: action.description,
        })
        .collect();

    Json(ActionsResponse { actions })
}
