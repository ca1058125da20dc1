use chrono::{DateTime, Utc};
use lapse_core::ipc::{ShellRequest, ShellResponse};
use lapse_core::{format_time_left, Note};
use serde_json::json;

use crate::session::Session;

pub async fn handle_request(request: ShellRequest, session: &Session) -> ShellResponse {
    match request {
        ShellRequest::Ping => ShellResponse::pong(),
        ShellRequest::Add { note } => match session.add_note(note).await {
            Ok(note) => note_response(&note, session.now()),
            Err(e) => ShellResponse::err(e.to_string()),
        },
        ShellRequest::Update { id, note } => match session.update_note(id, note).await {
            Ok(note) => note_response(&note, session.now()),
            Err(e) => ShellResponse::err(e.to_string()),
        },
        ShellRequest::Delete { id } => match session.delete_note(id).await {
            Ok(_) => ShellResponse::ok(json!({"deleted": true, "id": id})),
            Err(e) => ShellResponse::err(e.to_string()),
        },
        ShellRequest::ToggleSave { id } => match session.toggle_save(id).await {
            Ok(saved) => ShellResponse::ok(json!({"id": id, "saved": saved})),
            Err(e) => ShellResponse::err(e.to_string()),
        },
        ShellRequest::List {
            filter,
            search,
            sort_by,
        } => {
            let now = session.now();
            let notes = session.list(filter, &search, sort_by).await;
            let items: Vec<serde_json::Value> =
                notes.iter().map(|note| note_json(note, now)).collect();
            ShellResponse::ok(json!({"count": items.len(), "notes": items}))
        }
        ShellRequest::Counts => ShellResponse::ok(json!(session.counts().await)),
        ShellRequest::Notifications => {
            ShellResponse::ok(json!({"notifications": session.notifications().await}))
        }
        ShellRequest::Sweep => {
            let report = session.sweep_now().await;
            ShellResponse::ok(json!({
                "removed": report.removed,
                "removed_ids": report.removed_ids,
                "active": report.active,
            }))
        }
    }
}

fn note_response(note: &Note, now: DateTime<Utc>) -> ShellResponse {
    ShellResponse::ok(note_json(note, now))
}

/// Note fields for display: unset color and priority resolve to their
/// defaults, plus a `time_left` countdown label.
fn note_json(note: &Note, now: DateTime<Utc>) -> serde_json::Value {
    let mut value = json!(note);
    value["color"] = json!(note.effective_color());
    value["priority"] = json!(note.effective_priority());
    value["time_left"] = json!(format_time_left(note.expires_at, now));
    value
}
