use serde::{Deserialize, Serialize};

use crate::models::{NoteId, NoteInput};
use crate::view::{Filter, SortBy};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ShellRequest {
    Ping,
    Add {
        note: NoteInput,
    },
    Update {
        id: NoteId,
        note: NoteInput,
    },
    Delete {
        id: NoteId,
    },
    ToggleSave {
        id: NoteId,
    },
    List {
        #[serde(default)]
        filter: Filter,
        #[serde(default)]
        search: String,
        #[serde(default)]
        sort_by: SortBy,
    },
    Counts,
    Notifications,
    Sweep,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShellResponse {
    pub status: String,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub version: String,
}

impl ShellResponse {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            status: "ok".to_string(),
            data: Some(data),
            error: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(msg.into()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn pong() -> Self {
        Self::ok(serde_json::json!({"pong": true}))
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeUnit;

    #[test]
    fn test_list_defaults() {
        let req: ShellRequest = serde_json::from_str(r#"{"action":"list"}"#).unwrap();
        match req {
            ShellRequest::List {
                filter,
                search,
                sort_by,
            } => {
                assert_eq!(filter, Filter::All);
                assert!(search.is_empty());
                assert_eq!(sort_by, SortBy::Created);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_add_parses_nested_note() {
        let req: ShellRequest = serde_json::from_str(
            r#"{"action":"add","note":{"content":"hi","lifetime":{"duration":5,"unit":"minutes"},"priority":"high"}}"#,
        )
        .unwrap();
        let ShellRequest::Add { note } = req else {
            panic!("expected add");
        };
        assert_eq!(note.lifetime.unit, TimeUnit::Minutes);
        assert_eq!(note.lifetime.duration, 5);
    }

    #[test]
    fn test_err_response_shape() {
        let resp = ShellResponse::err("boom");
        assert!(!resp.is_ok());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json["data"].is_null());
    }
}
