use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// Body of `POST /execute`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ExecuteRequest {
    pub command: String,
    pub session_id: SessionId,
    pub ai_mode: bool,
}

/// Reply of `GET /system_info`. Only `prompt` is consumed.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub current_directory: Option<String>,
    #[serde(default)]
    pub system_info: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of one interpreted command in an AI reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CommandResult {
    #[serde(default)]
    pub command: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub output: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub error: Option<String>,
    #[serde(default)]
    pub return_code: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalOutcome {
    pub output: Option<String>,
    pub error: Option<String>,
    pub return_code: Option<i32>,
    pub prompt: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AiOutcome {
    pub original_command: String,
    pub interpreted_commands: Vec<String>,
    /// May be shorter than `interpreted_commands` when the backend stopped on a failure.
    pub results: Vec<CommandResult>,
    pub prompt: Option<String>,
}

/// A decoded `/execute` reply.
///
/// The wire payload is one flat object whose shape depends on the echoed `ai_mode`
/// flag; it is decoded once here so nothing downstream probes optional fields.
/// Empty strings are treated the same as absent fields.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawReply")]
pub enum ExecuteReply {
    Failure { error: Option<String> },
    Normal(NormalOutcome),
    Ai(AiOutcome),
}

impl ExecuteReply {
    /// Prompt reported by the backend, if any. Failures never carry one.
    pub fn prompt(&self) -> Option<&str> {
        match self {
            ExecuteReply::Failure { .. } => None,
            ExecuteReply::Normal(n) => n.prompt.as_deref(),
            ExecuteReply::Ai(a) => a.prompt.as_deref(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ExecuteReply::Failure { .. })
    }
}

#[derive(Deserialize)]
struct RawReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    ai_mode: bool,
    #[serde(default, deserialize_with = "non_empty")]
    output: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    error: Option<String>,
    #[serde(default)]
    return_code: Option<i32>,
    #[serde(default, deserialize_with = "non_empty")]
    prompt: Option<String>,
    #[serde(default)]
    original_command: Option<String>,
    #[serde(default)]
    interpreted_commands: Option<Vec<String>>,
    #[serde(default)]
    results: Option<Vec<CommandResult>>,
}

impl From<RawReply> for ExecuteReply {
    fn from(raw: RawReply) -> Self {
        if !raw.success {
            return ExecuteReply::Failure { error: raw.error };
        }
        if raw.ai_mode {
            ExecuteReply::Ai(AiOutcome {
                original_command: raw.original_command.unwrap_or_default(),
                interpreted_commands: raw.interpreted_commands.unwrap_or_default(),
                results: raw.results.unwrap_or_default(),
                prompt: raw.prompt,
            })
        } else {
            ExecuteReply::Normal(NormalOutcome {
                output: raw.output,
                error: raw.error,
                return_code: raw.return_code,
                prompt: raw.prompt,
            })
        }
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> ExecuteReply {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_wire_shape() {
        let req = ExecuteRequest {
            command: "ls".into(),
            session_id: SessionId::from("session_x".to_string()),
            ai_mode: true,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"command": "ls", "session_id": "session_x", "ai_mode": true})
        );
    }

    #[test]
    fn normal_reply() {
        let reply = decode(json!({
            "success": true,
            "ai_mode": false,
            "command": "echo 5",
            "output": "5",
            "error": "",
            "return_code": 0,
            "current_directory": "/home",
            "prompt": "/home$ "
        }));
        assert_eq!(
            reply,
            ExecuteReply::Normal(NormalOutcome {
                output: Some("5".into()),
                error: None,
                return_code: Some(0),
                prompt: Some("/home$ ".into()),
            })
        );
    }

    #[test]
    fn ai_reply() {
        let reply = decode(json!({
            "success": true,
            "ai_mode": true,
            "original_command": "show files",
            "interpreted_commands": ["ls"],
            "results": [{"command": "ls", "output": "a  b", "error": "", "return_code": 0}],
            "prompt": "$ "
        }));
        let ExecuteReply::Ai(ai) = reply else {
            panic!("expected AI reply");
        };
        assert_eq!(ai.original_command, "show files");
        assert_eq!(ai.interpreted_commands, ["ls"]);
        assert_eq!(ai.results[0].output.as_deref(), Some("a  b"));
        assert_eq!(ai.results[0].error, None);
    }

    #[test]
    fn ai_reply_without_interpretation() {
        let reply = decode(json!({"success": true, "ai_mode": true, "original_command": "??"}));
        let ExecuteReply::Ai(ai) = reply else {
            panic!("expected AI reply");
        };
        assert!(ai.interpreted_commands.is_empty());
        assert!(ai.results.is_empty());
    }

    #[test]
    fn failure_reply_from_error_body() {
        // Server errors come back as a bare {error} object with no success flag.
        let reply = decode(json!({"error": "No command provided"}));
        assert_eq!(
            reply,
            ExecuteReply::Failure {
                error: Some("No command provided".into())
            }
        );
        assert!(!reply.is_success());
        assert_eq!(reply.prompt(), None);
    }

    #[test]
    fn null_fields_are_absent() {
        let reply = decode(json!({
            "success": true,
            "ai_mode": false,
            "output": null,
            "return_code": null,
            "prompt": ""
        }));
        assert_eq!(reply, ExecuteReply::Normal(NormalOutcome::default()));
    }

    #[test]
    fn system_info_prompt() {
        let info: SystemInfo = serde_json::from_value(json!({
            "current_directory": "/",
            "system_info": {"platform": "Linux"},
            "prompt": "/$ "
        }))
        .unwrap();
        assert_eq!(info.prompt.as_deref(), Some("/$ "));
    }
}
