use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `type` tag carried by the popup's success message.
pub const AUTH_SUCCESS_MESSAGE: &str = "discord-auth-success";

/// Identity of the signed-in user.
///
/// The verify endpoint and the popup callback return different shapes: one
/// keys the user by `user_id`, the other by `id`. Both are kept raw and
/// reconciled by [`UserIdentity::normalize`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub username: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserIdentity {
    /// Fill `user_id` from `id` when only the latter is present.
    pub fn normalize(mut self) -> Self {
        if self.user_id.is_none()
            && let Some(id) = self.id.as_ref().filter(|id| !id.is_null())
        {
            self.user_id = Some(id.clone());
        }
        self
    }

    /// The identity as a string, for matching against roster `discord_id`s.
    pub fn user_key(&self) -> Option<String> {
        self.user_id.as_ref().and_then(json_key)
    }
}

/// Render a JSON scalar identifier as a string. Numbers and strings are
/// accepted; anything else has no key.
pub fn json_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthSuccess {
    pub token: String,
    pub user: UserIdentity,
}

/// Interpret a cross-window message posted by the login popup.
///
/// Returns `None` for anything that is not a well-formed success message;
/// the identity of an accepted message is already normalized.
pub fn parse_auth_message(data: &Value) -> Option<AuthSuccess> {
    if data.get("type").and_then(Value::as_str) != Some(AUTH_SUCCESS_MESSAGE) {
        return None;
    }
    let AuthSuccess { token, user } = serde_json::from_value(data.clone()).ok()?;
    Some(AuthSuccess {
        token,
        user: user.normalize(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity(value: Value) -> UserIdentity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalize_copies_id_into_missing_user_id() {
        let user = identity(json!({ "id": 4242, "username": "nova" })).normalize();
        assert_eq!(user.user_id, Some(json!(4242)));
        assert_eq!(user.user_key().as_deref(), Some("4242"));
    }

    #[test]
    fn normalize_keeps_existing_user_id() {
        let user = identity(json!({ "id": 1, "user_id": "777", "username": "nova" })).normalize();
        assert_eq!(user.user_key().as_deref(), Some("777"));
    }

    #[test]
    fn normalize_ignores_null_id() {
        let user = identity(json!({ "id": null, "username": "nova" })).normalize();
        assert_eq!(user.user_id, None);
        assert_eq!(user.user_key(), None);
    }

    #[test]
    fn unknown_fields_survive_in_extra() {
        let user = identity(json!({ "user_id": 5, "username": "nova", "avatar": "abc" }));
        assert_eq!(user.extra.get("avatar"), Some(&json!("abc")));
    }

    #[test]
    fn parse_auth_message_accepts_success_and_normalizes() {
        let data = json!({
            "type": "discord-auth-success",
            "token": "tok-1",
            "user": { "id": "123456789", "username": "nova" }
        });
        let success = parse_auth_message(&data).unwrap();
        assert_eq!(success.token, "tok-1");
        assert_eq!(success.user.user_key().as_deref(), Some("123456789"));
        assert_eq!(success.user.username, "nova");
    }

    #[test]
    fn parse_auth_message_ignores_other_types() {
        let data = json!({ "type": "webpack-ok", "token": "x", "user": {} });
        assert_eq!(parse_auth_message(&data), None);
        assert_eq!(parse_auth_message(&json!("hello")), None);
    }

    #[test]
    fn parse_auth_message_rejects_missing_token() {
        let data = json!({ "type": "discord-auth-success", "user": { "id": 1 } });
        assert_eq!(parse_auth_message(&data), None);
    }
}
