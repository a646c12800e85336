use serde::{Deserialize, Serialize};

/// The fields the Identity Toolkit admin API accepts when creating a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Phone number in E.164 format, e.g. `+918947038661`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct CreateUserResponse {
    #[serde(rename = "localId")]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_serializes_to_identity_toolkit_field_names() {
        let body = serde_json::to_value(NewUser {
            email: "caesar@rome.it".to_string(),
            password: "venividivici".to_string(),
            display_name: Some("Julius Caesar".to_string()),
            phone_number: Some("+918947038661".to_string()),
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "email": "caesar@rome.it",
                "password": "venividivici",
                "displayName": "Julius Caesar",
                "phoneNumber": "+918947038661",
            })
        );
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let body = serde_json::to_value(NewUser {
            email: "caesar@rome.it".to_string(),
            password: "venividivici".to_string(),
            display_name: None,
            phone_number: None,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "email": "caesar@rome.it", "password": "venividivici" })
        );
    }

    #[test]
    fn create_user_response_reads_local_id() {
        let res: CreateUserResponse =
            serde_json::from_value(serde_json::json!({ "kind": "...", "localId": "abc123" }))
                .unwrap();
        assert_eq!(res.user_id, "abc123");
    }
}
