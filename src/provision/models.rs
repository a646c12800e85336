use std::{fs::File, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{auth::models::NewUser, error::FirebaseError};

/// One account to provision, as listed in the accounts JSON file. The field
/// names follow the Firebase Auth naming, so an entry looks like:
///
/// ```json
/// {
///     "email": "test-member@example.com",
///     "password": "12345678",
///     "displayName": "Test Member",
///     "phoneNumber": "+918947038661",
///     "role": "member"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    /// Phone number in E.164 format. Must be unique across the project, just
    /// like the email; Firebase Auth enforces both.
    pub phone_number: String,
    pub role: Role,
}

impl AccountRequest {
    /// Reads the list of accounts to provision from a JSON file.
    pub fn list_from_file(path: impl AsRef<Path>) -> Result<Vec<Self>, FirebaseError> {
        let file_reader = File::open(path).context("Failed to read accounts JSON file")?;
        let accounts =
            serde_json::from_reader(file_reader).context("Could not parse accounts file")?;

        Ok(accounts)
    }
}

impl From<&AccountRequest> for NewUser {
    fn from(account: &AccountRequest) -> Self {
        NewUser {
            email: account.email.clone(),
            password: account.password.clone(),
            display_name: Some(account.display_name.clone()),
            phone_number: Some(account.phone_number.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Member => write!(f, "member"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// The application-level profile document stored at `users/{uid}`.
///
/// `createdAt` is deliberately absent here: it is attached as a server
/// timestamp when the document is written, so the machine clock of whoever
/// runs this tool never ends up in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub role: Role,
}

impl ProfileRecord {
    /// Derives the profile document for a to-be-created account. New accounts
    /// start out unverified and active.
    pub fn for_account(account: &AccountRequest) -> Self {
        Self {
            name: account.display_name.clone(),
            email: account.email.clone(),
            phone: national_number(&account.phone_number).to_string(),
            is_verified: false,
            is_active: true,
            role: account.role,
        }
    }
}

/// Profiles store the national number while Firebase Auth wants the E.164
/// form. The accounts this tool seeds use Indian numbers, so `+91` is the
/// country code that gets stripped; for anything else we only drop the `+`.
fn national_number(phone: &str) -> &str {
    phone
        .strip_prefix("+91")
        .or_else(|| phone.strip_prefix('+'))
        .unwrap_or(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_account() -> AccountRequest {
        AccountRequest {
            email: "a@x.com".to_string(),
            password: "12345678".to_string(),
            display_name: "Jagdish Kumar".to_string(),
            phone_number: "+911234567890".to_string(),
            role: Role::Member,
        }
    }

    #[test]
    fn profile_is_derived_from_the_account_request() {
        let profile = ProfileRecord::for_account(&member_account());

        assert_eq!(
            profile,
            ProfileRecord {
                name: "Jagdish Kumar".to_string(),
                email: "a@x.com".to_string(),
                phone: "1234567890".to_string(),
                is_verified: false,
                is_active: true,
                role: Role::Member,
            }
        );
    }

    #[test]
    fn profile_serializes_with_firestore_field_names() {
        let fields = serde_json::to_value(ProfileRecord::for_account(&member_account())).unwrap();

        assert_eq!(
            fields,
            serde_json::json!({
                "name": "Jagdish Kumar",
                "email": "a@x.com",
                "phone": "1234567890",
                "isVerified": false,
                "isActive": true,
                "role": "member",
            })
        );
    }

    #[test]
    fn phone_country_code_is_stripped() {
        assert_eq!(national_number("+911234567890"), "1234567890");
        assert_eq!(national_number("+4512345678"), "4512345678");
        assert_eq!(national_number("8947038661"), "8947038661");
    }

    #[test]
    fn accounts_parse_from_firebase_style_json() {
        let accounts: Vec<AccountRequest> = serde_json::from_str(
            r#"[
                {
                    "email": "test-member@example.com",
                    "password": "12345678",
                    "displayName": "Test Member",
                    "phoneNumber": "+918947038661",
                    "role": "member"
                },
                {
                    "email": "test-admin@example.com",
                    "password": "12345678",
                    "displayName": "Test Admin",
                    "phoneNumber": "+918947038662",
                    "role": "admin"
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].role, Role::Member);
        assert_eq!(accounts[1].role, Role::Admin);
        assert_eq!(accounts[1].display_name, "Test Admin");
    }

    #[test]
    fn missing_accounts_file_is_an_error() {
        let err = AccountRequest::list_from_file("./no-such-accounts.json").unwrap_err();
        assert!(format!("{err}").contains("accounts"));
    }
}
