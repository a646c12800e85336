//! Account provisioning.
//!
//! The [`Provisioner`] walks a list of [`AccountRequest`]s in order. For each
//! one it creates a Firebase Auth user and then writes the profile document
//! under the returned uid. Every record runs inside its own error boundary:
//! an account that already exists is reported and skipped, a failure is
//! reported with its message, and in both cases the remaining records are
//! still attempted.

use async_trait::async_trait;

use crate::auth::{models::NewUser, FirebaseAuthClient};
use crate::error::FirebaseError;
use crate::firestore::{client::FirestoreClient, collection};

mod models;

pub use models::{AccountRequest, ProfileRecord, Role};

/// The collection that holds one profile document per account, keyed by uid.
const USERS_COLLECTION: &str = "users";

/// The profile field that Firestore fills in with the commit time.
const CREATED_AT_FIELD: &str = "createdAt";

/// The seam towards Firebase Auth: creates an account and returns its uid.
#[async_trait]
pub trait IdentityProvider {
    async fn create_account(&mut self, account: &AccountRequest) -> Result<String, FirebaseError>;
}

/// The seam towards Firestore: persists a profile document for a uid.
#[async_trait]
pub trait ProfileStore {
    async fn write_profile(
        &mut self,
        user_id: &str,
        profile: &ProfileRecord,
    ) -> Result<(), FirebaseError>;
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    async fn create_account(&mut self, account: &AccountRequest) -> Result<String, FirebaseError> {
        self.create_user(&NewUser::from(account)).await
    }
}

#[async_trait]
impl ProfileStore for FirestoreClient {
    async fn write_profile(
        &mut self,
        user_id: &str,
        profile: &ProfileRecord,
    ) -> Result<(), FirebaseError> {
        let doc_ref = collection(USERS_COLLECTION).doc(user_id);

        let commit_time = self
            .set_document_with_server_timestamp(&doc_ref, profile, &[CREATED_AT_FIELD])
            .await?;

        if let Some(commit_time) = commit_time {
            tracing::debug!(
                document = %doc_ref,
                committed_at = commit_time.seconds,
                "wrote profile document"
            );
        }

        Ok(())
    }
}

pub struct Provisioner<I, S> {
    identity: I,
    profiles: S,
}

impl<I, S> Provisioner<I, S>
where
    I: IdentityProvider + Send,
    S: ProfileStore + Send,
{
    pub fn new(identity: I, profiles: S) -> Self {
        Self { identity, profiles }
    }

    /// Provisions every account in the list, in order, and reports the
    /// outcome of each. Records are processed strictly sequentially, and one
    /// record's failure never prevents the next from being attempted.
    pub async fn run(&mut self, accounts: &[AccountRequest]) -> Report {
        let mut outcomes = Vec::with_capacity(accounts.len());

        for account in accounts {
            tracing::info!(email = %account.email, role = %account.role, "creating account");

            let status = self.provision_account(account).await;

            match &status {
                RecordStatus::Created { user_id } => {
                    tracing::info!(email = %account.email, uid = %user_id, "account provisioned");
                }
                RecordStatus::AlreadyExists => {
                    tracing::info!(email = %account.email, "account already exists, skipping");
                }
                RecordStatus::Failed { error } => {
                    tracing::error!(email = %account.email, error = %error, "provisioning failed");
                }
            }

            outcomes.push(RecordOutcome {
                account: account.clone(),
                status,
            });
        }

        Report { outcomes }
    }

    async fn provision_account(&mut self, account: &AccountRequest) -> RecordStatus {
        let user_id = match self.identity.create_account(account).await {
            Ok(user_id) => user_id,
            Err(err) if err.is_already_exists() => return RecordStatus::AlreadyExists,
            Err(err) => {
                return RecordStatus::Failed {
                    error: format!("{err:?}"),
                }
            }
        };

        let profile = ProfileRecord::for_account(account);

        // A failed write leaves an Auth account with no profile document
        // behind. We report it rather than roll the account back; rerunning
        // the tool will report AlreadyExists for it.
        match self.profiles.write_profile(&user_id, &profile).await {
            Ok(()) => RecordStatus::Created { user_id },
            Err(err) => RecordStatus::Failed {
                error: format!("{err:?}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    Created { user_id: String },
    AlreadyExists,
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub account: AccountRequest,
    pub status: RecordStatus,
}

/// The per-record outcome list of one provisioning run.
#[derive(Debug, Clone)]
pub struct Report {
    pub outcomes: Vec<RecordOutcome>,
}

impl Report {
    /// True when every record ended up provisioned, whether by this run or a
    /// previous one.
    pub fn fully_provisioned(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| !matches!(outcome.status, RecordStatus::Failed { .. }))
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let created = self
            .outcomes
            .iter()
            .filter(|o| matches!(o.status, RecordStatus::Created { .. }))
            .count();
        let existing = self
            .outcomes
            .iter()
            .filter(|o| o.status == RecordStatus::AlreadyExists)
            .count();
        let failed = self.outcomes.len() - created - existing;

        writeln!(
            f,
            "Processed {} account(s): {created} created, {existing} already existed, {failed} failed",
            self.outcomes.len()
        )?;

        // The credential summary is printed in plaintext on purpose: these
        // are throwaway test accounts and the operator needs the passwords
        // to log in with them.
        for (index, outcome) in self.outcomes.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Account {} ({})", index + 1, outcome.account.role)?;
            writeln!(f, "   Email:    {}", outcome.account.email)?;
            writeln!(f, "   Password: {}", outcome.account.password)?;
            match &outcome.status {
                RecordStatus::Created { user_id } => {
                    writeln!(f, "   Status:   created (uid: {user_id})")?;
                }
                RecordStatus::AlreadyExists => {
                    writeln!(f, "   Status:   already exists, profile write skipped")?;
                }
                RecordStatus::Failed { error } => {
                    writeln!(f, "   Status:   FAILED: {error}")?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: Role) -> AccountRequest {
        AccountRequest {
            email: format!("{role}@example.com"),
            password: "12345678".to_string(),
            display_name: "Someone".to_string(),
            phone_number: "+918947038661".to_string(),
            role,
        }
    }

    fn report() -> Report {
        Report {
            outcomes: vec![
                RecordOutcome {
                    account: account(Role::Member),
                    status: RecordStatus::Created {
                        user_id: "uid-1".to_string(),
                    },
                },
                RecordOutcome {
                    account: account(Role::Admin),
                    status: RecordStatus::Failed {
                        error: "quota exceeded".to_string(),
                    },
                },
            ],
        }
    }

    #[test]
    fn summary_lists_credentials_and_statuses() {
        let rendered = report().to_string();

        assert!(rendered.contains("2 account(s): 1 created, 0 already existed, 1 failed"));
        assert!(rendered.contains("Account 1 (member)"));
        assert!(rendered.contains("Email:    member@example.com"));
        assert!(rendered.contains("Password: 12345678"));
        assert!(rendered.contains("created (uid: uid-1)"));
        assert!(rendered.contains("FAILED: quota exceeded"));
    }

    #[test]
    fn a_failed_record_marks_the_run_as_not_fully_provisioned() {
        assert!(!report().fully_provisioned());
    }

    #[test]
    fn already_existing_records_still_count_as_provisioned() {
        let report = Report {
            outcomes: vec![RecordOutcome {
                account: account(Role::Member),
                status: RecordStatus::AlreadyExists,
            }],
        };
        assert!(report.fully_provisioned());
    }

    #[test]
    fn an_empty_run_is_fully_provisioned() {
        let report = Report { outcomes: vec![] };
        assert!(report.fully_provisioned());
    }
}
