#[derive(thiserror::Error)]
pub enum FirebaseError {
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Phone number already exists")]
    PhoneNumberAlreadyExists,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FirebaseError {
    /// Whether the error means the account is already present in Firebase
    /// Auth, as opposed to the call actually failing.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            FirebaseError::EmailAlreadyExists | FirebaseError::PhoneNumberAlreadyExists
        )
    }
}

impl std::fmt::Debug for FirebaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

// Taken from https://www.lpalmieri.com/posts/error-handling-rust/#internal-errors
fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_classification() {
        assert!(FirebaseError::EmailAlreadyExists.is_already_exists());
        assert!(FirebaseError::PhoneNumberAlreadyExists.is_already_exists());
        assert!(!FirebaseError::Other(anyhow::anyhow!("boom")).is_already_exists());
    }

    #[test]
    fn debug_output_includes_error_chain() {
        let root = anyhow::anyhow!("connection refused");
        let err = FirebaseError::Other(root.context("Failed to send create user request"));

        let rendered = format!("{err:?}");
        assert!(rendered.contains("Failed to send create user request"));
        assert!(rendered.contains("Caused by:"));
        assert!(rendered.contains("connection refused"));
    }
}
