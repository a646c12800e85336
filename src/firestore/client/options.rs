#[derive(Clone)]
pub struct FirestoreClientOptions {
    pub host_url: String,
}

impl Default for FirestoreClientOptions {
    fn default() -> Self {
        Self {
            host_url: "https://firestore.googleapis.com".to_string(),
        }
    }
}

impl FirestoreClientOptions {
    /// Point the client at another Firestore endpoint, e.g. a local emulator
    /// at `https://127.0.0.1:8081`.
    pub fn host_url(mut self, host_url: impl Into<String>) -> Self {
        self.host_url = host_url.into();
        self
    }
}
