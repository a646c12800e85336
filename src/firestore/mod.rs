//! # Firestore
//!
//! A Firestore client covering the document write path, which is all that
//! account provisioning needs.
//!
//! ## Initializing the client
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() {
//! use fireseed::{
//!     firestore::client::{FirestoreClient, FirestoreClientOptions},
//!     ServiceAccount,
//! };
//!
//! // Load the service account, which specifies which project we will connect
//! // to and the secret keys used for authentication.
//! let service_account = ServiceAccount::from_file("./serviceAccountKey.json").unwrap();
//!
//! // Configure the client - we just want the default. To talk to a local
//! // Firestore emulator instead, override the host URL:
//! // `FirestoreClientOptions::default().host_url("https://127.0.0.1:8081")`.
//! let client_options = FirestoreClientOptions::default();
//!
//! let mut client = FirestoreClient::initialise(service_account, client_options)
//!     .await
//!     .unwrap();
//! # }
//! ```
//!
//! ## Writing a document
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # use fireseed::{firestore::client::{FirestoreClient, FirestoreClientOptions}, ServiceAccount};
//! # let service_account = ServiceAccount::from_file("./serviceAccountKey.json")?;
//! # let mut client =
//! #     FirestoreClient::initialise(service_account, FirestoreClientOptions::default()).await?;
//! use fireseed::firestore::collection;
//!
//! let doc_ref = collection("greetings").doc("first");
//! let doc = serde_json::json!({ "message": "Hi Mom" });
//!
//! client.set_document(&doc_ref, &doc).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod reference;
pub(crate) mod serde;
mod token_provider;

pub use reference::collection;
