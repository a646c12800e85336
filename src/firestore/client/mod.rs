use anyhow::{anyhow, Context};
use firestore_grpc::tonic::{
    codegen::InterceptedService, metadata::MetadataValue, transport::Channel, Request, Status,
};
use firestore_grpc::v1::document_transform::field_transform::{ServerValue, TransformType};
use firestore_grpc::v1::document_transform::FieldTransform;
use firestore_grpc::v1::firestore_client::FirestoreClient as GrpcFirestoreClient;
use firestore_grpc::v1::write::Operation;
use firestore_grpc::v1::{CommitRequest, Document, Write};
use prost_types::Timestamp;
use serde::Serialize;

use crate::error::FirebaseError;
use crate::firestore::serde::serialize_document_fields;
use crate::ServiceAccount;

use super::reference::DocumentReference;
use super::token_provider::FirestoreTokenProvider;

mod options;

pub use options::FirestoreClientOptions;

type InterceptorFunction = Box<dyn FnMut(Request<()>) -> Result<Request<()>, Status> + Send>;

pub struct FirestoreClient {
    client: GrpcFirestoreClient<InterceptedService<Channel, InterceptorFunction>>,
    database_path: String,
    root_resource_path: String,
}

fn create_auth_interceptor(mut token_provider: FirestoreTokenProvider) -> InterceptorFunction {
    Box::new(move |mut req: Request<()>| {
        let token = token_provider
            .get_token()
            .map_err(|_| Status::unauthenticated("Could not get token from token provider"))?;

        let bearer_token = format!("Bearer {token}");
        let mut header_value = MetadataValue::from_str(&bearer_token).map_err(|_| {
            Status::unauthenticated("Failed to construct metadata value for authorization token")
        })?;
        header_value.set_sensitive(true);

        req.metadata_mut().insert("authorization", header_value);

        Ok(req)
    })
}

impl FirestoreClient {
    /// Initialise a new client that can be used to write documents to a
    /// Firestore database.
    pub async fn initialise(
        service_account: ServiceAccount,
        options: FirestoreClientOptions,
    ) -> Result<Self, FirebaseError> {
        let channel = Channel::from_shared(options.host_url.clone())
            .context("Failed to create gRPC channel")?
            .connect()
            .await
            .context("Failed to create channel to endpoint")?;

        let project_id = service_account.project_id.clone();
        let token_provider = FirestoreTokenProvider::new(service_account);

        let service = GrpcFirestoreClient::with_interceptor(
            channel,
            create_auth_interceptor(token_provider),
        );

        let database_path = format!("projects/{project_id}/databases/(default)");
        let root_resource_path = format!("{database_path}/documents");

        Ok(Self {
            client: service,
            database_path,
            root_resource_path,
        })
    }

    /// Sets a document at the given document reference. If it doesn't already
    /// exist, it is created - and if it does exist already, it is overwritten.
    pub async fn set_document<T: Serialize>(
        &mut self,
        doc_ref: &DocumentReference,
        document: &T,
    ) -> Result<(), FirebaseError> {
        self.write_document(doc_ref, document, &[]).await?;
        Ok(())
    }

    /// Like [`set_document`](Self::set_document), but additionally asks
    /// Firestore to fill in the named fields with the server's request time.
    /// Use this for fields like `createdAt` that must not come from the
    /// machine running this tool.
    ///
    /// Returns the commit time reported by Firestore.
    pub async fn set_document_with_server_timestamp<T: Serialize>(
        &mut self,
        doc_ref: &DocumentReference,
        document: &T,
        timestamp_fields: &[&str],
    ) -> Result<Option<Timestamp>, FirebaseError> {
        self.write_document(doc_ref, document, timestamp_fields)
            .await
    }

    async fn write_document<T: Serialize>(
        &mut self,
        doc_ref: &DocumentReference,
        document: &T,
        timestamp_fields: &[&str],
    ) -> Result<Option<Timestamp>, FirebaseError> {
        // We should provide no timestamps when writing a document according
        // to Google's Firestore API reference; the transforms below are how
        // server-assigned times get into the document.
        let doc = Document {
            name: self.get_name_with(doc_ref),
            fields: serialize_document_fields(document)?,
            create_time: None,
            update_time: None,
        };

        let update_transforms = timestamp_fields
            .iter()
            .map(|field_path| FieldTransform {
                field_path: field_path.to_string(),
                transform_type: Some(TransformType::SetToServerValue(
                    ServerValue::RequestTime as i32,
                )),
            })
            .collect();

        let request = CommitRequest {
            database: self.database_path.clone(),
            writes: vec![Write {
                update_mask: None,
                update_transforms,
                current_document: None,
                operation: Some(Operation::Update(doc)),
            }],
            transaction: Vec::new(),
        };

        let res = self
            .client
            .commit(request)
            .await
            .map_err(|err| anyhow!(err).context(format!("Failed to write document '{doc_ref}'")))?;

        Ok(res.into_inner().commit_time)
    }

    /// Returns the full resource name of the document, for example
    /// `projects/{project_id}/databases/(default)/documents/users/{uid}`.
    fn get_name_with(&self, doc_ref: &DocumentReference) -> String {
        format!("{}/{}", self.root_resource_path, doc_ref)
    }
}
