//! The signing component the host ui talks to.
//!
//! It owns no drawing logic: the captured signature comes from a [`SignaturePad`],
//! the stamped result goes to a [`WorkflowState`] and optionally to a [`DocumentStore`].
//! All collaborators are injected, nothing is loaded at runtime.

use crate::{
    config::StamperConfig,
    output::EncodedDocument,
    stamper::{PdfStamper, StampedDocument},
    submission::DocumentSubmission,
    utils::decode_payload,
    Error,
};
use serde_json::Value;
use std::{sync::Arc, thread::JoinHandle};

/// Canvas based signature capture.
pub trait SignaturePad {
    /// The drawing as a png `data:` URI.
    fn to_data_url(&self) -> String;

    fn clear(&mut self);
}

/// Sink for the host workflow's data.
pub trait WorkflowState {
    fn update_state(&mut self, payload: &str);
}

/// External document storage. Called from a detached thread.
pub trait DocumentStore: Send + Sync {
    fn submit(&self, payload: &Value) -> Result<Value, Error>;
}

/// Accepts the document to be signed from the host.
pub trait ConfigurableInput {
    /// Set the source document as base64 text or a `data:` URI. `None` is ignored.
    fn set_document(&mut self, value: Option<String>);

    fn document(&self) -> Option<&str>;
}

/// The commands a signing ui issues.
pub trait StampRequestHandler {
    fn handle_save(&mut self) -> Result<SaveOutcome, Error>;

    fn handle_clear(&mut self) -> Result<(), Error>;
}

/// A running fire-and-forget submission. Dropping it detaches the submission.
#[derive(Debug)]
pub struct PersistenceHandle {
    handle: JoinHandle<Result<Value, Error>>,
}

impl PersistenceHandle {
    fn spawn(store: Arc<dyn DocumentStore>, payload: Value) -> Self {
        let handle = std::thread::spawn(move || {
            let result = store.submit(&payload);
            match &result {
                Ok(response) => log::info!("Document submitted: {}", response),
                Err(err) => log::error!("Document submission failed: {}", err),
            }
            result
        });
        PersistenceHandle { handle }
    }

    /// Wait for the submission to finish.
    pub fn join(self) -> Result<Value, Error> {
        self.handle
            .join()
            .map_err(|_| Error::Persistence("submission thread panicked".to_owned()))?
    }
}

/// What a successful save produced.
#[derive(Debug)]
pub struct SaveOutcome {
    pub stamped: StampedDocument,
    pub encoded: EncodedDocument,
    /// Present when persistence is enabled and a store is attached.
    pub persistence: Option<PersistenceHandle>,
}

pub struct SignPdfComponent<S: WorkflowState> {
    config: StamperConfig,
    stamper: PdfStamper,
    state: S,
    signature_pad: Option<Box<dyn SignaturePad>>,
    document_store: Option<Arc<dyn DocumentStore>>,
    content_version_data: Option<String>,
    /// Last captured signature, as a data URI.
    result: Option<String>,
    result_file: Option<EncodedDocument>,
}

impl<S: WorkflowState> SignPdfComponent<S> {
    pub fn new(config: StamperConfig, state: S) -> Result<Self, Error> {
        Ok(SignPdfComponent {
            stamper: PdfStamper::from_config(&config)?,
            config,
            state,
            signature_pad: None,
            document_store: None,
            content_version_data: None,
            result: None,
            result_file: None,
        })
    }

    pub fn attach_signature_pad(&mut self, pad: Box<dyn SignaturePad>) {
        self.signature_pad = Some(pad);
    }

    pub fn with_signature_pad(mut self, pad: Box<dyn SignaturePad>) -> Self {
        self.attach_signature_pad(pad);
        self
    }

    pub fn with_document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.document_store = Some(store);
        self
    }

    pub fn config(&self) -> &StamperConfig {
        &self.config
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn result_file(&self) -> Option<&EncodedDocument> {
        self.result_file.as_ref()
    }

    fn signature_pad(&self) -> Result<&dyn SignaturePad, Error> {
        self.signature_pad.as_deref().ok_or_else(|| {
            log::error!("Signature pad used before it was attached.");
            Error::ResourceLoad("signature pad is not initialized".to_owned())
        })
    }

    fn persist(&self, stamped: &StampedDocument) -> Option<PersistenceHandle> {
        if !self.config.persist {
            return None;
        }
        let store = match &self.document_store {
            Some(store) => Arc::clone(store),
            None => {
                log::warn!("Persistence is enabled but no document store is attached.");
                return None;
            }
        };
        match DocumentSubmission::new(&self.config.file_name, stamped.as_bytes()).to_json() {
            Ok(payload) => Some(PersistenceHandle::spawn(store, payload)),
            Err(err) => {
                log::error!("Could not build document submission: {}", err);
                None
            }
        }
    }
}

impl<S: WorkflowState> ConfigurableInput for SignPdfComponent<S> {
    fn set_document(&mut self, value: Option<String>) {
        if let Some(value) = value {
            self.content_version_data = Some(value);
        }
    }

    fn document(&self) -> Option<&str> {
        self.content_version_data.as_deref()
    }
}

impl<S: WorkflowState> StampRequestHandler for SignPdfComponent<S> {
    fn handle_save(&mut self) -> Result<SaveOutcome, Error> {
        let data_url = self.signature_pad()?.to_data_url();
        self.result = Some(data_url.clone());

        let source = self
            .content_version_data
            .as_deref()
            .ok_or_else(|| Error::Parse("no document has been set".to_owned()))?;
        let source_pdf = decode_payload(source)?;
        let signature_png = decode_payload(&data_url)?;

        let stamped = self
            .stamper
            .stamp(&source_pdf, &signature_png, self.config.placement)?;
        let encoded = stamped.encode(self.config.encoding);
        self.state.update_state(encoded.payload());
        self.result_file = Some(encoded.clone());

        let persistence = self.persist(&stamped);
        log::info!("Signature captured.");
        Ok(SaveOutcome {
            stamped,
            encoded,
            persistence,
        })
    }

    fn handle_clear(&mut self) -> Result<(), Error> {
        self.signature_pad
            .as_deref_mut()
            .ok_or_else(|| Error::ResourceLoad("signature pad is not initialized".to_owned()))?
            .clear();
        self.result = None;
        self.result_file = None;
        log::info!("Signature cleared.");
        Ok(())
    }
}
