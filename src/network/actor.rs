//! Network actor - runs backend calls in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::ApiError;
use crate::messages::network::Operation;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::FormsClient;

/// Network actor that executes one task per command, without retries
pub struct NetworkActor {
    client: FormsClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: FormsClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        self.active_requests.spawn(async move {
            let response = execute(&client, cmd).await;
            if let Some(response) = response {
                let _ = response_tx.send(response);
            }
        });
    }
}

fn failed(id: u64, operation: Operation, err: ApiError) -> NetworkResponse {
    tracing::warn!(id, ?operation, error = %err, "Backend call failed");
    NetworkResponse::Failed {
        id,
        operation,
        detail: err.summary(),
    }
}

/// Run one command to completion
pub async fn execute(client: &FormsClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::ListForms { id } => {
            tracing::info!(id, "Listing forms");
            match client.list_forms().await {
                Ok(forms) => NetworkResponse::FormsListed { id, forms },
                Err(e) => failed(id, Operation::ListForms, e),
            }
        }

        NetworkCommand::FetchForm { id, form_id, purpose } => {
            tracing::info!(id, form_id = %form_id, ?purpose, "Fetching form");
            match client.get_form(&form_id).await {
                Ok(mut form) => {
                    if form.id.is_none() {
                        form.id = Some(form_id);
                    }
                    NetworkResponse::FormLoaded { id, form, purpose }
                }
                Err(e) => failed(id, Operation::FetchForm, e),
            }
        }

        NetworkCommand::SaveForm { id, form, form_id } => {
            let operation = if form_id.is_some() {
                Operation::UpdateForm
            } else {
                Operation::CreateForm
            };
            tracing::info!(id, title = %form.title, fields = form.field_count(), ?operation, "Saving form");
            let saved = match form_id {
                Some(existing) => client.update_form(&existing, &form).await.map(|_| existing),
                None => client.create_form(&form).await,
            };
            match saved {
                Ok(form_id) => {
                    let share_link = match client.share_form(&form_id).await {
                        Ok(link) => Some(link),
                        Err(e) => {
                            tracing::warn!(id, form_id = %form_id, error = %e, "Form saved but sharing failed");
                            None
                        }
                    };
                    tracing::info!(id, form_id = %form_id, "Form saved");
                    NetworkResponse::FormSaved { id, form_id, share_link }
                }
                Err(e) => failed(id, operation, e),
            }
        }

        NetworkCommand::SubmitResponses { id, form_id, entries, files } => {
            tracing::info!(id, form_id = %form_id, answers = entries.len(), files = files.len(), "Submitting responses");
            match client.submit(&form_id, &entries, &files).await {
                Ok(()) => NetworkResponse::Submitted { id },
                Err(e) => failed(id, Operation::Submit, e),
            }
        }

        NetworkCommand::FetchResponses { id, form_id } => {
            tracing::info!(id, form_id = %form_id, "Fetching responses");
            match client.list_responses(&form_id).await {
                Ok(submissions) => NetworkResponse::ResponsesLoaded { id, form_id, submissions },
                Err(e) => failed(id, Operation::FetchResponses, e),
            }
        }

        NetworkCommand::Shutdown => return None,
    };
    Some(response)
}
