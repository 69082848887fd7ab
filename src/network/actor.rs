//! Network actor - runs API calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;

/// Network actor that executes API commands, one task per request
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
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
                        Some(NetworkCommand::SetToken(token)) => {
                            tracing::debug!(authenticated = token.is_some(), "Token updated");
                            self.client.set_token(token);
                        }
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        // Snapshot of the client: token changes only affect later commands
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            let id = cmd.id();
            tracing::info!(?id, command = command_name(&cmd), "Executing request");
            let response = execute(&client, cmd).await;
            if let Some(response) = response {
                if response.is_ok() {
                    tracing::info!(id = response.id(), "Request completed");
                } else {
                    tracing::warn!(id = response.id(), "Request failed");
                }
                let _ = response_tx.send(response);
            }
        });
    }
}

fn command_name(cmd: &NetworkCommand) -> &'static str {
    match cmd {
        NetworkCommand::SetToken(_) => "set_token",
        NetworkCommand::SignIn { .. } => "POST /sessions",
        NetworkCommand::SignUp { .. } => "POST /users",
        NetworkCommand::FetchGroups { .. } => "GET /groups",
        NetworkCommand::FetchExercises { .. } => "GET /exercises/bygroup",
        NetworkCommand::FetchExercise { .. } => "GET /exercises/:id",
        NetworkCommand::RegisterHistory { .. } => "POST /history",
        NetworkCommand::FetchHistory { .. } => "GET /history",
        NetworkCommand::UpdateProfile { .. } => "PUT /users",
        NetworkCommand::UploadAvatar { .. } => "PATCH /users/avatar",
        NetworkCommand::Shutdown => "shutdown",
    }
}

/// Perform one command against the API
pub async fn execute(client: &ApiClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::SignIn { id, request } => NetworkResponse::SignedIn {
            id,
            result: client.sign_in(&request).await,
        },
        NetworkCommand::SignUp { id, request } => {
            let result = match client.create_user(&request).await {
                Ok(()) => {
                    let credentials = crate::models::SignInRequest {
                        email: request.email.clone(),
                        password: request.password.clone(),
                    };
                    client.sign_in(&credentials).await
                }
                Err(e) => Err(e),
            };
            NetworkResponse::SignedUp { id, result }
        }
        NetworkCommand::FetchGroups { id } => NetworkResponse::Groups {
            id,
            result: client.groups().await,
        },
        NetworkCommand::FetchExercises { id, group } => NetworkResponse::Exercises {
            id,
            result: client.exercises_by_group(&group).await,
        },
        NetworkCommand::FetchExercise { id, exercise_id } => NetworkResponse::ExerciseDetails {
            id,
            result: client.exercise(&exercise_id).await,
        },
        NetworkCommand::RegisterHistory { id, exercise_id } => NetworkResponse::HistoryRegistered {
            id,
            result: client.register_history(&exercise_id).await,
        },
        NetworkCommand::FetchHistory { id } => NetworkResponse::History {
            id,
            result: client.history().await,
        },
        NetworkCommand::UpdateProfile { id, request } => NetworkResponse::ProfileUpdated {
            id,
            result: client.update_profile(&request).await,
        },
        NetworkCommand::UploadAvatar { id, avatar } => NetworkResponse::AvatarUploaded {
            id,
            result: client.upload_avatar(&avatar).await,
        },
        NetworkCommand::SetToken(_) | NetworkCommand::Shutdown => return None,
    };
    Some(response)
}
