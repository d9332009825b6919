//! Backend worker: owns the tokio runtime and the HTTP client, consumes
//! UI commands, and reports results back as events.

use std::thread;

use client_core::{FeedbackClient, Settings};
use crossbeam_channel::{Receiver, Sender};
use zeroize::Zeroize;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorCategory::Transport,
                    UiErrorContext::Startup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut client = FeedbackClient::new(settings.api_root);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SignIn {
                        username,
                        mut password,
                    } => {
                        tracing::info!(username = %username, "backend: sign_in");
                        let outcome = client.authenticate(&username, &password).await;
                        password.zeroize();
                        match outcome {
                            Ok(session) => {
                                let _ = ui_tx.try_send(UiEvent::SignedIn(session));
                            }
                            Err(err) => {
                                tracing::warn!("backend: sign_in failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client(
                                    UiErrorContext::SignIn,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::SignUp {
                        username,
                        email,
                        mut password,
                    } => {
                        tracing::info!(username = %username, "backend: sign_up");
                        let outcome = client.register(&username, &email, &password).await;
                        password.zeroize();
                        match outcome {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::SignUpComplete);
                            }
                            Err(err) => {
                                tracing::warn!("backend: sign_up failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client(
                                    UiErrorContext::SignUp,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::SubmitFeedback { comment, rating } => {
                        tracing::info!(rating = rating.as_u8(), "backend: submit_feedback");
                        match client.submit_feedback(&comment, rating).await {
                            Ok(result) => {
                                let _ = ui_tx.try_send(UiEvent::SentimentReady(result));
                            }
                            Err(err) => {
                                tracing::warn!("backend: submit_feedback failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client(
                                    UiErrorContext::Feedback,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::FetchAdminSnapshot { generation } => {
                        tracing::info!(generation, "backend: fetch_admin_snapshot");
                        match client.fetch_admin_snapshot().await {
                            Ok(snapshot) => {
                                let _ = ui_tx.try_send(UiEvent::AdminSnapshotLoaded {
                                    generation,
                                    snapshot,
                                });
                            }
                            Err(err) => {
                                tracing::warn!("backend: fetch_admin_snapshot failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client(
                                    UiErrorContext::AdminFetch,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::DeleteUser {
                        user_id,
                        generation,
                    } => {
                        tracing::info!(user_id = user_id.0, generation, "backend: delete_user");
                        match client.delete_user(user_id).await {
                            Ok(snapshot) => {
                                let _ = ui_tx.try_send(UiEvent::AdminSnapshotLoaded {
                                    generation,
                                    snapshot,
                                });
                            }
                            Err(err) => {
                                tracing::warn!("backend: delete_user failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client(
                                    UiErrorContext::DeleteUser,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::SignOut => {
                        tracing::info!("backend: sign_out");
                        client.sign_out();
                    }
                }
            }
        });
    });
}
