//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::state::Notice;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    notice: &mut Option<Notice>,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *notice = Some(Notice::error("The app is busy; please retry."));
        }
        Err(TrySendError::Disconnected(_)) => {
            *notice = Some(Notice::error(
                "Backend worker disconnected (possible startup failure); restart the app.",
            ));
        }
    }
}
