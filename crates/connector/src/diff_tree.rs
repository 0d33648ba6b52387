//! Standard file actions for the changed-file tree

use featuredev_connector_core::DiffTreeActions;
use featuredev_protocol::{ActionStatus, DiffTreeFileInfo, FileActionName, FileNodeAction};

/// Pending files can be accepted or rejected, rejected files can be
/// restored, applied files are done.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDiffTreeActions;

impl DiffTreeActions for StandardDiffTreeActions {
    fn actions(&self, files: &[DiffTreeFileInfo]) -> Vec<FileNodeAction> {
        files.iter().flat_map(file_actions).collect()
    }
}

fn file_actions(file: &DiffTreeFileInfo) -> Vec<FileNodeAction> {
    if file.change_applied {
        return Vec::new();
    }
    if file.rejected {
        return vec![action(
            file,
            FileActionName::RevertRejection,
            "Revert rejection",
            "revert",
            None,
        )];
    }
    vec![
        action(
            file,
            FileActionName::AcceptChange,
            "Accept change",
            "ok",
            Some(ActionStatus::Success),
        ),
        action(
            file,
            FileActionName::RejectChange,
            "Reject change",
            "cancel",
            Some(ActionStatus::Error),
        ),
    ]
}

fn action(
    file: &DiffTreeFileInfo,
    name: FileActionName,
    description: &str,
    icon: &str,
    status: Option<ActionStatus>,
) -> FileNodeAction {
    FileNodeAction {
        file_path: file.zip_file_path.clone(),
        name,
        description: description.to_string(),
        icon: icon.to_string(),
        status,
    }
}
