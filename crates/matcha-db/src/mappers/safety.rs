//! View, block and report mappers

use matcha_core::entities::{Block, ProfileView, Report};
use matcha_core::value_objects::{BlockId, ReportId, UserId, ViewId};

use crate::models::{BlockModel, ProfileViewModel, ReportModel};

impl From<ProfileViewModel> for ProfileView {
    fn from(model: ProfileViewModel) -> Self {
        ProfileView {
            id: ViewId::new(model.view_id),
            viewer_id: UserId::new(model.viewer_id),
            viewed_id: UserId::new(model.viewed_id),
            created_at: model.created_at,
        }
    }
}

impl From<BlockModel> for Block {
    fn from(model: BlockModel) -> Self {
        Block {
            id: BlockId::new(model.block_id),
            blocker_id: UserId::new(model.blocker_id),
            blocked_id: UserId::new(model.blocked_id),
            created_at: model.created_at,
        }
    }
}

impl From<ReportModel> for Report {
    fn from(model: ReportModel) -> Self {
        Report {
            id: ReportId::new(model.report_id),
            reporter_id: UserId::new(model.reporter_id),
            reported_id: UserId::new(model.reported_id),
            reason: model.reason,
            created_at: model.created_at,
        }
    }
}
