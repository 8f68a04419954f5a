//! User entity <-> model mapper

use matcha_core::entities::User;
use matcha_core::value_objects::UserId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.user_id),
            name: model.name,
            email: model.email,
            username: model.username,
            fame_rating: model.fame_rating,
            is_verified: model.is_verified,
            last_login: model.last_login,
            created_at: model.created_at,
        }
    }
}
