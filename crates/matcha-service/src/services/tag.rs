//! Tag service
//!
//! Interest tags and their assignment to users. Names are stored in
//! normalized form so lookups and filters match regardless of case.

use matcha_core::entities::Tag;
use matcha_core::value_objects::{TagId, UserId};
use matcha_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    CreateTagRequest, TagAssignmentRequest, TagResponse, TagUsageResponse, UserTagsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct TagService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TagService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateTagRequest) -> ServiceResult<TagResponse> {
        let name = Tag::normalize(&request.name);
        if name.is_empty() {
            return Err(ServiceError::validation("Tag name must not be blank"));
        }
        let tag = self.ctx.tag_repo().create(&name).await?;
        info!(tag_id = %tag.id, name = %tag.name, "Tag created");
        Ok(tag.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, tag_id: TagId) -> ServiceResult<TagResponse> {
        let tag = self
            .ctx
            .tag_repo()
            .find_by_id(tag_id)
            .await?
            .ok_or(DomainError::TagNotFound(tag_id))?;
        Ok(tag.into())
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<TagResponse>> {
        let tags = self.ctx.tag_repo().list().await?;
        Ok(tags.into_iter().map(TagResponse::from).collect())
    }

    /// Delete a tag; users carrying it lose it
    #[instrument(skip(self))]
    pub async fn delete(&self, tag_id: TagId) -> ServiceResult<()> {
        self.ctx.tag_repo().delete(tag_id).await?;
        info!(tag_id = %tag_id, "Tag deleted");
        Ok(())
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id, tag_id = %request.tag_id))]
    pub async fn assign(&self, request: TagAssignmentRequest) -> ServiceResult<()> {
        self.ctx
            .tag_repo()
            .assign(request.user_id, request.tag_id)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id, tag_id = %request.tag_id))]
    pub async fn unassign(&self, request: TagAssignmentRequest) -> ServiceResult<()> {
        self.ctx
            .tag_repo()
            .unassign(request.user_id, request.tag_id)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn user_tags(&self, user_id: UserId) -> ServiceResult<UserTagsResponse> {
        let tags = self.ctx.tag_repo().find_by_user(user_id).await?;
        Ok(UserTagsResponse {
            user_id,
            tags: tags.into_iter().map(TagResponse::from).collect(),
        })
    }

    /// Most used tags first
    #[instrument(skip(self))]
    pub async fn popular(&self, limit: i64) -> ServiceResult<Vec<TagUsageResponse>> {
        let usage = self.ctx.tag_repo().popular(limit).await?;
        Ok(usage.into_iter().map(TagUsageResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: i64) -> ServiceResult<Vec<TagResponse>> {
        let needle = Tag::normalize(query);
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let tags = self.ctx.tag_repo().search(&needle, limit).await?;
        Ok(tags.into_iter().map(TagResponse::from).collect())
    }
}
