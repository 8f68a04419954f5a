//! In-memory repositories and a capturing publisher for service tests

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use matcha_common::JwtService;
use matcha_core::entities::{
    Block, Candidate, Chat, Match, MatchStats, Message, NewNotification, NewUser, Notification,
    NotificationCounts, Preferences, Profile, ProfileView, Report, SearchFilter, Swipe,
    SwipeSummary, Tag, TagUsage, User, UserUpdate,
};
use matcha_core::error::DomainError;
use matcha_core::rules::{compute_fame, plan_notifications, FameInputs, SwipeParty, SwipeResolution};
use matcha_core::traits::{
    BlockRepository, ChatRepository, MatchRepository, MessageRepository, NotificationRepository,
    ProfileRepository, RealtimePublisher, RepoResult, ReportRepository, SwipeOutcome,
    SwipeRepository, TagRepository, TokenRepository, UserRepository, ViewRepository,
};
use matcha_core::value_objects::{
    BlockId, ChatId, MatchId, MatchPair, MessageId, NotificationId, ReportId, SwipeDirection,
    SwipeId, TagId, UserId, ViewId,
};

use super::context::ServiceContext;

const TEST_SECRET: &str = "test-secret-key-that-is-at-least-32-bytes";

#[derive(Default)]
struct State {
    next_id: i64,
    fail_writes: bool,
    users: BTreeMap<UserId, (User, Option<String>)>,
    revoked: HashSet<String>,
    profiles: HashMap<UserId, Profile>,
    preferences: HashMap<UserId, Preferences>,
    swipes: Vec<Swipe>,
    matches: Vec<Match>,
    chats: Vec<Chat>,
    messages: Vec<Message>,
    notifications: Vec<Notification>,
    views: Vec<ProfileView>,
    blocks: Vec<Block>,
    reports: Vec<Report>,
    tags: BTreeMap<TagId, Tag>,
    user_tags: BTreeSet<(UserId, TagId)>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_writable(&self) -> RepoResult<()> {
        if self.fail_writes {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }

    fn user_name(&self, id: UserId) -> RepoResult<String> {
        self.users
            .get(&id)
            .map(|(u, _)| u.name.clone())
            .ok_or(DomainError::UserNotFound(id))
    }

    fn require_user(&self, id: UserId) -> RepoResult<()> {
        self.user_name(id).map(|_| ())
    }

    fn insert_notification(&mut self, new: &NewNotification) -> RepoResult<Notification> {
        self.require_user(new.user_id)?;
        let notification = Notification {
            id: NotificationId::new(self.next_id()),
            user_id: new.user_id,
            kind: new.kind,
            content: new.content.clone(),
            related_user_id: new.related_user_id,
            is_read: false,
            created_at: Utc::now(),
        };
        self.notifications.push(notification.clone());
        Ok(notification)
    }

    fn refresh_fame(&mut self, user: UserId) {
        let count = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        let inputs = FameInputs {
            likes: count(
                self.swipes
                    .iter()
                    .filter(|s| s.swiped_id == user && s.direction.is_like())
                    .count(),
            ),
            matches: count(
                self.matches
                    .iter()
                    .filter(|m| m.user1_id == user || m.user2_id == user)
                    .count(),
            ),
            views: count(self.views.iter().filter(|v| v.viewed_id == user).count()),
            reports: count(self.reports.iter().filter(|r| r.reported_id == user).count()),
            blocks: count(self.blocks.iter().filter(|b| b.blocked_id == user).count()),
            profile_complete: self.profiles.get(&user).is_some_and(Profile::is_complete),
        };
        if let Some((u, _)) = self.users.get_mut(&user) {
            u.fame_rating = compute_fame(inputs);
        }
    }

    fn chat_for_match(&self, match_id: MatchId) -> Option<&Chat> {
        self.chats.iter().find(|c| c.match_id == match_id)
    }

    fn tag_names(&self, user: UserId) -> BTreeSet<String> {
        self.user_tags
            .iter()
            .filter(|(u, _)| *u == user)
            .filter_map(|(_, t)| self.tags.get(t).map(|tag| tag.name.clone()))
            .collect()
    }

    fn carries_any(&self, user: UserId, wanted: &[String]) -> bool {
        wanted.is_empty() || self.tag_names(user).iter().any(|n| wanted.contains(n))
    }

    fn blocked_between(&self, a: UserId, b: UserId) -> bool {
        self.blocks.iter().any(|x| {
            (x.blocker_id == a && x.blocked_id == b) || (x.blocker_id == b && x.blocked_id == a)
        })
    }

    /// Candidate row for `me`, or `None` when the profile has no coordinates
    fn candidate(&self, me: UserId, p: &Profile) -> Option<Candidate> {
        let (lat, lon) = p.coordinates()?;
        let (user, _) = self.users.get(&p.user_id)?;
        let mine = self.tag_names(me);
        Some(Candidate {
            user_id: p.user_id,
            name: user.name.clone(),
            fame_rating: user.fame_rating,
            age: p.age,
            bio: p.bio.clone(),
            gender: p.gender.clone(),
            avatar_url: p.avatar_url.clone(),
            latitude: lat,
            longitude: lon,
            created_at: user.created_at,
            common_tags: self.tag_names(p.user_id).intersection(&mine).cloned().collect(),
        })
    }
}

/// Every repository over one mutex, so each call is atomic
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Make every subsequent write fail as a database outage would
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    pub fn add_user(&self, name: &str) -> UserId {
        let mut state = self.state.lock();
        let id = UserId::new(state.next_id());
        let user = User {
            id,
            name: name.to_string(),
            email: format!("{name}@example.com"),
            username: None,
            fame_rating: 0,
            is_verified: false,
            last_login: None,
            created_at: Utc::now(),
        };
        state.users.insert(id, (user, None));
        id
    }

    pub fn fame(&self, user: UserId) -> i32 {
        self.state
            .lock()
            .users
            .get(&user)
            .map_or(0, |(u, _)| u.fame_rating)
    }

    pub fn notifications_for(&self, user: UserId) -> Vec<Notification> {
        self.state
            .lock()
            .notifications
            .iter()
            .filter(|n| n.user_id == user)
            .cloned()
            .collect()
    }

    pub fn swipe_rows(&self) -> Vec<Swipe> {
        self.state.lock().swipes.clone()
    }

    pub fn all_matches(&self) -> Vec<Match> {
        self.state.lock().matches.clone()
    }

    pub fn all_chats(&self) -> Vec<Chat> {
        self.state.lock().chats.clone()
    }

    pub fn set_last_login(&self, user: UserId, at: DateTime<Utc>) {
        if let Some((u, _)) = self.state.lock().users.get_mut(&user) {
            u.last_login = Some(at);
        }
    }

    /// Back-date a match so time-windowed stats can be exercised
    pub fn age_match(&self, id: MatchId, days: i64) {
        let mut state = self.state.lock();
        if let Some(m) = state.matches.iter_mut().find(|m| m.id == id) {
            m.created_at = Utc::now() - Duration::days(days);
        }
    }
}

// ============================================================================
// Users & tokens
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .find(|(u, _)| u.email.eq_ignore_ascii_case(email))
            .map(|(u, _)| u.clone()))
    }

    async fn create(&self, new: &NewUser) -> RepoResult<User> {
        let mut state = self.state.lock();
        state.check_writable()?;
        if state
            .users
            .values()
            .any(|(u, _)| u.email.eq_ignore_ascii_case(&new.email))
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        if new.username.is_some()
            && state
                .users
                .values()
                .any(|(u, _)| u.username == new.username)
        {
            return Err(DomainError::UsernameAlreadyExists);
        }
        let user = User {
            id: UserId::new(state.next_id()),
            name: new.name.clone(),
            email: new.email.clone(),
            username: new.username.clone(),
            fame_rating: 0,
            is_verified: false,
            last_login: None,
            created_at: Utc::now(),
        };
        state
            .users
            .insert(user.id, (user.clone(), Some(new.password_hash.clone())));
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.check_writable()?;
        state.users.remove(&id).ok_or(DomainError::UserNotFound(id))?;
        state.profiles.remove(&id);
        state.preferences.remove(&id);
        state.swipes.retain(|s| s.swiper_id != id && s.swiped_id != id);
        let gone: Vec<MatchId> = state
            .matches
            .iter()
            .filter(|m| m.user1_id == id || m.user2_id == id)
            .map(|m| m.id)
            .collect();
        state.matches.retain(|m| !gone.contains(&m.id));
        let gone_chats: Vec<ChatId> = state
            .chats
            .iter()
            .filter(|c| gone.contains(&c.match_id))
            .map(|c| c.id)
            .collect();
        state.chats.retain(|c| !gone_chats.contains(&c.id));
        state
            .messages
            .retain(|m| !gone_chats.contains(&m.chat_id) && m.sender_id != id);
        state.notifications.retain(|n| n.user_id != id);
        for n in &mut state.notifications {
            if n.related_user_id == Some(id) {
                n.related_user_id = None;
            }
        }
        state.views.retain(|v| v.viewer_id != id && v.viewed_id != id);
        state.blocks.retain(|b| b.blocker_id != id && b.blocked_id != id);
        state.reports.retain(|r| r.reporter_id != id && r.reported_id != id);
        state.user_tags.retain(|(u, _)| *u != id);
        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self
            .state
            .lock()
            .users
            .get(&id)
            .and_then(|(_, hash)| hash.clone()))
    }

    async fn touch_last_login(&self, id: UserId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let (user, _) = state.users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        user.last_login = Some(Utc::now());
        Ok(())
    }

    async fn update(&self, id: UserId, update: &UserUpdate) -> RepoResult<User> {
        let mut state = self.state.lock();
        state.check_writable()?;
        if let Some(email) = &update.email {
            if state
                .users
                .values()
                .any(|(u, _)| u.id != id && u.email.eq_ignore_ascii_case(email))
            {
                return Err(DomainError::EmailAlreadyExists);
            }
        }
        let (user, _) = state.users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        if let Some(name) = &update.name {
            user.name.clone_from(name);
        }
        if let Some(email) = &update.email {
            user.email.clone_from(email);
        }
        Ok(user.clone())
    }

    async fn find_many(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .values()
            .filter(|(u, _)| ids.contains(&u.id))
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn seen_since(&self, cutoff: DateTime<Utc>, limit: i64) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        let mut out: Vec<User> = state
            .users
            .values()
            .filter(|(u, _)| u.last_login.is_some_and(|at| at >= cutoff))
            .map(|(u, _)| u.clone())
            .collect();
        out.sort_by(|a, b| b.last_login.cmp(&a.last_login));
        out.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(out)
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn revoke(&self, jti: &str, _expires_at: DateTime<Utc>) -> RepoResult<()> {
        self.state.lock().revoked.insert(jti.to_string());
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> RepoResult<bool> {
        Ok(self.state.lock().revoked.contains(jti))
    }
}

// ============================================================================
// Profiles
// ============================================================================

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find(&self, user_id: UserId) -> RepoResult<Option<Profile>> {
        Ok(self.state.lock().profiles.get(&user_id).cloned())
    }

    async fn upsert(&self, profile: &Profile) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.check_writable()?;
        state.require_user(profile.user_id)?;
        state.profiles.insert(profile.user_id, profile.clone());
        state.refresh_fame(profile.user_id);
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> RepoResult<()> {
        let mut state = self.state.lock();
        state
            .profiles
            .remove(&user_id)
            .ok_or(DomainError::ProfileNotFound(user_id))?;
        state.refresh_fame(user_id);
        Ok(())
    }

    async fn find_preferences(&self, user_id: UserId) -> RepoResult<Option<Preferences>> {
        Ok(self.state.lock().preferences.get(&user_id).copied())
    }

    async fn upsert_preferences(&self, preferences: &Preferences) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.require_user(preferences.user_id)?;
        state.preferences.insert(preferences.user_id, *preferences);
        Ok(())
    }

    async fn discovery_candidates(
        &self,
        prefs: &Preferences,
        tags: &[String],
    ) -> RepoResult<Vec<Candidate>> {
        let state = self.state.lock();
        let me = prefs.user_id;
        let candidates = state
            .profiles
            .values()
            .filter(|p| p.user_id != me)
            .filter(|p| (prefs.age_min..=prefs.age_max).contains(&p.age))
            .filter(|p| prefs.preferred_gender.accepts(&p.gender))
            .filter(|p| state.carries_any(p.user_id, tags))
            .filter(|p| {
                !state
                    .swipes
                    .iter()
                    .any(|s| s.swiper_id == me && s.swiped_id == p.user_id)
            })
            .filter(|p| {
                !state
                    .views
                    .iter()
                    .any(|v| v.viewer_id == me && v.viewed_id == p.user_id)
            })
            .filter(|p| !state.blocked_between(me, p.user_id))
            .filter_map(|p| state.candidate(me, p))
            .collect();
        Ok(candidates)
    }

    async fn search_candidates(&self, filter: &SearchFilter) -> RepoResult<Vec<Candidate>> {
        let state = self.state.lock();
        let me = filter.requester;
        let candidates = state
            .profiles
            .values()
            .filter(|p| p.user_id != me)
            .filter(|p| filter.accepts_age(p.age))
            .filter(|p| filter.gender.accepts(&p.gender))
            .filter(|p| state.carries_any(p.user_id, &filter.tags))
            .filter(|p| !state.blocked_between(me, p.user_id))
            .filter_map(|p| state.candidate(me, p))
            .filter(|c| filter.accepts_fame(c.fame_rating))
            .collect();
        Ok(candidates)
    }
}

// ============================================================================
// Tags
// ============================================================================

#[async_trait]
impl TagRepository for MemoryStore {
    async fn create(&self, name: &str) -> RepoResult<Tag> {
        let mut state = self.state.lock();
        state.check_writable()?;
        if state.tags.values().any(|t| t.name == name) {
            return Err(DomainError::TagAlreadyExists);
        }
        let tag = Tag {
            id: TagId::new(state.next_id()),
            name: name.to_string(),
        };
        state.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn find_by_id(&self, id: TagId) -> RepoResult<Option<Tag>> {
        Ok(self.state.lock().tags.get(&id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Tag>> {
        let mut out: Vec<Tag> = self.state.lock().tags.values().cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn delete(&self, id: TagId) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.tags.remove(&id).ok_or(DomainError::TagNotFound(id))?;
        state.user_tags.retain(|(_, t)| *t != id);
        Ok(())
    }

    async fn assign(&self, user_id: UserId, tag_id: TagId) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.check_writable()?;
        state.require_user(user_id)?;
        if !state.tags.contains_key(&tag_id) {
            return Err(DomainError::TagNotFound(tag_id));
        }
        if !state.user_tags.insert((user_id, tag_id)) {
            return Err(DomainError::TagAlreadyAssigned);
        }
        Ok(())
    }

    async fn unassign(&self, user_id: UserId, tag_id: TagId) -> RepoResult<()> {
        if self.state.lock().user_tags.remove(&(user_id, tag_id)) {
            Ok(())
        } else {
            Err(DomainError::TagNotAssigned)
        }
    }

    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Tag>> {
        let state = self.state.lock();
        let mut out: Vec<Tag> = state
            .user_tags
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, t)| state.tags.get(t).cloned())
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn popular(&self, limit: i64) -> RepoResult<Vec<TagUsage>> {
        let state = self.state.lock();
        let mut out: Vec<TagUsage> = state
            .tags
            .values()
            .map(|t| TagUsage {
                id: t.id,
                name: t.name.clone(),
                usage_count: state
                    .user_tags
                    .iter()
                    .filter(|(_, id)| *id == t.id)
                    .count() as i64,
            })
            .collect();
        out.sort_by(|a, b| b.usage_count.cmp(&a.usage_count).then_with(|| a.name.cmp(&b.name)));
        out.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(out)
    }

    async fn search(&self, query: &str, limit: i64) -> RepoResult<Vec<Tag>> {
        let needle = query.to_lowercase();
        let mut out: Vec<Tag> = self
            .state
            .lock()
            .tags
            .values()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(out)
    }
}

// ============================================================================
// Swipes & matches
// ============================================================================

#[async_trait]
impl SwipeRepository for MemoryStore {
    async fn apply_swipe(
        &self,
        swiper: UserId,
        swiped: UserId,
        direction: SwipeDirection,
    ) -> RepoResult<SwipeOutcome> {
        let pair = MatchPair::new(swiper, swiped)
            .ok_or_else(|| DomainError::validation("Users cannot swipe on themselves"))?;

        let mut state = self.state.lock();
        state.check_writable()?;
        let actor_name = state.user_name(swiper)?;
        let target_name = state.user_name(swiped)?;

        if let Some(existing) = state
            .swipes
            .iter_mut()
            .find(|s| s.swiper_id == swiper && s.swiped_id == swiped)
        {
            existing.direction = direction;
            existing.created_at = Utc::now();
        } else {
            let id = SwipeId::new(state.next_id());
            state.swipes.push(Swipe {
                id,
                swiper_id: swiper,
                swiped_id: swiped,
                direction,
                created_at: Utc::now(),
            });
        }

        let reciprocal = direction.is_like()
            && state.swipes.iter().any(|s| {
                s.swiper_id == swiped && s.swiped_id == swiper && s.direction.is_like()
            });

        let created = if reciprocal
            && !state
                .matches
                .iter()
                .any(|m| m.user1_id == pair.low() && m.user2_id == pair.high())
        {
            let now = Utc::now();
            let match_id = MatchId::new(state.next_id());
            let chat_id = ChatId::new(state.next_id());
            state.matches.push(Match {
                id: match_id,
                user1_id: pair.low(),
                user2_id: pair.high(),
                created_at: now,
            });
            state.chats.push(Chat {
                id: chat_id,
                match_id,
                user1_id: pair.low(),
                user2_id: pair.high(),
                created_at: now,
            });
            Some((match_id, chat_id))
        } else {
            None
        };

        let resolution = SwipeResolution::from_observation(direction, created);
        let planned = plan_notifications(
            resolution,
            SwipeParty { id: swiper, name: &actor_name },
            SwipeParty { id: swiped, name: &target_name },
        );
        let mut notifications = Vec::with_capacity(planned.len());
        for new in &planned {
            notifications.push(state.insert_notification(new)?);
        }

        state.refresh_fame(swiped);
        if resolution.created_match() {
            state.refresh_fame(swiper);
        }

        Ok(SwipeOutcome {
            resolution,
            notifications,
        })
    }

    async fn find(&self, swiper: UserId, swiped: UserId) -> RepoResult<Option<Swipe>> {
        Ok(self
            .state
            .lock()
            .swipes
            .iter()
            .find(|s| s.swiper_id == swiper && s.swiped_id == swiped)
            .cloned())
    }

    async fn likes_received(&self, user_id: UserId) -> RepoResult<Vec<SwipeSummary>> {
        let state = self.state.lock();
        let mut out: Vec<SwipeSummary> = state
            .swipes
            .iter()
            .filter(|s| s.swiped_id == user_id && s.direction.is_like())
            .filter_map(|s| {
                let (u, _) = state.users.get(&s.swiper_id)?;
                Some(SwipeSummary {
                    swipe_id: s.id,
                    user_id: u.id,
                    name: u.name.clone(),
                    avatar_url: state.profiles.get(&u.id).map(|p| p.avatar_url.clone()),
                    direction: s.direction,
                    created_at: s.created_at,
                })
            })
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn given(&self, user_id: UserId) -> RepoResult<Vec<SwipeSummary>> {
        let state = self.state.lock();
        let mut out: Vec<SwipeSummary> = state
            .swipes
            .iter()
            .filter(|s| s.swiper_id == user_id)
            .filter_map(|s| {
                let (u, _) = state.users.get(&s.swiped_id)?;
                Some(SwipeSummary {
                    swipe_id: s.id,
                    user_id: u.id,
                    name: u.name.clone(),
                    avatar_url: state.profiles.get(&u.id).map(|p| p.avatar_url.clone()),
                    direction: s.direction,
                    created_at: s.created_at,
                })
            })
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn delete(&self, id: SwipeId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let pos = state
            .swipes
            .iter()
            .position(|s| s.id == id)
            .ok_or(DomainError::SwipeNotFound(id))?;
        let removed = state.swipes.remove(pos);
        state.refresh_fame(removed.swiped_id);
        Ok(())
    }
}

#[async_trait]
impl MatchRepository for MemoryStore {
    async fn find_by_id(&self, id: MatchId) -> RepoResult<Option<Match>> {
        Ok(self.state.lock().matches.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Match>> {
        let mut out: Vec<Match> = self
            .state
            .lock()
            .matches
            .iter()
            .filter(|m| m.user1_id == user_id || m.user2_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn count_by_user(&self, user_id: UserId) -> RepoResult<i64> {
        Ok(MatchRepository::find_by_user(self, user_id).await?.len() as i64)
    }

    async fn stats(&self, user_id: UserId) -> RepoResult<MatchStats> {
        let matches = MatchRepository::find_by_user(self, user_id).await?;
        let now = Utc::now();
        let within = |days: i64| {
            matches
                .iter()
                .filter(|m| m.created_at >= now - Duration::days(days))
                .count() as i64
        };
        Ok(MatchStats {
            total: matches.len() as i64,
            last_7_days: within(7),
            last_30_days: within(30),
        })
    }

    async fn unmatch(&self, id: MatchId) -> RepoResult<Match> {
        let mut state = self.state.lock();
        state.check_writable()?;
        let pos = state
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(DomainError::MatchNotFound(id))?;
        let removed = state.matches.remove(pos);
        let (a, b) = (removed.user1_id, removed.user2_id);
        state.swipes.retain(|s| {
            !(s.direction.is_like()
                && ((s.swiper_id == a && s.swiped_id == b)
                    || (s.swiper_id == b && s.swiped_id == a)))
        });
        let chat = state.chat_for_match(id).map(|c| c.id);
        if let Some(chat_id) = chat {
            state.chats.retain(|c| c.id != chat_id);
            state.messages.retain(|m| m.chat_id != chat_id);
        }
        state.refresh_fame(a);
        state.refresh_fame(b);
        Ok(removed)
    }
}

#[async_trait]
impl ChatRepository for MemoryStore {
    async fn find_by_id(&self, id: ChatId) -> RepoResult<Option<Chat>> {
        Ok(self.state.lock().chats.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Chat>> {
        let mut out: Vec<Chat> = self
            .state
            .lock()
            .chats
            .iter()
            .filter(|c| c.is_participant(user_id))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn unread_count(&self, user_id: UserId) -> RepoResult<i64> {
        let state = self.state.lock();
        let mine: HashSet<ChatId> = state
            .chats
            .iter()
            .filter(|c| c.is_participant(user_id))
            .map(|c| c.id)
            .collect();
        Ok(state
            .messages
            .iter()
            .filter(|m| mine.contains(&m.chat_id) && m.sender_id != user_id && !m.is_read)
            .count() as i64)
    }

    async fn delete(&self, id: ChatId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.chats.len();
        state.chats.retain(|c| c.id != id);
        if state.chats.len() == before {
            return Err(DomainError::ChatNotFound(id));
        }
        state.messages.retain(|m| m.chat_id != id);
        Ok(())
    }
}

// ============================================================================
// Messages & notifications
// ============================================================================

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn create(
        &self,
        chat_id: ChatId,
        sender_id: UserId,
        content: &str,
    ) -> RepoResult<Message> {
        let mut state = self.state.lock();
        state.check_writable()?;
        if !state.chats.iter().any(|c| c.id == chat_id) {
            return Err(DomainError::ChatNotFound(chat_id));
        }
        let message = Message {
            id: MessageId::new(state.next_id()),
            chat_id,
            sender_id,
            content: content.to_string(),
            sent_at: Utc::now(),
            is_read: false,
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        Ok(self.state.lock().messages.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_chat(
        &self,
        chat_id: ChatId,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Message>> {
        Ok(self
            .state
            .lock()
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: MessageId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let message = state
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(DomainError::MessageNotFound(id))?;
        message.is_read = true;
        Ok(())
    }

    async fn mark_chat_read(&self, chat_id: ChatId, reader: UserId) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let mut updated = 0;
        for m in state
            .messages
            .iter_mut()
            .filter(|m| m.chat_id == chat_id && m.sender_id != reader && !m.is_read)
        {
            m.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete(&self, id: MessageId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.messages.len();
        state.messages.retain(|m| m.id != id);
        if state.messages.len() == before {
            return Err(DomainError::MessageNotFound(id));
        }
        Ok(())
    }

    async fn count_by_chat(&self, chat_id: ChatId) -> RepoResult<i64> {
        Ok(self
            .state
            .lock()
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .count() as i64)
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification> {
        let mut state = self.state.lock();
        state.check_writable()?;
        state.insert_notification(notification)
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Notification>> {
        let state = self.state.lock();
        Ok(state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn find_unread(&self, user_id: UserId) -> RepoResult<Vec<Notification>> {
        Ok(self
            .notifications_for(user_id)
            .into_iter()
            .rev()
            .filter(|n| !n.is_read)
            .collect())
    }

    async fn counts(&self, user_id: UserId) -> RepoResult<NotificationCounts> {
        let mine = self.notifications_for(user_id);
        Ok(NotificationCounts {
            total: mine.len() as i64,
            unread: mine.iter().filter(|n| !n.is_read).count() as i64,
        })
    }

    async fn mark_read(&self, id: NotificationId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let n = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(DomainError::NotificationNotFound(id))?;
        n.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: UserId) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let mut updated = 0;
        for n in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete(&self, id: NotificationId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.notifications.len();
        state.notifications.retain(|n| n.id != id);
        if state.notifications.len() == before {
            return Err(DomainError::NotificationNotFound(id));
        }
        Ok(())
    }

    async fn delete_all(&self, user_id: UserId) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let before = state.notifications.len();
        state.notifications.retain(|n| n.user_id != user_id);
        Ok((before - state.notifications.len()) as u64)
    }
}

// ============================================================================
// Views, blocks, reports
// ============================================================================

#[async_trait]
impl ViewRepository for MemoryStore {
    async fn record(&self, viewer: UserId, viewed: UserId) -> RepoResult<ProfileView> {
        let mut state = self.state.lock();
        state.check_writable()?;
        state.require_user(viewer)?;
        state.require_user(viewed)?;
        let view = if let Some(v) = state
            .views
            .iter_mut()
            .find(|v| v.viewer_id == viewer && v.viewed_id == viewed)
        {
            v.created_at = Utc::now();
            v.clone()
        } else {
            let view = ProfileView {
                id: ViewId::new(state.next_id()),
                viewer_id: viewer,
                viewed_id: viewed,
                created_at: Utc::now(),
            };
            state.views.push(view.clone());
            view
        };
        state.refresh_fame(viewed);
        Ok(view)
    }

    async fn received(&self, user_id: UserId) -> RepoResult<Vec<ProfileView>> {
        Ok(self
            .state
            .lock()
            .views
            .iter()
            .filter(|v| v.viewed_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_received(&self, user_id: UserId) -> RepoResult<i64> {
        Ok(self.received(user_id).await?.len() as i64)
    }
}

#[async_trait]
impl BlockRepository for MemoryStore {
    async fn create(&self, blocker: UserId, blocked: UserId) -> RepoResult<Block> {
        let mut state = self.state.lock();
        state.check_writable()?;
        state.require_user(blocked)?;
        if state
            .blocks
            .iter()
            .any(|b| b.blocker_id == blocker && b.blocked_id == blocked)
        {
            return Err(DomainError::AlreadyBlocked);
        }
        let block = Block {
            id: BlockId::new(state.next_id()),
            blocker_id: blocker,
            blocked_id: blocked,
            created_at: Utc::now(),
        };
        state.blocks.push(block.clone());
        state.refresh_fame(blocked);
        Ok(block)
    }

    async fn find_by_blocker(&self, blocker: UserId) -> RepoResult<Vec<Block>> {
        Ok(self
            .state
            .lock()
            .blocks
            .iter()
            .filter(|b| b.blocker_id == blocker)
            .cloned()
            .collect())
    }

    async fn delete(&self, blocker: UserId, blocked: UserId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.blocks.len();
        state
            .blocks
            .retain(|b| !(b.blocker_id == blocker && b.blocked_id == blocked));
        if state.blocks.len() == before {
            return Err(DomainError::BlockNotFound);
        }
        state.refresh_fame(blocked);
        Ok(())
    }

    async fn exists_between(&self, a: UserId, b: UserId) -> RepoResult<bool> {
        Ok(self.state.lock().blocked_between(a, b))
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn create(
        &self,
        reporter: UserId,
        reported: UserId,
        reason: Option<&str>,
    ) -> RepoResult<Report> {
        let mut state = self.state.lock();
        state.check_writable()?;
        state.require_user(reported)?;
        if state
            .reports
            .iter()
            .any(|r| r.reporter_id == reporter && r.reported_id == reported)
        {
            return Err(DomainError::AlreadyReported);
        }
        let report = Report {
            id: ReportId::new(state.next_id()),
            reporter_id: reporter,
            reported_id: reported,
            reason: reason.map(str::to_string),
            created_at: Utc::now(),
        };
        state.reports.push(report.clone());
        state.refresh_fame(reported);
        Ok(report)
    }

    async fn find_received(&self, user_id: UserId) -> RepoResult<Vec<Report>> {
        Ok(self
            .state
            .lock()
            .reports
            .iter()
            .filter(|r| r.reported_id == user_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Publisher
// ============================================================================

/// Records what reached a connected addressee
#[derive(Default)]
pub struct CapturingPublisher {
    online_users: Mutex<HashSet<UserId>>,
    open_chats: Mutex<HashSet<ChatId>>,
    notifications: Mutex<Vec<Notification>>,
    messages: Mutex<Vec<Message>>,
}

impl CapturingPublisher {
    pub fn connect(&self, user: UserId) {
        self.online_users.lock().insert(user);
    }

    pub fn open_chat(&self, chat: ChatId) {
        self.open_chats.lock().insert(chat);
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn notifications_to(&self, user: UserId) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| n.user_id == user)
            .collect()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }
}

impl RealtimePublisher for CapturingPublisher {
    fn publish_notification(&self, notification: &Notification) -> usize {
        if !self.online_users.lock().contains(&notification.user_id) {
            return 0;
        }
        self.notifications.lock().push(notification.clone());
        1
    }

    fn publish_message(&self, message: &Message) -> usize {
        if !self.open_chats.lock().contains(&message.chat_id) {
            return 0;
        }
        self.messages.lock().push(message.clone());
        1
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub publisher: Arc<CapturingPublisher>,
    pub ctx: ServiceContext,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let publisher = Arc::new(CapturingPublisher::default());
        let ctx = ServiceContext::builder()
            .user_repo(store.clone())
            .token_repo(store.clone())
            .profile_repo(store.clone())
            .swipe_repo(store.clone())
            .match_repo(store.clone())
            .chat_repo(store.clone())
            .message_repo(store.clone())
            .notification_repo(store.clone())
            .view_repo(store.clone())
            .block_repo(store.clone())
            .report_repo(store.clone())
            .tag_repo(store.clone())
            .publisher(publisher.clone())
            .jwt_service(Arc::new(JwtService::new(TEST_SECRET, 3600)))
            .build()
            .expect("all dependencies provided");
        Self {
            store,
            publisher,
            ctx,
        }
    }

    pub fn user(&self, name: &str) -> UserId {
        self.store.add_user(name)
    }

    /// Profile with coordinates and enough content to count as complete
    pub fn profile(user: UserId, age: i32, gender: &str, lat: f64, lon: f64) -> Profile {
        Profile {
            user_id: user,
            bio: Some("Here for the coffee".to_string()),
            age,
            gender: gender.to_string(),
            sexual_pref: "both".to_string(),
            location: None,
            latitude: Some(lat),
            longitude: Some(lon),
            avatar_url: "https://img.example.com/avatar.png".to_string(),
            photos: [Some("https://img.example.com/1.png".to_string()), None, None, None, None],
        }
    }
}
