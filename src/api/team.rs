//! Team API
//!
//! Users, seats and groups of the account's team.
//!
//! # Endpoints
//!
//! - Users: [`get_users`](TeamApi::get_users), [`get_user`](TeamApi::get_user),
//!   [`invite_user`](TeamApi::invite_user), [`change_user_role`](TeamApi::change_user_role),
//!   [`remove_user`](TeamApi::remove_user)
//! - Seats: [`get_seats`](TeamApi::get_seats), [`remove_seat`](TeamApi::remove_seat)
//! - Groups: [`get_groups`](TeamApi::get_groups), [`get_group`](TeamApi::get_group),
//!   [`create_group`](TeamApi::create_group), [`update_group`](TeamApi::update_group),
//!   [`delete_group`](TeamApi::delete_group)
//! - Group roles: [`add_manager_to_group`](TeamApi::add_manager_to_group),
//!   [`remove_manager_from_group`](TeamApi::remove_manager_from_group),
//!   [`add_member_to_group`](TeamApi::add_member_to_group),
//!   [`remove_member_from_group`](TeamApi::remove_member_from_group)

use std::sync::Arc;

use http::Method;

use super::common::{encode_id, Page};
use super::{SignaturitApi, SignaturitContext};
use crate::error::SignaturitError;
use crate::marshal::assemble_form;
use crate::types::{Outcome, ValueMap};

/// Role of a team user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRole {
    Admin,
    Member,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Admin => "admin",
            TeamRole::Member => "member",
        }
    }
}

/// Membership kind inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupRole {
    Managers,
    Members,
}

impl GroupRole {
    fn segment(self) -> &'static str {
        match self {
            GroupRole::Managers => "managers",
            GroupRole::Members => "members",
        }
    }
}

/// Team API
pub struct TeamApi {
    context: Arc<SignaturitContext>,
}

impl TeamApi {
    /// Create a new TeamApi instance
    pub fn new(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }

    // Users

    /// GET /v3/team/users.json
    pub async fn get_users(&self, page: Page) -> Result<Outcome, SignaturitError> {
        self.context
            .list("/v3/team/users.json".to_string(), page, &ValueMap::new())
            .await
    }

    /// GET /v3/team/users/{id}.json
    pub async fn get_user(&self, user_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .get(format!("/v3/team/users/{}.json", encode_id(user_id)))
            .await
    }

    /// POST /v3/team/users.json
    pub async fn invite_user(&self, email: &str, role: TeamRole) -> Result<Outcome, SignaturitError> {
        let params = ValueMap::new()
            .with("email", email)
            .with("role", role.as_str());
        let fields = assemble_form(&params)?;
        self.context
            .post_multipart("/v3/team/users.json".to_string(), fields)
            .await
    }

    /// PATCH /v3/team/users/{id}.json
    pub async fn change_user_role(
        &self,
        user_id: &str,
        role: TeamRole,
    ) -> Result<Outcome, SignaturitError> {
        let params = ValueMap::new().with("role", role.as_str());
        self.context
            .patch_json(
                format!("/v3/team/users/{}.json", encode_id(user_id)),
                &params,
            )
            .await
    }

    /// DELETE /v3/team/users/{id}.json
    pub async fn remove_user(&self, user_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .delete(format!("/v3/team/users/{}.json", encode_id(user_id)))
            .await
    }

    // Seats

    /// GET /v3/team/seats.json
    pub async fn get_seats(&self, page: Page) -> Result<Outcome, SignaturitError> {
        self.context
            .list("/v3/team/seats.json".to_string(), page, &ValueMap::new())
            .await
    }

    /// DELETE /v3/team/seats/{id}.json
    pub async fn remove_seat(&self, seat_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .delete(format!("/v3/team/seats/{}.json", encode_id(seat_id)))
            .await
    }

    // Groups

    /// GET /v3/team/groups.json
    pub async fn get_groups(&self, page: Page) -> Result<Outcome, SignaturitError> {
        self.context
            .list("/v3/team/groups.json".to_string(), page, &ValueMap::new())
            .await
    }

    /// GET /v3/team/groups/{id}.json
    pub async fn get_group(&self, group_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .get(format!("/v3/team/groups/{}.json", encode_id(group_id)))
            .await
    }

    /// POST /v3/team/groups.json
    pub async fn create_group(&self, name: &str) -> Result<Outcome, SignaturitError> {
        let fields = assemble_form(&ValueMap::new().with("name", name))?;
        self.context
            .post_multipart("/v3/team/groups.json".to_string(), fields)
            .await
    }

    /// PATCH /v3/team/groups/{id}.json
    pub async fn update_group(&self, group_id: &str, name: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .patch_json(
                format!("/v3/team/groups/{}.json", encode_id(group_id)),
                &ValueMap::new().with("name", name),
            )
            .await
    }

    /// DELETE /v3/team/groups/{id}.json
    pub async fn delete_group(&self, group_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .delete(format!("/v3/team/groups/{}.json", encode_id(group_id)))
            .await
    }

    fn group_role_path(group_id: &str, role: GroupRole, user_id: &str) -> String {
        format!(
            "/v3/team/groups/{}/{}/{}.json",
            encode_id(group_id),
            role.segment(),
            encode_id(user_id)
        )
    }

    /// POST /v3/team/groups/{id}/managers/{user_id}.json
    pub async fn add_manager_to_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        let path = Self::group_role_path(group_id, GroupRole::Managers, user_id);
        self.context.call(Method::POST, path).await
    }

    /// DELETE /v3/team/groups/{id}/managers/{user_id}.json
    pub async fn remove_manager_from_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        let path = Self::group_role_path(group_id, GroupRole::Managers, user_id);
        self.context.delete(path).await
    }

    /// POST /v3/team/groups/{id}/members/{user_id}.json
    pub async fn add_member_to_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        let path = Self::group_role_path(group_id, GroupRole::Members, user_id);
        self.context.call(Method::POST, path).await
    }

    /// DELETE /v3/team/groups/{id}/members/{user_id}.json
    pub async fn remove_member_from_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        let path = Self::group_role_path(group_id, GroupRole::Members, user_id);
        self.context.delete(path).await
    }
}

impl SignaturitApi for TeamApi {
    fn context(&self) -> &SignaturitContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "team"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::r#trait::test_support::{create_test_context, multipart_names};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_group_role_path() {
        assert_eq!(
            TeamApi::group_role_path("g1", GroupRole::Managers, "u1"),
            "/v3/team/groups/g1/managers/u1.json"
        );
    }

    #[tokio::test]
    async fn test_invite_user() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/team/users.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = TeamApi::new(create_test_context(&mock_server.uri()));
        let outcome = api
            .invite_user("bob@example.com", TeamRole::Admin)
            .await
            .unwrap();
        assert!(outcome.is_success());

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(multipart_names(&requests[0].body), vec!["email", "role"]);
        assert!(String::from_utf8_lossy(&requests[0].body).contains("admin"));
    }

    #[tokio::test]
    async fn test_change_user_role() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v3/team/users/u1.json"))
            .and(body_json(json!({"role": "member"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = TeamApi::new(create_test_context(&mock_server.uri()));
        let outcome = api.change_user_role("u1", TeamRole::Member).await.unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_group_membership() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/team/groups/g1/members/u1.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v3/team/groups/g1/managers/u2.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = TeamApi::new(create_test_context(&mock_server.uri()));
        assert_eq!(
            api.add_member_to_group("g1", "u1").await.unwrap(),
            Outcome::SuccessEmpty
        );
        assert_eq!(
            api.remove_manager_from_group("g1", "u2").await.unwrap(),
            Outcome::SuccessEmpty
        );
    }

    #[tokio::test]
    async fn test_remove_seat_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v3/team/seats/s1.json"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden seat"))
            .mount(&mock_server)
            .await;

        let api = TeamApi::new(create_test_context(&mock_server.uri()));
        let outcome = api.remove_seat("s1").await.unwrap();
        assert!(matches!(outcome, Outcome::ApiError { status: 403, .. }));
    }

    #[test]
    fn test_api_name() {
        let api = TeamApi::new(create_test_context("http://localhost:0"));
        assert_eq!(api.api_name(), "team");
        assert_eq!(api.context().client().base_url(), "http://localhost:0");
    }
}
