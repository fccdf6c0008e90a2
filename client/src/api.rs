use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use fleetdash_shared::api::{
    self, ErrorBody, FleetResponse, FleetsResponse, LeaderboardResponse, LoginUrlResponse,
    OverviewResponse, PromoteRequest, RemoveMemberRequest, TournamentsResponse, VerifyResponse,
};
use fleetdash_shared::{
    FleetDetail, FleetSummary, LeaderboardEntry, LeaderboardKind, OverviewStats, Role, Tournament,
    UserIdentity,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("fetch error: {0}")]
    Network(String),
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no error body"))]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("parse error: {0}")]
    Decode(String),
    #[error("not signed in")]
    MissingToken,
}

impl ApiError {
    /// Message the server attached to a failed request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Thin typed client over the fleet API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiClient {
    base: &'static str,
}

impl ApiClient {
    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn login_url(&self) -> Result<String, ApiError> {
        let resp: LoginUrlResponse = self.get(api::AUTH_LOGIN_URL_PATH, None).await?;
        Ok(resp.auth_url)
    }

    pub async fn verify(&self, token: &str) -> Result<UserIdentity, ApiError> {
        let resp: VerifyResponse = self.get(api::AUTH_VERIFY_PATH, Some(token)).await?;
        Ok(resp.user.normalize())
    }

    pub async fn overview(&self) -> Result<OverviewStats, ApiError> {
        let resp: OverviewResponse = self.get(api::STATS_OVERVIEW_PATH, None).await?;
        Ok(resp.stats)
    }

    pub async fn user_fleets(&self, token: Option<&str>) -> Result<Vec<FleetSummary>, ApiError> {
        let token = token.ok_or(ApiError::MissingToken)?;
        let resp: FleetsResponse = self.get(api::FLEETS_PATH, Some(token)).await?;
        Ok(resp.fleets)
    }

    pub async fn fleet(&self, token: Option<&str>, fleet_id: i64) -> Result<FleetDetail, ApiError> {
        let token = token.ok_or(ApiError::MissingToken)?;
        let resp: FleetResponse = self.get(&api::fleet_path(fleet_id), Some(token)).await?;
        Ok(resp.fleet)
    }

    pub async fn promote(
        &self,
        token: Option<&str>,
        fleet_id: i64,
        member_id: i64,
        new_role: Role,
    ) -> Result<(), ApiError> {
        let token = token.ok_or(ApiError::MissingToken)?;
        let body = PromoteRequest {
            member_id,
            new_role,
        };
        self.post(&api::promote_path(fleet_id), token, &body).await
    }

    pub async fn remove_member(
        &self,
        token: Option<&str>,
        fleet_id: i64,
        member_id: i64,
    ) -> Result<(), ApiError> {
        let token = token.ok_or(ApiError::MissingToken)?;
        let body = RemoveMemberRequest { member_id };
        self.post(&api::remove_member_path(fleet_id), token, &body)
            .await
    }

    pub async fn leaderboard(&self, kind: LeaderboardKind) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let resp: LeaderboardResponse = self.get(&api::leaderboard_path(kind), None).await?;
        Ok(resp.leaderboard)
    }

    pub async fn tournaments(&self) -> Result<Vec<Tournament>, ApiError> {
        let resp: TournamentsResponse = self.get(api::TOURNAMENTS_PATH, None).await?;
        Ok(resp.tournaments)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, ApiError> {
        let mut request = Request::get(&self.url(path));
        if let Some(token) = token {
            request = with_bearer(request, token);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = ensure_ok(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post<B: Serialize>(&self, path: &str, token: &str, body: &B) -> Result<(), ApiError> {
        let request = with_bearer(Request::post(&self.url(path)), token)
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        ensure_ok(resp).await.map(|_| ())
    }
}

fn with_bearer(request: RequestBuilder, token: &str) -> RequestBuilder {
    request.header("Authorization", &format!("Bearer {token}"))
}

async fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let message = resp.json::<ErrorBody>().await.ok().map(|body| body.error);
    Err(ApiError::Status { status, message })
}
