//! Handlers for the `/user` resource: registration, sessions, profile, roles.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use quill_core::error::CoreError;
use quill_core::roles::Role;
use quill_core::types::DbId;
use quill_core::user::{
    check_password_confirmation, normalize_identity, validate_bio, validate_username,
    MAX_USERNAME_LENGTH,
};
use quill_db::models::auth_token::CreateAuthToken;
use quill_db::models::user::{CreateUser, UpdateUser, User};
use quill_db::repositories::{AuthTokenRepo, RoleRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::token::generate_session_token;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;

// `validator` length bounds are `u64`.
const MAX_USERNAME_LENGTH_U64: u64 = MAX_USERNAME_LENGTH as u64;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Returned for both an unknown account and a wrong password.
const WRONG_CREDENTIALS: &str = "Wrong credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /user/register/`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH_U64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /user/login/`. Either `username` or `email` identifies the account.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    /// `null` when the account has no role record.
    pub role: Option<Role>,
}

/// Request body for `PUT /user/update_user/`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH_U64))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Request body for `PUT /user/change_password/`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Request body for `PUT /user/update_role/{username}/`.
///
/// Either a role name, or the three legacy flags with exactly one set.
/// An empty body assigns `blogger`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Option<String>,
    pub is_moderator: Option<bool>,
    pub is_blogger: Option<bool>,
    pub is_admin: Option<bool>,
}

impl UpdateRoleRequest {
    fn resolve(&self) -> Result<Role, CoreError> {
        if let Some(name) = &self.role {
            return Role::parse(name);
        }
        if self.is_moderator.is_none() && self.is_blogger.is_none() && self.is_admin.is_none() {
            return Ok(Role::default());
        }
        Role::from_flags(
            self.is_moderator.unwrap_or(false),
            self.is_blogger.unwrap_or(false),
            self.is_admin.unwrap_or(false),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct RoleAssignment {
    pub username: String,
    pub role: Role,
}

/// Request body for `PUT /user/update_bio/`.
#[derive(Debug, Deserialize)]
pub struct UpdateBioRequest {
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Serialize)]
pub struct BioResponse {
    pub bio: String,
}

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

// ---------------------------------------------------------------------------
// Registration and sessions
// ---------------------------------------------------------------------------

/// POST /api/v1/user/register/
///
/// Create an account with the `blogger` role. Username and email are stored
/// lower-cased; either already in use is a 400.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let username = normalize_identity(&input.username);
    let email = normalize_identity(&input.email);
    validate_username(&username)?;
    validate_password_strength(&input.password, state.config.auth.min_password_length)?;

    if UserRepo::username_taken(&state.pool, &username, None).await? {
        return Err(AppError::Core(CoreError::Validation(
            "Username already exists.".into(),
        )));
    }
    if UserRepo::email_taken(&state.pool, &email, None).await? {
        return Err(AppError::Core(CoreError::Validation(
            "Email already exists.".into(),
        )));
    }

    let password_hash = hash_password(&input.password)?;

    let mut tx = state.pool.begin().await?;
    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            username,
            email,
            password_hash,
        },
    )
    .await?;
    RoleRepo::create_for_user(&mut *tx, user.id, Role::Blogger).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserSummary::from(user),
        }),
    ))
}

/// POST /api/v1/user/login/
///
/// Issue a new session token. Unknown accounts and wrong passwords are
/// indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let username = input.username.as_deref().map(normalize_identity).filter(|s| !s.is_empty());
    let email = input.email.as_deref().map(normalize_identity).filter(|s| !s.is_empty());

    let user = match (username, email) {
        (Some(username), _) => UserRepo::find_by_username(&state.pool, &username).await?,
        (None, Some(email)) => UserRepo::find_by_email(&state.pool, &email).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "You need to provide username or email in order to log in!".into(),
            ))
        }
    };
    let user = user.ok_or_else(|| AppError::NotFound(WRONG_CREDENTIALS.into()))?;

    let password_valid = verify_password(&input.password, &user.password_hash)?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::NotFound(WRONG_CREDENTIALS.into()));
    }

    let (token, token_hash) = generate_session_token();
    AuthTokenRepo::create(
        &state.pool,
        &CreateAuthToken {
            user_id: user.id,
            token_hash,
            expires_at: state.config.auth.expires_at(Utc::now()),
        },
    )
    .await?;

    let role = RoleRepo::find_for_user(&state.pool, user.id)
        .await?
        .and_then(|r| r.parsed_role());

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            token,
            username: user.username,
            role,
        },
    }))
}

/// GET|POST /api/v1/user/logout/
///
/// Destroy the session token used for this request. Other sessions survive.
pub async fn logout(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    AuthTokenRepo::delete(&state.pool, auth.token_id).await?;

    tracing::info!(user_id = auth.user_id, "User logged out");

    Ok(Json(DataResponse {
        data: MessageResponse {
            message: "Successfully logged out.",
        },
    }))
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// PUT /api/v1/user/update_user/
///
/// Change the caller's username and/or email.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let username = input.username.as_deref().map(normalize_identity);
    let email = input.email.as_deref().map(normalize_identity);

    if let Some(username) = &username {
        validate_username(username)?;
        if UserRepo::username_taken(&state.pool, username, Some(auth.user_id)).await? {
            return Err(AppError::Core(CoreError::Validation(
                "Username already exists".into(),
            )));
        }
    }
    if let Some(email) = &email {
        if UserRepo::email_taken(&state.pool, email, Some(auth.user_id)).await? {
            return Err(AppError::Core(CoreError::Validation(
                "Email already exists".into(),
            )));
        }
    }

    let user = UserRepo::update(&state.pool, auth.user_id, &UpdateUser { username, email })
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "User updated");

    Ok(Json(DataResponse {
        data: UserSummary::from(user),
    }))
}

/// PUT /api/v1/user/change_password/
///
/// Requires the current password. Every other session of the user is ended.
pub async fn change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    check_password_confirmation(&input.new_password, &input.confirm_password)?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Incorrect old password.".into(),
        )));
    }

    validate_password_strength(&input.new_password, state.config.auth.min_password_length)?;
    let password_hash = hash_password(&input.new_password)?;

    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;
    let ended = AuthTokenRepo::delete_others_for_user(&state.pool, user.id, auth.token_id).await?;

    tracing::info!(user_id = user.id, ended_sessions = ended, "Password changed");

    Ok(Json(DataResponse {
        data: MessageResponse {
            message: "Password changed successfully.",
        },
    }))
}

/// GET /api/v1/user/update_bio/
pub async fn get_bio(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let record = RoleRepo::find_for_user(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    Ok(Json(DataResponse {
        data: BioResponse { bio: record.bio },
    }))
}

/// PUT /api/v1/user/update_bio/
pub async fn update_bio(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateBioRequest>,
) -> AppResult<impl IntoResponse> {
    validate_bio(&input.bio)?;

    let record = RoleRepo::update_bio(&state.pool, auth.user_id, &input.bio)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    tracing::info!(user_id = auth.user_id, "Bio updated");

    Ok(Json(DataResponse {
        data: BioResponse { bio: record.bio },
    }))
}

/// GET /api/v1/user/users_list/
pub async fn users_list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list_with_bio(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

/// PUT /api/v1/user/update_role/{username}/
///
/// Admin only. Creates the role record if the user has none.
pub async fn update_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
    AppJson(input): AppJson<UpdateRoleRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_username(&state.pool, &normalize_identity(&username))
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    let role = input.resolve()?;
    RoleRepo::upsert_role(&state.pool, user.id, role).await?;

    tracing::info!(user_id = user.id, role = %role, admin_id = admin.user_id, "Role updated");

    Ok(Json(DataResponse {
        data: RoleAssignment {
            username: user.username,
            role,
        },
    }))
}
