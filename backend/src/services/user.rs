//! User service for authentication and account management
//!
//! Password hashing and verification run on the blocking thread pool; the
//! JWT service is passed by reference and carries pre-computed keys.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, UpdateUser, UserRecord, UserRepository};
use fitness_planner_shared::types::{
    AuthResponse, AuthTokens, LoginRequest, SignupRequest, UpdateUserRequest, UserResponse,
};
use fitness_planner_shared::validation;
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidateEmail;

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user and hand back tokens plus the user representation
    pub async fn signup(
        pool: &PgPool,
        jwt: &JwtService,
        req: SignupRequest,
    ) -> Result<AuthResponse, ApiError> {
        validation::validate_username(&req.username).map_err(ApiError::Validation)?;
        if !req.email.validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
        validation::validate_password(&req.password).map_err(ApiError::Validation)?;

        if UserRepository::email_taken(pool, &req.email, None).await? {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }
        if UserRepository::username_taken(pool, &req.username, None).await? {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(
            pool,
            NewUser {
                username: req.username,
                email: req.email,
                password_hash,
                first_name: req.first_name,
                last_name: req.last_name,
            },
        )
        .await?;

        Self::auth_response(jwt, user)
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        req: LoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        let user = UserRepository::find_by_email(pool, &req.email)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = PasswordService::verify_async(req.password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::auth_response(jwt, user)
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthResponse, ApiError> {
        let claims = jwt
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Self::auth_response(jwt, user)
    }

    /// The authenticated user's representation
    pub async fn get_me(pool: &PgPool, user_id: Uuid) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(Self::user_response(user))
    }

    /// Update the authenticated user; absent fields are left unchanged
    pub async fn update_me(
        pool: &PgPool,
        user_id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        if let Some(email) = &req.email {
            if !email.validate_email() {
                return Err(ApiError::Validation("Invalid email format".to_string()));
            }
            if UserRepository::email_taken(pool, email, Some(user_id)).await? {
                return Err(ApiError::Conflict("Email already registered".to_string()));
            }
        }
        if let Some(username) = &req.username {
            validation::validate_username(username).map_err(ApiError::Validation)?;
            if UserRepository::username_taken(pool, username, Some(user_id)).await? {
                return Err(ApiError::Conflict("Username already taken".to_string()));
            }
        }

        let user = UserRepository::update(
            pool,
            user_id,
            UpdateUser {
                username: req.username,
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(Self::user_response(user))
    }

    fn auth_response(jwt: &JwtService, user: UserRecord) -> Result<AuthResponse, ApiError> {
        let access_token = jwt
            .generate_access_token(user.id)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt
            .generate_refresh_token(user.id)
            .map_err(ApiError::Internal)?;

        Ok(AuthResponse {
            user: Self::user_response(user),
            tokens: AuthTokens {
                access_token,
                refresh_token,
                token_type: "Bearer".to_string(),
                expires_in: jwt.access_token_expiry_secs(),
            },
        })
    }

    pub(crate) fn user_response(user: UserRecord) -> UserResponse {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}
