//! Login, logout and first-boot admin seeding

use anyhow::Result;
use serde_json::json;
use std::net::IpAddr;
use tracing::{info, warn};

use crate::config::AdminSeed;
use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::auth::jwt::{IssuedToken, JwtService};
use crate::domains::auth::models::{CreateUser, Session, User, UserRole};
use crate::domains::auth::password::{hash_password, verify_password};
use crate::domains::auth::throttle::LoginThrottle;
use crate::kernel::ServerDeps;

pub enum LoginOutcome {
    Success { user: User, token: IssuedToken },
    /// Too many failures from this address; credentials were not checked
    Locked,
    Failed,
}

/// Check credentials for `login` (username or email).
///
/// A locked address is rejected before the database is touched. Failures
/// count toward the lockout and are written to the activity log anonymously.
pub async fn login(
    login: &str,
    password: &str,
    client_ip: IpAddr,
    ctx: &ActivityContext,
    jwt: &JwtService,
    throttle: &LoginThrottle,
    deps: &ServerDeps,
) -> Result<LoginOutcome> {
    if throttle.is_locked(client_ip) {
        warn!(ip = %client_ip, "Login rejected, address is locked out");
        return Ok(LoginOutcome::Locked);
    }

    let user = User::find_by_login(login, &deps.db_pool)
        .await?
        .filter(|user| user.is_active())
        .filter(|user| verify_password(password, &user.password_hash));

    let Some(user) = user else {
        let attempts = throttle.record_failure(client_ip);
        warn!(ip = %client_ip, attempts, "Failed login");
        log_activity(
            ctx,
            "login_failed",
            json!({ "username": login, "attempts": attempts }),
            &deps.db_pool,
        )
        .await;
        return Ok(LoginOutcome::Failed);
    };

    throttle.clear(client_ip);

    let token = jwt.create_token(user.id.into_uuid(), &user.username, user.role)?;
    Session::create(
        &token.jti,
        user.id,
        ctx.ip_address.as_deref(),
        ctx.user_agent.as_deref(),
        token.expires_at,
        &deps.db_pool,
    )
    .await?;

    let ctx = ActivityContext {
        user_id: Some(user.id),
        ..ctx.clone()
    };
    log_activity(&ctx, "login", json!({ "username": user.username }), &deps.db_pool).await;
    info!(user_id = %user.id, "User logged in");

    Ok(LoginOutcome::Success { user, token })
}

/// Drop the session row for this token
pub async fn logout(jti: &str, ctx: &ActivityContext, deps: &ServerDeps) -> Result<()> {
    let removed = Session::delete(jti, &deps.db_pool).await?;
    log_activity(ctx, "logout", json!({ "session_removed": removed }), &deps.db_pool).await;
    Ok(())
}

/// Create the configured admin when the database has none yet
pub async fn seed_admin(seed: &AdminSeed, deps: &ServerDeps) -> Result<Option<User>> {
    if User::count_admins(&deps.db_pool).await? > 0 {
        return Ok(None);
    }

    let user = User::create(
        CreateUser {
            username: seed.username.clone(),
            email: seed.email.clone(),
            password_hash: hash_password(&seed.password)?,
            role: UserRole::Admin,
        },
        &deps.db_pool,
    )
    .await?;

    info!(username = %user.username, "Seeded admin user");
    Ok(Some(user))
}
