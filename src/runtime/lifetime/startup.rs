use crate::cache::{ObjectCache, ScheduleViewCache, object_cache::MokaCacheWrapper};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::services::notifications::{DisabledNotifier, Notifier, TracingNotifier};
use crate::services::{
    AssignmentService, NotificationDispatcher, ScheduleService, SchedulingGuard, ServiceContext,
    SubjectService, TeacherService, UserService,
};
use crate::storage::Storage;
use actix_web::web;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub schedules: web::Data<ScheduleService>,
    pub assignments: web::Data<AssignmentService>,
    pub teachers: web::Data<TeacherService>,
    pub subjects: web::Data<SubjectService>,
    pub users: web::Data<UserService>,
}

/// 创建缓存实例
fn create_cache(config: &AppConfig) -> Arc<dyn ObjectCache> {
    let cache = MokaCacheWrapper::new(config.cache.max_capacity, config.cache.default_ttl);
    warn!(
        "Moka (in-memory) cache backend initialized, capacity {}",
        config.cache.max_capacity
    );
    Arc::new(cache)
}

/// 根据配置选择通知实现
fn create_notifier(config: &AppConfig) -> Arc<dyn Notifier> {
    if config.notifications.enabled {
        info!(
            "Notifications enabled, sending as {}",
            config.notifications.sender
        );
        Arc::new(TracingNotifier::new(config.notifications.sender.clone()))
    } else {
        warn!("Notifications disabled, messages will be dropped");
        Arc::new(DisabledNotifier)
    }
}

/// 登记初始管理员
/// 身份由外部认证服务签发，这里只需要保证 ADMIN_EMAIL 对应的用户存在
async fn seed_admin(storage: &Arc<dyn Storage>) {
    let Ok(email) = std::env::var("ADMIN_EMAIL") else {
        debug!("ADMIN_EMAIL not set, skipping admin seed");
        return;
    };
    let email = email.trim().to_lowercase();

    match storage.get_user_by_email(&email).await {
        Ok(Some(user)) => {
            debug!("Admin account already registered (ID: {})", user.id);
            return;
        }
        Ok(None) => {
            info!("Registering admin account {}", email);
        }
        Err(e) => {
            warn!("Failed to look up admin account: {}, skipping admin seed", e);
            return;
        }
    }

    let admin_request = CreateUserRequest {
        name: "Administrator".to_string(),
        email,
        role: UserRole::Admin,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => info!("Admin account registered (ID: {})", user.id),
        Err(e) => warn!("Failed to register admin account: {}", e),
    }
}

/// 用给定的存储与缓存组装服务
pub fn build_service_context(
    config: &AppConfig,
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
) -> ServiceContext {
    let notifications = NotificationDispatcher::new(
        create_notifier(config),
        config.notifications.calendar_links,
    );
    let schedule_views = ScheduleViewCache::new(cache, config.cache.schedule_view_ttl);
    let guard = SchedulingGuard::new(config.scheduling.strict_conflict_guard);
    if guard.is_strict() {
        warn!("Strict conflict guard enabled: schedule writes are serialized per teacher");
    }

    ServiceContext::new(storage, notifications, schedule_views, guard)
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和业务服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache(config);
    let ctx = build_service_context(config, storage.clone(), cache.clone());

    Ok(StartupContext {
        storage,
        cache,
        schedules: web::Data::new(ScheduleService::new(ctx.clone())),
        assignments: web::Data::new(AssignmentService::new(ctx.clone())),
        teachers: web::Data::new(TeacherService::new(ctx.clone())),
        subjects: web::Data::new(SubjectService::new(ctx.clone())),
        users: web::Data::new(UserService::new(ctx)),
    })
}
