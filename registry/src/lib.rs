use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    redis::RedisClient,
    repository::{
        area::AreaRepositoryImpl, auth::AuthRepositoryImpl, category::CategoryRepositoryImpl,
        grade::GradeRepositoryImpl, health::HealthCheckRepositoryImpl, loan::LoanRepositoryImpl,
        meeting::MeetingRepositoryImpl, pedagogical_hour::PedagogicalHourRepositoryImpl,
        reservation::ReservationRepositoryImpl, resource::ResourceRepositoryImpl,
        settings::SettingsRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::repository::{
    area::AreaRepository, auth::AuthRepository, category::CategoryRepository,
    grade::GradeRepository, health::HealthCheckRepository, loan::LoanRepository,
    meeting::MeetingRepository, pedagogical_hour::PedagogicalHourRepository,
    reservation::ReservationRepository, resource::ResourceRepository,
    settings::SettingsRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistryImpl {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    category_repository: Arc<dyn CategoryRepository>,
    resource_repository: Arc<dyn ResourceRepository>,
    loan_repository: Arc<dyn LoanRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    meeting_repository: Arc<dyn MeetingRepository>,
    area_repository: Arc<dyn AreaRepository>,
    grade_repository: Arc<dyn GradeRepository>,
    pedagogical_hour_repository: Arc<dyn PedagogicalHourRepository>,
    settings_repository: Arc<dyn SettingsRepository>,
    auth_token_ttl: u64,
}

impl AppRegistryImpl {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let category_repository = Arc::new(CategoryRepositoryImpl::new(pool.clone()));
        let resource_repository = Arc::new(ResourceRepositoryImpl::new(pool.clone()));
        let loan_repository = Arc::new(LoanRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let meeting_repository = Arc::new(MeetingRepositoryImpl::new(pool.clone()));
        let area_repository = Arc::new(AreaRepositoryImpl::new(pool.clone()));
        let grade_repository = Arc::new(GradeRepositoryImpl::new(pool.clone()));
        let pedagogical_hour_repository =
            Arc::new(PedagogicalHourRepositoryImpl::new(pool.clone()));
        let settings_repository = Arc::new(SettingsRepositoryImpl::new(pool));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            category_repository,
            resource_repository,
            loan_repository,
            reservation_repository,
            meeting_repository,
            area_repository,
            grade_repository,
            pedagogical_hour_repository,
            settings_repository,
            auth_token_ttl: app_config.auth.ttl,
        }
    }
}

#[mockall::automock]
pub trait AppRegistryExt {
    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository>;
    fn auth_repository(&self) -> Arc<dyn AuthRepository>;
    fn user_repository(&self) -> Arc<dyn UserRepository>;
    fn category_repository(&self) -> Arc<dyn CategoryRepository>;
    fn resource_repository(&self) -> Arc<dyn ResourceRepository>;
    fn loan_repository(&self) -> Arc<dyn LoanRepository>;
    fn reservation_repository(&self) -> Arc<dyn ReservationRepository>;
    fn meeting_repository(&self) -> Arc<dyn MeetingRepository>;
    fn area_repository(&self) -> Arc<dyn AreaRepository>;
    fn grade_repository(&self) -> Arc<dyn GradeRepository>;
    fn pedagogical_hour_repository(&self) -> Arc<dyn PedagogicalHourRepository>;
    fn settings_repository(&self) -> Arc<dyn SettingsRepository>;
    /// Lifetime of issued access tokens, in seconds.
    fn auth_token_ttl(&self) -> u64;
}

impl AppRegistryExt for AppRegistryImpl {
    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    fn category_repository(&self) -> Arc<dyn CategoryRepository> {
        self.category_repository.clone()
    }

    fn resource_repository(&self) -> Arc<dyn ResourceRepository> {
        self.resource_repository.clone()
    }

    fn loan_repository(&self) -> Arc<dyn LoanRepository> {
        self.loan_repository.clone()
    }

    fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    fn meeting_repository(&self) -> Arc<dyn MeetingRepository> {
        self.meeting_repository.clone()
    }

    fn area_repository(&self) -> Arc<dyn AreaRepository> {
        self.area_repository.clone()
    }

    fn grade_repository(&self) -> Arc<dyn GradeRepository> {
        self.grade_repository.clone()
    }

    fn pedagogical_hour_repository(&self) -> Arc<dyn PedagogicalHourRepository> {
        self.pedagogical_hour_repository.clone()
    }

    fn settings_repository(&self) -> Arc<dyn SettingsRepository> {
        self.settings_repository.clone()
    }

    fn auth_token_ttl(&self) -> u64 {
        self.auth_token_ttl
    }
}

pub type AppRegistry = Arc<dyn AppRegistryExt + Send + Sync + 'static>;
