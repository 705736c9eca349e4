pub mod auth;
pub mod health;
pub mod tasks;

use std::sync::Arc;

use actix_web::web;

use crate::auth::{AuthGate, Credentials, TokenService};
use crate::error::{AppError, MSG_CREATE_FAILED};
use crate::store::TaskStore;

/// Everything the routes need, built once at startup and cloned into each worker.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn TaskStore>,
    pub credentials: Credentials,
    pub tokens: TokenService,
}

impl ApiContext {
    pub fn new(store: Arc<dyn TaskStore>, credentials: Credentials, tokens: TokenService) -> Self {
        Self {
            store,
            credentials,
            tokens,
        }
    }

    /// Registers shared state and every route. `/tasks` sits behind the [`AuthGate`].
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.store.clone()))
            .app_data(web::Data::new(self.credentials.clone()))
            .app_data(web::Data::new(self.tokens.clone()))
            .service(health::health)
            .service(web::scope("/auth").service(auth::login))
            .service(
                web::scope("/tasks")
                    .wrap(AuthGate::new(self.tokens.clone()))
                    .app_data(json_config(MSG_CREATE_FAILED))
                    .service(tasks::list_tasks)
                    .service(tasks::create_task)
                    .service(tasks::complete_task)
                    .service(tasks::delete_task),
            );
    }
}

/// Answers unreadable JSON bodies with a 400 `{"message"}` body.
fn json_config(message: &'static str) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, req| {
        log::warn!("unreadable JSON body on {}: {}", req.path(), err);
        AppError::BadRequest(message.into()).into()
    })
}
