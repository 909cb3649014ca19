pub mod dispatch;
pub mod employee;
pub mod lookup;

use actix_web::web;
use crate::db::EmployeeStore;

/// Upper bound for request bodies; inline photos make employee bodies large.
pub const BODY_LIMIT: usize = 512 * 1024;

pub fn configure<S: EmployeeStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(BODY_LIMIT))
        .app_data(web::PayloadConfig::new(BODY_LIMIT))
        .service(
            web::resource("/v1/employee")
                .route(web::route().to(dispatch::employee_endpoint::<S>)),
        )
        .service(
            web::resource("/v1/events")
                .route(web::post().to(dispatch::event_endpoint::<S>)),
        );
}
