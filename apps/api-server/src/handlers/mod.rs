//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check));
    cfg.service(
        web::scope("/posts")
            .route("/", web::get().to(posts::list_posts))
            .route("/", web::post().to(posts::create_post))
            .route("/{id}", web::get().to(posts::get_post))
            .route("/{id}", web::patch().to(posts::update_post))
            .route("/{id}", web::delete().to(posts::delete_post)),
    );
}
