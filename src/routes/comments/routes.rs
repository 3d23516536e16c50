use crate::routes;
use actix_web::web;

pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create", web::post().to(routes::create_comment))
        .route("/update/{id}", web::patch().to(routes::update_comment))
        .route(
            "/get/post/{id}",
            web::get().to(routes::show_comments_for_post),
        )
        .route("/delete/{id}", web::delete().to(routes::delete_comment));
}
