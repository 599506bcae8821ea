pub mod carts;
pub mod common;
pub mod health;
pub mod jwt;
pub mod menu;
pub mod reservation;
pub mod reviews;
pub mod swagger;
pub mod users;

use actix_web::{guard, web};

use crate::middleware::{AdminGate, AuthMiddleware};

/// Route table shared by the server and the handler tests.
///
/// Several paths carry both a protected GET and open writes, so the protected
/// part is its own guarded resource registered first; requests it does not
/// match fall through to the next resource with the same path.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::greeting))
        .route("/health", web::get().to(health::health_check))
        .route("/jwt", web::post().to(jwt::issue_token));

    // Users
    cfg.service(
        web::resource("/users")
            .guard(guard::Get())
            .wrap(AdminGate)
            .wrap(AuthMiddleware)
            .route(web::get().to(users::list_users)),
    )
    .service(web::resource("/users").route(web::post().to(users::create_user)))
    .service(
        web::resource("/users/admin/{email}")
            .guard(guard::Get())
            .wrap(AuthMiddleware)
            .route(web::get().to(users::admin_status)),
    )
    .service(
        web::resource("/users/admin/{id}")
            .route(web::patch().to(users::promote_user))
            .route(web::delete().to(users::delete_user)),
    );

    // Menu
    cfg.service(
        web::resource("/menu")
            .route(web::get().to(menu::list_menu))
            .route(web::post().to(menu::create_menu_item)),
    )
    .route("/menu/{id}", web::delete().to(menu::delete_menu_item));

    // Reservation
    cfg.service(
        web::resource("/reservation")
            .guard(guard::Get())
            .wrap(AuthMiddleware)
            .route(web::get().to(reservation::list_reservations)),
    )
    .route("/reservation", web::post().to(reservation::create_reservation))
    .route("/reservation/{id}", web::delete().to(reservation::delete_reservation));

    // Reviews: `?email=` selects the caller's own reviews, otherwise the public list
    cfg.service(
        web::resource("/reviews")
            .guard(guard::All(guard::Get()).and(guard::fn_guard(common::has_email_query)))
            .wrap(AuthMiddleware)
            .route(web::get().to(reviews::list_own_reviews)),
    )
    .service(
        web::resource("/reviews")
            .route(web::get().to(reviews::list_reviews))
            .route(web::post().to(reviews::create_review)),
    );

    // Carts
    cfg.service(
        web::resource("/carts")
            .guard(guard::Get())
            .wrap(AuthMiddleware)
            .route(web::get().to(carts::list_cart)),
    )
    .route("/carts", web::post().to(carts::add_to_cart))
    .route("/carts/{id}", web::delete().to(carts::remove_from_cart));
}
