use crate::{api::employee, auth::middleware::auth_middleware};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            .wrap(from_fn(auth_middleware))
            // /employees
            .service(web::resource("").route(web::get().to(employee::list_employees)))
            .service(web::resource("/add").route(web::post().to(employee::add_employee)))
            .service(web::resource("/search").route(web::get().to(employee::search_employees)))
            // /employees/{op}/{id}
            .service(web::resource("/delete/{id}").route(web::get().to(employee::delete_employee)))
            .service(
                web::resource("/update/{id}")
                    .route(web::get().to(employee::edit_employee))
                    .route(web::post().to(employee::update_employee)),
            )
            .service(web::resource("/detail/{id}").route(web::get().to(employee::detail_employee)))
            .service(
                web::resource("/change-password/{employee_id}")
                    .route(web::post().to(employee::change_password)),
            ),
    );
}
