//! Actix test service wired exactly like `main.rs`.

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use bolao::middleware::RequestTrace;
use bolao::routes;
use bolao::state::app_state::AppState;

pub async fn test_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
