use crate::api_service::controller::block;
use rocket::{Route, routes};

pub fn routes() -> Vec<Route> {
    routes![block::write_block, block::read_block]
}
