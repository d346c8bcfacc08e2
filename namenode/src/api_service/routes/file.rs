use crate::api_service::controller::file;
use rocket::{Route, routes};

pub fn routes() -> Vec<Route> {
    routes![
        file::write_plan,
        file::commit,
        file::read_plan,
        file::list_files,
    ]
}
