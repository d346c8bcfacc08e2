use proto::types::MessageResponse;
use rocket::{
    Data, Request, Response, State,
    data::ToByteUnit,
    get,
    http::{ContentType, Status},
    post,
    response::{self, Responder, status::Custom},
    serde::json::Json,
};
use storage::{file_storage::FileStorage, storage::Storage};
use tokio::io::AsyncRead;
use utilities::logger::{info, instrument, tracing};

use crate::api_service::error::ApiResult;

/// Stores the raw request body under `block_id`, replacing any earlier copy. The payload
/// size is not capped here; clients keep to the block size.
#[instrument(name = "datanode_write_block", skip(store, payload))]
#[post("/write-block/<block_id>", data = "<payload>")]
pub async fn write_block(
    store: &State<FileStorage>,
    block_id: &str,
    payload: Data<'_>,
) -> ApiResult<Custom<Json<MessageResponse>>> {
    let mut block_stream = payload.open(u64::MAX.bytes());
    let byte_count = store.write(block_id, &mut block_stream).await?;
    info!(%byte_count, "Successfully wrote block");
    Ok(Custom(
        Status::Created,
        Json(MessageResponse {
            message: format!("Block '{block_id}' stored successfully."),
        }),
    ))
}

/// Block bytes sent as the response body straight from the store's reader.
pub struct BlockStream(Box<dyn AsyncRead + Unpin + Send>);

impl<'r> Responder<'r, 'static> for BlockStream {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::Binary)
            .streamed_body(self.0)
            .ok()
    }
}

#[instrument(name = "datanode_read_block", skip(store))]
#[get("/read-block/<block_id>")]
pub async fn read_block(store: &State<FileStorage>, block_id: &str) -> ApiResult<BlockStream> {
    let block_stream = store.read(block_id).await?;
    info!("Serving block");
    Ok(BlockStream(block_stream))
}
