use crate::namenode_state::NamenodeState;
use proto::error::Result;

pub trait Replayer {
    fn replay(&self) -> Result<NamenodeState>;
}
